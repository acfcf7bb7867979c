//! 서비스 모듈
//!
//! 인증 게이트웨이/프로필 조회(auth)와 세션 수명주기 오케스트레이션(session)을
//! 제공합니다.

pub mod auth;
pub mod session;
