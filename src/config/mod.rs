//! 설정 모듈
//!
//! 세션 계층에 필요한 모든 환경 설정을 제공합니다.

pub mod session_config;

pub use session_config::{
    AuthApiConfig, CookieConfig, OAuthRedirectConfig, ServerConfig, TokenTtlConfig,
};
