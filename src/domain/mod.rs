//! 도메인 모듈
//!
//! 세션 계층의 모델과 DTO를 제공합니다.

pub mod dto;
pub mod models;

pub use dto::*;
pub use models::*;
