//! 요청 파이프라인 모듈

pub mod session_cookie;

pub use session_cookie::SessionCookies;
