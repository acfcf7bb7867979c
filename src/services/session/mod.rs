//! 세션 수명주기 모듈

pub mod controller;

pub use controller::SessionController;
