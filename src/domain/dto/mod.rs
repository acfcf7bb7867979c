//! DTO 모듈

pub mod request;
pub mod response;

pub use request::{
    EmailLoginRequest, EmailSignUpRequest, EstablishSessionRequest, ProviderLoginRequest,
    RefreshTokenRequest,
};
pub use response::{
    LoginResponse, LoginUrlResponse, ProfileResponse, RefreshTokenResponse,
    SessionStatusResponse,
};
