//! 인증 서비스 모듈

pub mod gateway;
pub mod profile_fetcher;

pub use gateway::{AuthGateway, HttpAuthGateway};
pub use profile_fetcher::{HttpProfileFetcher, ProfileFetcher};
