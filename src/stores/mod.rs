//! 저장소 모듈
//!
//! 자격 증명 쌍이 머무는 두 장소를 제공합니다:
//! 클라이언트 내구 저장소(TokenStore)와 서버 세션 쿠키(ServerSessionStore).

pub mod server_session;
pub mod token_store;

pub use server_session::{HttpServerSessionStore, MemoryServerSessionStore, ServerSessionStore};
pub use token_store::{
    FileTokenBackend, MemoryTokenBackend, TokenBackend, TokenChange, TokenStore, TokenStoreHandle,
};
