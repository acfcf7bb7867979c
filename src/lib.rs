//! 세션 동기화 백엔드
//!
//! 로그인 세션을 서로 다른 유효기간과 신뢰 속성을 가진 세 계층에 걸쳐
//! 일관되게 유지하는 서비스입니다: 클라이언트 내구 저장소(TokenStore),
//! 서버 세션 쿠키(ServerSessionStore), 그리고 메모리 내 세션 상태
//! (SessionController)입니다.
//!
//! # Features
//!
//! - **토큰 저장소**: 자격 증명 쌍의 내구 저장과 탭 간 변경 알림
//! - **서버 세션**: HttpOnly 쿠키 기반 세션 수립/해제/확인 API
//! - **인증 게이트웨이**: 이메일/프로바이더 로그인의 정규화된 진입점
//! - **세션 컨트롤러**: 낙관적 2단계 로그인과 로그아웃 우선 경합 해소를
//!   갖춘 상태 기계
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐
//! │  SessionController   │ ← 상태 기계, 경합 해소, 탭 간 동기화
//! └──────────────────────┘
//!      │            │
//!      ▼            ▼
//! ┌──────────┐ ┌─────────────────┐
//! │ Services │ │     Stores      │
//! │ (auth)   │ │ Token / Server  │
//! └──────────┘ └─────────────────┘
//!      │            │
//!      ▼            ▼
//! ┌──────────┐ ┌─────────────────┐
//! │ 인증 API │ │ 파일 + 쿠키 API │
//! └──────────┘ └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use session_sync_backend::config::ServerConfig;
//! use session_sync_backend::services::auth::{HttpAuthGateway, HttpProfileFetcher};
//! use session_sync_backend::services::session::SessionController;
//! use session_sync_backend::stores::{FileTokenBackend, HttpServerSessionStore, TokenStore};
//!
//! let store = TokenStore::new(Box::new(FileTokenBackend::new(ServerConfig::token_store_path())));
//! let controller = SessionController::new(
//!     store.open_tab(),
//!     Arc::new(HttpServerSessionStore::new()?),
//!     Arc::new(HttpAuthGateway::new()),
//!     Arc::new(HttpProfileFetcher::new()),
//! );
//!
//! controller.initialize().await?;
//! controller.spawn_cross_tab_sync();
//! ```

pub mod config;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod middlewares;
pub mod routes;
pub mod services;
pub mod stores;
