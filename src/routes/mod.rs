//! API 라우트 설정 모듈
//!
//! 서버 세션 저장소의 RESTful 엔드포인트와 헬스체크 엔드포인트를 등록합니다.
//!
//! # Features
//!
//! - 세션 수립/해제/확인 API 엔드포인트
//! - 헬스체크 엔드포인트
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! let app = App::new().configure(configure_all_routes);
//! ```

use actix_web::web;
use serde_json::json;

use crate::handlers;

/// 모든 라우트를 설정합니다
///
/// # Arguments
///
/// * `cfg` - Actix-web 서비스 설정 객체
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    configure_session_routes(cfg);
}

/// 세션 관련 라우트를 설정합니다
///
/// 모든 세션 라우트는 Public 접근이 가능합니다. 세션 수립 자체가
/// 인증 진입점이며, 확인 엔드포인트는 쿠키 존재 여부만 보고합니다.
///
/// # Available Routes
///
/// - `POST /api/v1/session` - 자격 증명 쌍을 HttpOnly 쿠키로 수립
/// - `DELETE /api/v1/session` - 쿠키 제거 (멱등)
/// - `GET /api/v1/session` - 세션 존재 여부 확인
///
/// # Examples
///
/// ```bash
/// # 세션 수립
/// curl -X POST http://localhost:8080/api/v1/session \
///   -H "Content-Type: application/json" \
///   -d '{"access_token":"T1","refresh_token":"R1"}'
///
/// # 세션 확인
/// curl http://localhost:8080/api/v1/session
/// ```
fn configure_session_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/session")
            .service(handlers::session::establish_session)
            .service(handlers::session::clear_session)
            .service(handlers::session::session_status),
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// 로드밸런서나 모니터링 시스템에서 서비스 상태를 확인하는 데 사용됩니다.
///
/// # Examples
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "session_sync_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
