//! Session HTTP Handlers
//!
//! 서버 세션 저장소의 HTTP 표면을 처리하는 핸들러 함수들입니다.
//! 자격 증명 쌍을 HttpOnly 쿠키로 수립/해제하며, 쿠키 값은
//! 스크립트 레벨 코드에 절대 노출되지 않습니다.
//!
//! # Endpoints
//!
//! - **세션 수립**: 자격 증명 쌍을 쿠키로 설정 (`POST /session`)
//! - **세션 해제**: 쿠키 제거 (`DELETE /session`)
//! - **세션 확인**: 쿠키 존재 여부만 보고 (`GET /session`)
use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{delete, get, post, web, HttpResponse};
use serde_json::json;
use validator::Validate;

use crate::config::{CookieConfig, TokenTtlConfig};
use crate::domain::dto::EstablishSessionRequest;
use crate::errors::SessionError;
use crate::middlewares::SessionCookies;

/// 자격 증명 쿠키를 생성합니다.
///
/// 모든 자격 증명 쿠키는 HttpOnly이며, 운영 프로파일에서는 Secure가 적용됩니다.
fn credential_cookie(name: String, value: String, max_age: Duration) -> Cookie<'static> {
    Cookie::build(name, value)
        .path("/")
        .http_only(true)
        .secure(CookieConfig::secure())
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .finish()
}

/// 즉시 만료되는 제거용 쿠키를 생성합니다.
fn removal_cookie(name: String) -> Cookie<'static> {
    Cookie::build(name, "")
        .path("/")
        .http_only(true)
        .secure(CookieConfig::secure())
        .same_site(SameSite::Lax)
        .max_age(Duration::ZERO)
        .finish()
}

/// 세션 수립 핸들러
///
/// 자격 증명 쌍을 받아 HttpOnly 쿠키로 설정합니다.
/// 액세스 토큰 쿠키와 (있다면) 리프레시 토큰 쿠키가 각자의 TTL로 설정됩니다.
///
/// # Endpoint
/// `POST /session`
#[post("")]
pub async fn establish_session(
    payload: web::Json<EstablishSessionRequest>,
) -> Result<HttpResponse, SessionError> {
    // 유효성 검사
    payload
        .validate()
        .map_err(|e| SessionError::ValidationError(e.to_string()))?;

    log::info!("서버 세션 수립");

    let mut response = HttpResponse::Ok();

    response.cookie(credential_cookie(
        CookieConfig::access_cookie_name(),
        payload.access_token.clone(),
        Duration::hours(TokenTtlConfig::access_ttl_hours()),
    ));

    if let Some(refresh_token) = &payload.refresh_token {
        response.cookie(credential_cookie(
            CookieConfig::refresh_cookie_name(),
            refresh_token.clone(),
            Duration::days(TokenTtlConfig::refresh_ttl_days()),
        ));
    }

    Ok(response.json(json!({ "success": true })))
}

/// 세션 해제 핸들러
///
/// 자격 증명 쿠키를 제거합니다. 이미 세션이 없어도 성공합니다 (멱등).
///
/// # Endpoint
/// `DELETE /session`
#[delete("")]
pub async fn clear_session() -> Result<HttpResponse, SessionError> {
    log::info!("서버 세션 해제");

    Ok(HttpResponse::Ok()
        .cookie(removal_cookie(CookieConfig::access_cookie_name()))
        .cookie(removal_cookie(CookieConfig::refresh_cookie_name()))
        .json(json!({ "success": true })))
}

/// 세션 상태 확인 핸들러
///
/// 자격 증명 쿠키의 존재 여부만 보고합니다.
/// 쿠키 값 자체는 응답에 포함되지 않습니다.
///
/// # Endpoint
/// `GET /session`
#[get("")]
pub async fn session_status(cookies: SessionCookies) -> Result<HttpResponse, SessionError> {
    Ok(HttpResponse::Ok().json(json!({
        "authenticated": cookies.credential().is_some()
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    use actix_web::http::StatusCode;
    use actix_web::{test, App};

    fn session_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().service(
            web::scope("/session")
                .service(establish_session)
                .service(clear_session)
                .service(session_status),
        )
    }

    #[actix_web::test]
    async fn test_establish_session_sets_http_only_cookies() {
        let app = test::init_service(session_app()).await;

        let req = test::TestRequest::post()
            .uri("/session")
            .set_json(json!({
                "access_token": "T1",
                "refresh_token": "R1"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);

        let cookies: Vec<_> = resp.response().cookies().collect();
        assert_eq!(cookies.len(), 2);
        for cookie in &cookies {
            assert!(cookie.http_only().unwrap_or(false));
            assert_eq!(cookie.path(), Some("/"));
        }

        let access = cookies
            .iter()
            .find(|c| c.name() == CookieConfig::access_cookie_name())
            .expect("access cookie missing");
        assert_eq!(access.value(), "T1");
    }

    #[actix_web::test]
    async fn test_establish_session_without_refresh_token() {
        let app = test::init_service(session_app()).await;

        let req = test::TestRequest::post()
            .uri("/session")
            .set_json(json!({ "access_token": "T1" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.response().cookies().count(), 1);
    }

    #[actix_web::test]
    async fn test_establish_session_rejects_empty_access_token() {
        let app = test::init_service(session_app()).await;

        let req = test::TestRequest::post()
            .uri("/session")
            .set_json(json!({ "access_token": "" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_clear_session_expires_cookies() {
        let app = test::init_service(session_app()).await;

        let req = test::TestRequest::delete().uri("/session").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        for cookie in resp.response().cookies() {
            assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        }
    }

    #[actix_web::test]
    async fn test_session_status_reflects_cookie_presence() {
        let app = test::init_service(session_app()).await;

        let req = test::TestRequest::get().uri("/session").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["authenticated"], json!(false));

        let req = test::TestRequest::get()
            .uri("/session")
            .cookie(Cookie::new(CookieConfig::access_cookie_name(), "T1"))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["authenticated"], json!(true));
    }
}
