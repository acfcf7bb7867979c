//! # Session Configuration Module
//!
//! 토큰 수명, 세션 쿠키, 외부 인증 API 주소 등 세션 계층의 설정을 관리하는 모듈입니다.
//! 환경 변수 기반으로 동작하며, 운영에 필요한 값에는 합리적인 기본값을 제공합니다.
//!
//! ## 환경 변수 설정
//!
//! ### 토큰 수명 설정
//! ```bash
//! export ACCESS_TOKEN_TTL_HOURS="12"
//! export REFRESH_TOKEN_TTL_DAYS="30"
//! ```
//!
//! ### 세션 쿠키 설정
//! ```bash
//! export SESSION_ACCESS_COOKIE="app_auth_token"
//! export SESSION_REFRESH_COOKIE="refresh_token"
//! export PROFILE="prod"   # prod일 때만 Secure 속성 활성화
//! ```
//!
//! ### 외부 인증 API 설정
//! ```bash
//! export AUTH_API_BASE_URL="http://localhost:8000/api/v1"
//! export OAUTH_REDIRECT_URI="http://localhost:3000/oauth/callback"
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{CookieConfig, TokenTtlConfig};
//!
//! let access_ttl = TokenTtlConfig::access_ttl_hours();
//! let secure = CookieConfig::secure();
//! ```

use std::env;

/// 액세스/리프레시 토큰 수명 설정
///
/// 설계값은 액세스 토큰 12시간, 리프레시 토큰 30일입니다.
/// 쿠키 만료 시간 계산에 사용되며, 토큰 내용 자체는 이 계층에서 해석하지 않습니다.
pub struct TokenTtlConfig;

impl TokenTtlConfig {
    /// 액세스 토큰 수명을 시간 단위로 반환합니다.
    ///
    /// # 환경 변수
    ///
    /// `ACCESS_TOKEN_TTL_HOURS` (기본값: 12)
    pub fn access_ttl_hours() -> i64 {
        env::var("ACCESS_TOKEN_TTL_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(12)
    }

    /// 리프레시 토큰 수명을 일 단위로 반환합니다.
    ///
    /// # 환경 변수
    ///
    /// `REFRESH_TOKEN_TTL_DAYS` (기본값: 30)
    pub fn refresh_ttl_days() -> i64 {
        env::var("REFRESH_TOKEN_TTL_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30)
    }
}

/// 서버 세션 쿠키 설정
///
/// 서버 렌더링 요청을 인가하는 HttpOnly 쿠키의 속성을 관리합니다.
/// 클라이언트 스크립트에서 읽을 수 없어야 하므로 HttpOnly는 항상 켜져 있고,
/// SameSite=Lax, path="/"는 고정입니다.
pub struct CookieConfig;

impl CookieConfig {
    /// 액세스 토큰 쿠키 이름을 반환합니다.
    ///
    /// # 환경 변수
    ///
    /// `SESSION_ACCESS_COOKIE` (기본값: "app_auth_token")
    pub fn access_cookie_name() -> String {
        env::var("SESSION_ACCESS_COOKIE")
            .unwrap_or_else(|_| "app_auth_token".to_string())
    }

    /// 리프레시 토큰 쿠키 이름을 반환합니다.
    ///
    /// # 환경 변수
    ///
    /// `SESSION_REFRESH_COOKIE` (기본값: "refresh_token")
    pub fn refresh_cookie_name() -> String {
        env::var("SESSION_REFRESH_COOKIE")
            .unwrap_or_else(|_| "refresh_token".to_string())
    }

    /// Secure 속성 활성화 여부를 반환합니다.
    ///
    /// 운영 환경(`PROFILE=prod`)에서만 true입니다.
    /// 개발 환경은 HTTP로 동작하므로 Secure를 끄지 않으면 쿠키가 전송되지 않습니다.
    pub fn secure() -> bool {
        env::var("PROFILE")
            .map(|p| p == "prod")
            .unwrap_or(false)
    }
}

/// 외부 인증 API 설정
///
/// AuthGateway와 ProfileFetcher가 호출하는 외부 인증/프로필 API의 주소입니다.
/// 패스워드 검증과 프로필 저장은 이 API의 책임이며, 본 서비스는 호출자일 뿐입니다.
pub struct AuthApiConfig;

impl AuthApiConfig {
    /// 인증 API 베이스 URL을 반환합니다.
    ///
    /// # 환경 변수
    ///
    /// `AUTH_API_BASE_URL` (기본값: "http://localhost:8000/api/v1")
    pub fn base_url() -> String {
        env::var("AUTH_API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8000/api/v1".to_string())
    }

    /// 세션 쿠키 엔드포인트의 베이스 URL을 반환합니다.
    ///
    /// ServerSessionStore 클라이언트가 호출하는 자기 자신(또는 프론트 서버)의 주소입니다.
    ///
    /// # 환경 변수
    ///
    /// `SESSION_API_BASE_URL` (기본값: "http://localhost:8080/api/v1")
    pub fn session_base_url() -> String {
        env::var("SESSION_API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8080/api/v1".to_string())
    }
}

/// OAuth 프로바이더 리다이렉트 설정
///
/// 프로바이더 로그인 URL 생성에 필요한 값을 관리합니다.
/// 실제 토큰 교환(handshake)은 외부 인증 API가 수행합니다.
pub struct OAuthRedirectConfig;

impl OAuthRedirectConfig {
    /// 프로바이더별 OAuth Client ID를 반환합니다.
    ///
    /// # Arguments
    ///
    /// * `provider` - 프로바이더 식별자 소문자 문자열 (예: "kakao")
    ///
    /// # Panics
    ///
    /// `{PROVIDER}_CLIENT_ID` 환경 변수가 설정되지 않은 경우 패닉이 발생합니다.
    pub fn client_id(provider: &str) -> String {
        let key = format!("{}_CLIENT_ID", provider.to_uppercase());
        env::var(&key).unwrap_or_else(|_| panic!("{} must be set", key))
    }

    /// OAuth 인증 완료 후 리디렉션될 URI를 반환합니다.
    ///
    /// # 환경 변수
    ///
    /// `OAUTH_REDIRECT_URI` (기본값: "http://localhost:3000/oauth/callback")
    pub fn redirect_uri() -> String {
        env::var("OAUTH_REDIRECT_URI")
            .unwrap_or_else(|_| "http://localhost:3000/oauth/callback".to_string())
    }
}

/// HTTP 서버 설정
pub struct ServerConfig;

impl ServerConfig {
    /// 서버 바인드 주소를 반환합니다.
    ///
    /// # 환경 변수
    ///
    /// `BIND_ADDRESS` (기본값: "127.0.0.1:8080")
    pub fn bind_address() -> String {
        env::var("BIND_ADDRESS")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
    }

    /// 토큰 파일 저장 경로를 반환합니다.
    ///
    /// 클라이언트 측 내구 저장소(FileTokenBackend)가 사용하는 경로입니다.
    ///
    /// # 환경 변수
    ///
    /// `TOKEN_STORE_PATH` (기본값: ".session/tokens.json")
    pub fn token_store_path() -> String {
        env::var("TOKEN_STORE_PATH")
            .unwrap_or_else(|_| ".session/tokens.json".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ttl_values() {
        // 환경 변수 미설정 시 설계 기본값 사용
        if env::var("ACCESS_TOKEN_TTL_HOURS").is_err() {
            assert_eq!(TokenTtlConfig::access_ttl_hours(), 12);
        }
        if env::var("REFRESH_TOKEN_TTL_DAYS").is_err() {
            assert_eq!(TokenTtlConfig::refresh_ttl_days(), 30);
        }
    }

    #[test]
    fn test_default_cookie_names() {
        if env::var("SESSION_ACCESS_COOKIE").is_err() {
            assert_eq!(CookieConfig::access_cookie_name(), "app_auth_token");
        }
        if env::var("SESSION_REFRESH_COOKIE").is_err() {
            assert_eq!(CookieConfig::refresh_cookie_name(), "refresh_token");
        }
    }
}
