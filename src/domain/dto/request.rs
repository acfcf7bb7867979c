//! 요청 DTO 모듈
//!
//! 외부 인증 API 및 세션 쿠키 엔드포인트로 향하는 요청 본문입니다.
//! 검증 제약(패스워드 최소 6자, 사용자 이름 2~50자)은 프로필 저장소의 규칙과 동일합니다.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 이메일/패스워드 로그인 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmailLoginRequest {
    /// 사용자 이메일
    #[validate(email(message = "Valid email is required"))]
    pub email: String,
    /// 패스워드
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// 이메일/패스워드 회원가입 요청
///
/// 회원가입은 인증과 동시에 표시 이름(username)을 예약합니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmailSignUpRequest {
    /// 사용자 이메일
    #[validate(email(message = "Valid email is required"))]
    pub email: String,
    /// 패스워드
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    /// 표시 이름
    #[validate(length(min = 2, max = 50, message = "Username must be 2-50 characters"))]
    pub username: String,
}

/// 프로바이더 리다이렉트 로그인 요청
///
/// 프로바이더 인증 완료 후 돌아온 인가 코드를 외부 인증 API에 전달합니다.
/// 코드-토큰 교환 자체는 외부 API의 책임입니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProviderLoginRequest {
    /// 프로바이더가 발급한 인가 코드
    #[validate(length(min = 1, message = "Authorization code is required"))]
    pub code: String,
    /// CSRF 방지용 state 값 (선택사항)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// 토큰 갱신 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    /// 리프레시 토큰
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// 세션 쿠키 수립 요청
///
/// `POST /api/v1/session` 본문입니다. 액세스 토큰이 없으면 400으로 거절됩니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EstablishSessionRequest {
    /// 액세스 토큰
    #[validate(length(min = 1, message = "access_token is required"))]
    pub access_token: String,
    /// 리프레시 토큰 (선택사항)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_rejects_short_password() {
        let request = EmailLoginRequest {
            email: "a@x.com".to_string(),
            password: "p".to_string(),
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_login_request_rejects_bad_email() {
        let request = EmailLoginRequest {
            email: "not-an-email".to_string(),
            password: "password".to_string(),
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_sign_up_request_username_bounds() {
        let request = EmailSignUpRequest {
            email: "a@x.com".to_string(),
            password: "password".to_string(),
            username: "A".to_string(),
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_establish_session_rejects_empty_access_token() {
        let request = EstablishSessionRequest {
            access_token: String::new(),
            refresh_token: None,
        };

        assert!(request.validate().is_err());
    }
}
