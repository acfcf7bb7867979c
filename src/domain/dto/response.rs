//! 응답 DTO 모듈
//!
//! 외부 인증 API의 와이어 형식입니다. AuthGateway와 ProfileFetcher가
//! 역직렬화한 뒤 도메인 모델로 정규화합니다.

use serde::{Deserialize, Serialize};

use crate::domain::models::{AuthMethod, CredentialPair, SessionDescriptor, UserProfile};

/// 로그인/회원가입 성공 응답 (외부 인증 API 와이어 형식)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// 사용자 ID
    pub user_id: String,
    /// 액세스 토큰
    pub app_auth_token: String,
    /// 리프레시 토큰
    pub refresh_token: String,
    /// 표시 이름 (선택사항)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
}

impl LoginResponse {
    /// 와이어 응답을 정규화된 세션 디스크립터로 변환합니다.
    ///
    /// 모든 로그인 방식이 이 변환을 거쳐 동일한 결과 형태로 수렴합니다.
    pub fn into_descriptor(self) -> SessionDescriptor {
        SessionDescriptor {
            access_token: self.app_auth_token,
            refresh_token: Some(self.refresh_token),
            user_id: self.user_id,
            display_name: self.nickname,
        }
    }
}

/// 토큰 갱신 응답 (외부 인증 API 와이어 형식)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenResponse {
    /// 새 액세스 토큰
    pub app_auth_token: String,
    /// 새 리프레시 토큰
    pub refresh_token: String,
}

impl RefreshTokenResponse {
    /// 와이어 응답을 자격 증명 쌍으로 변환합니다.
    pub fn into_credential_pair(self) -> CredentialPair {
        CredentialPair::new(self.app_auth_token, Some(self.refresh_token))
    }
}

/// 사용자 프로필 응답 (외부 인증 API 와이어 형식)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    /// 사용자 ID
    pub id: String,
    /// 표시 이름
    pub nickname: String,
    /// 이메일 (선택사항)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// 인증 방식 식별자
    pub auth_type: String,
    /// 관리자 여부
    #[serde(default)]
    pub is_admin: bool,
    /// 프리미엄 구독 여부
    #[serde(default)]
    pub is_premium: bool,
}

impl ProfileResponse {
    /// 와이어 응답을 도메인 프로필로 변환합니다.
    pub fn into_profile(self) -> UserProfile {
        UserProfile {
            id: self.id,
            display_name: self.nickname,
            email: self.email,
            auth_method: AuthMethod::parse(&self.auth_type),
            is_admin: self.is_admin,
            is_premium: self.is_premium,
        }
    }
}

/// 세션 쿠키 상태 응답
///
/// `GET /api/v1/session`의 본문입니다. 쿠키 존재 여부만 보고하며
/// 토큰 내용은 검증하지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStatusResponse {
    /// 액세스 쿠키 존재 여부
    pub authenticated: bool,
}

/// 프로바이더 로그인 URL 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginUrlResponse {
    /// 프로바이더 인증 페이지 URL
    pub login_url: String,
    /// 프로바이더 식별자
    pub provider: String,
}
