//! 프로필 조회 서비스
//!
//! 유효한 액세스 토큰으로 프로필 저장소에서 정식 사용자 프로필을 조회합니다.
//!
//! ## 실패 구분이 중요한 이유
//!
//! - `Unauthorized`: 자격 증명이 더 이상 수용되지 않음(만료/폐기).
//!   호출자는 반드시 전체 세션 해제를 수행해야 합니다.
//! - `NetworkError`: 일시적 장애. 호출자는 기존 상태를 유지하고 나중에
//!   재시도할 수 있습니다. 일시적 네트워크 문제로 사용자를 잘못
//!   로그아웃시키면 안 됩니다.

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::config::AuthApiConfig;
use crate::domain::dto::ProfileResponse;
use crate::domain::models::UserProfile;
use crate::errors::{ErrorContext, SessionError, SessionResult};

/// 프로필 조회 인터페이스
#[async_trait]
pub trait ProfileFetcher: Send + Sync {
    /// 액세스 토큰으로 사용자 프로필을 조회합니다.
    ///
    /// # Errors
    ///
    /// * `SessionError::Unauthorized` - 자격 증명이 거부됨 (세션 해제 필요)
    /// * `SessionError::NetworkError` - 일시적 장애 (상태 유지, 재시도 가능)
    async fn fetch(&self, access_token: &str) -> SessionResult<UserProfile>;
}

/// 외부 프로필 API를 호출하는 HTTP 구현체
pub struct HttpProfileFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpProfileFetcher {
    /// 환경 설정의 인증 API 주소로 조회기를 생성합니다.
    pub fn new() -> Self {
        Self::with_base_url(AuthApiConfig::base_url())
    }

    /// 지정된 베이스 URL로 조회기를 생성합니다.
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }
}

impl Default for HttpProfileFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileFetcher for HttpProfileFetcher {
    async fn fetch(&self, access_token: &str) -> SessionResult<UserProfile> {
        let response = self
            .client
            .get(format!("{}/auth/me", self.base_url))
            .bearer_auth(access_token)
            .send()
            .await
            .network_context("프로필 조회 호출 실패")?;

        match response.status() {
            // 404는 삭제된 사용자 - 자격 증명은 더 이상 유효하지 않음
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => {
                Err(SessionError::Unauthorized)
            }
            s if !s.is_success() => Err(SessionError::NetworkError(format!(
                "프로필 조회 실패: HTTP {}",
                s
            ))),
            _ => {
                let profile: ProfileResponse = response
                    .json()
                    .await
                    .network_context("프로필 응답 파싱 실패")?;

                Ok(profile.into_profile())
            }
        }
    }
}
