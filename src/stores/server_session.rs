//! 서버 세션 저장소 클라이언트
//!
//! 세션 쿠키 엔드포인트(`/api/v1/session`)를 호출하여 서버 측 자격 증명을
//! 수립/해제하는 인터페이스입니다. 쿠키는 HttpOnly이므로 클라이언트 스크립트는
//! 값을 읽을 수 없고, 존재 여부만 질의할 수 있습니다.
//!
//! 서버 측의 요청 스코프 읽기는 `middlewares::SessionCookies` 추출기가 담당합니다.
//!
//! TokenStore 갱신과 이 저장소 갱신은 플랫폼이 자동으로 동기화해 주지 않습니다.
//! 두 저장소를 같은 논리 연산에서 함께 갱신하는 책임은 SessionController에 있습니다.

use std::sync::RwLock;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::config::AuthApiConfig;
use crate::domain::dto::{EstablishSessionRequest, SessionStatusResponse};
use crate::domain::models::CredentialPair;
use crate::errors::{ErrorContext, SessionError, SessionResult};

/// 서버 세션 저장소 인터페이스
///
/// 수립과 해제는 명시적 단계이며, 실패는 호출자(SessionController)가
/// PartialSync로 표면화합니다.
#[async_trait]
pub trait ServerSessionStore: Send + Sync {
    /// 자격 증명 쌍으로 서버 세션 쿠키를 수립합니다.
    async fn set(&self, pair: &CredentialPair) -> SessionResult<()>;

    /// 서버 세션 쿠키를 제거합니다. 멱등합니다.
    async fn clear(&self) -> SessionResult<()>;

    /// 서버 세션 쿠키 존재 여부를 반환합니다. 토큰 내용은 검증하지 않습니다.
    async fn is_established(&self) -> SessionResult<bool>;
}

/// HTTP 구현체
///
/// 쿠키 저장소가 활성화된 reqwest 클라이언트로 세션 쿠키 엔드포인트를 호출합니다.
pub struct HttpServerSessionStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpServerSessionStore {
    /// 환경 설정의 세션 API 주소로 클라이언트를 생성합니다.
    pub fn new() -> SessionResult<Self> {
        Self::with_base_url(AuthApiConfig::session_base_url())
    }

    /// 지정된 베이스 URL로 클라이언트를 생성합니다.
    pub fn with_base_url(base_url: String) -> SessionResult<Self> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .network_context("HTTP 클라이언트 생성 실패")?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self) -> String {
        format!("{}/session", self.base_url)
    }
}

#[async_trait]
impl ServerSessionStore for HttpServerSessionStore {
    async fn set(&self, pair: &CredentialPair) -> SessionResult<()> {
        let body = EstablishSessionRequest {
            access_token: pair.access_token.clone(),
            refresh_token: pair.refresh_token.clone(),
        };

        let response = self
            .client
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .network_context("세션 수립 요청 실패")?;

        match response.status() {
            s if s.is_success() => Ok(()),
            StatusCode::BAD_REQUEST => Err(SessionError::ValidationError(
                "access_token is required".to_string(),
            )),
            s => Err(SessionError::NetworkError(format!(
                "세션 수립 실패: HTTP {}",
                s
            ))),
        }
    }

    async fn clear(&self) -> SessionResult<()> {
        let response = self
            .client
            .delete(self.endpoint())
            .send()
            .await
            .network_context("세션 해제 요청 실패")?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(SessionError::NetworkError(format!(
                "세션 해제 실패: HTTP {}",
                response.status()
            )))
        }
    }

    async fn is_established(&self) -> SessionResult<bool> {
        let response = self
            .client
            .get(self.endpoint())
            .send()
            .await
            .network_context("세션 조회 요청 실패")?;

        let status: SessionStatusResponse = response
            .json()
            .await
            .network_context("세션 응답 파싱 실패")?;

        Ok(status.authenticated)
    }
}

/// 메모리 구현체 (테스트용)
///
/// 네트워크 없이 서버 세션 저장소의 계약을 재현합니다.
#[derive(Default)]
pub struct MemoryServerSessionStore {
    slot: RwLock<Option<CredentialPair>>,
}

impl MemoryServerSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 현재 보관 중인 자격 증명 쌍을 반환합니다 (테스트 검증용).
    pub fn stored(&self) -> Option<CredentialPair> {
        self.slot.read().unwrap().clone()
    }
}

#[async_trait]
impl ServerSessionStore for MemoryServerSessionStore {
    async fn set(&self, pair: &CredentialPair) -> SessionResult<()> {
        if pair.access_token.is_empty() {
            return Err(SessionError::ValidationError(
                "access_token is required".to_string(),
            ));
        }
        *self.slot.write().unwrap() = Some(pair.clone());
        Ok(())
    }

    async fn clear(&self) -> SessionResult<()> {
        *self.slot.write().unwrap() = None;
        Ok(())
    }

    async fn is_established(&self) -> SessionResult<bool> {
        Ok(self.slot.read().unwrap().is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_set_and_clear() {
        let store = MemoryServerSessionStore::new();
        let pair = CredentialPair::new("T1", Some("R1".to_string()));

        store.set(&pair).await.unwrap();
        assert!(store.is_established().await.unwrap());
        assert_eq!(store.stored(), Some(pair));

        store.clear().await.unwrap();
        assert!(!store.is_established().await.unwrap());

        // 이미 비어 있어도 성공
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_memory_store_rejects_empty_access_token() {
        let store = MemoryServerSessionStore::new();
        let pair = CredentialPair::new("", None);

        let result = store.set(&pair).await;

        assert!(matches!(result, Err(SessionError::ValidationError(_))));
        assert!(!store.is_established().await.unwrap());
    }
}
