//! 인증 게이트웨이 서비스
//!
//! 서로 다른 로그인 방식(이메일 로그인, 회원가입, 프로바이더 리다이렉트)을
//! 하나의 정규화된 세션 디스크립터로 수렴시킵니다.
//! 패스워드 검증과 OAuth 토큰 교환은 외부 인증 API의 책임이며,
//! 이 서비스는 호출과 정규화만 담당합니다.
//!
//! ## 재시도 정책
//!
//! 모든 메서드는 사용자 동작당 최대 한 번만 외부 호출을 수행합니다.
//! 게이트웨이 내부에는 자동 재시도가 없으며, 재시도 여부는 호출자가 결정합니다.

use async_trait::async_trait;

use crate::config::{AuthApiConfig, OAuthRedirectConfig};
use crate::domain::dto::{
    EmailLoginRequest, EmailSignUpRequest, LoginResponse, LoginUrlResponse, ProviderLoginRequest,
    RefreshTokenRequest, RefreshTokenResponse,
};
use crate::domain::models::{AuthMethod, CredentialPair, SessionDescriptor};
use crate::errors::{ErrorContext, SessionError, SessionResult};

/// 인증 게이트웨이 인터페이스
///
/// 지원하는 신원 확인 방식마다 하나의 진입점을 제공하며,
/// 모두 동일한 정규화 결과(`SessionDescriptor`) 또는 태그된 실패를 반환합니다.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// 이메일/패스워드 로그인
    async fn login_with_email(
        &self,
        request: &EmailLoginRequest,
    ) -> SessionResult<SessionDescriptor>;

    /// 이메일/패스워드 회원가입 (표시 이름 예약 포함)
    async fn sign_up_with_email(
        &self,
        request: &EmailSignUpRequest,
    ) -> SessionResult<SessionDescriptor>;

    /// 프로바이더 리다이렉트 로그인 (인가 코드 교환)
    async fn login_with_provider(
        &self,
        provider: AuthMethod,
        request: &ProviderLoginRequest,
    ) -> SessionResult<SessionDescriptor>;

    /// 리프레시 토큰으로 새 자격 증명 쌍을 발급받습니다.
    async fn refresh(&self, refresh_token: &str) -> SessionResult<CredentialPair>;
}

/// 외부 인증 API를 호출하는 HTTP 구현체
pub struct HttpAuthGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAuthGateway {
    /// 환경 설정의 인증 API 주소로 게이트웨이를 생성합니다.
    pub fn new() -> Self {
        Self::with_base_url(AuthApiConfig::base_url())
    }

    /// 지정된 베이스 URL로 게이트웨이를 생성합니다.
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// 프로바이더 인증 페이지 URL을 생성합니다.
    ///
    /// 사용자를 프로바이더 로그인 페이지로 리다이렉트할 때 사용됩니다.
    /// 인가 코드를 액세스 토큰으로 교환하는 단계는 외부 인증 API가 수행합니다.
    ///
    /// # Arguments
    ///
    /// * `provider` - 리다이렉트 방식 프로바이더 (Naver/Kakao/Gmail/Apple)
    /// * `state` - CSRF 방지용 state 값
    ///
    /// # Errors
    ///
    /// * `SessionError::ValidationError` - 리다이렉트 방식이 아닌 프로바이더
    pub fn login_url(&self, provider: AuthMethod, state: &str) -> SessionResult<LoginUrlResponse> {
        let authorize_uri = match provider {
            AuthMethod::Naver => "https://nid.naver.com/oauth2.0/authorize",
            AuthMethod::Kakao => "https://kauth.kakao.com/oauth/authorize",
            AuthMethod::Gmail => "https://accounts.google.com/o/oauth2/auth",
            AuthMethod::Apple => "https://appleid.apple.com/auth/authorize",
            AuthMethod::Email | AuthMethod::Phone => {
                return Err(SessionError::ValidationError(format!(
                    "{} is not a redirect provider",
                    provider.as_str()
                )));
            }
        };

        let login_url = format!(
            "{}?response_type=code&client_id={}&redirect_uri={}&state={}",
            authorize_uri,
            urlencoding::encode(&OAuthRedirectConfig::client_id(provider.as_str())),
            urlencoding::encode(&OAuthRedirectConfig::redirect_uri()),
            urlencoding::encode(state),
        );

        Ok(LoginUrlResponse {
            login_url,
            provider: provider.as_str().to_string(),
        })
    }

    /// 실패 응답을 태그된 에러로 변환합니다.
    ///
    /// - 401: 잘못된 자격 증명
    /// - 409: 이메일/표시 이름 중복 (사용자가 고칠 수 있는 거절)
    /// - 그 외: 프로바이더 에러 (일시적)
    async fn map_failure(response: reqwest::Response) -> SessionError {
        let status = response.status();
        let detail = response
            .text()
            .await
            .unwrap_or_else(|_| "no response body".to_string());

        match status {
            reqwest::StatusCode::UNAUTHORIZED => {
                SessionError::InvalidCredentials("Invalid email or password".to_string())
            }
            reqwest::StatusCode::CONFLICT => {
                SessionError::InvalidCredentials("Email already registered".to_string())
            }
            s => SessionError::ProviderError(format!("HTTP {}: {}", s, detail)),
        }
    }

    async fn post_for_descriptor<B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> SessionResult<SessionDescriptor> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
            .network_context("인증 API 호출 실패")?;

        if !response.status().is_success() {
            return Err(Self::map_failure(response).await);
        }

        let login: LoginResponse = response
            .json()
            .await
            .map_err(|e| SessionError::ProviderError(format!("로그인 응답 파싱 실패: {}", e)))?;

        Ok(login.into_descriptor())
    }
}

impl Default for HttpAuthGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn login_with_email(
        &self,
        request: &EmailLoginRequest,
    ) -> SessionResult<SessionDescriptor> {
        log::info!("이메일 로그인 시도: {}", request.email);
        self.post_for_descriptor("/auth/email/login", request).await
    }

    async fn sign_up_with_email(
        &self,
        request: &EmailSignUpRequest,
    ) -> SessionResult<SessionDescriptor> {
        log::info!("이메일 회원가입 시도: {}", request.email);
        self.post_for_descriptor("/auth/email/sign-up", request)
            .await
    }

    async fn login_with_provider(
        &self,
        provider: AuthMethod,
        request: &ProviderLoginRequest,
    ) -> SessionResult<SessionDescriptor> {
        log::info!("프로바이더 로그인 시도: {}", provider.as_str());
        self.post_for_descriptor(&format!("/auth/{}/login", provider.as_str()), request)
            .await
    }

    async fn refresh(&self, refresh_token: &str) -> SessionResult<CredentialPair> {
        let body = RefreshTokenRequest {
            refresh_token: refresh_token.to_string(),
        };

        let response = self
            .client
            .post(format!("{}/auth/refresh", self.base_url))
            .json(&body)
            .send()
            .await
            .network_context("토큰 갱신 호출 실패")?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            // 리프레시 토큰 자체가 거부됨 - 호출자는 세션을 해제해야 함
            return Err(SessionError::Unauthorized);
        }

        if !response.status().is_success() {
            return Err(Self::map_failure(response).await);
        }

        let refreshed: RefreshTokenResponse = response
            .json()
            .await
            .map_err(|e| SessionError::ProviderError(format!("갱신 응답 파싱 실패: {}", e)))?;

        Ok(refreshed.into_credential_pair())
    }
}
