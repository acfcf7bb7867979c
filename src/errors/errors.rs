//! 세션 계층 전역에서 사용하는 에러 시스템
//!
//! 세션 수명주기 전반의 실패를 하나의 분류 체계로 관리합니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다.
//!
//! ## 분류 원칙
//!
//! - 사용자가 고칠 수 있는 실패(`InvalidCredentials`)는 상태를 바꾸지 않습니다.
//! - 일시적 실패(`ProviderError`, `NetworkError`)는 저장된 자격 증명을 지우지 않습니다.
//! - `Unauthorized`는 자격 증명이 확정적으로 거부된 경우에만 사용하며,
//!   호출자는 반드시 전체 세션 해제를 수행해야 합니다.
//! - `PartialSync`는 두 저장소 중 하나만 갱신된 상태를 의미하며,
//!   조용히 무시하지 않고 반드시 표면화합니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::SessionError;
//!
//! async fn fetch_profile(token: &str) -> Result<UserProfile, SessionError> {
//!     let response = client.get(url).bearer_auth(token).send().await
//!         .map_err(|e| SessionError::NetworkError(e.to_string()))?;
//!
//!     if response.status() == StatusCode::UNAUTHORIZED {
//!         return Err(SessionError::Unauthorized);
//!     }
//!     // ...
//! }
//! ```

use thiserror::Error;

/// 세션 계층 전역 에러 타입
///
/// 로그인, 프로필 조회, 저장소 동기화에서 발생할 수 있는 모든 실패를
/// 포괄하는 열거형입니다. 서버 엔드포인트에서는 자동으로 HTTP 응답으로
/// 변환되어 클라이언트에게 전달됩니다.
#[derive(Error, Debug)]
pub enum SessionError {
    /// 잘못된 자격 증명 (401 Unauthorized) - 사용자 재시도 가능, 상태 변화 없음
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// 외부 인증 프로바이더 에러 (502 Bad Gateway) - 일시적, 저장소 유지
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// 네트워크 에러 (503 Service Unavailable) - 일시적, 저장소 유지
    #[error("Network error: {0}")]
    NetworkError(String),

    /// 자격 증명이 확정적으로 거부됨 (401 Unauthorized) - 전체 세션 해제 필요
    #[error("Credential rejected by profile store")]
    Unauthorized,

    /// 두 저장소 중 한쪽만 갱신됨 (500 Internal Server Error) - 롤백 후 표면화
    #[error("Partial store synchronization failure: {0}")]
    PartialSync(String),

    /// 영속 저장소 접근 실패 (500 Internal Server Error) - 메모리 전용으로 격하
    #[error("Storage error: {0}")]
    Storage(String),

    /// 이미 진행 중인 로그인이 있음 (409 Conflict)
    #[error("Another login attempt is already in flight")]
    LoginInProgress,

    /// 완료된 호출 결과가 로그아웃에 의해 무효화됨 (409 Conflict)
    #[error("Login result discarded: superseded by logout")]
    Superseded,

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl actix_web::ResponseError for SessionError {
    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 각 에러 타입을 적절한 HTTP 상태 코드와 JSON 응답으로 변환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        use actix_web::http::StatusCode;

        let status = match self {
            SessionError::ValidationError(_) => StatusCode::BAD_REQUEST,
            SessionError::InvalidCredentials(_) | SessionError::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            SessionError::LoginInProgress | SessionError::Superseded => StatusCode::CONFLICT,
            SessionError::ProviderError(_) => StatusCode::BAD_GATEWAY,
            SessionError::NetworkError(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        actix_web::HttpResponse::build(status)
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

impl SessionError {
    /// 일시적 실패 여부를 반환합니다.
    ///
    /// 일시적 실패는 저장된 자격 증명을 지우지 않고 재시도를 허용합니다.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            SessionError::ProviderError(_) | SessionError::NetworkError(_)
        )
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type SessionResult<T> = Result<T, SessionError>;

/// 외부 라이브러리 에러를 SessionError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 저장소 에러로 변환합니다.
    fn storage_context(self, msg: &str) -> SessionResult<T>;

    /// 컨텍스트 정보와 함께 네트워크 에러로 변환합니다.
    fn network_context(self, msg: &str) -> SessionResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn storage_context(self, msg: &str) -> SessionResult<T> {
        self.map_err(|e| SessionError::Storage(format!("{}: {}", msg, e)))
    }

    fn network_context(self, msg: &str) -> SessionResult<T> {
        self.map_err(|e| SessionError::NetworkError(format!("{}: {}", msg, e)))
    }
}
