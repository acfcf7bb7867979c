//! 자격 증명 쌍 모델
//!
//! 액세스/리프레시 토큰 쌍을 표현합니다. 토큰 문자열은 이 계층에서 불투명(opaque)하며,
//! 내용 검증은 프로필 저장소의 책임입니다.

use serde::{Deserialize, Serialize};

/// 자격 증명 쌍 (액세스 + 리프레시 토큰)
///
/// 액세스 토큰은 단기(설계값 12시간), 리프레시 토큰은 장기(설계값 30일)입니다.
/// 리프레시 토큰은 갱신 중 잠시 단독으로 존재할 수 있지만,
/// 액세스 토큰이 존재한다는 것은 세션이 현재 유효하다고 간주됨을 의미합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPair {
    /// 액세스 토큰 (API 접근용 단기 토큰)
    pub access_token: String,
    /// 리프레시 토큰 (토큰 갱신용 장기 토큰, 선택사항)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl CredentialPair {
    /// 새 자격 증명 쌍을 생성합니다.
    pub fn new(access_token: impl Into<String>, refresh_token: Option<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token,
        }
    }
}
