//! 정규화된 세션 디스크립터 모델
//!
//! 모든 로그인 방식(이메일 로그인, 회원가입, 프로바이더 리다이렉트)이
//! 수렴하는 단일 결과 형태입니다. 성공한 로그인마다 한 번 생성되고,
//! 생성 이후 변경되지 않으며, 즉시 저장소 채우기와 프로필 조회에 소비됩니다.

use crate::domain::models::credential::CredentialPair;

/// 정규화된 세션 시작 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDescriptor {
    /// 액세스 토큰
    pub access_token: String,
    /// 리프레시 토큰 (선택사항)
    pub refresh_token: Option<String>,
    /// 사용자 ID
    pub user_id: String,
    /// 표시 이름 (선택사항)
    pub display_name: Option<String>,
}

impl SessionDescriptor {
    /// 디스크립터에서 자격 증명 쌍을 추출합니다.
    pub fn credential_pair(&self) -> CredentialPair {
        CredentialPair::new(self.access_token.clone(), self.refresh_token.clone())
    }
}
