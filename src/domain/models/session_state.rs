//! 세션 상태 모델
//!
//! SessionController가 소유하는 상태 기계의 상태 집합입니다.
//! `Unknown`은 프로세스 시작 직후 첫 자격 증명 확인이 끝나기 전에만 존재합니다.

use crate::domain::models::profile::UserProfile;

/// 인증 상태의 확정 단계
///
/// 로그인 직후에는 디스크립터의 최소 필드만으로 낙관적으로 `Partial` 상태가 되고,
/// 프로필 조회가 성공하면 `Confirmed`로 승격됩니다. 단일 플래그 대신
/// 명시적 2단계로 두어 테스트에서 두 단계를 모두 검증할 수 있습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// 로그인 직후, 프로필 확인 전
    Partial,
    /// 프로필 저장소가 자격 증명을 확인함
    Confirmed,
}

/// 세션 상태
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// 프로세스 시작 직후, 첫 자격 증명 확인 전
    Unknown,
    /// 자격 증명 확인을 위한 네트워크 호출 진행 중
    Loading,
    /// 인증됨 (프로필 + 확정 단계)
    Authenticated {
        profile: UserProfile,
        phase: SessionPhase,
    },
    /// 미인증
    Unauthenticated,
}

impl SessionState {
    /// 인증 상태 여부를 반환합니다.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated { .. })
    }

    /// 인증된 경우 프로필 참조를 반환합니다.
    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            SessionState::Authenticated { profile, .. } => Some(profile),
            _ => None,
        }
    }
}
