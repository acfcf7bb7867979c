//! 사용자 프로필 모델
//!
//! 프로필 저장소(외부)가 소유하는 사용자 정보의 읽기 전용 사본입니다.
//! 활성 세션을 키로 캐시되며, 프로필 갱신 성공 시마다 통째로 교체되고
//! 로그아웃 또는 자격 증명 거부 시 제거됩니다.

use serde::{Deserialize, Serialize};

use crate::domain::models::descriptor::SessionDescriptor;

/// 인증 방식
///
/// 프로필 저장소가 지원하는 신원 확인 방법의 집합입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMethod {
    /// 이메일/패스워드 인증
    Email,
    /// 네이버 OAuth
    Naver,
    /// 카카오 OAuth
    Kakao,
    /// Google(Gmail) OAuth
    Gmail,
    /// Apple OAuth
    Apple,
    /// 휴대전화 인증 (마이그레이션된 기존 사용자 기본값)
    Phone,
}

impl AuthMethod {
    /// 소문자 식별자 문자열을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMethod::Email => "email",
            AuthMethod::Naver => "naver",
            AuthMethod::Kakao => "kakao",
            AuthMethod::Gmail => "gmail",
            AuthMethod::Apple => "apple",
            AuthMethod::Phone => "phone",
        }
    }

    /// 식별자 문자열에서 인증 방식을 파싱합니다.
    ///
    /// 알 수 없는 값은 `Email`로 간주합니다 (프로필 저장소의 기본값과 동일).
    pub fn parse(value: &str) -> Self {
        match value {
            "naver" => AuthMethod::Naver,
            "kakao" => AuthMethod::Kakao,
            "gmail" => AuthMethod::Gmail,
            "apple" => AuthMethod::Apple,
            "phone" => AuthMethod::Phone,
            _ => AuthMethod::Email,
        }
    }
}

/// 사용자 프로필
///
/// 세션 상태가 `Authenticated`일 때 UI가 렌더링하는 사용자 정보입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// 사용자 ID
    pub id: String,
    /// 표시 이름
    pub display_name: String,
    /// 이메일 (선택사항)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// 인증 방식
    pub auth_method: AuthMethod,
    /// 관리자 여부
    pub is_admin: bool,
    /// 프리미엄 구독 여부
    pub is_premium: bool,
}

impl UserProfile {
    /// 로그인 디스크립터의 최소 필드만으로 잠정(partial) 프로필을 생성합니다.
    ///
    /// 낙관적 상태 전이에 사용됩니다. 프로필 조회가 완료되면 통째로 교체됩니다.
    pub fn partial_from_descriptor(descriptor: &SessionDescriptor, method: AuthMethod) -> Self {
        Self {
            id: descriptor.user_id.clone(),
            display_name: descriptor
                .display_name
                .clone()
                .unwrap_or_else(|| "User".to_string()),
            email: None,
            auth_method: method,
            is_admin: false,
            is_premium: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_method_parse_round_trip() {
        for method in [
            AuthMethod::Email,
            AuthMethod::Naver,
            AuthMethod::Kakao,
            AuthMethod::Gmail,
            AuthMethod::Apple,
            AuthMethod::Phone,
        ] {
            assert_eq!(AuthMethod::parse(method.as_str()), method);
        }
    }

    #[test]
    fn test_auth_method_parse_unknown_defaults_to_email() {
        assert_eq!(AuthMethod::parse("mock"), AuthMethod::Email);
    }

    #[test]
    fn test_partial_profile_uses_descriptor_fields() {
        let descriptor = SessionDescriptor {
            access_token: "T1".to_string(),
            refresh_token: Some("R1".to_string()),
            user_id: "u1".to_string(),
            display_name: Some("A".to_string()),
        };

        let profile = UserProfile::partial_from_descriptor(&descriptor, AuthMethod::Email);

        assert_eq!(profile.id, "u1");
        assert_eq!(profile.display_name, "A");
        assert!(!profile.is_admin);
    }

    #[test]
    fn test_partial_profile_without_display_name() {
        let descriptor = SessionDescriptor {
            access_token: "T1".to_string(),
            refresh_token: None,
            user_id: "u1".to_string(),
            display_name: None,
        };

        let profile = UserProfile::partial_from_descriptor(&descriptor, AuthMethod::Kakao);

        assert_eq!(profile.display_name, "User");
        assert_eq!(profile.auth_method, AuthMethod::Kakao);
    }
}
