//! 세션 쿠키 추출기
//!
//! 요청의 자격 증명 쿠키를 읽어 핸들러에 전달합니다.
//! 서버 쪽 코드만 쿠키 값을 읽을 수 있으며, 클라이언트에는 존재 여부만 노출됩니다.

use std::future::{ready, Ready};

use actix_web::{dev::Payload, Error, FromRequest, HttpRequest};

use crate::config::CookieConfig;
use crate::domain::models::CredentialPair;

/// 요청에서 추출된 자격 증명 쿠키
///
/// 액세스 토큰 쿠키가 없으면 자격 증명도 없는 것으로 취급합니다.
/// 리프레시 토큰 쿠키는 선택 사항입니다.
pub struct SessionCookies {
    credential: Option<CredentialPair>,
}

impl SessionCookies {
    /// 쿠키에서 읽은 자격 증명 쌍을 반환합니다.
    pub fn credential(&self) -> Option<&CredentialPair> {
        self.credential.as_ref()
    }
}

impl FromRequest for SessionCookies {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let credential = req
            .cookie(&CookieConfig::access_cookie_name())
            .map(|access| {
                let refresh_token = req
                    .cookie(&CookieConfig::refresh_cookie_name())
                    .map(|c| c.value().to_string());
                CredentialPair::new(access.value(), refresh_token)
            });

        ready(Ok(SessionCookies { credential }))
    }
}
