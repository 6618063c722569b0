//! # Google ID 토큰 모델
//!
//! Authorization Code 교환으로 받은 `id_token`(JWT)의 클레임과 서명 검증에 필요한
//! 공개키(JWKS) 구조, 그리고 검증을 통과한 뒤 사용하는 [`ExternalIdentity`]를 정의합니다.
//!
//! ```text
//! id_token ──(JWKS 서명 + aud/iss/exp 검증)──▶ GoogleIdTokenClaims ──▶ ExternalIdentity
//! ```

use serde::Deserialize;

use crate::core::errors::AppError;

/// 검증된 `id_token` 페이로드
///
/// `aud`, `iss`, `exp`는 `jsonwebtoken::Validation`이 확인하므로 여기서는 사용자 정보만 읽습니다.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleIdTokenClaims {
    /// Google 계정의 고유 식별자 (변하지 않음)
    pub sub: String,

    pub email: Option<String>,

    #[serde(default)]
    pub email_verified: bool,

    #[serde(default)]
    pub name: Option<String>,

    /// 프로필 사진 URL
    #[serde(default)]
    pub picture: Option<String>,
}

/// Google 공개키 한 개 (`https://www.googleapis.com/oauth2/v3/certs`)
#[derive(Debug, Clone, Deserialize)]
pub struct Jwk {
    pub kid: String,
    pub n: String,
    pub e: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwkSet {
    pub keys: Vec<Jwk>,
}

impl JwkSet {
    pub fn find(&self, kid: &str) -> Option<&Jwk> {
        self.keys.iter().find(|key| key.kid == kid)
    }
}

/// 외부 ID 프로바이더가 확인해 준 사용자 신원
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalIdentity {
    pub external_id: String,
    pub email: String,
    pub name: String,
    pub avatar: Option<String>,
    pub email_verified: bool,
}

impl TryFrom<GoogleIdTokenClaims> for ExternalIdentity {
    type Error = AppError;

    fn try_from(claims: GoogleIdTokenClaims) -> Result<Self, Self::Error> {
        let email = claims
            .email
            .filter(|email| !email.trim().is_empty())
            .ok_or_else(|| {
                AppError::ExternalServiceError("ID 토큰에 이메일 클레임이 없습니다".to_string())
            })?;

        Ok(Self {
            external_id: claims.sub,
            email: email.to_lowercase(),
            name: claims.name.unwrap_or_default(),
            avatar: claims.picture,
            email_verified: claims.email_verified,
        })
    }
}
