//! # Google OAuth 2.0 인증 서비스
//!
//! Authorization Code Flow 로 Google 계정 신원을 확인합니다.
//!
//! ```text
//! 브라우저            우리 서버                              Google
//!    │ GET /api/v1/auth/google │                                │
//!    ├────────────────────────►│ 302 authorization_url()        │
//!    │◄────────────────────────┤                                │
//!    ├─────────────────────────────────────────────────────────►│ 로그인/동의
//!    │ GET /callback?code=...  │◄───────────────────────────────┤
//!    ├────────────────────────►│ exchange_code(code) ──────────►│ POST token_uri
//!    │                         │ verify_id_token(id_token) ────►│ GET certs_uri (JWKS)
//!    │ 302 FRONTEND_URL?token= │                                │
//!    │◄────────────────────────┤                                │
//! ```
//!
//! 핸들러는 [`IdentityProvider`] trait 에만 의존하므로 테스트에서는 가짜 구현을 주입합니다.

use std::sync::Arc;

use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use log::{debug, warn};

use crate::config::GoogleOAuthConfig;
use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::users::response::ProviderTokens;
use crate::domain::models::oauth::google_oauth_model::{ExternalIdentity, GoogleIdTokenClaims, JwkSet};

/// ID 토큰 `iss` 클레임 허용 값
pub const GOOGLE_ISSUERS: [&str; 2] = ["accounts.google.com", "https://accounts.google.com"];

pub const GOOGLE_SCOPE: &str = "profile email";

/// 외부 ID 프로바이더
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// 사용자를 보낼 동의 화면 URL
    fn authorization_url(&self) -> String;

    /// Authorization Code 를 토큰으로 교환합니다.
    async fn exchange_code(&self, code: &str) -> AppResult<ProviderTokens>;

    /// ID 토큰의 서명과 클레임을 검증하고 신원을 추출합니다.
    async fn verify_id_token(&self, id_token: &str) -> AppResult<ExternalIdentity>;
}

pub type DynIdentityProvider = Arc<dyn IdentityProvider>;

pub struct GoogleAuthService {
    config: GoogleOAuthConfig,
    http: reqwest::Client,
}

impl GoogleAuthService {
    pub fn new(config: GoogleOAuthConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    async fn fetch_jwks(&self) -> AppResult<JwkSet> {
        let response = self
            .http
            .get(&self.config.certs_uri)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 공개키 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Google 공개키 요청 실패: HTTP {}",
                response.status()
            )));
        }

        response
            .json::<JwkSet>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 공개키 파싱 실패: {}", e)))
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[self.config.client_id.as_str()]);
        validation.set_issuer(&GOOGLE_ISSUERS);
        validation
    }
}

#[async_trait]
impl IdentityProvider for GoogleAuthService {
    fn authorization_url(&self) -> String {
        let params = [
            ("client_id", self.config.client_id.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("response_type", "code"),
            ("scope", GOOGLE_SCOPE),
            ("access_type", "offline"),
            ("include_granted_scopes", "true"),
        ];

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.config.auth_uri, query_string)
    }

    async fn exchange_code(&self, code: &str) -> AppResult<ProviderTokens> {
        let params = [
            ("code", code),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self
            .http
            .post(&self.config.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 토큰 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            warn!("Google 토큰 교환 실패: HTTP {} {}", status, error_text);
            return Err(AppError::ExternalServiceError(format!(
                "Google 토큰 교환 실패: HTTP {}",
                status
            )));
        }

        response
            .json::<ProviderTokens>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 토큰 응답 파싱 실패: {}", e)))
    }

    async fn verify_id_token(&self, id_token: &str) -> AppResult<ExternalIdentity> {
        let header = decode_header(id_token)
            .map_err(|e| AppError::ExternalServiceError(format!("ID 토큰 헤더 해석 실패: {}", e)))?;

        let kid = header
            .kid
            .ok_or_else(|| AppError::ExternalServiceError("ID 토큰에 kid 가 없습니다".to_string()))?;

        let jwks = self.fetch_jwks().await?;
        let jwk = jwks.find(&kid).ok_or_else(|| {
            AppError::ExternalServiceError(format!("일치하는 Google 공개키가 없습니다: {}", kid))
        })?;

        let key = DecodingKey::from_rsa_components(&jwk.n, &jwk.e)
            .map_err(|e| AppError::ExternalServiceError(format!("Google 공개키 형식 오류: {}", e)))?;

        let data = decode::<GoogleIdTokenClaims>(id_token, &key, &self.validation())
            .map_err(|e| AppError::ExternalServiceError(format!("ID 토큰 검증 실패: {}", e)))?;

        debug!("ID 토큰 검증 완료 - kid: {}", kid);
        ExternalIdentity::try_from(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> GoogleAuthService {
        GoogleAuthService::new(GoogleOAuthConfig::new(
            "client-123.apps.googleusercontent.com",
            "secret",
            "http://localhost:8080/callback",
        ))
    }

    #[test]
    fn test_authorization_url_parameters() {
        let url = service().authorization_url();

        assert!(url.starts_with(GoogleOAuthConfig::DEFAULT_AUTH_URI));
        assert!(url.contains("client_id=client-123.apps.googleusercontent.com"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A8080%2Fcallback"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("scope=profile%20email"));
        assert!(url.contains("access_type=offline"));
        assert!(url.contains("include_granted_scopes=true"));
        assert!(!url.contains("secret"));
    }

    #[actix_web::test]
    async fn test_malformed_id_token_is_rejected_before_network() {
        let result = service().verify_id_token("not-a-jwt").await;
        assert!(matches!(result, Err(AppError::ExternalServiceError(_))));
    }

    #[test]
    fn test_validation_pins_audience_and_issuer() {
        let validation = service().validation();

        assert_eq!(validation.algorithms, vec![Algorithm::RS256]);
        assert!(validation.validate_exp);
        let audience = validation.aud.unwrap();
        assert!(audience.contains("client-123.apps.googleusercontent.com"));
        let issuers = validation.iss.unwrap();
        assert!(issuers.contains("https://accounts.google.com"));
    }
}
