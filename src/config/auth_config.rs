//! # Authentication Configuration Module
//!
//! Google OAuth 클라이언트, 베어러 토큰, 프론트엔드 리다이렉트 등
//! 인증 관련 설정을 관리하는 모듈입니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ### Google OAuth 설정
//! ```bash
//! export GOOGLE_CLIENT_ID="your-google-client-id"
//! export GOOGLE_CLIENT_SECRET="your-google-client-secret"
//! export GOOGLE_REDIRECT_URI="http://localhost:8080/callback"
//! ```
//!
//! ### 선택 환경 변수
//! ```bash
//! export FRONTEND_URL="http://localhost:3000/auth/done"   # 콜백 처리 후 이동할 주소
//! export TOKEN_TTL_HOURS="24"                              # 베어러 토큰 유효 시간
//! export OAUTH_LINK_REQUIRES_VERIFIED_EMAIL="true"         # 이메일 기반 계정 연동 조건
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{GoogleOAuthConfig, TokenConfig, AuthProvider};
//!
//! let google = GoogleOAuthConfig::from_env()?;
//! let ttl = TokenConfig::ttl_seconds();
//! let provider = AuthProvider::default().as_str(); // "local"
//! ```

use std::env;

use serde::{Deserialize, Serialize};

use crate::core::errors::{AppError, AppResult};

/// Google OAuth 2.0 클라이언트 설정
///
/// Google Cloud Console 에서 생성한 OAuth 2.0 클라이언트 정보를 담습니다.
/// 전역 상태로 두지 않고 시작 시점에 한 번 읽어서
/// [`GoogleAuthService`](crate::services::auth::GoogleAuthService) 생성자에 전달합니다.
///
/// ## 보안 고려사항
///
/// - `client_secret`은 절대 클라이언트 사이드에 노출되어서는 안 됩니다
/// - `redirect_uri`는 Google Console 에 등록된 값과 정확히 일치해야 합니다
#[derive(Debug, Clone)]
pub struct GoogleOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub auth_uri: String,
    pub token_uri: String,
    pub certs_uri: String,
}

impl GoogleOAuthConfig {
    pub const DEFAULT_AUTH_URI: &'static str = "https://accounts.google.com/o/oauth2/v2/auth";
    pub const DEFAULT_TOKEN_URI: &'static str = "https://oauth2.googleapis.com/token";
    pub const DEFAULT_CERTS_URI: &'static str = "https://www.googleapis.com/oauth2/v3/certs";

    /// 환경 변수에서 설정을 읽습니다.
    ///
    /// `GOOGLE_CLIENT_ID`, `GOOGLE_CLIENT_SECRET`, `GOOGLE_REDIRECT_URI`는 필수이며,
    /// 나머지 엔드포인트는 Google 기본값을 사용합니다.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            client_id: required("GOOGLE_CLIENT_ID")?,
            client_secret: required("GOOGLE_CLIENT_SECRET")?,
            redirect_uri: required("GOOGLE_REDIRECT_URI")?,
            auth_uri: env::var("GOOGLE_AUTH_URI")
                .unwrap_or_else(|_| Self::DEFAULT_AUTH_URI.to_string()),
            token_uri: env::var("GOOGLE_TOKEN_URI")
                .unwrap_or_else(|_| Self::DEFAULT_TOKEN_URI.to_string()),
            certs_uri: env::var("GOOGLE_CERTS_URI")
                .unwrap_or_else(|_| Self::DEFAULT_CERTS_URI.to_string()),
        })
    }

    /// 지정한 값으로 설정을 만들고 엔드포인트는 기본값을 사용합니다.
    pub fn new(client_id: &str, client_secret: &str, redirect_uri: &str) -> Self {
        Self {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            redirect_uri: redirect_uri.to_string(),
            auth_uri: Self::DEFAULT_AUTH_URI.to_string(),
            token_uri: Self::DEFAULT_TOKEN_URI.to_string(),
            certs_uri: Self::DEFAULT_CERTS_URI.to_string(),
        }
    }
}

fn required(key: &str) -> AppResult<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::InternalError(format!("{} must be set", key))),
    }
}

/// 베어러 토큰 설정
pub struct TokenConfig;

impl TokenConfig {
    /// 허용되는 최대 TTL (1년)
    pub const MAX_TTL_HOURS: u64 = 24 * 365;

    pub fn ttl_hours() -> u64 {
        env::var("TOKEN_TTL_HOURS")
            .ok()
            .and_then(|v| Self::parse_ttl_hours(&v))
            .unwrap_or(24)
    }

    pub fn ttl_seconds() -> u64 {
        Self::ttl_hours().saturating_mul(3600)
    }

    /// 0 이거나 숫자가 아니면 `None`, 상한을 넘으면 [`Self::MAX_TTL_HOURS`]로 자릅니다.
    fn parse_ttl_hours(value: &str) -> Option<u64> {
        value
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|hours| *hours > 0)
            .map(|hours| hours.min(Self::MAX_TTL_HOURS))
    }
}

/// OAuth 계정 연동 정책 설정
pub struct OAuthConfig;

impl OAuthConfig {
    /// 이메일 일치만으로 기존 로컬 계정을 연동할 때
    /// Google 이 확인한 이메일(`email_verified`)을 요구할지 여부
    pub fn link_requires_verified_email() -> bool {
        env::var("OAUTH_LINK_REQUIRES_VERIFIED_EMAIL")
            .map(|v| !matches!(v.to_lowercase().as_str(), "false" | "0" | "no"))
            .unwrap_or(true)
    }
}

/// 프론트엔드 연동 설정
pub struct FrontendConfig;

impl FrontendConfig {
    /// OAuth 콜백 처리 후 브라우저를 돌려보낼 주소
    pub fn redirect_url() -> String {
        env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
    }
}

/// OAuth 콜백 결과를 쿼리 파라미터로 붙여 보낼 프론트엔드 주소
///
/// 시작 시 한 번 만들어 `web::Data`로 등록합니다.
#[derive(Debug, Clone)]
pub struct FrontendRedirect {
    base_url: String,
}

impl FrontendRedirect {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(FrontendConfig::redirect_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 값은 percent-encoding 되며, 주소에 이미 쿼리가 있으면 `&`로 이어 붙입니다.
    pub fn with_query(&self, params: &[(&str, &str)]) -> String {
        let query = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let separator = if self.base_url.contains('?') { '&' } else { '?' };
        format!("{}{}{}", self.base_url, separator, query)
    }
}

/// 사용자 계정의 인증 프로바이더
///
/// 저장 문서와 응답에는 소문자 문자열(`"local"`, `"external"`)로 기록됩니다.
/// 이전 스키마에서 사용하던 `"google"` 값은 `External`로 읽습니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// 이메일/비밀번호로 가입한 계정
    #[default]
    Local,

    /// 외부 ID 프로바이더(Google)로 로그인하거나 연동된 계정
    #[serde(alias = "google")]
    External,
}

impl AuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Local => "local",
            AuthProvider::External => "external",
        }
    }
}
