#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use signin_service_backend::config::FrontendRedirect;
use signin_service_backend::core::errors::{AppError, AppResult};
use signin_service_backend::domain::dto::users::response::ProviderTokens;
use signin_service_backend::domain::ExternalIdentity;
use signin_service_backend::repositories::{MemoryTokenStore, MemoryUserStore};
use signin_service_backend::services::auth::IdentityProvider;
use signin_service_backend::state::{AppState, AuthSettings};

pub const FRONTEND_URL: &str = "http://frontend.test/auth/done";
pub const VALID_ID_TOKEN: &str = "valid-id-token";
pub const AUTHORIZATION_URL: &str = "https://accounts.test/o/oauth2/v2/auth?client_id=test";

/// Google 대신 미리 정한 신원을 돌려주는 프로바이더
pub struct FakeIdentityProvider {
    identity: ExternalIdentity,
    id_token: Option<String>,
    fail_exchange: bool,
}

impl FakeIdentityProvider {
    pub fn new(identity: ExternalIdentity) -> Self {
        Self {
            identity,
            id_token: Some(VALID_ID_TOKEN.to_string()),
            fail_exchange: false,
        }
    }

    /// 교환 응답에 담길 ID 토큰 지정
    pub fn with_id_token(mut self, id_token: &str) -> Self {
        self.id_token = Some(id_token.to_string());
        self
    }

    pub fn without_id_token(mut self) -> Self {
        self.id_token = None;
        self
    }

    pub fn failing_exchange(mut self) -> Self {
        self.fail_exchange = true;
        self
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentityProvider {
    fn authorization_url(&self) -> String {
        AUTHORIZATION_URL.to_string()
    }

    async fn exchange_code(&self, _code: &str) -> AppResult<ProviderTokens> {
        if self.fail_exchange {
            return Err(AppError::ExternalServiceError("invalid_grant".to_string()));
        }

        Ok(ProviderTokens {
            access_token: "ya29.test".to_string(),
            id_token: self.id_token.clone(),
            refresh_token: None,
            expires_in: Some(3599),
        })
    }

    async fn verify_id_token(&self, id_token: &str) -> AppResult<ExternalIdentity> {
        if id_token == VALID_ID_TOKEN {
            Ok(self.identity.clone())
        } else {
            Err(AppError::ExternalServiceError("signature mismatch".to_string()))
        }
    }
}

pub fn identity(external_id: &str, email: &str, email_verified: bool) -> ExternalIdentity {
    ExternalIdentity {
        external_id: external_id.to_string(),
        email: email.to_string(),
        name: "Ana Google".to_string(),
        avatar: Some("https://img.test/ana.png".to_string()),
        email_verified,
    }
}

pub struct TestContext {
    pub state: AppState,
    pub users: Arc<MemoryUserStore>,
    pub tokens: Arc<MemoryTokenStore>,
}

pub fn context(provider: FakeIdentityProvider) -> TestContext {
    let users = Arc::new(MemoryUserStore::new());
    let tokens = Arc::new(MemoryTokenStore::new());

    let state = AppState::new(
        users.clone(),
        tokens.clone(),
        Arc::new(provider),
        FrontendRedirect::new(FRONTEND_URL),
        AuthSettings {
            bcrypt_cost: 4,
            token_ttl_seconds: 3600,
            link_requires_verified_email: true,
        },
    );

    TestContext {
        state,
        users,
        tokens,
    }
}

pub fn default_context() -> TestContext {
    context(FakeIdentityProvider::new(identity("google-sub-1", "ana@x.com", true)))
}

/// 리다이렉트 주소의 쿼리 파라미터 (디코딩된 값)
pub fn redirect_query(location: &str) -> HashMap<String, String> {
    let query = location.split_once('?').map(|(_, q)| q).unwrap_or_default();

    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| {
            let value = urlencoding::decode(v).map(|v| v.into_owned()).unwrap_or_default();
            (k.to_string(), value)
        })
        .collect()
}
