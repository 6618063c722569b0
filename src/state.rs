//! # 애플리케이션 상태
//!
//! 저장소와 외부 ID 프로바이더를 받아 서비스들을 조립하고,
//! `web::Data`로 등록한 뒤 라우트를 설정합니다.
//!
//! ```rust,ignore
//! let state = AppState::new(users, tokens, provider, FrontendRedirect::from_env(), AuthSettings::from_env());
//!
//! HttpServer::new(move || App::new().configure(|cfg| state.configure(cfg)))
//! ```

use actix_web::web;

use crate::config::{FrontendRedirect, OAuthConfig, PasswordConfig, TokenConfig};
use crate::repositories::{DynTokenStore, DynUserStore};
use crate::routes::configure_all_routes;
use crate::services::auth::{DynIdentityProvider, IdentityProvider, TokenService};
use crate::services::users::UserService;

/// 인증 동작 설정값
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub bcrypt_cost: u32,
    pub token_ttl_seconds: u64,
    pub link_requires_verified_email: bool,
}

impl AuthSettings {
    pub fn from_env() -> Self {
        Self {
            bcrypt_cost: PasswordConfig::bcrypt_cost(),
            token_ttl_seconds: TokenConfig::ttl_seconds(),
            link_requires_verified_email: OAuthConfig::link_requires_verified_email(),
        }
    }
}

/// 워커마다 clone 되는 공유 핸들 묶음
#[derive(Clone)]
pub struct AppState {
    pub users: web::Data<UserService>,
    pub tokens: web::Data<TokenService>,
    pub identity_provider: web::Data<dyn IdentityProvider>,
    pub frontend: web::Data<FrontendRedirect>,
}

impl AppState {
    pub fn new(
        user_store: DynUserStore,
        token_store: DynTokenStore,
        identity_provider: DynIdentityProvider,
        frontend: FrontendRedirect,
        settings: AuthSettings,
    ) -> Self {
        let users = UserService::new(
            user_store,
            settings.bcrypt_cost,
            settings.link_requires_verified_email,
        );
        let tokens = TokenService::new(token_store, settings.token_ttl_seconds);

        Self {
            users: web::Data::new(users),
            tokens: web::Data::new(tokens),
            identity_provider: web::Data::from(identity_provider),
            frontend: web::Data::new(frontend),
        }
    }

    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.users.clone())
            .app_data(self.tokens.clone())
            .app_data(self.identity_provider.clone())
            .app_data(self.frontend.clone());

        configure_all_routes(cfg);
    }
}
