//! # 사용자 서비스
//!
//! 회원가입, 비밀번호 검증, 외부 로그인 사용자 해석을 담당합니다.
//!
//! ## 보안 특징
//!
//! - **bcrypt 해싱**: 환경별 cost (`PasswordConfig::bcrypt_cost`)
//! - **일관된 실패 응답**: 없는 이메일, 틀린 비밀번호, 비밀번호 없는 계정 모두 같은 401
//! - **블로킹 분리**: bcrypt 연산은 `web::block`으로 워커 스레드 밖에서 실행
//!
//! ```rust,ignore
//! let service = UserService::new(users, PasswordConfig::bcrypt_cost(), true);
//!
//! let user = service.sign_up(request).await?;
//! let user = service.verify_credentials("ana@x.com", "p1").await?;
//! ```

use std::time::Instant;

use actix_web::web;
use log::{debug, info, warn};

use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::domain::dto::users::request::SignUpRequest;
use crate::domain::entities::users::user::User;
use crate::domain::models::oauth::google_oauth_model::ExternalIdentity;
use crate::repositories::users::user_repo::email_taken;
use crate::repositories::users::{DynUserStore, ExternalLogin};

/// 비교 대상 해시가 없을 때 검증에 쓰는 값
const DUMMY_SECRET: &str = "signin-service-dummy-secret";

pub struct UserService {
    users: DynUserStore,
    bcrypt_cost: u32,
    link_requires_verified_email: bool,
    /// 없는 이메일, 비밀번호 없는 계정에도 같은 cost 의 bcrypt 검증을 수행하기 위한 해시
    dummy_hash: Option<String>,
}

impl UserService {
    pub fn new(users: DynUserStore, bcrypt_cost: u32, link_requires_verified_email: bool) -> Self {
        let dummy_hash = bcrypt::hash(DUMMY_SECRET, bcrypt_cost)
            .inspect_err(|e| warn!("더미 비밀번호 해시 생성 실패: {}", e))
            .ok();

        Self {
            users,
            bcrypt_cost,
            link_requires_verified_email,
            dummy_hash,
        }
    }

    /// 새 로컬 계정 생성
    ///
    /// 요청은 핸들러에서 이미 검증된 상태여야 합니다.
    /// 이메일 중복은 `email` 필드 검증 에러(400)로 보고되며, 동시에 들어온 중복 요청도
    /// 유니크 인덱스에서 같은 에러로 변환됩니다.
    pub async fn sign_up(&self, request: SignUpRequest) -> AppResult<User> {
        let start_time = Instant::now();

        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(email_taken());
        }

        let cost = self.bcrypt_cost;
        let secret = request.secret;
        let password_hash = web::block(move || bcrypt::hash(secret, cost))
            .await
            .context("해싱 작업 실행 실패")?
            .context("비밀번호 해싱 실패")?;

        debug!("Password hashing took: {:?}", start_time.elapsed());

        let user = self
            .users
            .create(User::new_local(request.name, request.email, password_hash))
            .await?;

        info!("새 로컬 사용자 등록: {}", user.email);
        Ok(user)
    }

    /// 이메일/비밀번호 검증
    ///
    /// 실패 사유와 관계없이 [`AppError::invalid_credentials`]를 반환하며,
    /// 계정이 없거나 비밀번호가 없는 경우에도 bcrypt 검증을 한 번 수행합니다.
    pub async fn verify_credentials(&self, email: &str, secret: &str) -> AppResult<User> {
        let user = self.users.find_by_email(email).await?;

        // OAuth 전용 계정은 비밀번호 인증 불가
        let stored_hash = user
            .as_ref()
            .filter(|user| user.can_authenticate_with_password())
            .and_then(|user| user.password_hash.clone());

        let matched = match self.comparison_hash(stored_hash.as_deref()) {
            Some(hash) => self.verify_secret(secret, hash).await?,
            None => false,
        };

        match user {
            Some(user) if matched && stored_hash.is_some() => Ok(user),
            Some(_) if stored_hash.is_none() => {
                info!("로그인 실패: 비밀번호가 없는 계정 - {}", email);
                Err(AppError::invalid_credentials())
            }
            Some(_) => {
                info!("로그인 실패: 비밀번호 불일치 - {}", email);
                Err(AppError::invalid_credentials())
            }
            None => {
                info!("로그인 실패: 등록되지 않은 이메일");
                Err(AppError::invalid_credentials())
            }
        }
    }

    /// 저장된 해시가 없으면 더미 해시를 돌려줍니다.
    fn comparison_hash<'a>(&'a self, stored_hash: Option<&'a str>) -> Option<&'a str> {
        stored_hash.or(self.dummy_hash.as_deref())
    }

    async fn verify_secret(&self, secret: &str, hash: &str) -> AppResult<bool> {
        let secret = secret.to_string();
        let hash = hash.to_string();

        let is_valid = web::block(move || bcrypt::verify(secret, &hash))
            .await
            .context("검증 작업 실행 실패")?
            .unwrap_or_else(|e| {
                warn!("저장된 비밀번호 해시를 해석할 수 없습니다: {}", e);
                false
            });

        Ok(is_valid)
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        self.users.find_by_id(id).await
    }

    /// 외부 신원으로 사용자를 찾거나 연동하거나 생성합니다.
    ///
    /// 이메일 기반 연동은 `OAUTH_LINK_REQUIRES_VERIFIED_EMAIL`이 켜져 있으면
    /// 프로바이더가 확인한 이메일에만 허용됩니다.
    pub async fn resolve_external(&self, identity: &ExternalIdentity) -> AppResult<ExternalLogin> {
        let allow_email_link = identity.email_verified || !self.link_requires_verified_email;

        let login = self.users.upsert_external(identity, allow_email_link).await?;

        info!(
            "외부 로그인 사용자 {}: {} (provider: {})",
            login.outcome(),
            login.user().email,
            login.user().provider.as_str()
        );
        Ok(login)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::AuthProvider;
    use crate::repositories::users::MemoryUserStore;

    fn service(link_requires_verified_email: bool) -> UserService {
        UserService::new(Arc::new(MemoryUserStore::new()), 4, link_requires_verified_email)
    }

    fn sign_up_request(email: &str) -> SignUpRequest {
        SignUpRequest {
            name: "Ana".to_string(),
            email: email.to_string(),
            secret: "p1".to_string(),
        }
    }

    fn identity(verified: bool) -> ExternalIdentity {
        ExternalIdentity {
            external_id: "sub-1".to_string(),
            email: "ana@x.com".to_string(),
            name: "Ana G".to_string(),
            avatar: None,
            email_verified: verified,
        }
    }

    #[actix_web::test]
    async fn test_sign_up_hashes_secret() {
        let service = service(true);

        let user = service.sign_up(sign_up_request("ana@x.com")).await.unwrap();

        let hash = user.password_hash.unwrap();
        assert_ne!(hash, "p1");
        assert!(bcrypt::verify("p1", &hash).unwrap());
        assert_eq!(user.provider, AuthProvider::Local);
    }

    #[actix_web::test]
    async fn test_sign_up_duplicate_email_is_field_error() {
        let service = service(true);
        service.sign_up(sign_up_request("ana@x.com")).await.unwrap();

        let err = service.sign_up(sign_up_request("ana@x.com")).await.unwrap_err();
        match err {
            AppError::ValidationError(errors) => {
                assert!(errors.field_errors().contains_key("email"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_verify_credentials_failures_are_identical() {
        let service = service(true);
        service.sign_up(sign_up_request("ana@x.com")).await.unwrap();
        service.resolve_external(&ExternalIdentity {
            external_id: "sub-9".to_string(),
            email: "oauth@x.com".to_string(),
            ..identity(true)
        })
        .await
        .unwrap();

        let wrong = service.verify_credentials("ana@x.com", "nope").await.unwrap_err();
        let unknown = service.verify_credentials("ghost@x.com", "p1").await.unwrap_err();
        let oauth_only = service.verify_credentials("oauth@x.com", "p1").await.unwrap_err();

        assert_eq!(wrong.to_string(), unknown.to_string());
        assert_eq!(wrong.to_string(), oauth_only.to_string());
        assert!(matches!(wrong, AppError::AuthenticationError(_)));

        assert!(service.verify_credentials("ana@x.com", "p1").await.is_ok());
    }

    #[test]
    fn test_missing_hash_is_compared_against_dummy() {
        let service = service(true);

        let dummy = service.comparison_hash(None).unwrap();
        assert!(dummy.starts_with("$2b$04$"));
        assert!(bcrypt::verify(DUMMY_SECRET, dummy).unwrap());

        assert_eq!(service.comparison_hash(Some("$2b$04$stored")), Some("$2b$04$stored"));
    }

    #[actix_web::test]
    async fn test_dummy_secret_never_logs_in_oauth_account() {
        let service = service(true);
        service.resolve_external(&identity(true)).await.unwrap();

        let err = service.verify_credentials("ana@x.com", DUMMY_SECRET).await.unwrap_err();
        assert!(matches!(err, AppError::AuthenticationError(_)));

        let err = service.verify_credentials("ghost@x.com", DUMMY_SECRET).await.unwrap_err();
        assert!(matches!(err, AppError::AuthenticationError(_)));
    }

    #[actix_web::test]
    async fn test_resolve_external_links_verified_email() {
        let service = service(true);
        let local = service.sign_up(sign_up_request("ana@x.com")).await.unwrap();

        let login = service.resolve_external(&identity(true)).await.unwrap();

        assert_eq!(login.outcome(), "linked");
        assert_eq!(login.user().id, local.id);
    }

    #[actix_web::test]
    async fn test_resolve_external_unverified_email_does_not_link() {
        let service = service(true);
        service.sign_up(sign_up_request("ana@x.com")).await.unwrap();

        let err = service.resolve_external(&identity(false)).await.unwrap_err();
        assert!(matches!(err, AppError::ConflictError(_)));
    }

    #[actix_web::test]
    async fn test_resolve_external_links_unverified_when_policy_disabled() {
        let service = service(false);
        service.sign_up(sign_up_request("ana@x.com")).await.unwrap();

        let login = service.resolve_external(&identity(false)).await.unwrap();
        assert_eq!(login.outcome(), "linked");
    }
}
