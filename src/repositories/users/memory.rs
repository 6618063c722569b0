//! 프로세스 메모리 기반 사용자 저장소
//!
//! MongoDB 구현과 같은 규칙(이메일 유니크, 외부 ID 유니크, 원자적 외부 로그인)을
//! 하나의 잠금 안에서 지킵니다.

use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use super::user_repo::{email_taken, identity_conflict, ExternalLogin, UserStore};
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::users::user::User;
use crate::domain::models::oauth::google_oauth_model::ExternalIdentity;

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 저장된 사용자 수
    pub fn len(&self) -> usize {
        self.users.lock().map(|users| users.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, Vec<User>>> {
        self.users
            .lock()
            .map_err(|_| AppError::InternalError("사용자 저장소 잠금 실패".to_string()))
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let object_id = match ObjectId::parse_str(id) {
            Ok(object_id) => object_id,
            Err(_) => return Ok(None),
        };

        let users = self.lock()?;
        Ok(users.iter().find(|u| u.id == Some(object_id)).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.lock()?;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, mut user: User) -> AppResult<User> {
        let mut users = self.lock()?;

        if users.iter().any(|u| u.email == user.email) {
            return Err(email_taken());
        }

        user.id = Some(ObjectId::new());
        users.push(user.clone());
        Ok(user)
    }

    async fn upsert_external(
        &self,
        identity: &ExternalIdentity,
        allow_email_link: bool,
    ) -> AppResult<ExternalLogin> {
        let mut users = self.lock()?;

        let by_external_id = users
            .iter()
            .position(|u| u.external_id.as_deref() == Some(identity.external_id.as_str()));
        let by_email = || {
            users
                .iter()
                .position(|u| u.email == identity.email)
                .filter(|_| allow_email_link)
        };

        match by_external_id.or_else(by_email) {
            Some(index) => {
                let user = &mut users[index];
                let linked_to = user.external_id.clone();

                match linked_to.as_deref() {
                    Some(external_id) if external_id == identity.external_id => {
                        Ok(ExternalLogin::Existing(user.clone()))
                    }
                    Some(_) => Err(identity_conflict()),
                    None => {
                        user.link_external(identity);
                        Ok(ExternalLogin::Linked(user.clone()))
                    }
                }
            }
            None => {
                if users.iter().any(|u| u.email == identity.email) {
                    return Err(AppError::ConflictError(
                        "an account with this email already exists".to_string(),
                    ));
                }

                let mut user = User::new_external(identity);
                user.id = Some(ObjectId::new());
                users.push(user.clone());
                Ok(ExternalLogin::Created(user))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthProvider;

    fn identity(sub: &str, email: &str) -> ExternalIdentity {
        ExternalIdentity {
            external_id: sub.to_string(),
            email: email.to_string(),
            name: "Ana".to_string(),
            avatar: Some("https://img.test/a.png".to_string()),
            email_verified: true,
        }
    }

    #[actix_web::test]
    async fn test_create_rejects_duplicate_email() {
        let store = MemoryUserStore::new();
        let user = User::new_local("Ana".into(), "ana@x.com".into(), "hash".into());

        let created = store.create(user.clone()).await.unwrap();
        assert!(created.id.is_some());

        let err = store.create(user).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[actix_web::test]
    async fn test_upsert_creates_then_returns_existing() {
        let store = MemoryUserStore::new();
        let id = identity("sub-1", "ana@x.com");

        let first = store.upsert_external(&id, true).await.unwrap();
        assert_eq!(first.outcome(), "created");

        let second = store.upsert_external(&id, true).await.unwrap();
        assert_eq!(second.outcome(), "existing");
        assert_eq!(first.user().id, second.user().id);
    }

    #[actix_web::test]
    async fn test_upsert_links_local_account_by_email() {
        let store = MemoryUserStore::new();
        let local = store
            .create(User::new_local("Ana".into(), "ana@x.com".into(), "hash".into()))
            .await
            .unwrap();

        let login = store
            .upsert_external(&identity("sub-1", "ana@x.com"), true)
            .await
            .unwrap();

        assert_eq!(login.outcome(), "linked");
        let user = login.into_user();
        assert_eq!(user.id, local.id);
        assert_eq!(user.provider, AuthProvider::External);
        assert!(user.password_hash.is_some());
    }

    #[actix_web::test]
    async fn test_upsert_without_email_link_conflicts() {
        let store = MemoryUserStore::new();
        store
            .create(User::new_local("Ana".into(), "ana@x.com".into(), "hash".into()))
            .await
            .unwrap();

        let err = store
            .upsert_external(&identity("sub-1", "ana@x.com"), false)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ConflictError(_)));
    }

    #[actix_web::test]
    async fn test_upsert_prefers_external_id_over_email() {
        let store = MemoryUserStore::new();
        let owner = store
            .upsert_external(&identity("sub-1", "old@x.com"), true)
            .await
            .unwrap()
            .into_user();
        store
            .upsert_external(&identity("sub-2", "ana@x.com"), true)
            .await
            .unwrap();

        // sub-1 이 이메일을 바꿔 sub-2 계정의 이메일을 보고해도 자기 계정으로 로그인
        let login = store
            .upsert_external(&identity("sub-1", "ana@x.com"), true)
            .await
            .unwrap();

        assert_eq!(login.outcome(), "existing");
        assert_eq!(login.user().id, owner.id);
        assert_eq!(store.len(), 2);
    }

    #[actix_web::test]
    async fn test_upsert_rejects_account_linked_to_other_subject() {
        let store = MemoryUserStore::new();
        store
            .upsert_external(&identity("sub-1", "ana@x.com"), true)
            .await
            .unwrap();

        let err = store
            .upsert_external(&identity("sub-2", "ana@x.com"), true)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ConflictError(_)));
    }
}
