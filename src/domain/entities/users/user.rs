//! User 엔티티
//!
//! `users` 컬렉션 문서와 1:1 로 매핑됩니다.
//! 로컬 계정은 `password_hash`를, 외부 로그인 계정은 `external_id`를 가지며
//! 연동된 계정은 둘 다 가질 수 있습니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;
use crate::domain::models::oauth::google_oauth_model::google_user::ExternalIdentity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// 표시 이름
    pub name: String,

    /// 로그인 이메일 (유니크)
    pub email: String,

    /// bcrypt 해시. 외부 로그인 전용 계정은 없음
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,

    /// 외부 ID 프로바이더의 subject (Google `sub`, 유니크)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    /// 필드가 없는 문서는 `local`로 읽습니다.
    #[serde(default)]
    pub provider: AuthProvider,

    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// 회원가입으로 생성되는 로컬 계정
    pub fn new_local(name: String, email: String, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            name,
            email,
            password_hash: Some(password_hash),
            external_id: None,
            avatar: None,
            provider: AuthProvider::Local,
            created_at: now,
            updated_at: now,
        }
    }

    /// 첫 외부 로그인으로 생성되는 계정 (비밀번호 없음)
    pub fn new_external(identity: &ExternalIdentity) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            name: identity.name.clone(),
            email: identity.email.clone(),
            password_hash: None,
            external_id: Some(identity.external_id.clone()),
            avatar: identity.avatar.clone(),
            provider: AuthProvider::External,
            created_at: now,
            updated_at: now,
        }
    }

    /// 아직 외부 ID 가 없는 계정에 외부 ID 를 연동합니다.
    ///
    /// 이미 연동된 계정은 건드리지 않으며, 변경 여부를 반환합니다.
    pub fn link_external(&mut self, identity: &ExternalIdentity) -> bool {
        if self.external_id.is_some() {
            return false;
        }

        self.external_id = Some(identity.external_id.clone());
        self.provider = AuthProvider::External;
        if identity.avatar.is_some() {
            self.avatar = identity.avatar.clone();
        }
        self.updated_at = DateTime::now();
        true
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn can_authenticate_with_password(&self) -> bool {
        self.password_hash.is_some()
    }
}
