//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 데이터 액세스 계층을 담당하는 리포지토리입니다.
//!
//! ## 특징
//!
//! - **데이터 무결성**: `email` 유니크 인덱스, `external_id` 부분(partial) 유니크 인덱스
//! - **원자적 외부 로그인**: `find_one_and_update` + `upsert` 한 번으로 조회/연동/생성
//! - **중복 키 재시도**: 동시 생성으로 E11000 이 나면 같은 upsert 를 한 번 더 실행

use std::sync::Arc;

use async_trait::async_trait;
use log::{info, warn};
use mongodb::bson::{doc, oid::ObjectId, Bson, DateTime, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument};
use mongodb::{Collection, IndexModel};

use crate::core::errors::{AppError, AppResult};
use crate::db::Database;
use crate::domain::entities::users::user::User;
use crate::domain::models::oauth::google_oauth_model::ExternalIdentity;

pub const USERS_COLLECTION: &str = "users";

/// 외부 로그인 시 사용자 해석 결과
#[derive(Debug, Clone)]
pub enum ExternalLogin {
    /// 일치하는 계정이 없어 새로 생성됨
    Created(User),
    /// 같은 이메일의 기존 계정에 외부 ID 가 연동됨
    Linked(User),
    /// 이미 연동된 계정 (변경 없음)
    Existing(User),
}

impl ExternalLogin {
    pub fn user(&self) -> &User {
        match self {
            ExternalLogin::Created(user) | ExternalLogin::Linked(user) | ExternalLogin::Existing(user) => user,
        }
    }

    pub fn into_user(self) -> User {
        match self {
            ExternalLogin::Created(user) | ExternalLogin::Linked(user) | ExternalLogin::Existing(user) => user,
        }
    }

    pub fn outcome(&self) -> &'static str {
        match self {
            ExternalLogin::Created(_) => "created",
            ExternalLogin::Linked(_) => "linked",
            ExternalLogin::Existing(_) => "existing",
        }
    }
}

/// 사용자 저장소
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 형식이 잘못된 ID 는 `None`으로 처리합니다.
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// 이메일이 이미 존재하면 `email` 필드 검증 에러를 반환합니다.
    async fn create(&self, user: User) -> AppResult<User>;

    /// 외부 ID 로 계정을 찾고, 없으면 (허용된 경우) 이메일로 연동하고, 그래도 없으면 생성합니다.
    ///
    /// `allow_email_link`가 `false`이면 외부 ID 로만 조회하므로
    /// 같은 이메일의 기존 계정이 있으면 [`AppError::ConflictError`]가 됩니다.
    async fn upsert_external(
        &self,
        identity: &ExternalIdentity,
        allow_email_link: bool,
    ) -> AppResult<ExternalLogin>;
}

pub type DynUserStore = Arc<dyn UserStore>;

pub(crate) fn email_taken() -> AppError {
    AppError::field("email", "unique", "email is already registered")
}

pub(crate) fn identity_conflict() -> AppError {
    AppError::ConflictError("account is linked to a different external identity".to_string())
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == 11000,
        ErrorKind::Command(e) => e.code == 11000,
        _ => err.to_string().contains("E11000"),
    }
}

/// MongoDB 기반 [`UserStore`]
pub struct MongoUserStore {
    collection: Collection<User>,
}

impl MongoUserStore {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.get_database().collection::<User>(USERS_COLLECTION),
        }
    }

    /// 유니크 인덱스 생성 (시작 시 한 번 호출)
    pub async fn create_indexes(&self) -> AppResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("email_unique".to_string())
                    .build(),
            )
            .build();

        // 외부 ID 가 없는 로컬 계정들이 서로 충돌하지 않도록 문자열 값만 인덱싱
        let external_id_index = IndexModel::builder()
            .keys(doc! { "external_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .partial_filter_expression(doc! { "external_id": { "$type": "string" } })
                    .name("external_id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection
            .create_indexes(vec![email_index, external_id_index])
            .await
            .map_err(|e| AppError::DatabaseError(format!("인덱스 생성 실패: {}", e)))?;

        info!("✅ users 컬렉션 인덱스 준비 완료");
        Ok(())
    }

    /// 외부 ID 가 이미 있으면 문서를 그대로 두고, 없으면 연동/생성 필드를 채우는 파이프라인
    fn external_login_pipeline(identity: &ExternalIdentity) -> Vec<Document> {
        let now = DateTime::now();
        let linked = doc! { "$eq": [{ "$type": "$external_id" }, "string"] };
        let avatar = identity.avatar.clone().map(Bson::String).unwrap_or(Bson::Null);

        vec![doc! {
            "$set": {
                "external_id": { "$ifNull": ["$external_id", identity.external_id.as_str()] },
                "provider": { "$cond": [linked.clone(), { "$ifNull": ["$provider", "local"] }, "external"] },
                "avatar": { "$cond": [linked.clone(), "$avatar", { "$ifNull": [avatar, "$avatar"] }] },
                "name": { "$ifNull": ["$name", identity.name.as_str()] },
                "email": { "$ifNull": ["$email", identity.email.as_str()] },
                "created_at": { "$ifNull": ["$created_at", now] },
                "updated_at": { "$cond": [linked, "$updated_at", now] },
            }
        }]
    }

    /// 1단계 조회 조건: 외부 ID 만으로 매칭
    fn external_id_filter(identity: &ExternalIdentity) -> Document {
        doc! { "external_id": identity.external_id.as_str() }
    }

    /// 2단계 upsert 조건: 외부 ID, 또는 (허용된 경우) 이메일
    fn upsert_filter(identity: &ExternalIdentity, allow_email_link: bool) -> Document {
        if allow_email_link {
            doc! { "$or": [
                { "external_id": identity.external_id.as_str() },
                { "email": identity.email.as_str() },
            ] }
        } else {
            Self::external_id_filter(identity)
        }
    }

    /// upsert 이전 문서와 이후 문서를 함께 반환합니다.
    ///
    /// 외부 ID 로 이미 연동된 계정이 있으면 이메일이 같은 다른 계정보다 항상 우선합니다.
    async fn try_upsert_external(
        &self,
        identity: &ExternalIdentity,
        allow_email_link: bool,
    ) -> Result<(Option<User>, Option<User>), mongodb::error::Error> {
        if let Some(linked) = self
            .collection
            .find_one(Self::external_id_filter(identity))
            .await?
        {
            return Ok((Some(linked.clone()), Some(linked)));
        }

        // 두 문서가 걸리면 이미 연동된 쪽(문자열 external_id)을 먼저 선택
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::Before)
            .sort(doc! { "external_id": -1 })
            .build();

        let before = self
            .collection
            .find_one_and_update(
                Self::upsert_filter(identity, allow_email_link),
                Self::external_login_pipeline(identity),
            )
            .with_options(options)
            .await?;

        let after_filter = match before.as_ref().and_then(|user| user.id) {
            Some(id) => doc! { "_id": id },
            None => Self::external_id_filter(identity),
        };

        let after = self.collection.find_one(after_filter).await?;
        Ok((before, after))
    }
}

/// upsert 전후 문서로 외부 로그인 결과를 판정합니다.
fn classify_external_login(
    identity: &ExternalIdentity,
    before: Option<User>,
    after: User,
) -> AppResult<ExternalLogin> {
    let login = match before {
        None => ExternalLogin::Created(after),
        Some(prev) if prev.external_id.is_none() => ExternalLogin::Linked(after),
        Some(_) => ExternalLogin::Existing(after),
    };

    // 이메일로 매칭된 계정이 다른 외부 ID 에 이미 연동되어 있는 경우
    if login.user().external_id.as_deref() != Some(identity.external_id.as_str()) {
        return Err(identity_conflict());
    }

    Ok(login)
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let object_id = match ObjectId::parse_str(id) {
            Ok(object_id) => object_id,
            Err(_) => return Ok(None),
        };

        self.collection
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.collection
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn create(&self, mut user: User) -> AppResult<User> {
        let result = self.collection.insert_one(&user).await.map_err(|e| {
            if is_duplicate_key(&e) {
                email_taken()
            } else {
                AppError::DatabaseError(e.to_string())
            }
        })?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::InternalError("삽입된 문서의 ID 형식이 올바르지 않습니다".to_string()))?;
        user.id = Some(id);

        Ok(user)
    }

    async fn upsert_external(
        &self,
        identity: &ExternalIdentity,
        allow_email_link: bool,
    ) -> AppResult<ExternalLogin> {
        let result = match self.try_upsert_external(identity, allow_email_link).await {
            Err(e) if is_duplicate_key(&e) => {
                warn!("외부 로그인 upsert 중복 키 충돌, 한 번 재시도합니다");
                self.try_upsert_external(identity, allow_email_link).await
            }
            other => other,
        };

        let (before, after) = result.map_err(|e| {
            if is_duplicate_key(&e) {
                AppError::ConflictError("an account with this email already exists".to_string())
            } else {
                AppError::DatabaseError(e.to_string())
            }
        })?;

        let user = after.ok_or_else(|| {
            AppError::DatabaseError("upsert 이후 사용자 문서를 찾을 수 없습니다".to_string())
        })?;

        classify_external_login(identity, before, user)
    }
}
