//! # 베어러 토큰 리포지토리
//!
//! 토큰 원문은 저장하지 않고 SHA-256 해시만 키로 사용합니다.
//!
//! ## Redis 키 구조
//!
//! ```text
//! auth_token:{hash}     → user_id            (SET EX, TTL = TOKEN_TTL_HOURS)
//! user_tokens:{user_id} → { hash, hash, ... } (SADD + EXPIRE, 로그아웃 시 일괄 삭제용)
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::core::errors::{AppError, AppResult};
use crate::db::redis::RedisClient;

/// 베어러 토큰 저장소
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// 토큰 해시와 사용자 ID 를 TTL 과 함께 저장합니다.
    async fn save(&self, token_hash: &str, user_id: &str, ttl_seconds: u64) -> AppResult<()>;

    /// 만료되지 않은 토큰 해시의 소유자 ID
    async fn find_user_id(&self, token_hash: &str) -> AppResult<Option<String>>;

    /// 사용자의 모든 토큰을 삭제하고 삭제한 개수를 반환합니다.
    async fn delete_all_for_user(&self, user_id: &str) -> AppResult<usize>;
}

pub type DynTokenStore = Arc<dyn TokenStore>;

fn token_key(token_hash: &str) -> String {
    format!("auth_token:{}", token_hash)
}

fn user_tokens_key(user_id: &str) -> String {
    format!("user_tokens:{}", user_id)
}

/// Redis 기반 [`TokenStore`]
pub struct RedisTokenStore {
    redis: RedisClient,
}

impl RedisTokenStore {
    pub fn new(redis: RedisClient) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl TokenStore for RedisTokenStore {
    async fn save(&self, token_hash: &str, user_id: &str, ttl_seconds: u64) -> AppResult<()> {
        if ttl_seconds == 0 {
            return Err(AppError::InternalError("토큰 TTL 은 0 일 수 없습니다".to_string()));
        }

        let set_key = user_tokens_key(user_id);
        let mut conn = self.redis.connection();

        redis::pipe()
            .atomic()
            .set_ex(token_key(token_hash), user_id, ttl_seconds)
            .sadd(&set_key, token_hash)
            .expire(&set_key, ttl_seconds as i64)
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        debug!("토큰 저장 완료 - user_id: {}, ttl: {}초", user_id, ttl_seconds);
        Ok(())
    }

    async fn find_user_id(&self, token_hash: &str) -> AppResult<Option<String>> {
        self.redis.get_string(&token_key(token_hash)).await
    }

    async fn delete_all_for_user(&self, user_id: &str) -> AppResult<usize> {
        let set_key = user_tokens_key(user_id);
        let hashes = self.redis.members(&set_key).await?;

        if hashes.is_empty() {
            return Ok(0);
        }

        // 읽은 멤버만 제거해서 그 사이 발급된 토큰의 인덱스는 남겨 둠
        let mut pipe = redis::pipe();
        pipe.atomic();
        for hash in &hashes {
            pipe.del(token_key(hash));
        }
        pipe.srem(&set_key, &hashes);

        let mut conn = self.redis.connection();
        pipe.query_async::<()>(&mut conn)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        Ok(hashes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        assert_eq!(token_key("ab12"), "auth_token:ab12");
        assert_eq!(user_tokens_key("65f0"), "user_tokens:65f0");
    }
}
