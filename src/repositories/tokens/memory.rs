//! 프로세스 메모리 기반 토큰 저장소
//!
//! `STORE_BACKEND=memory` 로컬 실행과 통합 테스트에서 사용합니다.
//! 재시작하면 모든 토큰이 사라집니다.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use super::token_repository::TokenStore;
use crate::core::errors::{AppError, AppResult};

#[derive(Default)]
struct Inner {
    tokens: HashMap<String, (String, DateTime<Utc>)>,
    by_user: HashMap<String, HashSet<String>>,
}

impl Inner {
    /// 사용자 인덱스에서 만료되었거나 이미 사라진 토큰 해시를 제거합니다.
    fn prune_user(&mut self, user_id: &str, now: DateTime<Utc>) {
        let Some(hashes) = self.by_user.get_mut(user_id) else {
            return;
        };

        let tokens = &mut self.tokens;
        hashes.retain(|hash| match tokens.get(hash) {
            Some((_, expires_at)) if *expires_at > now => true,
            Some(_) => {
                tokens.remove(hash);
                false
            }
            None => false,
        });

        if hashes.is_empty() {
            self.by_user.remove(user_id);
        }
    }
}

fn expiry_after(now: DateTime<Utc>, ttl_seconds: u64) -> AppResult<DateTime<Utc>> {
    i64::try_from(ttl_seconds)
        .ok()
        .and_then(Duration::try_seconds)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| AppError::InternalError(format!("토큰 TTL 범위 초과: {}초", ttl_seconds)))
}

#[derive(Default)]
pub struct MemoryTokenStore {
    inner: Mutex<Inner>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| AppError::InternalError("토큰 저장소 잠금 실패".to_string()))
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn save(&self, token_hash: &str, user_id: &str, ttl_seconds: u64) -> AppResult<()> {
        if ttl_seconds == 0 {
            return Err(AppError::InternalError("토큰 TTL 은 0 일 수 없습니다".to_string()));
        }

        let now = Utc::now();
        let expires_at = expiry_after(now, ttl_seconds)?;
        let mut inner = self.lock()?;
        inner.prune_user(user_id, now);

        inner
            .tokens
            .insert(token_hash.to_string(), (user_id.to_string(), expires_at));
        inner
            .by_user
            .entry(user_id.to_string())
            .or_default()
            .insert(token_hash.to_string());

        Ok(())
    }

    async fn find_user_id(&self, token_hash: &str) -> AppResult<Option<String>> {
        let mut inner = self.lock()?;

        match inner.tokens.get(token_hash) {
            Some((user_id, expires_at)) if *expires_at > Utc::now() => Ok(Some(user_id.clone())),
            Some(_) => {
                inner.tokens.remove(token_hash);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn delete_all_for_user(&self, user_id: &str) -> AppResult<usize> {
        let mut inner = self.lock()?;
        inner.prune_user(user_id, Utc::now());

        let hashes = inner.by_user.remove(user_id).unwrap_or_default();
        for hash in &hashes {
            inner.tokens.remove(hash);
        }

        Ok(hashes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_save_find_and_delete_all() {
        let store = MemoryTokenStore::new();

        store.save("h1", "u1", 60).await.unwrap();
        store.save("h2", "u1", 60).await.unwrap();
        store.save("h3", "u2", 60).await.unwrap();

        assert_eq!(store.find_user_id("h1").await.unwrap().as_deref(), Some("u1"));
        assert_eq!(store.delete_all_for_user("u1").await.unwrap(), 2);

        assert!(store.find_user_id("h1").await.unwrap().is_none());
        assert!(store.find_user_id("h2").await.unwrap().is_none());
        assert_eq!(store.find_user_id("h3").await.unwrap().as_deref(), Some("u2"));
    }

    #[actix_web::test]
    async fn test_delete_without_tokens_is_zero() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.delete_all_for_user("nobody").await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn test_zero_ttl_rejected() {
        let store = MemoryTokenStore::new();
        assert!(store.save("h1", "u1", 0).await.is_err());
    }

    #[actix_web::test]
    async fn test_out_of_range_ttl_is_error() {
        let store = MemoryTokenStore::new();

        let err = store.save("h1", "u1", u64::MAX).await.unwrap_err();
        assert!(matches!(err, AppError::InternalError(_)));
        assert!(store.find_user_id("h1").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_delete_all_ignores_expired_tokens() {
        let store = MemoryTokenStore::new();
        store.save("live", "u1", 60).await.unwrap();
        {
            let mut inner = store.lock().unwrap();
            let past = Utc::now() - Duration::seconds(5);
            inner.tokens.insert("stale".to_string(), ("u1".to_string(), past));
            inner.by_user.entry("u1".to_string()).or_default().insert("stale".to_string());
        }

        assert_eq!(store.delete_all_for_user("u1").await.unwrap(), 1);
        assert!(store.lock().unwrap().tokens.is_empty());
    }

    #[actix_web::test]
    async fn test_save_prunes_expired_hashes() {
        let store = MemoryTokenStore::new();
        {
            let mut inner = store.lock().unwrap();
            let past = Utc::now() - Duration::seconds(5);
            inner.tokens.insert("stale".to_string(), ("u1".to_string(), past));
            inner.by_user.entry("u1".to_string()).or_default().insert("stale".to_string());
        }

        store.save("fresh", "u1", 60).await.unwrap();

        let inner = store.lock().unwrap();
        assert!(!inner.tokens.contains_key("stale"));
        assert_eq!(inner.by_user.get("u1").map(HashSet::len), Some(1));
    }
}
