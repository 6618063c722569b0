//! # 베어러 토큰 서비스
//!
//! 불투명(opaque) 액세스 토큰을 발급, 확인, 폐기합니다.
//!
//! - 발급: `oat_` + 32 바이트 난수(base64url). 저장소에는 SHA-256 해시만 기록
//! - 만료: 저장소 TTL (`TOKEN_TTL_HOURS`, 기본 24시간)
//! - 폐기: 로그아웃 시 사용자의 모든 토큰 삭제

use log::{debug, info};

use crate::core::errors::AppResult;
use crate::domain::models::token::{generate_token, hash_token, IssuedToken};
use crate::repositories::tokens::DynTokenStore;

pub struct TokenService {
    tokens: DynTokenStore,
    ttl_seconds: u64,
}

impl TokenService {
    pub fn new(tokens: DynTokenStore, ttl_seconds: u64) -> Self {
        Self { tokens, ttl_seconds }
    }

    /// 새 토큰을 발급하고 해시를 저장합니다.
    pub async fn issue(&self, user_id: &str) -> AppResult<IssuedToken> {
        let token = generate_token();

        self.tokens
            .save(&hash_token(&token), user_id, self.ttl_seconds)
            .await?;

        debug!("토큰 발급 - user_id: {}", user_id);

        Ok(IssuedToken {
            token,
            expires_in: self.ttl_seconds,
        })
    }

    /// 토큰 원문의 소유자 ID. 없거나 만료되었으면 `None`
    pub async fn authenticate(&self, token: &str) -> AppResult<Option<String>> {
        if token.is_empty() {
            return Ok(None);
        }

        self.tokens.find_user_id(&hash_token(token)).await
    }

    /// 사용자의 모든 토큰을 폐기합니다.
    pub async fn revoke_all(&self, user_id: &str) -> AppResult<usize> {
        let revoked = self.tokens.delete_all_for_user(user_id).await?;
        info!("토큰 {}개 폐기 - user_id: {}", revoked, user_id);
        Ok(revoked)
    }
}
