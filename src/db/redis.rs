//! Redis 연결 관리
//!
//! 베어러 토큰 저장소가 사용하는 Redis 연결을 제공합니다.
//! `ConnectionManager`는 내부적으로 멀티플렉싱되고 끊어지면 재연결하므로
//! 요청마다 새 연결을 만들지 않고 clone 해서 사용합니다.
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

use log::info;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use crate::core::errors::{AppError, AppResult};

#[derive(Clone)]
pub struct RedisClient {
    manager: ConnectionManager,
}

impl RedisClient {
    /// Redis 에 연결하고 `PING`으로 서버 가용성을 확인합니다.
    pub async fn connect(redis_url: &str) -> AppResult<Self> {
        let client = Client::open(redis_url)
            .map_err(|e| AppError::RedisError(format!("Redis URL 파싱 실패: {}", e)))?;

        let mut manager = client
            .get_connection_manager()
            .await
            .map_err(|e| AppError::RedisError(format!("Redis 연결 실패: {}", e)))?;

        redis::cmd("PING")
            .query_async::<()>(&mut manager)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        info!("✅ Redis 연결 성공");

        Ok(Self { manager })
    }

    /// 파이프라인 실행 등에 사용할 연결 핸들
    pub fn connection(&self) -> ConnectionManager {
        self.manager.clone()
    }

    pub async fn get_string(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.connection();
        conn.get(key)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))
    }

    pub async fn members(&self, key: &str) -> AppResult<Vec<String>> {
        let mut conn = self.connection();
        conn.smembers(key)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))
    }
}
