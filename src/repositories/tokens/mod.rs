//! 베어러 토큰 저장소
//!
//! - [`token_repository`] - [`TokenStore`] trait 과 Redis 구현
//! - [`memory`] - 테스트 및 로컬 실행용 인메모리 구현

pub mod memory;
pub mod token_repository;

pub use memory::MemoryTokenStore;
pub use token_repository::*;
