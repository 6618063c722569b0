//! 사용자 저장소
//!
//! - [`user_repo`] - [`UserStore`] trait, [`ExternalLogin`] 결과 타입, MongoDB 구현
//! - [`memory`] - 테스트 및 로컬 실행용 인메모리 구현

pub mod memory;
pub mod user_repo;

pub use memory::MemoryUserStore;
pub use user_repo::*;
