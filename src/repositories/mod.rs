//! # Repository Layer
//!
//! 저장소 접근을 trait 뒤로 감추고, 구현체는 `main`에서 골라 `Arc<dyn ...>`로 주입합니다.
//!
//! ```text
//! repositories/
//! ├── users/    ← UserStore (MongoDB | memory)
//! └── tokens/   ← TokenStore (Redis | memory)
//! ```

pub mod tokens;
pub mod users;

pub use tokens::{DynTokenStore, MemoryTokenStore, RedisTokenStore, TokenStore};
pub use users::{DynUserStore, ExternalLogin, MemoryUserStore, MongoUserStore, UserStore};
