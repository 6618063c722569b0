//! # Domain Layer
//!
//! ```text
//! domain/
//! ├── entities/   ← User (MongoDB 문서)
//! ├── models/     ← AuthenticatedUser, ExternalIdentity, 토큰 값 객체
//! └── dto/        ← 요청/응답 DTO
//! ```

pub mod dto;
pub mod entities;
pub mod models;

pub use entities::users::user::User;
pub use models::auth::AuthenticatedUser;
pub use models::oauth::google_oauth_model::ExternalIdentity;
