//! # OAuth Domain Models Module
//!
//! 외부 로그인(Google OAuth 2.0) 플로우에서 사용하는 도메인 모델입니다.
//!
//! ```text
//! oauth/
//! ├── mod.rs
//! └── google_oauth_model/
//!     ├── mod.rs
//!     └── google_user.rs   ← ID 토큰 클레임, JWKS, ExternalIdentity
//! ```

pub mod google_oauth_model;
