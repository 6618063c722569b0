//! Google OAuth 2.0 관련 모델
//!
//! ID 토큰 클레임, 공개키 세트, 검증된 외부 신원을 포함합니다.

pub mod google_user;

pub use google_user::*;
