//! Users Entity Module
//!
//! 로컬 계정과 외부 로그인(Google) 계정을 함께 표현하는 [`User`](user::User) 엔티티를 정의합니다.
//!
//! ```rust,ignore
//! use crate::domain::entities::users::user::User;
//!
//! // 로컬 사용자 생성
//! let user = User::new_local("Ana".into(), "ana@x.com".into(), password_hash);
//!
//! // 외부 로그인 사용자 생성
//! let user = User::new_external(&identity);
//! ```

pub mod user;
