//! # Service Layer
//!
//! - [`users`] - 회원가입, 비밀번호 검증, 외부 로그인 사용자 해석
//! - [`auth`] - 베어러 토큰, Google OAuth

pub mod auth;
pub mod users;
