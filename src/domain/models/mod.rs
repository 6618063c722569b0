//! # Domain Models Module
//!
//! 저장되지 않는 도메인 값 객체를 정의합니다.
//!
//! - [`auth`] - 인증된 요청 주체 (`AuthenticatedUser` extractor)
//! - [`oauth`] - Google ID 토큰 클레임과 외부 신원
//! - [`token`] - 베어러 토큰 생성/해싱

pub mod auth;
pub mod oauth;
pub mod token;
