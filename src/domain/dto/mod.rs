//! # Data Transfer Objects
//!
//! HTTP 요청/응답 본문과 외부 API 응답을 매핑하는 DTO 모듈입니다.
//! 요청 DTO 는 `validator` derive 로 필드 단위 검증을 수행합니다.

pub mod users;

pub use users::*;
