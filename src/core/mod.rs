//! # Core Module
//!
//! 서비스 전반에서 공유하는 핵심 타입을 제공합니다.
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입
//! - **HTTP 통합**: Actix-Web `ResponseError` 구현으로 `{ "message": ... }` 응답 생성
//! - **필드 단위 검증 에러**: `validator`의 `ValidationErrors`를 그대로 응답에 반영
//!
//! 의존성은 전역 레지스트리 대신 `main`에서 명시적으로 생성한 뒤
//! `web::Data`로 주입합니다. 테스트에서는 같은 자리에 인메모리 저장소와
//! 가짜 OAuth 프로바이더를 넣습니다.

pub mod errors;

pub use errors::*;
