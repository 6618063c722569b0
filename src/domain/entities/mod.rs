//! # Domain Entities Module
//!
//! MongoDB 문서와 직접 매핑되는 엔티티를 정의합니다.
//!
//! ```text
//! Domain Layer
//! ├── entities/     ← 이 모듈 (저장되는 엔티티)
//! ├── models/       ← 인증 컨텍스트, 외부 ID, 토큰 값 객체
//! └── dto/          ← 요청/응답 데이터 전송 객체
//! ```

pub mod users;
