//! 로그인 서비스 백엔드
//!
//! 이메일/비밀번호 회원가입과 로그인, 불투명 베어러 토큰 발급과 폐기,
//! 그리고 Google OAuth 2.0 로그인을 제공하는 인증 서비스입니다.
//!
//! # Features
//!
//! - **로컬 계정**: bcrypt 해싱, 필드 단위 입력 검증
//! - **베어러 토큰**: `oat_` 불투명 토큰, Redis 에 SHA-256 해시만 저장
//! - **OAuth 2.0**: Google ID 토큰(JWKS) 검증, 원자적 조회/연동/생성
//! - **MongoDB**: 사용자 데이터 영구 저장
//! - **Redis**: 토큰 저장 및 TTL 만료
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트 (+ 별칭 경로)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청 검증, 응답 envelope
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← UserService, TokenService, IdentityProvider
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← UserStore, TokenStore (trait)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소 (또는 인메모리)
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use signin_service_backend::state::{AppState, AuthSettings};
//!
//! let state = AppState::new(
//!     Arc::new(MemoryUserStore::new()),
//!     Arc::new(MemoryTokenStore::new()),
//!     Arc::new(GoogleAuthService::new(GoogleOAuthConfig::from_env()?)),
//!     FrontendRedirect::from_env(),
//!     AuthSettings::from_env(),
//! );
//! let app = App::new().configure(|cfg| state.configure(cfg));
//! ```

pub mod config;
pub mod core;
pub mod db;
pub mod domain;
pub mod handlers;
pub mod middlewares;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
