//! # Configuration Module
//!
//! 환경 변수 기반 설정값을 한곳에서 관리합니다.
//!
//! - [`data_config`] - 실행 환경, 서버, 저장소, 비밀번호 해싱, Rate Limiting
//! - [`auth_config`] - Google OAuth, 베어러 토큰, 프론트엔드 리다이렉트, 인증 프로바이더
//!
//! `.env` 파일은 `main`에서 `PROFILE` 값에 따라 로드됩니다
//! (`dev` → `.env.dev`, `prod` → `.env.prod`, 그 외 → `.env`).
//!
//! ```bash
//! export HOST="0.0.0.0"
//! export PORT="8080"
//! export STORE_BACKEND="mongo"          # mongo | memory
//! export MONGODB_URI="mongodb://localhost:27017"
//! export REDIS_URL="redis://localhost:6379"
//! export GOOGLE_CLIENT_ID="..."
//! export GOOGLE_CLIENT_SECRET="..."
//! export GOOGLE_REDIRECT_URI="http://localhost:8080/callback"
//! export FRONTEND_URL="http://localhost:3000/auth/done"
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
