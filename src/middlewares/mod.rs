//! # Middlewares
//!
//! - [`auth_middleware`] - 베어러 토큰 인증 (`AuthMiddleware::required()`)

pub mod auth_middleware;
mod auth_inner;

// 미들웨어 재export
pub use auth_middleware::AuthMiddleware;
