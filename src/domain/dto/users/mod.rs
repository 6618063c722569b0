//! 사용자 및 인증 DTO
//!
//! ```text
//! users/
//! ├── request/
//! │   ├── create_user.rs     ← SignUpRequest
//! │   └── auth_request.rs    ← LogInRequest, GoogleCallbackQuery
//! └── response/
//!     ├── user_response.rs   ← UserResponse, 응답 envelope
//!     └── google_oauth_response.rs
//! ```

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
