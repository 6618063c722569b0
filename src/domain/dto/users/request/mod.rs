pub mod auth_request;
pub mod create_user;

pub use auth_request::{GoogleCallbackQuery, LogInRequest};
pub use create_user::SignUpRequest;
