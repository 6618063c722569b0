pub mod google_auth_service;
pub mod token_service;

pub use google_auth_service::*;
pub use token_service::*;
