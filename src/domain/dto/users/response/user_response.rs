//! 사용자 응답 DTO
//!
//! 비밀번호 해시와 외부 ID 는 어떤 응답에도 포함되지 않습니다.

use serde::Serialize;

use crate::config::AuthProvider;
use crate::domain::entities::users::user::User;

/// 공개 사용자 프로필
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub provider: AuthProvider,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id_string().unwrap_or_default(),
            name: user.name,
            email: user.email,
            avatar: user.avatar,
            provider: user.provider,
        }
    }
}

/// OAuth 콜백 리다이렉트 쿼리에 실리는 사용자 요약
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id_string().unwrap_or_default(),
            name: user.name.clone(),
            email: user.email.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SignUpResponse {
    pub message: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct LogInResponse {
    pub message: String,
    pub token: String,
    #[serde(rename = "type")]
    pub token_type: &'static str,
    /// 토큰 유효 시간 (초)
    pub expires_in: u64,
}

#[derive(Debug, Serialize)]
pub struct UserInfoResponse {
    pub message: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_user_response_hides_credentials() {
        let mut user = User::new_local("Ana".into(), "ana@x.com".into(), "$2b$12$hash".into());
        let id = ObjectId::new();
        user.id = Some(id);

        let json = serde_json::to_value(UserResponse::from(user)).unwrap();

        assert_eq!(json["id"], id.to_hex());
        assert_eq!(json["provider"], "local");
        assert!(json["avatar"].is_null());
        assert!(json.get("password_hash").is_none());
        assert!(json.get("external_id").is_none());
    }

    #[test]
    fn test_log_in_response_type_field() {
        let json = serde_json::to_value(LogInResponse {
            message: "logged in".to_string(),
            token: "oat_x".to_string(),
            token_type: "bearer",
            expires_in: 60,
        })
        .unwrap();

        assert_eq!(json["type"], "bearer");
        assert_eq!(json["token"], "oat_x");
    }
}
