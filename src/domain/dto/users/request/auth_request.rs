//! 인증 요청관련 DTO
//!
//! 로그인 본문과 Google OAuth 콜백 쿼리 파라미터를 매핑합니다.
use serde::Deserialize;
use validator::Validate;

/// 로컬 로그인 요청 구조체
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LogInRequest {
    #[serde(default)]
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,

    #[serde(default, alias = "password")]
    #[validate(length(min = 1, message = "secret is required"))]
    pub secret: String,
}

impl LogInRequest {
    pub fn normalized(mut self) -> Self {
        self.email = self.email.trim().to_lowercase();
        self
    }
}

/// OAuth 콜백 쿼리 파라미터 구조체
///
/// 사용자가 동의를 거부하면 Google 은 `code` 대신 `error`를 보냅니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoogleCallbackQuery {
    pub code: Option<String>,

    /// 에러가 있을 경우 (사용자가 거부했거나 에러 발생)
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl GoogleCallbackQuery {
    /// 비어 있지 않은 authorization code
    pub fn code(&self) -> Option<&str> {
        self.code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_in_accepts_password_alias() {
        let req: LogInRequest = serde_json::from_value(serde_json::json!({
            "email": "ANA@x.com",
            "password": "p1"
        }))
        .unwrap();

        let req = req.normalized();
        assert_eq!(req.email, "ana@x.com");
        assert_eq!(req.secret, "p1");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_log_in_rejects_bad_email() {
        let req = LogInRequest {
            email: "not-an-email".to_string(),
            secret: String::new(),
        };

        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("secret"));
    }

    #[test]
    fn test_callback_code_ignores_blank() {
        let query = GoogleCallbackQuery {
            code: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(query.code().is_none());

        let query = GoogleCallbackQuery {
            code: Some("4/abc".to_string()),
            ..Default::default()
        };
        assert_eq!(query.code(), Some("4/abc"));
    }
}
