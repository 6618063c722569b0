//! # Application Error Handling System
//!
//! 인증 서비스 전역에서 사용하는 통합 에러 타입입니다.
//! `thiserror`로 `Error` trait을 구현하고 `actix_web::ResponseError`를 구현하여
//! 핸들러에서 `?` 연산자만으로 일관된 JSON 응답이 만들어지도록 합니다.
//!
//! ## 응답 형식
//!
//! 모든 에러 응답은 `message` 필드를 가진 JSON 문서입니다.
//! 입력값 검증 실패는 필드별 메시지를 `errors`에 추가로 담습니다.
//!
//! ```json
//! { "message": "validation failed", "errors": { "email": ["email is already registered"] } }
//! ```
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `ValidationError` | 400 Bad Request | 필드 검증 실패, 이메일 중복 |
//! | `BadRequest` | 400 Bad Request | 잘못된 JSON, OAuth code/id_token 누락 |
//! | `AuthenticationError` | 401 Unauthorized | 로그인 실패, 토큰 없음/무효 |
//! | `ConflictError` | 409 Conflict | 계정 연동 충돌 |
//! | `ExternalServiceError` | 502 Bad Gateway | Google 토큰 교환/검증 실패 |
//! | `DatabaseError` | 500 Internal Server Error | MongoDB 오류 |
//! | `RedisError` | 500 Internal Server Error | Redis 오류 |
//! | `InternalError` | 500 Internal Server Error | 예상치 못한 오류 |
//!
//! 5xx 응답은 내부 정보를 노출하지 않도록 고정된 메시지만 내려보내고,
//! 원본 에러는 서버 로그에 기록합니다.

use std::collections::BTreeMap;

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde_json::json;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

/// 애플리케이션 전역 에러 타입
#[derive(Error, Debug)]
pub enum AppError {
    /// MongoDB 연산 실패 (500)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 연산 실패 (500)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 필드 단위 입력값 검증 실패 (400)
    ///
    /// `validator` 크레이트의 `ValidationErrors`를 그대로 보관하여
    /// 응답에 필드별 메시지를 담을 수 있게 합니다.
    #[error("Validation error: {0}")]
    ValidationError(ValidationErrors),

    /// 형식이 잘못된 요청 (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 충돌/중복 에러 (409)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 (401)
    ///
    /// 메시지는 그대로 클라이언트에 전달되므로 어떤 필드가 틀렸는지
    /// 드러내지 않는 문구만 사용해야 합니다.
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 외부 서비스(Google OAuth) 호출 실패 (502)
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 내부 서버 에러 (500)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 단일 필드 검증 에러를 생성합니다.
    ///
    /// 스키마 검증 이후 저장소 조회로만 판단할 수 있는 규칙
    /// (예: 이메일 중복)을 일반 검증 에러와 같은 형태로 보고할 때 사용합니다.
    pub fn field(field: &'static str, code: &'static str, message: &'static str) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add(field, ValidationError::new(code).with_message(message.into()));
        AppError::ValidationError(errors)
    }

    /// 로그인 실패 시 공통으로 사용하는 에러
    pub fn invalid_credentials() -> Self {
        AppError::AuthenticationError("invalid credentials".to_string())
    }

    /// 클라이언트에 노출해도 되는 메시지
    pub fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(_) => "validation failed".to_string(),
            AppError::BadRequest(msg)
            | AppError::ConflictError(msg)
            | AppError::AuthenticationError(msg) => msg.clone(),
            AppError::ExternalServiceError(_) => "identity provider request failed".to_string(),
            AppError::DatabaseError(_) | AppError::RedisError(_) | AppError::InternalError(_) => {
                "internal server error".to_string()
            }
        }
    }
}

/// `ValidationErrors`를 `{ field: [message, ...] }` 형태로 변환합니다.
pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => e.code.to_string(),
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::ValidationError(errors)
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::ExternalServiceError(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            log::error!("요청 처리 실패 ({}): {}", status.as_u16(), self);
        }

        let body = match self {
            AppError::ValidationError(errors) => json!({
                "message": self.public_message(),
                "errors": field_messages(errors),
            }),
            _ => json!({ "message": self.public_message() }),
        };

        HttpResponse::build(status).json(body)
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 `AppError::InternalError`로 변환하는 확장 trait
///
/// ```rust,ignore
/// let hash = bcrypt::hash(secret, cost).context("password hashing failed")?;
/// ```
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::ResponseError;

    async fn body_json(error: AppError) -> serde_json::Value {
        let response = error.error_response();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_validation_error_response() {
        let error = AppError::field("email", "email", "email must be a valid address");
        assert_eq!(error.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_authentication_error_response() {
        let error = AppError::invalid_credentials();
        assert_eq!(error.error_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_conflict_error_response() {
        let error = AppError::ConflictError("already linked".to_string());
        assert_eq!(error.error_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_external_service_error_response() {
        let error = AppError::ExternalServiceError("token endpoint returned 400".to_string());
        assert_eq!(error.error_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_internal_error_response() {
        let error = AppError::InternalError("Something went wrong".to_string());
        assert_eq!(
            error.error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn test_validation_body_lists_field_messages() {
        let body = body_json(AppError::field(
            "email",
            "unique",
            "email is already registered",
        ))
        .await;

        assert_eq!(body["message"], "validation failed");
        assert_eq!(body["errors"]["email"][0], "email is already registered");
    }

    #[actix_web::test]
    async fn test_invalid_credentials_body() {
        let body = body_json(AppError::invalid_credentials()).await;
        assert_eq!(body, json!({ "message": "invalid credentials" }));
    }

    #[actix_web::test]
    async fn test_server_errors_hide_details() {
        let body = body_json(AppError::DatabaseError("connection refused 10.0.0.3".to_string())).await;
        assert_eq!(body, json!({ "message": "internal server error" }));
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("connection reset");
        let app_result = result.context("Additional context");

        match app_result {
            Err(AppError::InternalError(msg)) => {
                assert!(msg.contains("Additional context"));
                assert!(msg.contains("connection reset"));
            }
            other => panic!("Expected InternalError, got {:?}", other),
        }
    }
}
