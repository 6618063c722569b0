//! # 인증 핸들러
//!
//! | Method | Path | 설명 |
//! |--------|------|------|
//! | POST | `/api/v1/sign-up` | 로컬 회원가입 |
//! | POST | `/api/v1/log-in` | 이메일/비밀번호 로그인, 베어러 토큰 발급 |
//! | POST | `/api/v1/log-out` | 사용자의 모든 토큰 폐기 (인증 필요) |
//! | GET | `/api/v1/auth/google` | Google 동의 화면으로 302 |
//! | GET | `/callback` | Google 콜백, 프론트엔드로 302 |
//! | GET | `/api/v1/user-info` | 현재 사용자 프로필 (인증 필요) |
//!
//! 협력 객체(`UserService`, `TokenService`, `IdentityProvider`, `FrontendRedirect`)는
//! 모두 `web::Data`로 주입됩니다.

use actix_web::http::header;
use actix_web::{web, HttpResponse};
use log::{info, warn};
use validator::Validate;

use crate::config::FrontendRedirect;
use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::domain::dto::users::request::{GoogleCallbackQuery, LogInRequest, SignUpRequest};
use crate::domain::dto::users::response::{
    LogInResponse, MessageResponse, SignUpResponse, UserInfoResponse, UserSummary,
};
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::auth::{IdentityProvider, TokenService};
use crate::services::users::UserService;

pub async fn sign_up(
    payload: web::Json<SignUpRequest>,
    users: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    let request = payload.into_inner().normalized();

    // 유효성 검사
    request.validate()?;

    let user = users.sign_up(request).await?;

    Ok(HttpResponse::Created().json(SignUpResponse {
        message: "user created".to_string(),
        user: user.into(),
    }))
}

pub async fn log_in(
    payload: web::Json<LogInRequest>,
    users: web::Data<UserService>,
    tokens: web::Data<TokenService>,
) -> Result<HttpResponse, AppError> {
    let request = payload.into_inner().normalized();
    request.validate()?;

    let user = users.verify_credentials(&request.email, &request.secret).await?;
    let user_id = user
        .id_string()
        .ok_or_else(|| AppError::InternalError("사용자 ID 가 없습니다".to_string()))?;

    let issued = tokens.issue(&user_id).await?;

    info!("로컬 로그인 성공 - 사용자: {}, ID: {}", user.email, user_id);

    Ok(HttpResponse::Ok().json(LogInResponse {
        message: "logged in".to_string(),
        token: issued.token,
        token_type: "bearer",
        expires_in: issued.expires_in,
    }))
}

pub async fn log_out(
    auth: AuthenticatedUser,
    tokens: web::Data<TokenService>,
) -> Result<HttpResponse, AppError> {
    tokens.revoke_all(&auth.user_id).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("logged out")))
}

pub async fn google_redirect(provider: web::Data<dyn IdentityProvider>) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, provider.authorization_url()))
        .finish()
}

/// Google OAuth 콜백
///
/// `code` 누락과 토큰 응답의 `id_token` 누락은 400 JSON 으로 응답하고,
/// 그 밖의 실패는 모두 `FRONTEND_URL?error=...` 리다이렉트로 전달합니다.
pub async fn google_callback(
    query: web::Query<GoogleCallbackQuery>,
    provider: web::Data<dyn IdentityProvider>,
    users: web::Data<UserService>,
    tokens: web::Data<TokenService>,
    frontend: web::Data<FrontendRedirect>,
) -> Result<HttpResponse, AppError> {
    // 에러 체크 (사용자가 거부했거나 에러 발생)
    if let Some(error) = &query.error {
        let message = query.error_description.as_deref().unwrap_or(error);
        warn!("Google OAuth 에러: {} - {}", error, message);
        return Ok(redirect_to(frontend.with_query(&[("error", message)])));
    }

    let code = query
        .code()
        .ok_or_else(|| AppError::BadRequest("authorization code is required".to_string()))?;

    let provider_tokens = match provider.exchange_code(code).await {
        Ok(provider_tokens) => {
            info!("Google 토큰 교환 성공");
            provider_tokens
        }
        Err(err) => {
            warn!("Google 토큰 교환 실패");
            return Ok(error_redirect(&frontend, &err));
        }
    };

    let id_token = provider_tokens
        .id_token
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            AppError::BadRequest("identity token missing from provider response".to_string())
        })?;

    match complete_external_login(&id_token, provider.get_ref(), &users, &tokens, &frontend).await {
        Ok(location) => Ok(redirect_to(location)),
        Err(err) => Ok(error_redirect(&frontend, &err)),
    }
}

/// ID 토큰 검증부터 토큰 발급까지 수행하고 성공 리다이렉트 주소를 반환합니다.
async fn complete_external_login(
    id_token: &str,
    provider: &dyn IdentityProvider,
    users: &UserService,
    tokens: &TokenService,
    frontend: &FrontendRedirect,
) -> AppResult<String> {
    let identity = provider.verify_id_token(id_token).await.inspect_err(|e| {
        warn!("ID 토큰 검증 실패: {}", e);
    })?;
    let user = users.resolve_external(&identity).await?.into_user();

    let user_id = user
        .id_string()
        .ok_or_else(|| AppError::InternalError("사용자 ID 가 없습니다".to_string()))?;
    let issued = tokens.issue(&user_id).await?;

    let summary = serde_json::to_string(&UserSummary::from(&user))
        .context("사용자 직렬화 실패")?;

    info!("Google 로그인 성공: {}", user.email);
    Ok(frontend.with_query(&[("token", issued.token.as_str()), ("user", summary.as_str())]))
}

fn redirect_to(location: String) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn error_redirect(frontend: &FrontendRedirect, err: &AppError) -> HttpResponse {
    warn!("Google 로그인 실패: {}", err);
    redirect_to(frontend.with_query(&[("error", err.public_message().as_str())]))
}

pub async fn current_user(
    auth: AuthenticatedUser,
    users: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    let user = users.find_by_id(&auth.user_id).await?.ok_or_else(|| {
        warn!("토큰 소유자를 찾을 수 없습니다: {}", auth.user_id);
        AppError::AuthenticationError("user for this token no longer exists".to_string())
    })?;

    Ok(HttpResponse::Ok().json(UserInfoResponse {
        message: "user info".to_string(),
        user: user.into(),
    }))
}
