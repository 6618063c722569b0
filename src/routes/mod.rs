use actix_web::web;
use serde_json::json;

use crate::core::errors::AppError;
use crate::handlers;
use crate::middlewares::AuthMiddleware;

/// JSON 본문 최대 크기
const JSON_LIMIT: usize = 64 * 1024;

/// 모든 라우트를 설정합니다
///
/// 각 `/api/v1` 경로는 이전 클라이언트용 별칭 경로에서도 같은 핸들러로 응답합니다.
///
/// ```rust,ignore
/// use actix_web::{web, App};
///
/// let app = App::new()
///     .app_data(web::Data::new(user_service))
///     .app_data(web::Data::new(token_service))
///     .app_data(web::Data::from(identity_provider))
///     .app_data(web::Data::new(frontend_redirect))
///     .configure(configure_all_routes);
/// ```
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config());

    // Health check endpoint
    cfg.service(health_check);

    configure_account_routes(cfg);
    configure_oauth_routes(cfg);
}

/// 형식이 잘못된 JSON 본문을 `{message}` 400 으로 응답합니다.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT)
        .error_handler(|err, _req| {
            AppError::BadRequest(format!("malformed request body: {}", err)).into()
        })
}

/// 계정 관련 라우트
///
/// ## Public
/// - `POST /api/v1/sign-up` (`/api/v1/usuarios`)
/// - `POST /api/v1/log-in` (`/api/v1/ingresar`)
///
/// ## Protected (Bearer 토큰 필요)
/// - `POST /api/v1/log-out` (`/api/v1/salir`)
/// - `GET /api/v1/user-info` (`/api/v1/usuario-info`)
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v1/log-in \
///   -H "Content-Type: application/json" \
///   -d '{"email":"ana@x.com","secret":"p1"}'
///
/// curl http://localhost:8080/api/v1/user-info \
///   -H "Authorization: Bearer oat_..."
/// ```
fn configure_account_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(["/api/v1/sign-up", "/api/v1/usuarios"])
            .route(web::post().to(handlers::auth::sign_up)),
    );

    cfg.service(
        web::resource(["/api/v1/log-in", "/api/v1/ingresar"])
            .route(web::post().to(handlers::auth::log_in)),
    );

    cfg.service(
        web::resource(["/api/v1/log-out", "/api/v1/salir"])
            .wrap(AuthMiddleware::required())
            .route(web::post().to(handlers::auth::log_out)),
    );

    cfg.service(
        web::resource(["/api/v1/user-info", "/api/v1/usuario-info"])
            .wrap(AuthMiddleware::required())
            .route(web::get().to(handlers::auth::current_user)),
    );
}

/// Google OAuth 라우트
///
/// 콜백 경로는 Google Console 에 등록된 redirect URI 와 맞추기 위해 `/api/v1` 밖에 둡니다.
fn configure_oauth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/v1/auth/google").route(web::get().to(handlers::auth::google_redirect)),
    );

    cfg.service(web::resource("/callback").route(web::get().to(handlers::auth::google_callback)));
}

#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "message": "ok",
        "status": "healthy",
        "service": "signin_service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
