use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};

use signin_service_backend::config::{
    FrontendRedirect, GoogleOAuthConfig, RateLimitConfig, ServerConfig, StoreBackend, StoreConfig,
};
use signin_service_backend::core::errors::AppResult;
use signin_service_backend::db::redis::RedisClient;
use signin_service_backend::db::Database;
use signin_service_backend::repositories::{
    DynTokenStore, DynUserStore, MemoryTokenStore, MemoryUserStore, MongoUserStore, RedisTokenStore,
};
use signin_service_backend::services::auth::GoogleAuthService;
use signin_service_backend::state::{AppState, AuthSettings};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 로그인 서비스 시작중...");

    let state = match build_state().await {
        Ok(state) => state,
        Err(e) => {
            error!("❌ 서비스 초기화 실패: {}", e);
            return Err(io::Error::other(e.to_string()));
        }
    };

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    // HTTP 서버 시작
    start_http_server(state).await
}

async fn build_state() -> AppResult<AppState> {
    let google_config = GoogleOAuthConfig::from_env()?;
    let (users, tokens) = initialize_data_stores().await?;

    Ok(AppState::new(
        users,
        tokens,
        Arc::new(GoogleAuthService::new(google_config)),
        FrontendRedirect::from_env(),
        AuthSettings::from_env(),
    ))
}

async fn start_http_server(state: AppState) -> io::Result<()> {
    let bind_address = format!("{}:{}", ServerConfig::host(), ServerConfig::port());

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    // Rate Limiting 설정
    let rate_limit_config = RateLimitConfig::from_env();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    let allowed_origins = ServerConfig::cors_allowed_origins(state.frontend.base_url());
    info!("CORS 허용 origin: {:?}", allowed_origins);

    HttpServer::new(move || {
        // CORS 설정
        let cors = configure_cors(&allowed_origins);
        let state = state.clone();

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            // 서비스 등록 및 라우트 설정
            .configure(move |cfg| state.configure(cfg))
    })
    .bind(bind_address)?
    .workers(ServerConfig::workers())
    .run()
    .await
}

fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => {
            if let Err(e) = dotenv::from_filename(".env.prod") {
                eprintln!(".env.prod 파일 로드 실패: {}", e);
            }
        }
        "dev" => {
            if dotenv::from_filename(".env.dev").is_err() {
                // 기본 .env 파일 로드
                dotenv().ok();
            }
        }
        _ => {
            dotenv().ok();
        }
    }
}

fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

async fn initialize_data_stores() -> AppResult<(DynUserStore, DynTokenStore)> {
    match StoreConfig::backend() {
        StoreBackend::Memory => {
            warn!("⚠️ 인메모리 저장소 사용 중 - 재시작하면 사용자와 토큰이 사라집니다");
            let users: DynUserStore = Arc::new(MemoryUserStore::new());
            let tokens: DynTokenStore = Arc::new(MemoryTokenStore::new());
            Ok((users, tokens))
        }
        StoreBackend::Mongo => {
            info!("📡 데이터베이스 연결 중...");

            let database =
                Database::connect(&StoreConfig::mongodb_uri(), &StoreConfig::database_name()).await?;
            let mongo_users = MongoUserStore::new(&database);
            mongo_users.create_indexes().await?;

            let redis = RedisClient::connect(&StoreConfig::redis_url()).await?;

            let users: DynUserStore = Arc::new(mongo_users);
            let tokens: DynTokenStore = Arc::new(RedisTokenStore::new(redis));
            Ok((users, tokens))
        }
    }
}

fn configure_cors(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        // 허용할 HTTP 메서드
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        // 허용할 헤더
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        // Preflight 요청 캐시 시간 (초)
        .max_age(3600)
}
