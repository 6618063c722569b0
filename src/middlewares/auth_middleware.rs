//! # 인증 미들웨어
//!
//! `Authorization: Bearer <token>` 헤더를 확인하고 토큰 소유자를
//! [`AuthenticatedUser`](crate::domain::AuthenticatedUser)로 request extensions 에 넣습니다.
//! 토큰이 없거나 유효하지 않으면 핸들러를 호출하지 않고 401 `{message}`로 응답합니다.
//!
//! ```rust,ignore
//! web::resource(["/api/v1/log-out", "/api/v1/salir"])
//!     .wrap(AuthMiddleware::required())
//!     .route(web::post().to(handlers::auth::log_out))
//! ```
//!
//! [`TokenService`](crate::services::auth::TokenService)는 `app_data`에서 꺼내 씁니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::middlewares::auth_inner::AuthMiddlewareService;

#[derive(Debug, Clone, Default)]
pub struct AuthMiddleware;

impl AuthMiddleware {
    pub fn required() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}
