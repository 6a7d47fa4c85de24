use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::token::TokenService;
use crate::error::AppError;

/// Middleware guarding the authenticated part of the API.
///
/// Rejects requests whose `Authorization` header is absent (403) or whose
/// scheme is not exactly `Bearer` or whose token fails validation (401). On
/// success the decoded claims are inserted into request extensions for the
/// `CurrentUser` extractor to resolve against the user directory.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Signup and login are the only unauthenticated endpoints inside
        // this scope.
        let path = req.path();
        if path.starts_with("/api/v1/auth/signup") || path.starts_with("/api/v1/auth/login") {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        let token_service = match req.app_data::<web::Data<TokenService>>() {
            Some(service) => service,
            None => {
                let app_err =
                    AppError::InternalServerError("TokenService not configured".to_string());
                return Box::pin(async move { Err(app_err.into()) });
            }
        };

        let auth_header = match req.headers().get(header::AUTHORIZATION) {
            Some(value) => value,
            None => {
                // No credentials at all is a 403, unlike a bad token.
                let app_err = AppError::Forbidden("Not authenticated".to_string());
                return Box::pin(async move { Err(app_err.into()) });
            }
        };

        let token = auth_header
            .to_str()
            .ok()
            .and_then(|value| value.strip_prefix("Bearer "));

        match token {
            Some(token) => match token_service.validate(token) {
                Ok(claims) => {
                    req.extensions_mut().insert(claims);
                    let fut = self.service.call(req);
                    Box::pin(fut)
                }
                Err(app_err) => Box::pin(async move { Err(app_err.into()) }),
            },
            None => {
                let app_err =
                    AppError::Unauthorized("Invalid authentication scheme".to_string());
                Box::pin(async move { Err(app_err.into()) })
            }
        }
    }
}
