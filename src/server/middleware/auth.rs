//! Authentication middleware

use crate::server::AppState;
use crate::server::middleware::helpers::{extract_bearer_token, is_public_route};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{HttpMessage, web};
use futures::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use tracing::{debug, warn};

/// Verifies the bearer token and attaches the caller's
/// [`Identity`](crate::auth::Identity) to the request.
///
/// Requests without a valid token pass through unauthenticated; handlers that
/// need a caller extract `Identity` and are rejected with 401.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

/// Service implementation for auth middleware
pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if is_public_route(req.path()) {
            return Box::pin(self.service.call(req));
        }

        let identity = match (
            req.app_data::<web::Data<AppState>>(),
            extract_bearer_token(req.headers()),
        ) {
            (Some(state), Some(token)) => match state.auth.authenticate(token) {
                Ok(identity) => Some(identity),
                Err(e) => {
                    warn!("Rejected bearer token for {}: {}", req.path(), e);
                    None
                }
            },
            (None, _) => {
                warn!("Application state missing, request left unauthenticated");
                None
            }
            (_, None) => {
                debug!("No bearer token on protected route {}", req.path());
                None
            }
        };

        if let Some(identity) = identity {
            req.extensions_mut().insert(identity);
        }

        Box::pin(self.service.call(req))
    }
}
