use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::authenticate::authenticate;
use super::handlers::create_user::create_user;
use super::handlers::list_users::list_users;
use super::handlers::ApiError;
use super::middleware::authenticate as auth_middleware;
use crate::domain::token::ports::TokenIssuer;
use crate::domain::token::ports::TokenVerifier;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub token_issuer: Arc<dyn TokenIssuer>,
    pub token_verifier: Arc<dyn TokenVerifier>,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    token_issuer: Arc<dyn TokenIssuer>,
    token_verifier: Arc<dyn TokenVerifier>,
) -> Router {
    let state = AppState {
        user_service,
        token_issuer,
        token_verifier,
    };

    let public_routes = Router::new()
        .route("/register", post(create_user))
        .route("/login", post(authenticate));

    let protected_routes = Router::new()
        .route("/users", get(list_users))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers are left out of the span: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ApiError::InternalServerError(format!("Handler panicked: {}", detail)).into_response()
}
