use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_account::create_account;
use super::handlers::list_files::list_files;
use super::handlers::login::login;
use super::handlers::upload_file::upload_file;
use super::middleware::authenticate as auth_middleware;
use crate::domain::storage::service::StorageService;
use crate::domain::user::service::AuthService;
use crate::outbound::repositories::user::JsonFileUserRepository;
use crate::outbound::storage::file_store::TokioFileStore;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService<JsonFileUserRepository, TokioFileStore>>,
    pub authenticator: Arc<Authenticator>,
    pub storage: Arc<StorageService<TokioFileStore>>,
}

pub fn create_router(
    auth_service: Arc<AuthService<JsonFileUserRepository, TokioFileStore>>,
    authenticator: Arc<Authenticator>,
    storage: Arc<StorageService<TokioFileStore>>,
) -> Router {
    let state = AppState {
        auth_service,
        authenticator,
        storage,
    };

    let public_routes = Router::new()
        .route("/api/accounts", post(create_account))
        .route("/api/auth/login", post(login));

    let protected_routes = Router::new()
        .route("/api/files", post(upload_file))
        .route("/api/files", get(list_files))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

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
        .with_state(state)
}
