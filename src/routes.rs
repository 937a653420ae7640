use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/", get(handlers::public::list_packages))
        .route("/submit", post(handlers::public::submit_booking))
        .route("/success", get(handlers::public::success_page))
        .route("/admin", get(handlers::admin::dashboard))
        .route(
            "/admin/login",
            get(handlers::admin::login_form).post(handlers::admin::login),
        )
        .route("/admin/logout", get(handlers::admin::logout))
        .route(
            "/admin/update_status/:id",
            post(handlers::admin::update_status),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
