// Route definitions

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

mod api;
mod pages;

// create_router accepts the AppState and returns a Router with the state applied
pub fn create_router(app_state: AppState) -> Router {
    // JSON endpoints for scripts and the page's own diagnostics
    let api_router = Router::new()
        .route("/state", get(api::get_state))
        .route("/options", get(api::get_options))
        .with_state(app_state.clone());

    Router::new()
        .route("/", get(pages::app_page))
        .route("/mode", post(pages::switch_mode))
        .route("/search/single", post(pages::search_single))
        .route("/search/bulk", post(pages::search_bulk))
        .route("/export.csv", get(api::export_csv))
        .nest("/api", api_router)
        .with_state(app_state)
}
