// Keyword research web app: a form over an external keyword-metrics API,
// with single and bulk lookups and CSV export of the results.

use std::sync::Arc;

use axum::extract::FromRef;
use tokio::sync::Mutex;

pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod keyword_api;
pub mod models;
pub mod routes;

use crate::{config::Settings, controller::Session, keyword_api::KeywordApi};

// Shared application state handed to every handler
#[derive(Clone, FromRef)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub session: Arc<Mutex<Session>>,
    pub api: Arc<dyn KeywordApi>,
}

impl AppState {
    pub fn new(settings: Settings, api: Arc<dyn KeywordApi>) -> Self {
        let session = Session::new(settings.default_criteria());
        Self {
            settings: Arc::new(settings),
            session: Arc::new(Mutex::new(session)),
            api,
        }
    }
}
