// Handlers for the JSON endpoints and the CSV download

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::{
    controller::Session,
    error::AppResult,
    export,
    models::{Country, Language, OptionEntry},
};

#[derive(Serialize)]
pub struct OptionsResponse {
    countries: Vec<OptionEntry>,
    languages: Vec<OptionEntry>,
}

pub async fn get_state(State(session): State<Arc<Mutex<Session>>>) -> Json<Session> {
    let snapshot = session.lock().await.clone();
    tracing::debug!(
        "[HANDLER] /api/state - {} rows, loading={}",
        snapshot.results().len(),
        snapshot.is_loading()
    );
    Json(snapshot)
}

pub async fn get_options() -> Json<OptionsResponse> {
    let countries = Country::ALL
        .iter()
        .map(|c| OptionEntry { name: c.name(), code: c.code() })
        .collect();
    let languages = Language::ALL
        .iter()
        .map(|l| OptionEntry { name: l.name(), code: l.code() })
        .collect();
    Json(OptionsResponse { countries, languages })
}

pub async fn export_csv(State(session): State<Arc<Mutex<Session>>>) -> AppResult<Response> {
    let results = session.lock().await.results().to_vec();

    match export::export_results(&results)? {
        Some(file) => {
            tracing::info!("[HANDLER] /export.csv - Exporting {} rows.", results.len());
            let disposition = format!("attachment; filename=\"{}\"", file.file_name);
            Ok((
                [
                    (header::CONTENT_TYPE, file.content_type.to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                file.body,
            )
                .into_response())
        }
        None => {
            tracing::debug!("[HANDLER] /export.csv - No results, nothing to export.");
            Ok(StatusCode::NO_CONTENT.into_response())
        }
    }
}
