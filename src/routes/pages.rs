// Handlers for the keyword research page and its form posts

use askama::Template;
use axum::{
    extract::{Form, State},
    response::{Html, IntoResponse, Redirect},
};
use serde::Deserialize;

use crate::{
    controller::{self, SearchForm, Session, Submission},
    error::{AppError, AppResult},
    models::{Country, Language, Mode, SearchCriteria},
    AppState,
};

// One <option> of a selector
struct SelectOption {
    code: &'static str,
    name: &'static str,
    selected: bool,
}

// One table row, with the search volume already grouped for display
struct ResultRow {
    keyword: String,
    searches: String,
    competition: String,
}

#[derive(Template)]
#[template(path = "index.html")]
struct AppTemplate {
    is_bulk: bool,
    keyword: String,
    bulk_keywords: String,
    countries: Vec<SelectOption>,
    languages: Vec<SelectOption>,
    loading: bool,
    error: Option<String>,
    notice: Option<String>,
    rows: Vec<ResultRow>,
    show_placeholder: bool,
}

impl AppTemplate {
    fn from_session(session: &Session) -> Self {
        let criteria = session.criteria();
        let countries = Country::ALL
            .iter()
            .map(|&c| SelectOption {
                code: c.code(),
                name: c.name(),
                selected: c == criteria.country,
            })
            .collect();
        let languages = Language::ALL
            .iter()
            .map(|&l| SelectOption {
                code: l.code(),
                name: l.name(),
                selected: l == criteria.language,
            })
            .collect();
        let rows = session
            .results()
            .iter()
            .map(|r| ResultRow {
                keyword: r.keyword.clone(),
                searches: group_thousands(r.avg_monthly_searches),
                competition: r.competition.clone(),
            })
            .collect();
        let error = session.error().map(ToOwned::to_owned);
        let show_placeholder =
            !session.is_loading() && error.is_none() && session.results().is_empty();

        Self {
            is_bulk: session.mode() == Mode::Bulk,
            keyword: session.input(Mode::Single).to_string(),
            bulk_keywords: session.input(Mode::Bulk).to_string(),
            countries,
            languages,
            loading: session.is_loading(),
            // The banner wins over the success notice
            notice: if error.is_some() {
                None
            } else {
                session.notice().map(ToOwned::to_owned)
            },
            show_placeholder,
            error,
            rows,
        }
    }
}

/// Formats a count the way the table shows it: `12100` becomes `12,100`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[derive(Debug, Deserialize)]
pub struct ModeForm {
    mode: Mode,
}

#[derive(Debug, Deserialize)]
pub struct SingleSearchForm {
    #[serde(default)]
    keyword: String,
    country: Country,
    language: Language,
}

#[derive(Debug, Deserialize)]
pub struct BulkSearchForm {
    #[serde(default)]
    keywords: String,
    country: Country,
    language: Language,
}

// GET /
pub async fn app_page(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    let template = {
        let session = app_state.session.lock().await;
        AppTemplate::from_session(&session)
    };
    match template.render() {
        Ok(html) => Ok(Html(html)),
        Err(e) => {
            tracing::error!("Failed to render app template: {}", e);
            Err(AppError::InternalServerError(anyhow::Error::new(e)))
        }
    }
}

// POST /mode
pub async fn switch_mode(
    State(app_state): State<AppState>,
    Form(form): Form<ModeForm>,
) -> Redirect {
    app_state.session.lock().await.set_mode(form.mode);
    tracing::debug!("[HANDLER] /mode - Switched to {} mode.", form.mode.as_str());
    Redirect::to("/")
}

// POST /search/single
pub async fn search_single(
    State(app_state): State<AppState>,
    Form(form): Form<SingleSearchForm>,
) -> Redirect {
    let criteria = SearchCriteria { country: form.country, language: form.language };
    run_search(&app_state, Mode::Single, form.keyword, criteria).await;
    Redirect::to("/")
}

// POST /search/bulk
pub async fn search_bulk(
    State(app_state): State<AppState>,
    Form(form): Form<BulkSearchForm>,
) -> Redirect {
    let criteria = SearchCriteria { country: form.country, language: form.language };
    run_search(&app_state, Mode::Bulk, form.keywords, criteria).await;
    Redirect::to("/")
}

// Hands the posted form to the submit handler, which records it only when
// no dispatch is in flight.
async fn run_search(app_state: &AppState, mode: Mode, input: String, criteria: SearchCriteria) {
    let form = SearchForm { mode, input, criteria };

    match controller::submit_form(&app_state.session, app_state.api.as_ref(), form).await {
        Submission::Completed(rows) => {
            tracing::info!("[HANDLER] /search/{} - Completed with {} rows.", mode.as_str(), rows)
        }
        Submission::Ignored => {
            tracing::debug!("[HANDLER] /search/{} - Request already in flight.", mode.as_str())
        }
        Submission::Rejected(e) | Submission::Failed(e) => {
            tracing::debug!(
                "[HANDLER] /search/{} - Error recorded in session: {}",
                e.mode().as_str(),
                e
            )
        }
    }
}
