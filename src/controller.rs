// Keyword research controller: input validation, the session record and the
// submit handler that dispatches to the keyword API.

use serde::Serialize;
use tokio::sync::Mutex;

use crate::{
    error::KeywordError,
    keyword_api::KeywordApi,
    models::{KeywordResult, Mode, SearchCriteria},
};

/// Turns raw form text into the keywords to send.
///
/// Single mode trims the whole input. Bulk mode splits on newlines, trims
/// every line and drops the blank ones, keeping the order of the rest.
pub fn validate_input(mode: Mode, raw: &str) -> Result<Vec<String>, KeywordError> {
    let keywords: Vec<String> = match mode {
        Mode::Single => {
            let keyword = raw.trim();
            if keyword.is_empty() {
                Vec::new()
            } else {
                vec![keyword.to_string()]
            }
        }
        Mode::Bulk => raw
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToOwned::to_owned)
            .collect(),
    };

    if keywords.is_empty() {
        return Err(KeywordError::EmptyInput(mode));
    }
    Ok(keywords)
}

/// Sends one request of the shape `mode` calls for.
pub async fn dispatch(
    api: &dyn KeywordApi,
    mode: Mode,
    keywords: &[String],
    criteria: &SearchCriteria,
) -> Result<Vec<KeywordResult>, KeywordError> {
    let response = match (mode, keywords) {
        (Mode::Single, [keyword]) => api.lookup_keyword(keyword, criteria).await,
        (Mode::Single, _) => Err(anyhow::anyhow!(
            "Single mode expects exactly one keyword, got {}",
            keywords.len()
        )),
        (Mode::Bulk, _) => api.lookup_keywords(keywords, criteria).await,
    };
    response.map_err(|cause| KeywordError::Dispatch { mode, cause })
}

/// Per-page-view state. Results are replaced wholesale on success and left
/// alone on failure.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Session {
    mode: Mode,
    keyword_input: String,
    bulk_input: String,
    criteria: SearchCriteria,
    results: Vec<KeywordResult>,
    loading: bool,
    error: Option<String>,
    notice: Option<String>,
}

impl Session {
    pub fn new(criteria: SearchCriteria) -> Self {
        Self {
            criteria,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn criteria(&self) -> SearchCriteria {
        self.criteria
    }

    pub fn input(&self, mode: Mode) -> &str {
        match mode {
            Mode::Single => &self.keyword_input,
            Mode::Bulk => &self.bulk_input,
        }
    }

    pub fn results(&self) -> &[KeywordResult] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn set_input(&mut self, mode: Mode, text: String) {
        match mode {
            Mode::Single => self.keyword_input = text,
            Mode::Bulk => self.bulk_input = text,
        }
    }

    pub fn set_criteria(&mut self, criteria: SearchCriteria) {
        self.criteria = criteria;
    }

    fn reject(&mut self, error: &KeywordError) {
        self.error = Some(error.to_string());
        self.notice = None;
    }

    fn apply_form(&mut self, form: SearchForm) {
        self.set_mode(form.mode);
        self.set_input(form.mode, form.input);
        self.set_criteria(form.criteria);
    }

    fn begin_dispatch(&mut self) {
        self.loading = true;
        self.error = None;
        self.notice = None;
    }

    fn complete(&mut self, mode: Mode, results: Vec<KeywordResult>) {
        self.notice = Some(success_notice(mode, results.len()));
        self.results = results;
        self.loading = false;
    }

    fn fail(&mut self, error: &KeywordError) {
        self.error = Some(error.to_string());
        self.loading = false;
    }
}

fn success_notice(mode: Mode, count: usize) -> String {
    match (mode, count) {
        (Mode::Single, 0) => "No results found for this keyword.".to_string(),
        (Mode::Bulk, 0) => "No results found for the provided keywords.".to_string(),
        (Mode::Single, n) => format!("Found {} related keywords!", n),
        (Mode::Bulk, n) => format!("Analysis complete! Found data for {} keywords.", n),
    }
}

/// What a call to [`submit`] did.
#[derive(Debug)]
pub enum Submission {
    /// A dispatch was already in flight; nothing changed.
    Ignored,
    /// Validation failed; no request was sent.
    Rejected(KeywordError),
    /// The API answered with this many rows.
    Completed(usize),
    Failed(KeywordError),
}

/// A posted search form: the tab it came from, its raw text and selectors.
#[derive(Debug, Clone)]
pub struct SearchForm {
    pub mode: Mode,
    pub input: String,
    pub criteria: SearchCriteria,
}

/// Submit handler for the active mode.
///
/// The session lock is held only while the record is mutated, never across
/// the API call, so `loading` is what keeps a second dispatch out.
pub async fn submit(session: &Mutex<Session>, api: &dyn KeywordApi) -> Submission {
    run_submission(session, api, None).await
}

/// Records `form` into the session and submits it, unless a dispatch is
/// already in flight. In that case the session is left untouched.
pub async fn submit_form(
    session: &Mutex<Session>,
    api: &dyn KeywordApi,
    form: SearchForm,
) -> Submission {
    run_submission(session, api, Some(form)).await
}

async fn run_submission(
    session: &Mutex<Session>,
    api: &dyn KeywordApi,
    form: Option<SearchForm>,
) -> Submission {
    let (mode, keywords, criteria) = {
        let mut state = session.lock().await;
        if state.loading {
            tracing::warn!(
                "Submission ignored: a {} request is already in flight.",
                state.mode.as_str()
            );
            return Submission::Ignored;
        }
        if let Some(form) = form {
            state.apply_form(form);
        }
        let mode = state.mode;
        let keywords = match validate_input(mode, state.input(mode)) {
            Ok(keywords) => keywords,
            Err(e) => {
                tracing::info!("Rejected {} submission: {}", mode.as_str(), e);
                state.reject(&e);
                return Submission::Rejected(e);
            }
        };
        state.begin_dispatch();
        (mode, keywords, state.criteria)
    };

    tracing::info!(
        mode = mode.as_str(),
        keywords = keywords.len(),
        country = criteria.country.code(),
        language = criteria.language.code(),
        "Dispatching keyword lookup"
    );
    let outcome = dispatch(api, mode, &keywords, &criteria).await;

    let mut state = session.lock().await;
    match outcome {
        Ok(results) => {
            let count = results.len();
            tracing::info!(mode = mode.as_str(), rows = count, "Keyword lookup complete");
            state.complete(mode, results);
            Submission::Completed(count)
        }
        Err(e) => {
            if let KeywordError::Dispatch { cause, .. } = &e {
                tracing::error!(mode = mode.as_str(), "Keyword lookup failed: {:#}", cause);
            }
            state.fail(&e);
            Submission::Failed(e)
        }
    }
}
