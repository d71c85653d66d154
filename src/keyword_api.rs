// Client for the external keyword-metrics API (single and bulk lookups).

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::Client;

use crate::{
    config::Settings,
    models::{BulkKeywordRequest, KeywordResult, SearchCriteria, SingleKeywordQuery},
};

const SINGLE_LOOKUP_PATH: &str = "/api/keyword";
const BULK_LOOKUP_PATH: &str = "/api/bulk-keywords";

#[async_trait]
pub trait KeywordApi: Send + Sync {
    /// Read-style lookup of one keyword.
    async fn lookup_keyword(
        &self,
        keyword: &str,
        criteria: &SearchCriteria,
    ) -> Result<Vec<KeywordResult>>;

    /// Write-style lookup of many keywords. Rows may come back in any order.
    async fn lookup_keywords(
        &self,
        keywords: &[String],
        criteria: &SearchCriteria,
    ) -> Result<Vec<KeywordResult>>;
}

// Builds the shared HTTP client. No timeout is set; the transport default applies.
pub fn build_client(settings: &Settings) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(proxy_url) = settings.proxy_url.as_deref().filter(|p| !p.is_empty()) {
        let proxy = reqwest::Proxy::all(proxy_url)
            .with_context(|| format!("Invalid proxy URL '{}'", proxy_url))?;
        builder = builder.proxy(proxy);
        tracing::info!("Outbound requests will use the configured proxy.");
    }
    builder.build().context("Failed to build shared reqwest client")
}

#[derive(Debug, Clone)]
pub struct HttpKeywordApi {
    client: Arc<Client>,
    base_url: String,
}

impl HttpKeywordApi {
    pub fn new(client: Arc<Client>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl KeywordApi for HttpKeywordApi {
    async fn lookup_keyword(
        &self,
        keyword: &str,
        criteria: &SearchCriteria,
    ) -> Result<Vec<KeywordResult>> {
        let query = SingleKeywordQuery {
            keyword,
            country: criteria.country,
            language: criteria.language,
        };
        tracing::debug!(
            keyword,
            country = criteria.country.code(),
            language = criteria.language.code(),
            "Single keyword lookup"
        );

        let response = self
            .client
            .get(self.url(SINGLE_LOOKUP_PATH))
            .query(&query)
            .send()
            .await
            .context("Network error during single keyword lookup")?
            .error_for_status()
            .context("Single keyword lookup returned an error status")?;

        let results: Vec<KeywordResult> = response
            .json()
            .await
            .context("Failed to parse JSON response for single keyword lookup")?;
        check_results(&results)?;
        Ok(results)
    }

    async fn lookup_keywords(
        &self,
        keywords: &[String],
        criteria: &SearchCriteria,
    ) -> Result<Vec<KeywordResult>> {
        let payload = BulkKeywordRequest {
            keywords,
            country: criteria.country,
            language: criteria.language,
        };
        tracing::debug!(
            count = keywords.len(),
            country = criteria.country.code(),
            language = criteria.language.code(),
            "Bulk keyword lookup"
        );

        let response = self
            .client
            .post(self.url(BULK_LOOKUP_PATH))
            .json(&payload)
            .send()
            .await
            .context("Network error during bulk keyword lookup")?
            .error_for_status()
            .context("Bulk keyword lookup returned an error status")?;

        let results: Vec<KeywordResult> = response
            .json()
            .await
            .context("Failed to parse JSON response for bulk keyword lookup")?;
        check_results(&results)?;
        Ok(results)
    }
}

// A row without a keyword is malformed, not something to render.
fn check_results(results: &[KeywordResult]) -> Result<()> {
    if let Some(index) = results.iter().position(|r| r.keyword.trim().is_empty()) {
        bail!("Result row {} has an empty keyword", index);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let api = HttpKeywordApi::new(Arc::new(Client::new()), "http://localhost:8501/");
        assert_eq!(api.url(SINGLE_LOOKUP_PATH), "http://localhost:8501/api/keyword");
        assert_eq!(api.url(BULK_LOOKUP_PATH), "http://localhost:8501/api/bulk-keywords");
    }

    #[test]
    fn empty_keyword_rows_are_malformed() {
        let row = |keyword: &str| KeywordResult {
            keyword: keyword.into(),
            avg_monthly_searches: 1,
            competition: "LOW".into(),
        };
        let rows = vec![row("ok"), row(" ")];
        let err = check_results(&rows).unwrap_err();
        assert!(err.to_string().contains("Result row 1"));
        assert!(check_results(&rows[..1]).is_ok());
    }
}
