use std::sync::Arc;

use keyword_research::{
    keyword_api::{HttpKeywordApi, KeywordApi},
    models::{Country, KeywordResult, Language, SearchCriteria},
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> HttpKeywordApi {
    HttpKeywordApi::new(Arc::new(reqwest::Client::new()), server.uri())
}

fn criteria() -> SearchCriteria {
    SearchCriteria {
        country: Country::UnitedKingdom,
        language: Language::French,
    }
}

#[tokio::test]
async fn single_lookup_sends_query_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/keyword"))
        .and(query_param("keyword", "digital marketing"))
        .and(query_param("country", "GB"))
        .and(query_param("language", "1002"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"keyword": "digital marketing", "avg_monthly_searches": 100, "competition": "LOW"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let results = api_for(&server)
        .lookup_keyword("digital marketing", &criteria())
        .await
        .expect("lookup ok");

    assert_eq!(
        results,
        vec![KeywordResult {
            keyword: "digital marketing".to_string(),
            avg_monthly_searches: 100,
            competition: "LOW".to_string(),
        }]
    );
}

#[tokio::test]
async fn single_lookup_accepts_any_length() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/keyword"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"keyword": "seo", "avg_monthly_searches": 12100, "competition": "HIGH"},
            {"keyword": "seo tools", "avg_monthly_searches": 9900, "competition": "MEDIUM"},
            {"keyword": "seo audit", "avg_monthly_searches": 2400, "competition": "LOW"}
        ])))
        .mount(&server)
        .await;

    let results = api_for(&server)
        .lookup_keyword("seo", &SearchCriteria::default())
        .await
        .expect("lookup ok");

    assert_eq!(results.len(), 3);
    assert_eq!(results[2].keyword, "seo audit");
}

#[tokio::test]
async fn bulk_lookup_posts_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/bulk-keywords"))
        .and(body_json(json!({
            "keywords": ["a", "b", "c"],
            "country": "GB",
            "language": "1002"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"keyword": "c", "avg_monthly_searches": 30, "competition": "HIGH"},
            {"keyword": "a", "avg_monthly_searches": 10, "competition": "LOW"},
            {"keyword": "b", "avg_monthly_searches": 20, "competition": "MEDIUM"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let keywords = vec!["a".to_string(), "b".to_string(), "c".to_string()];
    let results = api_for(&server)
        .lookup_keywords(&keywords, &criteria())
        .await
        .expect("lookup ok");

    let order: Vec<&str> = results.iter().map(|r| r.keyword.as_str()).collect();
    assert_eq!(order, vec!["c", "a", "b"]);
}

#[tokio::test]
async fn error_status_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/bulk-keywords"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let keywords = vec!["a".to_string()];
    let err = api_for(&server)
        .lookup_keywords(&keywords, &criteria())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("error status"));
}

#[tokio::test]
async fn malformed_body_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/keyword"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("not json", "text/plain"))
        .mount(&server)
        .await;

    let result = api_for(&server).lookup_keyword("x", &criteria()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn missing_field_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/keyword"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"keyword": "x", "avg_monthly_searches": 100}])),
        )
        .mount(&server)
        .await;

    let result = api_for(&server).lookup_keyword("x", &criteria()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn connection_refused_is_a_failure() {
    // Nothing listens on port 1
    let api = HttpKeywordApi::new(Arc::new(reqwest::Client::new()), "http://127.0.0.1:1");
    let err = api.lookup_keyword("x", &criteria()).await.unwrap_err();
    assert!(err.to_string().contains("Network error"));
}
