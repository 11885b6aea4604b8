// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{body_string, json_request, start_page_server, unused_address};
use axum::http::StatusCode;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt;
use wiremock::matchers::{body_string as body_matches, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use xpcrawl::presentation::routes;
use xpcrawl::{
    CrawlError, CrawlService, Crawler, CrawlerOptions, Job, RequestSpec, Rule, RuleOutput,
};

fn crawler() -> CrawlService {
    CrawlService::new(CrawlerOptions::default()).unwrap()
}

fn product_rules() -> Vec<Rule> {
    vec![
        Rule::new("title", "/html/head/title"),
        Rule::new("price", "//span[@class='price']")
            .with_filter(r"^Price:\s+", "")
            .with_filter(r"^(\d+)\s+EUR$", "$1"),
        Rule::new("tags", "//ul[@class='tags']/li"),
        Rule::new("missing", "//table"),
    ]
}

#[tokio::test]
async fn test_crawl_local_page() {
    let server_url = start_page_server().await;
    let job = Job::new(
        RequestSpec::get(format!("{}/product", server_url)),
        product_rules(),
    );

    let result = crawler().crawl(job).await.unwrap();

    assert_eq!(result.len(), 4);
    assert_eq!(result["title"].values, vec!["Widget Store".to_string()]);
    assert_eq!(
        result["price"],
        RuleOutput {
            error: String::new(),
            values: vec!["42".to_string()],
        }
    );
    assert_eq!(
        result["tags"].values,
        vec!["blue".to_string(), "small".to_string(), "cheap".to_string()]
    );
    assert_eq!(result["missing"].error, "no match for xpath //table");
    assert!(result["missing"].values.is_empty());
}

#[tokio::test]
async fn test_crawl_async_local_page() {
    let server_url = start_page_server().await;
    let job = Job::new(
        RequestSpec::get(format!("{}/product", server_url)),
        vec![Rule::new("heading", "//h1")],
    );

    let result = crawler().crawl_async(job).await.unwrap();
    assert_eq!(result["heading"].values, vec!["Super Widget".to_string()]);
}

#[tokio::test]
async fn test_crawl_sends_request_spec() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(header("x-api-key", "secret"))
        .and(body_matches("q=widgets"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body><p class='hit'>hit one</p><p class='hit'>hit two</p></body></html>"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let job = Job::new(
        RequestSpec {
            url: format!("{}/search", server.uri()),
            method: "POST".to_string(),
            headers: HashMap::from([("X-Api-Key".to_string(), "secret".to_string())]),
            body: "q=widgets".to_string(),
        },
        vec![Rule::new("hits", "//p[@class='hit']").with_filter("hit ", "")],
    );

    let result = crawler().crawl(job).await.unwrap();
    assert_eq!(
        result["hits"].values,
        vec!["one".to_string(), "two".to_string()]
    );
}

#[tokio::test]
async fn test_crawl_non_success_status_still_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<h1>Not Found</h1>"))
        .mount(&server)
        .await;

    let job = Job::new(
        RequestSpec::get(server.uri()),
        vec![Rule::new("heading", "//h1")],
    );

    let result = crawler().crawl(job).await.unwrap();
    assert_eq!(result["heading"].values, vec!["Not Found".to_string()]);
}

#[tokio::test]
async fn test_crawl_invalid_method() {
    let job = Job::new(
        RequestSpec {
            url: "http://127.0.0.1:1/".to_string(),
            method: "NOT VALID".to_string(),
            ..Default::default()
        },
        vec![],
    );

    let err = crawler().crawl(job).await.unwrap_err();
    assert!(matches!(err, CrawlError::InvalidRequest(_)));
    assert_eq!(err.to_string(), r#"invalid request: invalid method "NOT VALID""#);
}

#[tokio::test]
async fn test_crawl_connection_refused() {
    let job = Job::new(RequestSpec::get(unused_address().await), vec![]);

    let err = crawler().crawl(job).await.unwrap_err();
    assert!(matches!(err, CrawlError::Transport(_)));
    assert!(err.to_string().starts_with("doing request: "));
}

#[tokio::test]
async fn test_crawl_timeout() {
    let server_url = start_page_server().await;
    let crawler = CrawlService::new(CrawlerOptions {
        timeout: Duration::from_millis(200),
    })
    .unwrap();

    let job = Job::new(RequestSpec::get(format!("{}/slow", server_url)), vec![]);
    let err = crawler.crawl(job).await.unwrap_err();

    match err {
        CrawlError::Transport(e) => assert!(e.is_timeout()),
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_daemon_end_to_end() {
    let server_url = start_page_server().await;
    let crawler: Arc<dyn Crawler> = Arc::new(crawler());
    let app = routes::routes(crawler);

    let job = json!({
        "request": { "url": format!("{}/product", server_url), "method": "GET", "headers": {}, "body": "" },
        "rules": [
            { "name": "name", "xpath": "//h1[@class='name']", "filters": [] },
            { "name": "bad", "xpath": "//foo[@bar", "filters": [] }
        ]
    });

    let response = app
        .oneshot(json_request("/", job.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["name"], json!({ "error": "", "values": ["Super Widget"] }));
    assert_eq!(body["bad"]["values"], json!([]));
    assert!(body["bad"]["error"]
        .as_str()
        .unwrap()
        .starts_with("compiling xpath"));
}

#[tokio::test]
async fn test_daemon_reports_pipeline_failure() {
    let crawler: Arc<dyn Crawler> = Arc::new(crawler());
    let app = routes::routes(crawler);

    let job = json!({ "request": { "url": unused_address().await }, "rules": [] });
    let response = app
        .oneshot(json_request("/", job.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_string(response)
        .await
        .starts_with("error executing job: doing request: "));
}
