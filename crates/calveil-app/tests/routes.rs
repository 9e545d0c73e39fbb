//! Route-level tests for the HTTP front end.
//!
//! These assemble the real router with an in-process service and exercise
//! the UI, generate, and subscription routes. Nothing here touches the
//! network: upstream fetches are only reachable through a valid sealed
//! token pointing at the allowed host.

use calveil_app::app::api::routes;
use calveil_app::config::ConfigHandler;
use calveil_app::http_client::HttpClientHandler;
use calveil_core::config::{
    CalendarConfig, LoggingConfig, ServerConfig, Settings, TokenConfig, UpstreamConfig,
};
use calveil_core::constants::{
    CALENDAR_FILE_NAME, GENERATE_ROUTE_PREFIX, SUBSCRIBE_ROUTE_PREFIX, VIEW_ROUTE_PREFIX,
};
use calveil_service::token;
use salvo::http::StatusCode;
use salvo::test::{ResponseExt, TestClient};
use salvo::{Router, Service};

const SECRET: &str = "integration-test-secret";
const ALLOWED: &str = "srh-community.campusweb.cloud";

fn test_settings() -> Settings {
    Settings {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8742,
            serve_origin: Some("https://cal.example".to_string()),
        },
        upstream: UpstreamConfig {
            allowed_host: ALLOWED.to_string(),
            max_body_size: 1024 * 1024,
            user_agent: "Calveil-Test/1.0".to_string(),
        },
        token: TokenConfig {
            secret: SECRET.to_string(),
        },
        calendar: CalendarConfig {
            display_name: "My Schedule+".to_string(),
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
        },
    }
}

fn test_service() -> Service {
    let router = Router::new()
        .hoop(ConfigHandler {
            settings: test_settings(),
        })
        .hoop(HttpClientHandler {
            client: reqwest::Client::new(),
        })
        .push(routes());
    Service::new(router)
}

#[test_log::test(tokio::test)]
async fn index_serves_html() {
    let service = test_service();
    let mut res = TestClient::get("http://127.0.0.1/").send(&service).await;
    assert_eq!(res.status_code, Some(StatusCode::OK));
    let body = res.take_string().await.unwrap();
    assert!(body.contains("<form id=\"enhanceForm\">"));
}

#[test_log::test(tokio::test)]
async fn static_assets_served() {
    let service = test_service();
    for path in ["http://127.0.0.1/styles.css", "http://127.0.0.1/app.js"] {
        let res = TestClient::get(path).send(&service).await;
        assert_eq!(res.status_code, Some(StatusCode::OK), "{path}");
    }
}

#[test_log::test(tokio::test)]
async fn generate_without_url_is_bad_request() {
    let service = test_service();
    let mut res = TestClient::get(format!("http://127.0.0.1{GENERATE_ROUTE_PREFIX}"))
        .send(&service)
        .await;
    assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    let body: serde_json::Value = res.take_json().await.unwrap();
    assert_eq!(body["error"], "Missing URL");
}

#[test_log::test(tokio::test)]
async fn generate_rejects_unauthorized_host() {
    let service = test_service();
    let res = TestClient::get(format!(
        "http://127.0.0.1{GENERATE_ROUTE_PREFIX}?url=https%3A%2F%2Fevil.example%2Ffeed.ics"
    ))
    .send(&service)
    .await;
    assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
}

#[test_log::test(tokio::test)]
async fn generate_round_trips_through_token() {
    let target = format!("https://{ALLOWED}/ical/feed.ics");
    let encoded = format!(
        "http://127.0.0.1{GENERATE_ROUTE_PREFIX}?url=https%3A%2F%2F{ALLOWED}%2Fical%2Ffeed.ics"
    );

    let service = test_service();
    let mut res = TestClient::get(&encoded).send(&service).await;
    assert_eq!(res.status_code, Some(StatusCode::OK));

    let body: serde_json::Value = res.take_json().await.unwrap();
    let enhanced = body["enhancedUrl"].as_str().unwrap();
    assert!(enhanced.starts_with("https://cal.example/view/"));
    assert!(enhanced.ends_with("/calendar.ics"));

    let sealed = enhanced
        .trim_start_matches("https://cal.example/view/")
        .trim_end_matches("/calendar.ics");
    assert_eq!(token::unseal(sealed, SECRET).unwrap(), target);
}

#[test_log::test(tokio::test)]
async fn view_with_garbage_token_is_not_found() {
    let service = test_service();
    let res = TestClient::get(format!(
        "http://127.0.0.1{VIEW_ROUTE_PREFIX}/not-a-real-token/{CALENDAR_FILE_NAME}"
    ))
    .send(&service)
    .await;
    assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
}

#[test_log::test(tokio::test)]
async fn subscribe_without_url_is_not_found() {
    let service = test_service();
    let res = TestClient::get(format!("http://127.0.0.1{SUBSCRIBE_ROUTE_PREFIX}"))
        .send(&service)
        .await;
    assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
}

#[test_log::test(tokio::test)]
async fn unknown_path_is_not_found() {
    let service = test_service();
    let res = TestClient::get("http://127.0.0.1/nope").send(&service).await;
    assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
}
