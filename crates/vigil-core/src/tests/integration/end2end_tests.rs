#![cfg(test)]

use tokio::test;

use crate::capture::manager::CaptureManager;
use crate::capture::FaultKind;
use crate::config::AppConfig;
use crate::console::runner::ConsoleRunner;
use crate::console::CommandArgs;
use crate::router::{Method, Request};

use super::common::{
    assert_last_event_id_is_not_null, assert_last_event_id_is_null, build_test_app,
    GREETING_BODY, INTENTIONAL_ERROR_MESSAGE, SECURED_TOKEN,
};

fn raising_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.router.catch_faults = false;
    config
}

#[test]
async fn test_get_200() {
    let app = build_test_app(AppConfig::default()).await;
    let client = app.client();

    let response = client.request(Method::Get, "/200").await.unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.body(), GREETING_BODY);
    assert_last_event_id_is_not_null(&app);
}

#[test]
async fn test_get_200_behind_firewall() {
    let app = build_test_app(AppConfig::default()).await;
    let client = app.client();

    let request =
        Request::new(Method::Get, "/secured/200").with_header("authorization", SECURED_TOKEN);
    let response = client.send(request).await.unwrap();

    assert_eq!(response.status(), 200);
    assert_last_event_id_is_not_null(&app);
}

#[test]
async fn test_get_secured_without_credentials() {
    let app = build_test_app(AppConfig::default()).await;
    let client = app.client();

    let response = client.request(Method::Get, "/secured/200").await.unwrap();

    // Denied access is a response, not a fault; nothing is captured.
    assert_eq!(response.status(), 401);
    assert_last_event_id_is_null(&app);
}

#[test]
async fn test_get_200_with_subrequest() {
    let app = build_test_app(AppConfig::default()).await;
    let client = app.client();

    let response = client.request(Method::Get, "/subrequest").await.unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.body(), GREETING_BODY);
    assert_last_event_id_is_not_null(&app);
}

#[test]
async fn test_get_404() {
    // Faults converted into responses.
    let app = build_test_app(AppConfig::default()).await;
    let client = app.client();

    let response = client.request(Method::Get, "/missing-page").await.unwrap();

    assert_eq!(response.status(), 404);
    assert_last_event_id_is_not_null(&app);
}

#[test]
async fn test_get_404_raised() {
    // Same scenario, faults surfaced as raised errors.
    let app = build_test_app(raising_config()).await;
    let client = app.client();

    let fault = client
        .request(Method::Get, "/missing-page")
        .await
        .unwrap_err();

    assert_eq!(fault.kind(), FaultKind::NotFound);
    assert_eq!(fault.message(), "No route found for \"GET /missing-page\"");
    assert_last_event_id_is_not_null(&app);
}

#[test]
async fn test_get_500() {
    let app = build_test_app(AppConfig::default()).await;
    let client = app.client();

    let response = client.request(Method::Get, "/exception").await.unwrap();

    assert_eq!(response.status(), 500);
    assert!(response.body().contains("intentional error"));
    assert_last_event_id_is_not_null(&app);
}

#[test]
async fn test_get_500_raised() {
    let app = build_test_app(raising_config()).await;
    let client = app.client();

    let fault = client.request(Method::Get, "/exception").await.unwrap_err();

    assert_eq!(fault.kind(), FaultKind::Unhandled);
    assert_eq!(fault.message(), INTENTIONAL_ERROR_MESSAGE);
    assert_last_event_id_is_not_null(&app);
}

#[test]
async fn test_messenger_capture_soft_fail_can_be_disabled() {
    let mut config = AppConfig::default();
    config.capture.capture_soft_fails = false;

    let app = build_test_app(config).await;
    let client = app.client();

    let response = client
        .request(Method::Get, "/dispatch-message")
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let status = consume_one_message(&app).await;
    assert_eq!(status, 0);

    assert_last_event_id_is_null(&app);
}

#[test]
async fn test_messenger_soft_fail_captured_by_default() {
    let app = build_test_app(AppConfig::default()).await;
    let client = app.client();

    let response = client
        .request(Method::Get, "/dispatch-message")
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let status = consume_one_message(&app).await;
    assert_eq!(status, 0);

    assert_last_event_id_is_not_null(&app);
}

#[test]
async fn test_sequential_contexts_are_isolated() {
    let first = build_test_app(AppConfig::default()).await;
    let first_client = first.client();
    first_client
        .request(Method::Get, "/exception")
        .await
        .unwrap();
    assert_last_event_id_is_not_null(&first);
    let first_id = first.capture_manager().last_event_id().unwrap();

    // A second application is a fresh execution context; nothing from the
    // first run may be observable in it.
    let second = build_test_app(AppConfig::default()).await;
    assert_last_event_id_is_null(&second);

    second.capture_manager().capture_message("own event");
    let second_id = second.capture_manager().last_event_id().unwrap();
    assert_ne!(first_id, second_id);
    assert_eq!(
        first.capture_manager().last_event_id(),
        Some(first_id),
        "First context must not observe the second one"
    );
}

async fn consume_one_message(app: &crate::kernel::bootstrap::Application) -> i32 {
    let args = CommandArgs::new()
        .with_argument("async")
        .with_option("limit", "1")
        .with_option("time-limit", "1")
        .with_flag("verbose");

    app.console_runner()
        .run("messenger:consume", &args)
        .await
        .expect("consume command failed to run")
}
