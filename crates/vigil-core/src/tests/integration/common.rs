#![cfg(test)]

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;

use crate::capture::manager::CaptureManager;
use crate::capture::Fault;
use crate::config::AppConfig;
use crate::kernel::bootstrap::Application;
use crate::messenger::{Message, MessageHandler, MessengerManager};
use crate::router::{route_handler, sync_route_handler, Method, Request, Response, RouterManager};

/// Body served by the plain success route; also the baseline event it
/// captures.
pub const GREETING_BODY: &str = "Hello there";

/// Message raised by the exception route. Scenario assertions depend on this
/// exact text surviving to the response body or the raised fault.
pub const INTENTIONAL_ERROR_MESSAGE: &str = "This is an intentional error";

/// Token the secured route expects in the authorization header.
pub const SECURED_TOKEN: &str = "valid-token";

// ===== DEMO MESSAGE =====

/// Job whose handler always fails softly.
#[derive(Debug, Clone)]
pub struct FlakyJob;

impl Message for FlakyJob {
    fn name(&self) -> &'static str {
        "flaky.job"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub struct FlakyJobHandler;

#[async_trait]
impl MessageHandler for FlakyJobHandler {
    async fn handle(&self, _message: &dyn Message) -> Result<(), Fault> {
        Err(Fault::soft_fail("flaky job handler gave up"))
    }
}

// ===== TEST APPLICATION =====

/// Build and boot an application exposing the standard route surface, with
/// the flaky job handler registered. Each call yields a fresh execution
/// context: its own hub, queues, and routes.
pub async fn build_test_app(config: AppConfig) -> Application {
    let mut app = Application::with_config(config).expect("application construction failed");
    app.boot().await.expect("application boot failed");
    register_routes(&app).await;
    register_message_handlers(&app).await;
    app
}

async fn register_routes(app: &Application) {
    let router = app.router_manager();
    let capture = app.capture_manager();
    let messenger = app.messenger_manager();

    // Success routes capture a baseline event themselves; the framework
    // only captures faults.
    let c = capture.clone();
    router
        .register_route(
            Method::Get,
            "/200",
            sync_route_handler(move |_request| {
                c.capture_message(GREETING_BODY);
                Ok(Response::ok(GREETING_BODY))
            }),
        )
        .await
        .expect("route registration failed");

    let c = capture.clone();
    router
        .register_route(
            Method::Get,
            "/secured/200",
            sync_route_handler(move |request| {
                if request.header("authorization") != Some(SECURED_TOKEN) {
                    return Ok(Response::new(401, "Unauthorized"));
                }
                c.capture_message("secured greeting served");
                Ok(Response::ok(GREETING_BODY))
            }),
        )
        .await
        .expect("route registration failed");

    let inner_router = router.clone();
    router
        .register_route(
            Method::Get,
            "/subrequest",
            route_handler(move |_request| {
                let router = inner_router.clone();
                async move {
                    // The nested request runs the /200 handler, baseline
                    // capture included.
                    let inner = Request::new(Method::Get, "/200");
                    let response = router.dispatch(&inner).await?;
                    Ok(Response::ok(response.body().to_string()))
                }
            }),
        )
        .await
        .expect("route registration failed");

    router
        .register_route(
            Method::Get,
            "/exception",
            sync_route_handler(|_request| Err(Fault::unhandled(INTENTIONAL_ERROR_MESSAGE))),
        )
        .await
        .expect("route registration failed");

    let m = messenger.clone();
    router
        .register_route(
            Method::Get,
            "/dispatch-message",
            route_handler(move |_request| {
                let messenger = m.clone();
                async move {
                    messenger
                        .dispatch("async", Box::new(FlakyJob))
                        .await
                        .map_err(|e| Fault::unhandled(e.to_string()))?;
                    Ok(Response::ok("dispatched"))
                }
            }),
        )
        .await
        .expect("route registration failed");

    // /missing-page is deliberately absent.
}

async fn register_message_handlers(app: &Application) {
    app.messenger_manager()
        .register_handler("flaky.job", Arc::new(FlakyJobHandler))
        .await;
}

// ===== ASSERTION HELPERS =====

pub fn assert_last_event_id_is_not_null(app: &Application) {
    let capture = app.capture_manager();
    assert!(
        capture.last_event_id().is_some(),
        "Last error not captured"
    );
}

pub fn assert_last_event_id_is_null(app: &Application) {
    let capture = app.capture_manager();
    assert!(
        capture.last_event_id().is_none(),
        "Some error was captured"
    );
}
