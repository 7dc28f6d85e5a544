use std::any::Any;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use log::error;

use vigil_core::capture::manager::CaptureManager;
use vigil_core::capture::Fault;
use vigil_core::config::AppConfig;
use vigil_core::console::runner::ConsoleRunner;
use vigil_core::console::CommandArgs;
use vigil_core::kernel::bootstrap::Application;
use vigil_core::kernel::constants;
use vigil_core::kernel::error::Result as KernelResult;
use vigil_core::messenger::{Message, MessageHandler, MessengerManager};
use vigil_core::router::{
    route_handler, sync_route_handler, KernelClient, Method, Request, Response, RouterManager,
};

/// Body served by the plain success route.
const GREETING_BODY: &str = "Hello there";

/// Message raised by the demo exception route.
const INTENTIONAL_ERROR_MESSAGE: &str = "This is an intentional error";

/// Token the secured demo route expects in the authorization header.
const SECURED_TOKEN: &str = "valid-token";

/// Vigil: error-capture integration framework demo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Load application configuration from this file
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Issue one simulated request against the demo route surface
    Request {
        /// Path to request, e.g. /200
        path: String,
        /// Request method
        #[arg(long, default_value = "GET")]
        method: String,
        /// Token sent in the authorization header
        #[arg(long)]
        auth: Option<String>,
        /// Return raised faults instead of converting them to responses
        #[arg(long)]
        no_catch: bool,
    },
    /// Consume queued messages from a receiver
    Consume {
        /// Receiver to drain
        #[arg(default_value = constants::DEFAULT_RECEIVER)]
        receiver: String,
        /// Maximum number of messages to process
        #[arg(long, default_value_t = 1)]
        limit: usize,
        /// Maximum duration of the cycle, in seconds
        #[arg(long = "time-limit", default_value_t = 1)]
        time_limit: u64,
        /// Raise log output
        #[arg(short, long)]
        verbose: bool,
    },
    /// List the registered route surface
    Routes,
}

// --- Demo message bus fixtures ---

/// Job whose handler always fails softly; whether the failure is captured
/// depends on the configured capture policy.
#[derive(Debug, Clone)]
struct FlakyJob;

impl Message for FlakyJob {
    fn name(&self) -> &'static str {
        "flaky.job"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct FlakyJobHandler;

#[async_trait]
impl MessageHandler for FlakyJobHandler {
    async fn handle(&self, _message: &dyn Message) -> std::result::Result<(), Fault> {
        Err(Fault::soft_fail("flaky job handler gave up"))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args = CliArgs::parse();

    let config = match &args.config {
        Some(path) => match AppConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load configuration: {}", e);
                return ExitCode::from(2);
            }
        },
        None => AppConfig::default(),
    };

    let mut app = match build_application(config).await {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Failed to initialize application: {}", e);
            return ExitCode::from(2);
        }
    };

    let status = match args.command {
        Commands::Request {
            path,
            method,
            auth,
            no_catch,
        } => run_request(&app, &path, &method, auth.as_deref(), no_catch).await,
        Commands::Consume {
            receiver,
            limit,
            time_limit,
            verbose,
        } => run_consume(&app, &receiver, limit, time_limit, verbose).await,
        Commands::Routes => run_routes(&app).await,
    };

    if let Err(e) = app.shutdown().await {
        error!("Application shutdown failed: {}", e);
    }

    status
}

/// Boot an application and register the demo route surface plus the demo
/// message handler, the way an embedding application would.
async fn build_application(config: AppConfig) -> KernelResult<Application> {
    let mut app = Application::with_config(config)?;
    app.boot().await?;

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
        .await?;

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
        .await?;

    let inner_router = router.clone();
    router
        .register_route(
            Method::Get,
            "/subrequest",
            route_handler(move |_request| {
                let router = inner_router.clone();
                async move {
                    let inner = Request::new(Method::Get, "/200");
                    let response = router.dispatch(&inner).await?;
                    Ok(Response::ok(response.body().to_string()))
                }
            }),
        )
        .await?;

    router
        .register_route(
            Method::Get,
            "/exception",
            sync_route_handler(|_request| Err(Fault::unhandled(INTENTIONAL_ERROR_MESSAGE))),
        )
        .await?;

    let m = messenger.clone();
    router
        .register_route(
            Method::Get,
            "/dispatch-message",
            route_handler(move |_request| {
                let messenger = m.clone();
                async move {
                    messenger
                        .dispatch(constants::DEFAULT_RECEIVER, Box::new(FlakyJob))
                        .await
                        .map_err(|e| Fault::unhandled(e.to_string()))?;
                    Ok(Response::ok("dispatched"))
                }
            }),
        )
        .await?;

    messenger
        .register_handler("flaky.job", Arc::new(FlakyJobHandler))
        .await;

    Ok(app)
}

async fn run_request(
    app: &Application,
    path: &str,
    method: &str,
    auth: Option<&str>,
    no_catch: bool,
) -> ExitCode {
    let method: Method = match method.parse() {
        Ok(method) => method,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };

    let client = if no_catch {
        KernelClient::new(app.router_manager(), app.capture_manager(), false)
    } else {
        app.client()
    };

    let mut request = Request::new(method, path);
    if let Some(token) = auth {
        request = request.with_header("authorization", token);
    }

    match client.send(request).await {
        Ok(response) => {
            println!("HTTP {}", response.status());
            if !response.body().is_empty() {
                println!("{}", response.body());
            }
            match app.capture_manager().last_event_id() {
                Some(id) => println!("last event id: {}", id),
                None => println!("last event id: none"),
            }
            ExitCode::SUCCESS
        }
        Err(fault) => {
            eprintln!("{}: {}", fault.kind(), fault);
            ExitCode::from(1)
        }
    }
}

async fn run_consume(
    app: &Application,
    receiver: &str,
    limit: usize,
    time_limit: u64,
    verbose: bool,
) -> ExitCode {
    let mut args = CommandArgs::new()
        .with_argument(receiver)
        .with_option("limit", &limit.to_string())
        .with_option("time-limit", &time_limit.to_string());
    if verbose {
        args = args.with_flag("verbose");
    }

    match app
        .console_runner()
        .run(constants::CONSUME_COMMAND, &args)
        .await
    {
        Ok(0) => ExitCode::SUCCESS,
        Ok(status) => {
            eprintln!("{} exited with status {}", constants::CONSUME_COMMAND, status);
            ExitCode::from(status.clamp(1, u8::MAX as i32) as u8)
        }
        Err(e) => {
            eprintln!("Error running {}: {}", constants::CONSUME_COMMAND, e);
            ExitCode::from(2)
        }
    }
}

async fn run_routes(app: &Application) -> ExitCode {
    for (method, path) in app.router_manager().routes().await {
        println!("{} {}", method, path);
    }
    ExitCode::SUCCESS
}
