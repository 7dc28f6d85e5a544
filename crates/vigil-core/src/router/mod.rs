pub mod client;
pub mod dispatcher;
pub mod error;

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;

use crate::capture::Fault;
use crate::router::error::RouterSystemError;

/// Request method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
        })
    }
}

impl FromStr for Method {
    type Err = RouterSystemError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            _ => Err(RouterSystemError::UnknownMethod {
                value: value.to_string(),
            }),
        }
    }
}

/// One simulated request against a named path.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    path: String,
    headers: HashMap<String, String>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HashMap::new(),
        }
    }

    /// Attach a header, builder style. Header names are case-insensitive.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .insert(name.to_ascii_lowercase(), value.to_string());
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(|value| value.as_str())
    }
}

/// Status code and body produced by a handler, or converted from a fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    body: String,
}

impl Response {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 200 response with the given body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Owned future returned by boxed route handlers
pub type HandlerFuture =
    Pin<Box<dyn Future<Output = std::result::Result<Response, Fault>> + Send>>;

/// Application code behind one route.
#[async_trait]
pub trait RouteHandler: Send + Sync {
    async fn handle(&self, request: &Request) -> std::result::Result<Response, Fault>;
}

/// Handler wrapping a boxed closure (internal helper). The closure receives
/// its own copy of the request.
struct FnHandler {
    handler: Box<dyn Fn(Request) -> HandlerFuture + Send + Sync>,
}

#[async_trait]
impl RouteHandler for FnHandler {
    async fn handle(&self, request: &Request) -> std::result::Result<Response, Fault> {
        (self.handler)(request.clone()).await
    }
}

/// Build a route handler from an async closure.
pub fn route_handler<F, Fut>(f: F) -> Arc<dyn RouteHandler>
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = std::result::Result<Response, Fault>> + Send + 'static,
{
    Arc::new(FnHandler {
        handler: Box::new(move |request| -> HandlerFuture { Box::pin(f(request)) }),
    })
}

/// Helper to build route handlers from synchronous closures
pub fn sync_route_handler<F>(f: F) -> Arc<dyn RouteHandler>
where
    F: Fn(&Request) -> std::result::Result<Response, Fault> + Send + Sync + 'static,
{
    route_handler(move |request: Request| {
        let result = f(&request);
        async move { result }
    })
}

/// Re-export important types
pub use client::KernelClient;
pub use dispatcher::{DefaultRouterManager, RouteTable, RouterManager};

// Test module declaration
#[cfg(test)]
mod tests;
