use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::capture::Fault;
use crate::kernel::component::KernelComponent;
use crate::kernel::error::Result;
use crate::router::error::RouterSystemError;
use crate::router::{Method, Request, Response, RouteHandler};

/// Route table mapping (method, path) to application handlers (internal,
/// wrapped by [`DefaultRouterManager`]).
#[derive(Default)]
pub struct RouteTable {
    routes: HashMap<(Method, String), Arc<dyn RouteHandler>>,
}

impl fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTable")
            .field("route_count", &self.routes.len())
            .finish()
    }
}

impl RouteTable {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// Register a handler behind `(method, path)`. Registering the same pair
    /// twice is an error.
    pub fn register(
        &mut self,
        method: Method,
        path: &str,
        handler: Arc<dyn RouteHandler>,
    ) -> std::result::Result<(), RouterSystemError> {
        let key = (method, path.to_string());
        if self.routes.contains_key(&key) {
            return Err(RouterSystemError::DuplicateRoute {
                method,
                path: path.to_string(),
            });
        }
        self.routes.insert(key, handler);
        Ok(())
    }

    pub fn find(&self, method: Method, path: &str) -> Option<Arc<dyn RouteHandler>> {
        self.routes.get(&(method, path.to_string())).cloned()
    }

    /// Registered (method, path) pairs, sorted by path.
    pub fn paths(&self) -> Vec<(Method, String)> {
        let mut paths: Vec<_> = self
            .routes
            .keys()
            .map(|(method, path)| (*method, path.clone()))
            .collect();
        paths.sort_by(|a, b| a.1.cmp(&b.1));
        paths
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Router component interface
#[async_trait]
pub trait RouterManager: KernelComponent {
    /// Register application code behind `(method, path)`.
    async fn register_route(
        &self,
        method: Method,
        path: &str,
        handler: Arc<dyn RouteHandler>,
    ) -> Result<()>;

    /// Dispatch one request to its handler. An unmatched path yields a
    /// not-found fault; a handler fault passes through untouched.
    async fn dispatch(&self, request: &Request) -> std::result::Result<Response, Fault>;

    /// Registered (method, path) pairs.
    async fn routes(&self) -> Vec<(Method, String)>;
}

/// Default implementation of [`RouterManager`]
#[derive(Clone)]
pub struct DefaultRouterManager {
    name: &'static str,
    table: Arc<Mutex<RouteTable>>,
}

impl DefaultRouterManager {
    pub fn new() -> Self {
        Self {
            name: "RouterManager",
            table: Arc::new(Mutex::new(RouteTable::new())),
        }
    }
}

impl fmt::Debug for DefaultRouterManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultRouterManager")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Default for DefaultRouterManager {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RouterManager for DefaultRouterManager {
    async fn register_route(
        &self,
        method: Method,
        path: &str,
        handler: Arc<dyn RouteHandler>,
    ) -> Result<()> {
        let mut table = self.table.lock().await;
        table.register(method, path, handler)?;
        log::debug!("registered route {} {}", method, path);
        Ok(())
    }

    async fn dispatch(&self, request: &Request) -> std::result::Result<Response, Fault> {
        // Clone the handler out of the lock before awaiting it, so handlers
        // can dispatch nested requests through this same router.
        let handler = {
            let table = self.table.lock().await;
            table.find(request.method(), request.path())
        };

        match handler {
            Some(handler) => handler.handle(request).await,
            None => Err(Fault::not_found(request.method(), request.path())),
        }
    }

    async fn routes(&self) -> Vec<(Method, String)> {
        self.table.lock().await.paths()
    }
}

#[async_trait]
impl KernelComponent for DefaultRouterManager {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn initialize(&self) -> Result<()> {
        Ok(())
    }

    async fn start(&self) -> Result<()> {
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        Ok(())
    }
}
