use std::sync::Arc;

use crate::capture::manager::CaptureManager;
use crate::capture::{DefaultCaptureManager, Fault};
use crate::router::dispatcher::{DefaultRouterManager, RouterManager};
use crate::router::{Method, Request, Response};

/// Issues simulated requests against the router and reports faults to the
/// capture layer.
///
/// A fault raised during dispatch is captured first, then surfaced in one of
/// two shapes depending on `catch_faults`: converted into a response (status
/// from the fault kind, body the fault message, verbatim) or returned as the
/// error itself. Both shapes are valid outcomes; which one a caller sees is
/// purely a configuration matter.
#[derive(Debug, Clone)]
pub struct KernelClient {
    router: Arc<DefaultRouterManager>,
    capture: Arc<DefaultCaptureManager>,
    catch_faults: bool,
}

impl KernelClient {
    pub fn new(
        router: Arc<DefaultRouterManager>,
        capture: Arc<DefaultCaptureManager>,
        catch_faults: bool,
    ) -> Self {
        Self {
            router,
            capture,
            catch_faults,
        }
    }

    pub fn catches_faults(&self) -> bool {
        self.catch_faults
    }

    /// Issue one request for `path`.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
    ) -> std::result::Result<Response, Fault> {
        self.send(Request::new(method, path)).await
    }

    /// Issue a prepared request, headers included.
    pub async fn send(&self, request: Request) -> std::result::Result<Response, Fault> {
        match self.router.dispatch(&request).await {
            Ok(response) => Ok(response),
            Err(fault) => {
                match self.capture.capture_fault(&fault) {
                    Some(id) => log::debug!(
                        "{} {} faulted ({}), captured as {}",
                        request.method(),
                        request.path(),
                        fault.kind(),
                        id
                    ),
                    None => log::debug!(
                        "{} {} faulted ({}), capture excluded by policy",
                        request.method(),
                        request.path(),
                        fault.kind()
                    ),
                }

                if self.catch_faults {
                    Ok(Response::new(fault.kind().status_code(), fault.message()))
                } else {
                    Err(fault)
                }
            }
        }
    }
}
