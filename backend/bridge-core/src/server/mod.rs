//! Embedded panel server running on a dedicated worker thread.
//!
//! [`launch`] owns the whole startup contract:
//!
//! 1. Create the startup promise/future pair
//! 2. Spawn a named worker thread with its own current-thread tokio runtime
//! 3. On the worker: construct the server unstarted, start it, *then*
//!    schedule the callback that resolves the promise, and only then run the
//!    runtime's loop
//! 4. On the caller: wait for the future with a bounded timeout
//!
//! The resolve callback is a spawned task, so it can only run once the loop
//! is being driven; a resolved future therefore means the server is
//! accepting connections.
//!
//! Worker threads are never joined on process exit. A server whose handle is
//! dropped without [`ServerHandle::stop`] keeps serving until the process ends.

mod handle;
pub mod options;
pub(crate) mod panel;

pub use handle::ServerHandle;
pub use options::ServerOptions;

use handle::WorkerControl;
use panel::PanelServer;

use crate::bridge::Figure;
use crate::error::bridge::BridgeError;
use crate::error::server::ServerError;
use crate::startup::{StartupPromise, startup_channel};

use common::ErrorLocation;

use models::ServerInfo;

use std::future::pending;
use std::panic::Location;
use std::sync::Arc;
use std::thread::Builder as ThreadBuilder;
use std::time::Duration;

use log::{debug, error, info, warn};
use tokio::runtime::{Builder as RuntimeBuilder, Runtime};
use tokio::sync::oneshot::{self, Receiver};

/// How long the caller waits for a server to come up.
pub const STARTUP_TIMEOUT: Duration = Duration::from_secs(15);

const WORKER_THREAD_PREFIX: &str = "holoviz-panel-";
const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

/// Start a panel server for `figure` on a new worker thread.
///
/// `options` must already carry a server id. Blocks for at most `timeout`.
///
/// # Errors
///
/// - [`BridgeError::StartupFailure`] if the runtime, options, or bind failed
/// - [`BridgeError::StartupTimeout`] if the server did not report in time
///
/// On either error the worker is told to shut down before returning.
#[track_caller]
pub fn launch(
    figure: Arc<dyn Figure>,
    options: ServerOptions,
    timeout: Duration,
) -> Result<ServerHandle, BridgeError> {
    let server_id = options.server_id_text().unwrap_or_default();

    spawn_worker(&server_id, timeout, move |runtime| {
        let server = PanelServer::new(figure, &options)?;
        server.start(runtime)
    })
}

/// Run `start` on a fresh worker thread and wait for it to report.
#[track_caller]
pub(crate) fn spawn_worker<F>(
    server_id: &str,
    timeout: Duration,
    start: F,
) -> Result<ServerHandle, BridgeError>
where
    F: FnOnce(&Runtime) -> Result<ServerInfo, ServerError> + Send + 'static,
{
    let (promise, future) = startup_channel();
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    debug!("Spawning worker for panel server {server_id}");

    let thread = ThreadBuilder::new()
        .name(format!("{WORKER_THREAD_PREFIX}{server_id}"))
        .spawn(move || run_worker(promise, shutdown_rx, start))
        .map_err(|e| BridgeError::StartupFailure {
            message: format!("Failed to spawn worker thread: {e}"),
            location: ErrorLocation::from(Location::caller()),
            source: Some(Box::new(e)),
        })?;

    let control = Arc::new(WorkerControl::new(
        server_id.to_string(),
        shutdown_tx,
        thread,
    ));

    match future.wait(timeout) {
        Ok(info) => {
            info!(
                "Panel server {server_id} ready at {}",
                info.redirect_url()
            );
            Ok(ServerHandle::new(info, control))
        }
        Err(e) => {
            warn!("Panel server {server_id} failed to start, shutting down worker: {e}");
            control.abandon();
            Err(e)
        }
    }
}

fn run_worker<F>(promise: StartupPromise<ServerInfo>, shutdown_rx: Receiver<()>, start: F)
where
    F: FnOnce(&Runtime) -> Result<ServerInfo, ServerError>,
{
    let runtime = match RuntimeBuilder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to build panel server runtime: {e}");
            promise.fail(BridgeError::StartupFailure {
                message: format!("Failed to build runtime: {e}"),
                location: ErrorLocation::from(Location::caller()),
                source: Some(Box::new(e)),
            });
            return;
        }
    };

    let info = match start(&runtime) {
        Ok(info) => info,
        Err(e) => {
            error!("Panel server failed to start: {e}");
            promise.fail(BridgeError::StartupFailure {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
                source: Some(Box::new(e)),
            });
            return;
        }
    };

    let server_id = info.server_id.clone();

    // Runs on the first poll of the loop below, never before.
    runtime.spawn(async move {
        promise.resolve(info);
    });

    runtime.block_on(wait_for_shutdown(shutdown_rx));
    runtime.shutdown_timeout(SHUTDOWN_GRACE);

    debug!("Panel server {server_id} worker exiting");
}

async fn wait_for_shutdown(shutdown_rx: Receiver<()>) {
    if shutdown_rx.await.is_err() {
        // Handle dropped without a stop: serve for the rest of the process.
        pending::<()>().await;
    }
}
