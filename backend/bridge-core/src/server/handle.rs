//! Handle to a running panel server and the worker thread hosting it.

use models::ServerInfo;

use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{JoinHandle, current};

use log::{debug, error, info, warn};
use tokio::sync::oneshot::Sender;

/// Shutdown channel and join handle for one worker thread.
///
/// Shared between the [`ServerHandle`] and any teardown callables made from
/// it; whichever calls [`WorkerControl::stop`] first does the work.
pub(crate) struct WorkerControl {
    server_id: String,
    shutdown: Mutex<Option<Sender<()>>>,
    thread: Mutex<Option<JoinHandle<()>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

impl WorkerControl {
    pub(crate) fn new(server_id: String, shutdown: Sender<()>, thread: JoinHandle<()>) -> Self {
        Self {
            server_id,
            shutdown: Mutex::new(Some(shutdown)),
            thread: Mutex::new(Some(thread)),
        }
    }

    /// Signal shutdown and wait for the worker to release its socket.
    ///
    /// Returns `false` if the server had already been stopped.
    pub(crate) fn stop(&self) -> bool {
        if !self.signal() {
            debug!("Panel server {} already stopped", self.server_id);
            return false;
        }

        if let Some(thread) = lock(&self.thread).take() {
            if thread.thread().id() == current().id() {
                warn!(
                    "Panel server {} stopped from its own worker, not joining",
                    self.server_id
                );
            } else if thread.join().is_err() {
                error!("Panel server {} worker panicked", self.server_id);
            }
        }

        info!("Panel server {} stopped", self.server_id);
        true
    }

    /// Signal shutdown and detach the worker without waiting for it.
    ///
    /// Used when startup failed or timed out: the worker may still be stuck
    /// starting up, and will exit as soon as its loop runs.
    pub(crate) fn abandon(&self) {
        self.signal();
        if lock(&self.thread).take().is_some() {
            debug!("Detached panel server {} worker", self.server_id);
        }
    }

    fn signal(&self) -> bool {
        match lock(&self.shutdown).take() {
            Some(sender) => {
                // The worker may already have exited; nothing to signal then.
                let _ = sender.send(());
                true
            }
            None => false,
        }
    }

    pub(crate) fn is_stopped(&self) -> bool {
        lock(&self.shutdown).is_none()
    }
}

/// Handle to a running panel server.
///
/// Exists from successful startup until [`ServerHandle::stop`]. Dropping the
/// handle without stopping it leaves the server running for the rest of the
/// process; nothing expires it automatically.
#[derive(Clone)]
pub struct ServerHandle {
    info: ServerInfo,
    control: Arc<WorkerControl>,
}

impl ServerHandle {
    pub(crate) fn new(info: ServerInfo, control: Arc<WorkerControl>) -> Self {
        Self { info, control }
    }

    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    pub fn server_id(&self) -> &str {
        &self.info.server_id
    }

    /// Stop the server and join its worker thread. Safe to call repeatedly.
    pub fn stop(&self) {
        self.control.stop();
    }

    pub fn is_stopped(&self) -> bool {
        self.control.is_stopped()
    }
}
