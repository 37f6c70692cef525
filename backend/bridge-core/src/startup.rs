//! Single-assignment startup result shared between the export caller and the
//! panel server's worker thread.
//!
//! [`startup_channel`] hands out exactly one [`StartupPromise`] (the writer) and
//! one [`StartupFuture`] (the reader). Both consume themselves on use, so the
//! cell is written at most once and read at most once. A promise dropped
//! without being assigned records a failure, so a worker that dies early never
//! leaves the caller waiting for the full timeout.

use crate::error::bridge::BridgeError;

use common::ErrorLocation;

use std::mem::replace;
use std::panic::Location;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::Duration;

use log::{trace, warn};

enum Slot<T> {
    Pending,
    Ready(Result<T, BridgeError>),
    Taken,
}

struct Cell<T> {
    slot: Mutex<Slot<T>>,
    assigned: Condvar,
}

impl<T> Cell<T> {
    fn lock(&self) -> MutexGuard<'_, Slot<T>> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn assign(&self, result: Result<T, BridgeError>) -> bool {
        let mut slot = self.lock();
        if !matches!(*slot, Slot::Pending) {
            warn!("Startup result already assigned, discarding later result");
            return false;
        }
        *slot = Slot::Ready(result);
        drop(slot);
        self.assigned.notify_all();
        true
    }
}

/// Writer half, moved onto the worker thread.
pub struct StartupPromise<T> {
    cell: Arc<Cell<T>>,
    created_at: ErrorLocation,
}

/// Reader half, kept by the caller.
pub struct StartupFuture<T> {
    cell: Arc<Cell<T>>,
}

/// Create a connected promise/future pair.
///
/// The caller's location is reported if the promise is dropped unassigned.
#[track_caller]
pub fn startup_channel<T>() -> (StartupPromise<T>, StartupFuture<T>) {
    let cell = Arc::new(Cell {
        slot: Mutex::new(Slot::Pending),
        assigned: Condvar::new(),
    });

    (
        StartupPromise {
            cell: Arc::clone(&cell),
            created_at: ErrorLocation::from(Location::caller()),
        },
        StartupFuture { cell },
    )
}

impl<T> StartupPromise<T> {
    pub fn resolve(self, value: T) {
        trace!("Startup promise resolved");
        self.cell.assign(Ok(value));
    }

    pub fn fail(self, error: BridgeError) {
        trace!("Startup promise failed: {error}");
        self.cell.assign(Err(error));
    }
}

impl<T> Drop for StartupPromise<T> {
    fn drop(&mut self) {
        if matches!(*self.cell.lock(), Slot::Pending) {
            self.cell.assign(Err(BridgeError::StartupFailure {
                message: String::from("Worker exited before reporting startup"),
                location: self.created_at,
                source: None,
            }));
        }
    }
}

impl<T> StartupFuture<T> {
    /// Whether the worker has assigned a result yet.
    pub fn is_resolved(&self) -> bool {
        !matches!(*self.cell.lock(), Slot::Pending)
    }

    /// Block until the worker assigns a result or `timeout` elapses.
    ///
    /// # Errors
    ///
    /// - [`BridgeError::StartupTimeout`] if nothing was assigned in time
    /// - whatever error the worker assigned through [`StartupPromise::fail`]
    #[track_caller]
    pub fn wait(self, timeout: Duration) -> Result<T, BridgeError> {
        let location = ErrorLocation::from(Location::caller());

        let slot = self.cell.lock();
        let (mut slot, _) = self
            .cell
            .assigned
            .wait_timeout_while(slot, timeout, |slot| matches!(slot, Slot::Pending))
            .unwrap_or_else(|e| e.into_inner());

        match replace(&mut *slot, Slot::Taken) {
            Slot::Ready(result) => result,
            Slot::Pending => {
                *slot = Slot::Pending;
                Err(BridgeError::StartupTimeout {
                    message: format!("Server did not start within {timeout:?}"),
                    location,
                })
            }
            // Unreachable through the public API: the future is consumed by `wait`.
            Slot::Taken => Err(BridgeError::StartupTimeout {
                message: String::from("Startup result was already consumed"),
                location,
            }),
        }
    }
}
