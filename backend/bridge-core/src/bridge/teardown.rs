use crate::server::ServerHandle;

use std::fmt::{Debug, Formatter, Result as FormatResult};
use std::sync::{Arc, Mutex};

type TeardownFn = Box<dyn FnOnce() + Send>;

/// Zero-argument callable the host invokes when an export is no longer shown.
///
/// Clones share the same action; it runs on the first [`Teardown::call`] and
/// later calls do nothing.
#[derive(Clone)]
pub struct Teardown {
    action: Arc<Mutex<Option<TeardownFn>>>,
}

impl Teardown {
    pub fn new(action: impl FnOnce() + Send + 'static) -> Self {
        Self {
            action: Arc::new(Mutex::new(Some(Box::new(action)))),
        }
    }

    /// A teardown with nothing to release.
    pub fn noop() -> Self {
        Self {
            action: Arc::new(Mutex::new(None)),
        }
    }

    pub fn call(&self) {
        let action = self
            .action
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();

        if let Some(action) = action {
            action();
        }
    }

    pub fn is_spent(&self) -> bool {
        self.action
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_none()
    }
}

impl From<ServerHandle> for Teardown {
    fn from(handle: ServerHandle) -> Self {
        Teardown::new(move || handle.stop())
    }
}

impl Debug for Teardown {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        formatter
            .debug_struct("Teardown")
            .field("spent", &self.is_spent())
            .finish()
    }
}
