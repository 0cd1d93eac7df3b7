//! State written by background bootstrap tasks and read later by the UI.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::tor::TorInstance;

mod wait_group;

pub use self::wait_group::{WaitGroup, WaitGroupGuard};

#[derive(Debug, Default)]
struct StartupInner {
    errors: Vec<anyhow::Error>,
    tor: Option<TorInstance>,
}

/// Startup error list plus the write-once Tor handle, behind one lock.
///
/// Cloning shares the same underlying state. Entries keep append order and
/// are never deduplicated or cleared.
#[derive(Debug, Clone, Default)]
pub struct StartupState {
    inner: Arc<Mutex<StartupInner>>,
}

impl StartupState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_startup_error(&self, err: impl Into<anyhow::Error>) {
        let err = err.into();
        tracing::warn!(error = format!("{err:#}").as_str(), "recorded startup error");
        self.lock().errors.push(err);
    }

    /// Rendered messages, in the order the errors were recorded.
    pub fn startup_errors(&self) -> Vec<String> {
        self.lock()
            .errors
            .iter()
            .map(|err| format!("{err:#}"))
            .collect()
    }

    pub fn startup_error_count(&self) -> usize {
        self.lock().errors.len()
    }

    /// Stores the Tor handle unless one is already set; the first value wins.
    pub fn set_tor(&self, instance: TorInstance) -> bool {
        let mut inner = self.lock();
        if let Some(existing) = &inner.tor {
            tracing::warn!(
                existing = %existing,
                ignored = %instance,
                "tor instance already set; keeping the first one"
            );
            return false;
        }
        tracing::info!(tor = %instance, "tor instance available");
        inner.tor = Some(instance);
        true
    }

    pub fn tor(&self) -> Option<TorInstance> {
        self.lock().tor.clone()
    }

    fn lock(&self) -> MutexGuard<'_, StartupInner> {
        // Writers only push whole entries, so a poisoned guard is still consistent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
