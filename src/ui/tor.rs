use std::thread::JoinHandle;

use crate::config::TorConfig;
use crate::startup::{StartupState, WaitGroup};
use crate::tor::{SystemTorLocator, TorLocator};

use super::UiController;

impl UiController {
    /// Looks for a system Tor in the background; see [`ensure_tor_with`].
    pub fn ensure_tor(&self, wait_group: &WaitGroup) -> JoinHandle<()> {
        ensure_tor_with(
            SystemTorLocator,
            self.config().tor.clone(),
            self.startup().clone(),
            wait_group,
        )
    }
}

/// Runs one Tor lookup on its own thread without blocking the caller.
///
/// The task is registered with `wait_group` before this returns and marked
/// done when it finishes, whatever the outcome. Failures and an unusable
/// Tor land in the startup errors; a usable Tor is stored as the handle.
pub fn ensure_tor_with<L>(
    locator: L,
    config: TorConfig,
    startup: StartupState,
    wait_group: &WaitGroup,
) -> JoinHandle<()>
where
    L: TorLocator + Send + 'static,
{
    let guard = wait_group.enter();
    std::thread::spawn(move || {
        let _guard = guard;
        match locator.locate(&config) {
            Ok(Some(instance)) => {
                startup.set_tor(instance);
            }
            Ok(None) => startup.add_startup_error(anyhow::anyhow!("tor can't be used")),
            Err(err) => startup.add_startup_error(err),
        }
    })
}

/// Logs a startup summary once every background bootstrap task has finished.
pub fn spawn_startup_report(wait_group: WaitGroup, startup: StartupState) -> JoinHandle<()> {
    std::thread::spawn(move || {
        wait_group.wait();
        let errors = startup.startup_errors();
        for error in &errors {
            tracing::warn!(error = error.as_str(), "startup error");
        }
        tracing::info!(
            errors = errors.len(),
            tor = startup.tor().is_some(),
            "startup complete"
        );
    })
}
