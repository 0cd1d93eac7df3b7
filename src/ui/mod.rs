use std::cell::Cell;
use std::rc::Rc;

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::startup::StartupState;
use crate::state::{LifecycleEvent, LifecycleState, StateMachine};
use crate::toolkit::{
    Application, ApplicationFlags, SignalHandle, SignalHandler, Toolkit, ToolkitError,
    ACTIVATE_SIGNAL,
};
use crate::tor::TorInstance;

mod activation;
mod tor;

pub use self::activation::activate_main_window;
pub use self::tor::{ensure_tor_with, spawn_startup_report};

/// Display name handed to the toolkit in place of the real `argv[0]`.
pub const APPLICATION_NAME: &str = "Tonio";
/// Registered with the desktop; changing it breaks existing integrations.
pub const APPLICATION_ID: &str = "digital.autonomia.Tonio";
pub const MAIN_WINDOW_OBJECT: &str = "mainWindow";

/// Toolkit handle shared by the bootstrap and the activation handler.
///
/// [`Graphics::headless`] carries no toolkit at all; every toolkit call is
/// then skipped, which lets the controller run in non-GUI contexts.
#[derive(Clone, Default)]
pub struct Graphics {
    toolkit: Option<Rc<dyn Toolkit>>,
}

impl Graphics {
    pub fn with_toolkit(toolkit: Rc<dyn Toolkit>) -> Self {
        Self {
            toolkit: Some(toolkit),
        }
    }

    pub fn headless() -> Self {
        Self::default()
    }

    pub fn toolkit(&self) -> Option<&dyn Toolkit> {
        self.toolkit.as_deref()
    }

    pub fn is_headless(&self) -> bool {
        self.toolkit.is_none()
    }
}

/// Owns the application object for the lifetime of the GUI session.
pub struct UiController {
    graphics: Graphics,
    app: Box<dyn Application>,
    config: AppConfig,
    startup: StartupState,
    machine: StateMachine,
    activated: Rc<Cell<bool>>,
}

impl UiController {
    pub fn from_parts(graphics: Graphics, app: Box<dyn Application>, config: AppConfig) -> Self {
        Self {
            graphics,
            app,
            config,
            startup: StartupState::new(),
            machine: StateMachine::new(),
            activated: Rc::new(Cell::new(false)),
        }
    }

    pub fn graphics(&self) -> &Graphics {
        &self.graphics
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn startup(&self) -> &StartupState {
        &self.startup
    }

    pub fn tor(&self) -> Option<TorInstance> {
        self.startup.tor()
    }

    pub fn lifecycle(&self) -> LifecycleState {
        self.machine.state()
    }

    pub fn on_activate(&self) {
        activation::activate_once(&self.graphics, &self.activated);
    }

    /// Connects activation, then blocks in the toolkit main loop.
    ///
    /// Returns the toolkit's exit status unchanged. Panics if the activate
    /// signal cannot be connected.
    pub fn run_loop(&mut self) -> AppResult<i32> {
        self.machine.transition(LifecycleEvent::ConnectActivate)?;
        if let Err(err) = self.connect_activate() {
            fatal(format!("Couldn't activate application: {err}"));
        }

        self.machine.transition(LifecycleEvent::Run)?;
        tracing::info!("entering toolkit main loop");
        let status = self.app.run(&[]);
        self.machine.transition(LifecycleEvent::Exit)?;
        tracing::info!(status, "toolkit main loop exited");
        Ok(status)
    }

    fn connect_activate(&self) -> Result<SignalHandle, ToolkitError> {
        let graphics = self.graphics.clone();
        let activated = self.activated.clone();
        let handler: SignalHandler =
            Box::new(move || activation::activate_once(&graphics, &activated));
        self.app.connect(ACTIVATE_SIGNAL, handler)
    }
}

/// Replaces `argv[0]` with the display name, keeping the rest in order.
pub fn args_with_application_name(args: &[String]) -> Vec<String> {
    std::iter::once(APPLICATION_NAME.to_string())
        .chain(args.iter().skip(1).cloned())
        .collect()
}

pub fn try_create_application(
    graphics: Graphics,
    config: AppConfig,
    args: &[String],
) -> Result<UiController, ToolkitError> {
    let args = args_with_application_name(args);
    let app = match graphics.toolkit() {
        Some(toolkit) => {
            toolkit.init(&args);
            toolkit.application_new(APPLICATION_ID, ApplicationFlags::None)?
        }
        None => {
            tracing::debug!("no toolkit available; using headless application");
            Box::new(HeadlessApplication) as Box<dyn Application>
        }
    };
    tracing::info!(id = APPLICATION_ID, "created application");
    Ok(UiController::from_parts(graphics, app, config))
}

/// Builds the controller, aborting the process if the toolkit refuses the application.
pub fn create_application(graphics: Graphics, config: AppConfig, args: &[String]) -> UiController {
    match try_create_application(graphics, config, args) {
        Ok(controller) => controller,
        Err(err) => fatal(format!("Couldn't create application: {err}")),
    }
}

fn fatal(message: String) -> ! {
    tracing::error!("{message}");
    panic!("{message}");
}

struct HeadlessApplication;

impl Application for HeadlessApplication {
    fn connect(&self, _signal: &str, _handler: SignalHandler) -> Result<SignalHandle, ToolkitError> {
        Ok(SignalHandle(0))
    }

    fn run(&self, _args: &[String]) -> i32 {
        0
    }
}
