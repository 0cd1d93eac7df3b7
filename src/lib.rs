pub mod config;
pub mod error;
pub mod logging;
pub mod startup;
pub mod state;
pub mod toolkit;
pub mod tor;
pub mod ui;
pub use error::{AppError, AppResult};

use std::rc::Rc;

/// Entrypoint used by higher-level integrations and CLI bindings.
///
/// Returns the toolkit's exit status once the main loop finishes.
pub fn run() -> AppResult<i32> {
    logging::init();
    tracing::info!("starting Tonio");

    let config = config::load_app_config();
    let args = std::env::args_os()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    let graphics = ui::Graphics::with_toolkit(Rc::new(toolkit::GtkToolkit::new()));
    let mut controller = ui::create_application(graphics, config, &args);

    let background = startup::WaitGroup::new();
    let _tor = controller.ensure_tor(&background);
    let _report = ui::spawn_startup_report(background, controller.startup().clone());

    let status = controller.run_loop()?;
    tracing::info!(status, "shutdown complete");
    Ok(status)
}
