use std::cell::Cell;

use super::{Graphics, MAIN_WINDOW_OBJECT};

const MAIN_UI_DEFINITION: &str = include_str!("../../data/ui/main.ui");

pub(super) fn activate_once(graphics: &Graphics, activated: &Cell<bool>) {
    if activated.replace(true) {
        tracing::debug!("ignoring duplicate activate signal");
        return;
    }
    activate_main_window(graphics);
}

/// Loads the bundled UI definition and presents its main window.
///
/// A missing window is logged, not treated as an error; the UI definition
/// is responsible for providing it.
pub fn activate_main_window(graphics: &Graphics) {
    let Some(toolkit) = graphics.toolkit() else {
        tracing::debug!("no toolkit available; skipping main window");
        return;
    };

    let builder = toolkit.builder_new();
    if let Err(err) = builder.add_from_string(MAIN_UI_DEFINITION) {
        tracing::warn!(?err, "failed to load main ui definition");
    }

    match builder.object(MAIN_WINDOW_OBJECT) {
        Some(window) => {
            tracing::info!("presenting main window");
            window.show();
        }
        None => {
            tracing::warn!(
                object = MAIN_WINDOW_OBJECT,
                "main window missing from ui definition"
            );
        }
    }
}
