use std::cell::RefCell;

use gtk4::prelude::*;

use super::{
    Application, ApplicationFlags, SignalHandle, SignalHandler, Toolkit, ToolkitError, UiBuilder,
    Widget, ACTIVATE_SIGNAL,
};

#[derive(Default)]
pub struct GtkToolkit {
    application: RefCell<Option<gtk4::Application>>,
}

impl GtkToolkit {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Toolkit for GtkToolkit {
    fn init(&self, args: &[String]) {
        if let Some(program_name) = args.first() {
            gtk4::glib::set_prgname(Some(program_name.as_str()));
            gtk4::glib::set_application_name(program_name);
        }
        if let Err(err) = gtk4::init() {
            tracing::error!(?err, "failed to initialize gtk");
        }
    }

    fn application_new(
        &self,
        id: &str,
        flags: ApplicationFlags,
    ) -> Result<Box<dyn Application>, ToolkitError> {
        if !gtk4::gio::Application::id_is_valid(id) {
            return Err(ToolkitError::InvalidApplicationId { id: id.to_string() });
        }

        let application = gtk4::Application::new(Some(id), gio_flags(flags));
        *self.application.borrow_mut() = Some(application.clone());
        Ok(Box::new(GtkApplication {
            application,
            handlers: RefCell::new(Vec::new()),
        }))
    }

    fn builder_new(&self) -> Box<dyn UiBuilder> {
        Box::new(GtkUiBuilder {
            builder: gtk4::Builder::new(),
            application: self.application.borrow().clone(),
        })
    }
}

fn gio_flags(flags: ApplicationFlags) -> gtk4::gio::ApplicationFlags {
    match flags {
        ApplicationFlags::None => gtk4::gio::ApplicationFlags::empty(),
        ApplicationFlags::NonUnique => gtk4::gio::ApplicationFlags::NON_UNIQUE,
    }
}

struct GtkApplication {
    application: gtk4::Application,
    handlers: RefCell<Vec<gtk4::glib::SignalHandlerId>>,
}

impl Application for GtkApplication {
    fn connect(&self, signal: &str, handler: SignalHandler) -> Result<SignalHandle, ToolkitError> {
        if signal != ACTIVATE_SIGNAL {
            return Err(ToolkitError::UnsupportedSignal {
                signal: signal.to_string(),
            });
        }

        let id = self.application.connect_activate(move |_| handler());
        let mut handlers = self.handlers.borrow_mut();
        handlers.push(id);
        Ok(SignalHandle(handlers.len() as u64))
    }

    fn run(&self, args: &[String]) -> i32 {
        i32::from(self.application.run_with_args(args))
    }
}

struct GtkUiBuilder {
    builder: gtk4::Builder,
    application: Option<gtk4::Application>,
}

impl UiBuilder for GtkUiBuilder {
    fn add_from_string(&self, definition: &str) -> Result<(), ToolkitError> {
        self.builder
            .add_from_string(definition)
            .map_err(|err| ToolkitError::UiDefinition {
                message: err.to_string(),
            })
    }

    fn object(&self, name: &str) -> Option<Box<dyn Widget>> {
        let window = self.builder.object::<gtk4::Window>(name)?;
        if let Some(application) = &self.application {
            window.set_application(Some(application));
        }
        Some(Box::new(GtkWidget { window }))
    }
}

struct GtkWidget {
    window: gtk4::Window,
}

impl Widget for GtkWidget {
    fn show(&self) {
        self.window.present();
    }
}
