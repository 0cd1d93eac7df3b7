//! The slice of a GUI toolkit the bootstrap needs.
//!
//! [`gtk::GtkToolkit`] drives the real GTK runtime; tests substitute the
//! recording doubles from `testing` so bootstrap and activation run without
//! a display server.

use thiserror::Error;

mod gtk;
#[cfg(test)]
pub(crate) mod testing;

pub use self::gtk::GtkToolkit;

/// Name of the signal the toolkit emits once the application may present UI.
pub const ACTIVATE_SIGNAL: &str = "activate";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApplicationFlags {
    #[default]
    None,
    NonUnique,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalHandle(pub u64);

pub type SignalHandler = Box<dyn Fn() + 'static>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolkitError {
    #[error("invalid application id: {id}")]
    InvalidApplicationId { id: String },
    #[error("unsupported signal: {signal}")]
    UnsupportedSignal { signal: String },
    #[error("failed to load ui definition: {message}")]
    UiDefinition { message: String },
    #[error("{message}")]
    Backend { message: String },
}

pub trait Toolkit {
    /// Prepares the toolkit runtime. Must precede every other call.
    fn init(&self, args: &[String]);
    fn application_new(
        &self,
        id: &str,
        flags: ApplicationFlags,
    ) -> Result<Box<dyn Application>, ToolkitError>;
    fn builder_new(&self) -> Box<dyn UiBuilder>;
}

pub trait Application {
    fn connect(&self, signal: &str, handler: SignalHandler) -> Result<SignalHandle, ToolkitError>;
    /// Blocks until the toolkit main loop exits and returns its exit status.
    fn run(&self, args: &[String]) -> i32;
}

pub trait UiBuilder {
    fn add_from_string(&self, definition: &str) -> Result<(), ToolkitError>;
    /// Unknown names resolve to `None`; callers decide whether that matters.
    fn object(&self, name: &str) -> Option<Box<dyn Widget>>;
}

pub trait Widget {
    fn show(&self);
}
