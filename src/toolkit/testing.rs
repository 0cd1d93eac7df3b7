use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{
    Application, ApplicationFlags, SignalHandle, SignalHandler, Toolkit, ToolkitError, UiBuilder,
    Widget,
};

#[derive(Default)]
pub(crate) struct FakeToolkit {
    pub(crate) init_args: RefCell<Option<Vec<String>>>,
    pub(crate) application_new_calls: RefCell<Vec<(String, ApplicationFlags)>>,
    pub(crate) application_new_error: Option<ToolkitError>,
    pub(crate) application: Rc<FakeApplication>,
    pub(crate) builder: Rc<FakeBuilder>,
    pub(crate) builders_created: Cell<usize>,
}

impl Toolkit for FakeToolkit {
    fn init(&self, args: &[String]) {
        *self.init_args.borrow_mut() = Some(args.to_vec());
    }

    fn application_new(
        &self,
        id: &str,
        flags: ApplicationFlags,
    ) -> Result<Box<dyn Application>, ToolkitError> {
        self.application_new_calls
            .borrow_mut()
            .push((id.to_string(), flags));
        if let Some(err) = &self.application_new_error {
            return Err(err.clone());
        }
        Ok(Box::new(self.application.clone()))
    }

    fn builder_new(&self) -> Box<dyn UiBuilder> {
        self.builders_created.set(self.builders_created.get() + 1);
        Box::new(self.builder.clone())
    }
}

#[derive(Default)]
pub(crate) struct FakeApplication {
    pub(crate) calls: RefCell<Vec<String>>,
    pub(crate) handlers: RefCell<Vec<SignalHandler>>,
    pub(crate) connect_error: Option<ToolkitError>,
    pub(crate) run_args: RefCell<Option<Vec<String>>>,
    pub(crate) run_status: i32,
    /// How many times `run` fires the connected handlers before returning.
    pub(crate) activations_during_run: usize,
}

impl FakeApplication {
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Application for Rc<FakeApplication> {
    fn connect(&self, signal: &str, handler: SignalHandler) -> Result<SignalHandle, ToolkitError> {
        self.calls.borrow_mut().push(format!("connect {signal}"));
        if let Some(err) = &self.connect_error {
            return Err(err.clone());
        }
        let mut handlers = self.handlers.borrow_mut();
        handlers.push(handler);
        Ok(SignalHandle(handlers.len() as u64))
    }

    fn run(&self, args: &[String]) -> i32 {
        self.calls.borrow_mut().push("run".to_string());
        *self.run_args.borrow_mut() = Some(args.to_vec());
        for _ in 0..self.activations_during_run {
            for handler in self.handlers.borrow().iter() {
                handler();
            }
        }
        self.run_status
    }
}

#[derive(Default)]
pub(crate) struct FakeBuilder {
    pub(crate) loaded_definitions: RefCell<Vec<String>>,
    pub(crate) requested_objects: RefCell<Vec<String>>,
    pub(crate) load_error: Option<ToolkitError>,
    pub(crate) window: Option<Rc<FakeWidget>>,
}

impl UiBuilder for Rc<FakeBuilder> {
    fn add_from_string(&self, definition: &str) -> Result<(), ToolkitError> {
        self.loaded_definitions
            .borrow_mut()
            .push(definition.to_string());
        match &self.load_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn object(&self, name: &str) -> Option<Box<dyn Widget>> {
        self.requested_objects.borrow_mut().push(name.to_string());
        self.window
            .clone()
            .map(|window| Box::new(window) as Box<dyn Widget>)
    }
}

#[derive(Default)]
pub(crate) struct FakeWidget {
    pub(crate) shown: Cell<usize>,
}

impl Widget for Rc<FakeWidget> {
    fn show(&self) {
        self.shown.set(self.shown.get() + 1);
    }
}
