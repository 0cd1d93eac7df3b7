pub mod error;
pub mod event;
pub mod machine;
pub mod model;

pub use error::{StateError, StateResult};
pub use event::LifecycleEvent;
pub use machine::StateMachine;
pub use model::LifecycleState;
