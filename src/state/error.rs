use super::event::LifecycleEvent;
use super::model::LifecycleState;
use thiserror::Error;

pub type StateResult<T> = std::result::Result<T, StateError>;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("invalid lifecycle transition: from {from:?} using event {event:?}")]
    InvalidStateTransition {
        from: LifecycleState,
        event: LifecycleEvent,
    },
}
