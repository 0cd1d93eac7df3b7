use super::model::LifecycleState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    ConnectActivate,
    Run,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTransition {
    pub from: Option<LifecycleState>,
    pub event: LifecycleEvent,
    pub to: LifecycleState,
}

impl StateTransition {
    pub fn new(from: Option<LifecycleState>, event: LifecycleEvent, to: LifecycleState) -> Self {
        Self { from, event, to }
    }
}
