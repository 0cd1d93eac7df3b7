use super::error::{StateError, StateResult};
use super::{event::StateTransition, LifecycleEvent, LifecycleState};

#[derive(Debug)]
pub struct StateMachine {
    state: LifecycleState,
    transition_history: Vec<StateTransition>,
}

impl StateMachine {
    pub fn new() -> Self {
        Self {
            state: LifecycleState::default(),
            transition_history: Vec::new(),
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn can_transition(&self, event: LifecycleEvent) -> bool {
        self.next_state(event).is_some()
    }

    pub fn next_state(&self, event: LifecycleEvent) -> Option<LifecycleState> {
        use LifecycleEvent::*;
        match (self.state, event) {
            (LifecycleState::Bootstrapped, ConnectActivate) => Some(LifecycleState::Connected),
            (LifecycleState::Connected, Run) => Some(LifecycleState::Running),
            (LifecycleState::Running, Exit) => Some(LifecycleState::Finished),
            _ => None,
        }
    }

    pub fn transition(&mut self, event: LifecycleEvent) -> StateResult<LifecycleState> {
        tracing::debug!(from = ?self.state, event = ?event, "request lifecycle transition");
        let next = self.next_state(event).ok_or_else(|| {
            let from = self.state;
            tracing::warn!(from = ?from, event = ?event, "invalid lifecycle transition requested");
            StateError::InvalidStateTransition { from, event }
        })?;

        let record = StateTransition::new(Some(self.state), event, next);
        self.state = next;
        self.transition_history.push(record);

        Ok(self.state)
    }

    pub fn history(&self) -> &[StateTransition] {
        &self.transition_history
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LifecycleState::{:?}", self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_transition_tracks_valid_and_invalid_events() {
        let mut machine = StateMachine::new();
        assert!(machine.can_transition(LifecycleEvent::ConnectActivate));
        assert!(!machine.can_transition(LifecycleEvent::Run));
        assert!(!machine.can_transition(LifecycleEvent::Exit));

        let _ = machine
            .transition(LifecycleEvent::ConnectActivate)
            .expect("bootstrapped -> connected should transition");

        assert!(machine.can_transition(LifecycleEvent::Run));
        assert!(!machine.can_transition(LifecycleEvent::ConnectActivate));
    }

    #[test]
    fn transition_records_history_with_ordered_entries() {
        let mut machine = StateMachine::new();
        for event in [
            LifecycleEvent::ConnectActivate,
            LifecycleEvent::Run,
            LifecycleEvent::Exit,
        ] {
            let _ = machine.transition(event).expect("lifecycle should advance");
        }

        assert_eq!(machine.state(), LifecycleState::Finished);
        assert_eq!(
            machine.history(),
            &[
                StateTransition::new(
                    Some(LifecycleState::Bootstrapped),
                    LifecycleEvent::ConnectActivate,
                    LifecycleState::Connected
                ),
                StateTransition::new(
                    Some(LifecycleState::Connected),
                    LifecycleEvent::Run,
                    LifecycleState::Running
                ),
                StateTransition::new(
                    Some(LifecycleState::Running),
                    LifecycleEvent::Exit,
                    LifecycleState::Finished
                ),
            ]
        );
        assert_eq!(machine.to_string(), "LifecycleState::Finished");
    }

    #[test]
    fn second_connect_is_rejected_without_mutating_history() {
        let mut machine = StateMachine::new();
        let _ = machine
            .transition(LifecycleEvent::ConnectActivate)
            .expect("first connect should work");

        let err = machine
            .transition(LifecycleEvent::ConnectActivate)
            .expect_err("connecting twice should fail");
        assert!(matches!(
            err,
            StateError::InvalidStateTransition {
                from: LifecycleState::Connected,
                event: LifecycleEvent::ConnectActivate
            }
        ));
        assert_eq!(machine.state(), LifecycleState::Connected);
        assert_eq!(machine.history().len(), 1);
    }
}
