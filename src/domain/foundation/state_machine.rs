//! Transition rules shared by the IESG draft states and the charter states.

use super::ValidationError;

/// A state enum with a fixed transition table.
///
/// Implementors list the successors of each state; the checks are derived
/// from that list.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// States reachable from `self` in one step.
    fn valid_transitions(&self) -> Vec<Self>;

    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Returns `target` if the table allows the move.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state",
                format!("no transition from {:?} to {:?}", self, target),
            ))
        }
    }

    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
