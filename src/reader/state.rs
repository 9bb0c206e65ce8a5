//! Reader lifecycle state machine.

/// Represents the lifecycle state of a [`StripingReader`](super::StripingReader).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReaderState {
    /// Source has not been opened yet.
    #[default]
    Unopened,
    /// Source is open and lines can be pulled.
    Open,
    /// Source has been released and cannot be reused.
    Closed,
}

impl ReaderState {
    /// Check if transition to target state is valid.
    ///
    /// Valid transitions:
    /// - Unopened -> Open
    /// - Open -> Closed
    pub fn can_transition_to(&self, target: ReaderState) -> bool {
        use ReaderState::*;
        matches!((*self, target), (Unopened, Open) | (Open, Closed))
    }

    /// Attempt to transition to a new state.
    ///
    /// Returns `Ok(())` if the transition is valid, or an error otherwise.
    pub fn transition_to(&mut self, target: ReaderState) -> crate::Result<()> {
        if self.can_transition_to(target) {
            *self = target;
            Ok(())
        } else {
            Err(crate::error::LinesweepError::InvalidStateTransition {
                from: *self,
                to: target,
            })
        }
    }

    /// Check if this is a terminal state (no further transitions possible).
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReaderState::Closed)
    }

    /// Check if lines can be read in this state.
    pub fn can_read(&self) -> bool {
        matches!(self, ReaderState::Open)
    }
}
