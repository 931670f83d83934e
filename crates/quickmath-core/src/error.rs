//! Session error types.
//!
//! None of these are fatal: each one describes a recoverable condition the
//! driver can react to (re-prompt, ignore the input, start a round first).

use thiserror::Error;

/// Errors returned by [`GameSession`](crate::session::GameSession) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No question amount was selected before starting a round.
    #[error("select a question amount before starting")]
    SelectionRequired,

    /// A guess or tick arrived while no round was in progress.
    #[error("no round in progress - call start() first")]
    NoActiveRound,

    /// Every equation in the round has already been answered.
    #[error("round is closed, all {0} equations were answered")]
    RoundClosed(u32),
}

impl SessionError {
    /// Returns `true` if the driver should ask the player for a tier again.
    pub fn needs_selection(&self) -> bool {
        matches!(self, SessionError::SelectionRequired)
    }
}
