use thiserror::Error;

use crate::domain::DialogState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    ResultReceived,
    ErrorReceived,
    ResponseTimedOut,
    /// Host answered after the response timeout was already shown.
    LateResultReceived,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTransition {
    pub from: DialogState,
    pub to: DialogState,
    pub reason: &'static str,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("illegal dialog transition: {from:?} on {action:?}")]
pub struct TransitionError {
    pub from: DialogState,
    pub action: DialogAction,
}

/// `Loading` reaches either outcome. The only exit from an outcome state is a
/// real result replacing a synthetic timeout error.
pub fn dialog_transition(
    from: DialogState,
    action: DialogAction,
) -> Result<(DialogState, StateTransition), TransitionError> {
    let (to, reason) = match (from, action) {
        (DialogState::Loading, DialogAction::ResultReceived) => {
            (DialogState::ShowingResult, "verified-message")
        }
        (DialogState::Loading, DialogAction::ErrorReceived) => {
            (DialogState::ShowingError, "error-message")
        }
        (DialogState::Loading, DialogAction::ResponseTimedOut) => {
            (DialogState::ShowingError, "response-timeout")
        }
        (DialogState::ShowingError, DialogAction::LateResultReceived) => {
            (DialogState::ShowingResult, "verified-message after timeout")
        }
        _ => return Err(TransitionError { from, action }),
    };
    Ok((to, StateTransition { from, to, reason }))
}
