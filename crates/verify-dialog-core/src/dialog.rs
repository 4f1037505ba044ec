use std::collections::VecDeque;

use thiserror::Error;

use crate::domain::{CorrelationId, DialogChrome, DialogState, ErrorOutcome, UserAction, VerificationOutcome};
use crate::l10n::{LocalizedStrings, MessageKey};
use crate::ports::{ChannelConnector, ChannelPort, PortError, RenderSurfacePort};
use crate::protocol::{InboundMessage, OutboundMessage, ProtocolError};
use crate::renderer::{error_banner, render_outcome};
use crate::state_machine::{dialog_transition, DialogAction, StateTransition};

#[derive(Debug, Error)]
pub enum DialogError {
    #[error("channel unavailable: {0}")]
    ChannelUnavailable(#[source] PortError),
    #[error(transparent)]
    Port(#[from] PortError),
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error("copy is disabled in the {0:?} state")]
    CopyDisabled(DialogState),
}

/// Identity of one dialog instance. Fixed for the dialog's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub correlation_id: CorrelationId,
    pub channel_name: String,
}

/// What happened to the dialog as a result of one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEffect {
    Transitioned(StateTransition),
    /// Result arrived before the surface finished loading.
    Deferred(StateTransition),
    /// Terminal state already reached; content re-rendered, chrome untouched.
    Rerendered,
    Ignored,
}

pub struct VerifyDialog<C, S>
where
    C: ChannelPort,
    S: RenderSurfacePort,
{
    session: Session,
    channel: C,
    surface: S,
    strings: LocalizedStrings,
    state: DialogState,
    chrome: DialogChrome,
    pending: VecDeque<VerificationOutcome>,
    teardown_armed: bool,
    timed_out: bool,
}

impl<C, S> VerifyDialog<C, S>
where
    C: ChannelPort,
    S: RenderSurfacePort,
{
    /// Connects to the host and announces the dialog with `verify-popup-init`.
    pub fn open<K>(
        correlation_id: CorrelationId,
        connector: &K,
        surface: S,
        strings: LocalizedStrings,
    ) -> Result<Self, DialogError>
    where
        K: ChannelConnector<Channel = C>,
    {
        let channel_name = correlation_id.channel_name();
        let channel = connector
            .connect(&channel_name)
            .map_err(DialogError::ChannelUnavailable)?;
        let dialog = Self {
            session: Session {
                correlation_id,
                channel_name,
            },
            channel,
            surface,
            strings,
            state: DialogState::Loading,
            chrome: DialogChrome::default(),
            pending: VecDeque::new(),
            teardown_armed: true,
            timed_out: false,
        };
        dialog.post(OutboundMessage::PopupInit {
            sender: dialog.session.channel_name.clone(),
        });
        tracing::debug!(channel = %dialog.session.channel_name, "verify dialog opened");
        Ok(dialog)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn chrome(&self) -> &DialogChrome {
        &self.chrome
    }

    pub fn strings(&self) -> &LocalizedStrings {
        &self.strings
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn pending_outcomes(&self) -> usize {
        self.pending.len()
    }

    /// Decodes a raw frame and dispatches it. Unknown events are logged and ignored.
    ///
    /// A known event with an unusable payload still clears the spinner and is
    /// shown through the error path.
    pub fn handle_frame(&mut self, raw: &str) -> Result<InboundEffect, DialogError> {
        match InboundMessage::from_json(raw) {
            Ok(message) => self.handle_inbound(message),
            Err(ProtocolError::InvalidPayload { event, reason }) => {
                tracing::warn!(%event, %reason, "invalid payload");
                self.chrome.spinner_visible = false;
                let error = ErrorOutcome {
                    message: format!("{event}: {reason}"),
                };
                Ok(self.on_error(error, DialogAction::ErrorReceived))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn handle_inbound(&mut self, message: InboundMessage) -> Result<InboundEffect, DialogError> {
        match message {
            InboundMessage::Verified(outcome) => {
                self.chrome.spinner_visible = false;
                self.on_verified(outcome)
            }
            InboundMessage::Error(error) => {
                self.chrome.spinner_visible = false;
                Ok(self.on_error(error, DialogAction::ErrorReceived))
            }
            InboundMessage::Unknown { event } => {
                tracing::warn!(%event, "unknown event");
                Ok(InboundEffect::Ignored)
            }
        }
    }

    fn on_verified(&mut self, outcome: VerificationOutcome) -> Result<InboundEffect, DialogError> {
        let action = if self.timed_out {
            DialogAction::LateResultReceived
        } else {
            DialogAction::ResultReceived
        };
        let transition = match dialog_transition(self.state, action) {
            Ok((to, transition)) => {
                self.state = to;
                self.timed_out = false;
                self.surface.set_visible(true);
                self.chrome.surface_visible = true;
                self.chrome.copy_enabled = true;
                self.chrome.error_banner = None;
                tracing::debug!(from = ?transition.from, to = ?transition.to, "dialog transition");
                Some(transition)
            }
            Err(e) => {
                tracing::debug!("{e}; re-rendering without chrome change");
                None
            }
        };

        if !self.surface.is_ready() {
            self.pending.push_back(outcome);
            return Ok(match transition {
                Some(t) => InboundEffect::Deferred(t),
                None => InboundEffect::Rerendered,
            });
        }

        render_outcome(&self.surface, &outcome, &self.strings)?;
        Ok(match transition {
            Some(t) => InboundEffect::Transitioned(t),
            None => InboundEffect::Rerendered,
        })
    }

    fn on_error(&mut self, error: ErrorOutcome, action: DialogAction) -> InboundEffect {
        match dialog_transition(self.state, action) {
            Ok((to, transition)) => {
                self.state = to;
                self.surface.set_visible(false);
                self.chrome.surface_visible = false;
                self.chrome.copy_enabled = false;
                self.chrome.error_banner = Some(error_banner(&error, &self.strings));
                tracing::debug!(from = ?transition.from, to = ?transition.to, "dialog transition");
                InboundEffect::Transitioned(transition)
            }
            Err(e) => {
                tracing::warn!(error = %error.message, "{e}; late error ignored");
                InboundEffect::Ignored
            }
        }
    }

    /// Called once the surface has loaded; renders every buffered outcome in arrival order.
    pub fn surface_ready(&mut self) -> Result<usize, DialogError> {
        if !self.surface.is_ready() {
            return Err(PortError::NotReady("surface_ready").into());
        }
        let mut rendered = 0;
        while let Some(outcome) = self.pending.pop_front() {
            render_outcome(&self.surface, &outcome, &self.strings)?;
            rendered += 1;
        }
        Ok(rendered)
    }

    /// Synthesizes an error outcome if the host never answered.
    pub fn response_timeout(&mut self) -> InboundEffect {
        if self.state.is_terminal() {
            return InboundEffect::Ignored;
        }
        tracing::warn!(channel = %self.session.channel_name, "no response from host");
        self.chrome.spinner_visible = false;
        let error = ErrorOutcome {
            message: self.strings.get(MessageKey::VerifyResultTimeout).to_owned(),
        };
        let effect = self.on_error(error, DialogAction::ResponseTimedOut);
        self.timed_out = matches!(effect, InboundEffect::Transitioned(_));
        effect
    }

    /// User dismissed the dialog. Disarms the teardown notification first;
    /// repeated calls send nothing.
    pub fn cancel(&mut self) {
        if !std::mem::replace(&mut self.teardown_armed, false) {
            return;
        }
        self.log_user_input(UserAction::Cancel);
        self.post(OutboundMessage::DialogCancel {
            sender: self.session.channel_name.clone(),
        });
    }

    /// Dialog is going away without an explicit cancel.
    pub fn teardown(&mut self) {
        if !std::mem::replace(&mut self.teardown_armed, false) {
            return;
        }
        self.post(OutboundMessage::DialogCancel {
            sender: self.session.channel_name.clone(),
        });
    }

    /// Returns the surface text to place on the clipboard.
    pub fn copy(&mut self) -> Result<String, DialogError> {
        if !self.chrome.copy_enabled {
            return Err(DialogError::CopyDisabled(self.state));
        }
        self.log_user_input(UserAction::Copy);
        let text = self.surface.select_all_content()?;
        self.surface.clear_selection();
        Ok(text)
    }

    pub fn dismiss_banner(&mut self, index: usize) -> Result<(), DialogError> {
        self.surface.dismiss_banner(index)?;
        Ok(())
    }

    pub fn log_user_input(&self, action: UserAction) {
        self.post(OutboundMessage::user_input(&self.session.channel_name, action));
    }

    fn post(&self, message: OutboundMessage) {
        if let Err(e) = self.channel.post(&message) {
            tracing::error!(event = message.event(), "failed to post to host: {e}");
        }
    }
}
