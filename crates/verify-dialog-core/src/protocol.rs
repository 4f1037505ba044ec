use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::domain::{ErrorOutcome, SignerVerdict, UserAction, VerificationOutcome};

pub const EVENT_VERIFIED_MESSAGE: &str = "verified-message";
pub const EVENT_ERROR_MESSAGE: &str = "error-message";
pub const USER_INPUT_SOURCE: &str = "security_log_verify_dialog";

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed frame: {0}")]
    Malformed(String),
    #[error("frame has no event tag")]
    MissingEvent,
    #[error("invalid payload for {event}: {reason}")]
    InvalidPayload { event: String, reason: String },
}

/// Host to dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundMessage {
    Verified(VerificationOutcome),
    Error(ErrorOutcome),
    Unknown { event: String },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "event")]
enum KnownInbound {
    #[serde(rename = "verified-message")]
    Verified {
        #[serde(default)]
        message: String,
        #[serde(default)]
        signers: Vec<SignerVerdict>,
    },
    #[serde(rename = "error-message")]
    Error { error: String },
}

impl InboundMessage {
    pub fn event(&self) -> &str {
        match self {
            InboundMessage::Verified(_) => EVENT_VERIFIED_MESSAGE,
            InboundMessage::Error(_) => EVENT_ERROR_MESSAGE,
            InboundMessage::Unknown { event } => event,
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, ProtocolError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| ProtocolError::Malformed(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, ProtocolError> {
        if !value.is_object() {
            return Err(ProtocolError::Malformed("frame is not an object".to_owned()));
        }
        let event = value
            .get("event")
            .and_then(Value::as_str)
            .ok_or(ProtocolError::MissingEvent)?
            .to_owned();
        if event != EVENT_VERIFIED_MESSAGE && event != EVENT_ERROR_MESSAGE {
            return Ok(InboundMessage::Unknown { event });
        }
        let known: KnownInbound =
            serde_json::from_value(value).map_err(|e| ProtocolError::InvalidPayload {
                event: event.clone(),
                reason: e.to_string(),
            })?;
        Ok(match known {
            KnownInbound::Verified { message, signers } => {
                InboundMessage::Verified(VerificationOutcome { message, signers })
            }
            KnownInbound::Error { error } => InboundMessage::Error(ErrorOutcome { message: error }),
        })
    }
}

/// Dialog to host. Every frame names its sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum OutboundMessage {
    #[serde(rename = "verify-popup-init")]
    PopupInit { sender: String },
    #[serde(rename = "verify-dialog-cancel")]
    DialogCancel { sender: String },
    #[serde(rename = "verify-user-input")]
    UserInput {
        sender: String,
        source: String,
        #[serde(rename = "type")]
        log_type: String,
    },
}

impl OutboundMessage {
    pub fn user_input(sender: &str, action: UserAction) -> Self {
        OutboundMessage::UserInput {
            sender: sender.to_owned(),
            source: USER_INPUT_SOURCE.to_owned(),
            log_type: action.log_type().to_owned(),
        }
    }

    pub fn event(&self) -> &'static str {
        match self {
            OutboundMessage::PopupInit { .. } => "verify-popup-init",
            OutboundMessage::DialogCancel { .. } => "verify-dialog-cancel",
            OutboundMessage::UserInput { .. } => "verify-user-input",
        }
    }

    pub fn to_json(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(|e| ProtocolError::Malformed(e.to_string()))
    }
}
