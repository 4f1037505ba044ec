use std::collections::HashMap;

use thiserror::Error;

use crate::domain::Banner;
use crate::l10n::MessageKey;
use crate::protocol::OutboundMessage;

#[derive(Debug, Error)]
pub enum PortError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("channel closed: {0}")]
    Closed(String),
    #[error("surface not ready: {0}")]
    NotReady(&'static str),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation error: {0}")]
    Validation(String),
}

/// Establishes named channels to the host process.
pub trait ChannelConnector {
    type Channel: ChannelPort;

    fn connect(&self, name: &str) -> Result<Self::Channel, PortError>;
}

/// Outbound half of an established channel. Delivery is fire-and-forget.
pub trait ChannelPort {
    fn name(&self) -> &str;
    fn post(&self, message: &OutboundMessage) -> Result<(), PortError>;
}

/// Capability-scoped rendering boundary for untrusted verification output.
///
/// Implementations must not execute anything found in appended markup and
/// must keep text selection local to the surface.
pub trait RenderSurfacePort {
    fn is_ready(&self) -> bool;
    fn append_banner(&self, banner: Banner) -> Result<usize, PortError>;
    fn append_content(&self, html: &str) -> Result<(), PortError>;
    fn dismiss_banner(&self, index: usize) -> Result<(), PortError>;
    /// Selects every rendered region and returns the selected text.
    fn select_all_content(&self) -> Result<String, PortError>;
    fn clear_selection(&self);
    fn set_visible(&self, visible: bool);
}

pub trait LocalizationPort {
    fn get_messages(&self, keys: &[MessageKey]) -> Result<HashMap<MessageKey, String>, PortError>;
}
