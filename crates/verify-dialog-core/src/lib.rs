pub mod dialog;
pub mod domain;
pub mod l10n;
pub mod ports;
pub mod protocol;
pub mod renderer;
pub mod state_machine;

pub use dialog::{DialogError, InboundEffect, Session, VerifyDialog};
pub use domain::{
    Banner, BannerCategory, CorrelationId, DialogChrome, DialogState, ErrorOutcome, Inline,
    SignerVerdict, UserAction, VerificationOutcome,
};
pub use l10n::{LocalizedStrings, MessageKey};
pub use ports::{ChannelConnector, ChannelPort, LocalizationPort, PortError, RenderSurfacePort};
pub use protocol::{InboundMessage, OutboundMessage, ProtocolError};
pub use renderer::{body_html, error_banner, render_outcome, signer_banner};
pub use state_machine::{dialog_transition, DialogAction, StateTransition, TransitionError};
