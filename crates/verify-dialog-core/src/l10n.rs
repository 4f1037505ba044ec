use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ports::{LocalizationPort, PortError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKey {
    VerifyResultSuccess,
    VerifyResultWarning,
    VerifyResultError,
    AlertHeaderError,
    DialogKeyidLabel,
    VerifyResultTimeout,
    VerifyPopupTitle,
    FormCancel,
    FormCopy,
    AlertDismissTitle,
    VerifyPopupLoading,
}

impl MessageKey {
    pub const ALL: [MessageKey; 11] = [
        MessageKey::VerifyResultSuccess,
        MessageKey::VerifyResultWarning,
        MessageKey::VerifyResultError,
        MessageKey::AlertHeaderError,
        MessageKey::DialogKeyidLabel,
        MessageKey::VerifyResultTimeout,
        MessageKey::VerifyPopupTitle,
        MessageKey::FormCancel,
        MessageKey::FormCopy,
        MessageKey::AlertDismissTitle,
        MessageKey::VerifyPopupLoading,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MessageKey::VerifyResultSuccess => "verify_result_success",
            MessageKey::VerifyResultWarning => "verify_result_warning",
            MessageKey::VerifyResultError => "verify_result_error",
            MessageKey::AlertHeaderError => "alert_header_error",
            MessageKey::DialogKeyidLabel => "dialog_keyid_label",
            MessageKey::VerifyResultTimeout => "verify_result_timeout",
            MessageKey::VerifyPopupTitle => "verify_popup_title",
            MessageKey::FormCancel => "form_cancel",
            MessageKey::FormCopy => "form_copy",
            MessageKey::AlertDismissTitle => "alert_dismiss_title",
            MessageKey::VerifyPopupLoading => "verify_popup_loading",
        }
    }
}

/// Translations fetched once when the dialog opens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizedStrings {
    messages: HashMap<MessageKey, String>,
}

impl LocalizedStrings {
    pub fn new(messages: HashMap<MessageKey, String>) -> Self {
        Self { messages }
    }

    pub fn load<L: LocalizationPort>(port: &L) -> Result<Self, PortError> {
        port.get_messages(&MessageKey::ALL).map(Self::new)
    }

    /// Missing keys render as the key itself.
    pub fn get(&self, key: MessageKey) -> &str {
        self.messages
            .get(&key)
            .map(String::as_str)
            .unwrap_or_else(|| key.as_str())
    }
}
