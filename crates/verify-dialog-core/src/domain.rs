use serde::{Deserialize, Serialize};

/// Prefix shared with the host when naming a dialog's channel.
pub const CHANNEL_NAME_PREFIX: &str = "vDialog";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorrelationId(pub String);

impl CorrelationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn channel_name(&self) -> String {
        format!("{CHANNEL_NAME_PREFIX}-{}", self.0)
    }
}

impl std::fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerVerdict {
    pub keyid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub userid: Option<String>,
    #[serde(default)]
    pub valid: bool,
}

impl SignerVerdict {
    /// Empty user ids count as absent.
    pub fn user_id(&self) -> Option<&str> {
        self.userid.as_deref().filter(|u| !u.is_empty())
    }

    pub fn display_key_id(&self) -> String {
        self.keyid.to_uppercase()
    }

    pub fn category(&self) -> BannerCategory {
        match (self.user_id(), self.valid) {
            (Some(_), true) => BannerCategory::Success,
            (None, _) => BannerCategory::Warning,
            (Some(_), false) => BannerCategory::Danger,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerCategory {
    Success,
    Warning,
    Danger,
}

impl BannerCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            BannerCategory::Success => "success",
            BannerCategory::Warning => "warning",
            BannerCategory::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationOutcome {
    pub message: String,
    pub signers: Vec<SignerVerdict>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorOutcome {
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogState {
    Loading,
    ShowingResult,
    ShowingError,
}

impl DialogState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, DialogState::Loading)
    }
}

/// Discrete user actions forwarded to the host audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserAction {
    Cancel,
    Copy,
}

impl UserAction {
    pub fn log_type(self) -> &'static str {
        match self {
            UserAction::Cancel => "security_log_dialog_ok",
            UserAction::Copy => "security_log_content_copy",
        }
    }
}

/// Inline run inside a banner. Text is stored raw; escaping happens at serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Inline {
    Text(String),
    Strong(String),
}

impl Inline {
    pub fn text(&self) -> &str {
        match self {
            Inline::Text(t) | Inline::Strong(t) => t,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub category: BannerCategory,
    pub header: String,
    pub body: Vec<Inline>,
    pub dismissible: bool,
}

impl Banner {
    pub fn plain_text(&self) -> String {
        let body: String = self.body.iter().map(Inline::text).collect();
        if self.header.is_empty() {
            body
        } else {
            format!("{} {}", self.header, body)
        }
    }

    pub fn to_html(&self) -> String {
        let mut html = format!(
            "<div class=\"alert alert-{}{}\" role=\"alert\">",
            self.category.as_str(),
            if self.dismissible {
                " alert-dismissible"
            } else {
                ""
            }
        );
        if self.dismissible {
            html.push_str(
                "<button type=\"button\" class=\"close\" data-dismiss=\"alert\">&times;</button>",
            );
        }
        if !self.header.is_empty() {
            html.push_str("<strong>");
            html.push_str(&html_escape::encode_text(&self.header));
            html.push_str("</strong> ");
        }
        html.push_str("<span>");
        for run in &self.body {
            match run {
                Inline::Text(t) => html.push_str(&html_escape::encode_text(t)),
                Inline::Strong(t) => {
                    html.push_str("<strong>");
                    html.push_str(&html_escape::encode_text(t));
                    html.push_str("</strong>");
                }
            }
        }
        html.push_str("</span></div>");
        html
    }
}

/// Visibility of the page chrome around the render surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogChrome {
    pub spinner_visible: bool,
    pub surface_visible: bool,
    pub error_banner: Option<Banner>,
    pub copy_enabled: bool,
}

impl Default for DialogChrome {
    fn default() -> Self {
        Self {
            spinner_visible: true,
            surface_visible: true,
            error_banner: None,
            copy_enabled: true,
        }
    }
}
