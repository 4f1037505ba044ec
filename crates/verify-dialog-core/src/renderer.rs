//! Turns signer verdicts and message bodies into surface content.

use crate::domain::{Banner, BannerCategory, ErrorOutcome, Inline, SignerVerdict, VerificationOutcome};
use crate::l10n::{LocalizedStrings, MessageKey};
use crate::ports::{PortError, RenderSurfacePort};

pub fn signer_banner(signer: &SignerVerdict, strings: &LocalizedStrings) -> Banner {
    let category = signer.category();
    let key_annotation = Inline::Text(format!(
        "({} {})",
        strings.get(MessageKey::DialogKeyidLabel),
        signer.display_key_id()
    ));
    let phrase = match category {
        BannerCategory::Success => MessageKey::VerifyResultSuccess,
        BannerCategory::Warning => MessageKey::VerifyResultWarning,
        BannerCategory::Danger => MessageKey::VerifyResultError,
    };

    let mut body = vec![Inline::Text(format!("{} ", strings.get(phrase)))];
    if let (Some(user_id), BannerCategory::Success | BannerCategory::Danger) =
        (signer.user_id(), category)
    {
        body.push(Inline::Strong(user_id.to_owned()));
        body.push(Inline::Text(" ".to_owned()));
    }
    body.push(key_annotation);

    Banner {
        category,
        header: String::new(),
        body,
        dismissible: true,
    }
}

pub fn error_banner(error: &ErrorOutcome, strings: &LocalizedStrings) -> Banner {
    Banner {
        category: BannerCategory::Danger,
        header: strings.get(MessageKey::AlertHeaderError).to_owned(),
        body: vec![Inline::Text(error.message.clone())],
        dismissible: false,
    }
}

/// Escapes markup and converts each `\n` into a single `<br>`.
pub fn body_html(message: &str) -> String {
    message
        .split('\n')
        .map(|line| html_escape::encode_text(line))
        .collect::<Vec<_>>()
        .join("<br>")
}

/// Appends one banner per signer in delivered order, then the message body.
pub fn render_outcome<S: RenderSurfacePort>(
    surface: &S,
    outcome: &VerificationOutcome,
    strings: &LocalizedStrings,
) -> Result<usize, PortError> {
    if !surface.is_ready() {
        return Err(PortError::NotReady("render_outcome"));
    }
    for signer in &outcome.signers {
        surface.append_banner(signer_banner(signer, strings))?;
    }
    surface.append_content(&body_html(&outcome.message))?;
    Ok(outcome.signers.len())
}
