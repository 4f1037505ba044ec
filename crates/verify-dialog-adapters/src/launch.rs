use url::Url;

use verify_dialog_core::CorrelationId;

use crate::config::ConfigError;

/// Base used to resolve relative launch urls such as `verify-popup.html?id=...`.
const LAUNCH_BASE: &str = "dialog://verify-popup/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchParams {
    pub correlation_id: CorrelationId,
}

impl LaunchParams {
    /// Accepts an absolute url, a relative page url, or a bare query string.
    pub fn parse(launch: &str) -> Result<Self, ConfigError> {
        let base = Url::parse(LAUNCH_BASE).map_err(|e| ConfigError::LaunchUrl(e.to_string()))?;
        let candidate = if launch.contains('?') || launch.contains("://") {
            launch.to_owned()
        } else {
            format!("?{}", launch.trim_start_matches('?'))
        };
        let url = base
            .join(&candidate)
            .map_err(|e| ConfigError::LaunchUrl(e.to_string()))?;
        let id = url
            .query_pairs()
            .find(|(k, _)| k == "id")
            .map(|(_, v)| v.into_owned())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingParameter("id"))?;
        Ok(Self {
            correlation_id: CorrelationId::new(id),
        })
    }
}
