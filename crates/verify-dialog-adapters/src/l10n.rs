use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use verify_dialog_core::{LocalizationPort, MessageKey, PortError};

const EMBEDDED_EN: &str = include_str!("../locales/en/messages.json");

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    message: String,
}

/// Message catalog in the browser-extension `messages.json` layout.
#[derive(Debug, Clone, Default)]
pub struct CatalogLocalizer {
    messages: HashMap<String, String>,
}

impl CatalogLocalizer {
    pub fn embedded() -> Result<Self, PortError> {
        Self::from_json(EMBEDDED_EN)
    }

    pub fn from_json(raw: &str) -> Result<Self, PortError> {
        let entries: HashMap<String, CatalogEntry> = serde_json::from_str(raw)
            .map_err(|e| PortError::Validation(format!("invalid message catalog: {e}")))?;
        Ok(Self {
            messages: entries
                .into_iter()
                .map(|(key, entry)| (key, entry.message))
                .collect(),
        })
    }

    /// Loads `<dir>/messages.json` over the embedded English catalog.
    pub fn with_overrides(dir: &Path) -> Result<Self, PortError> {
        let path = dir.join("messages.json");
        let raw = std::fs::read_to_string(&path)
            .map_err(|e| PortError::NotFound(format!("{}: {e}", path.display())))?;
        let mut catalog = Self::embedded()?;
        catalog.messages.extend(Self::from_json(&raw)?.messages);
        Ok(catalog)
    }
}

impl LocalizationPort for CatalogLocalizer {
    fn get_messages(&self, keys: &[MessageKey]) -> Result<HashMap<MessageKey, String>, PortError> {
        let mut out = HashMap::with_capacity(keys.len());
        for key in keys {
            match self.messages.get(key.as_str()) {
                Some(message) => {
                    out.insert(*key, message.clone());
                }
                None => tracing::warn!(key = key.as_str(), "missing localized message"),
            }
        }
        Ok(out)
    }
}
