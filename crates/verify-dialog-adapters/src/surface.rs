//! Isolated render surface for untrusted verification output.
//!
//! Content is kept in a private document model. Markup other than line
//! breaks is neutralized on entry, so nothing appended here can become
//! active content, and the exported document forbids scripts outright.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::watch;

use verify_dialog_core::{Banner, PortError, RenderSurfacePort};

const LINE_BREAK: &str = "<br>";
const CONTENT_SECURITY_POLICY: &str = "default-src 'none'; style-src 'self'; script-src 'none'";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerSlot {
    pub banner: Banner,
    pub dismissed: bool,
}

#[derive(Debug, Default)]
struct SurfaceDocument {
    loaded: bool,
    visible: bool,
    stylesheets: Vec<String>,
    header: Vec<BannerSlot>,
    content: Vec<String>,
    selection: Option<String>,
}

/// Read-only view handed to whatever draws the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceSnapshot {
    pub ready: bool,
    pub visible: bool,
    /// Live banners with their header index.
    pub banners: Vec<(usize, Banner)>,
    pub content_html: String,
    pub content_text: String,
}

#[derive(Debug, Clone)]
pub struct SandboxSurface {
    doc: Arc<Mutex<SurfaceDocument>>,
    ready_tx: Arc<watch::Sender<bool>>,
    ready_rx: watch::Receiver<bool>,
}

impl Default for SandboxSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl SandboxSurface {
    pub fn new() -> Self {
        let (ready_tx, ready_rx) = watch::channel(false);
        Self {
            doc: Arc::new(Mutex::new(SurfaceDocument {
                visible: true,
                ..SurfaceDocument::default()
            })),
            ready_tx: Arc::new(ready_tx),
            ready_rx,
        }
    }

    fn doc(&self) -> Result<MutexGuard<'_, SurfaceDocument>, PortError> {
        self.doc
            .lock()
            .map_err(|e| PortError::Transport(format!("surface lock poisoned: {e}")))
    }

    /// Installs style sheets and fires the one-time ready signal.
    pub fn load(&self, stylesheets: &[String]) -> Result<(), PortError> {
        {
            let mut doc = self.doc()?;
            if doc.loaded {
                tracing::debug!("surface already loaded");
                return Ok(());
            }
            doc.stylesheets = stylesheets.to_vec();
            doc.loaded = true;
        }
        self.ready_tx.send_replace(true);
        tracing::debug!(stylesheets = stylesheets.len(), "surface ready");
        Ok(())
    }

    /// Resolves once `load` has completed.
    pub async fn ready(&self) {
        let mut rx = self.ready_rx.clone();
        // Sender lives as long as any clone of the surface, including `self`.
        let _ = rx.wait_for(|ready| *ready).await;
    }

    pub fn stylesheets(&self) -> Result<Vec<String>, PortError> {
        Ok(self.doc()?.stylesheets.clone())
    }

    pub fn header(&self) -> Result<Vec<BannerSlot>, PortError> {
        Ok(self.doc()?.header.clone())
    }

    pub fn selection(&self) -> Result<Option<String>, PortError> {
        Ok(self.doc()?.selection.clone())
    }

    pub fn snapshot(&self) -> Result<SurfaceSnapshot, PortError> {
        let doc = self.doc()?;
        let content_html = doc.content.concat();
        Ok(SurfaceSnapshot {
            ready: doc.loaded,
            visible: doc.visible,
            banners: doc
                .header
                .iter()
                .enumerate()
                .filter(|(_, slot)| !slot.dismissed)
                .map(|(i, slot)| (i, slot.banner.clone()))
                .collect(),
            content_text: html_to_text(&content_html),
            content_html,
        })
    }

    /// Standalone document with a script-free content security policy.
    pub fn to_html_document(&self) -> Result<String, PortError> {
        let doc = self.doc()?;
        let mut html = String::from("<!DOCTYPE html><html><head><meta charset=\"UTF-8\">");
        html.push_str(&format!(
            "<meta http-equiv=\"Content-Security-Policy\" content=\"{CONTENT_SECURITY_POLICY}\">"
        ));
        for href in &doc.stylesheets {
            html.push_str(&format!(
                "<link rel=\"stylesheet\" href=\"{}\">",
                html_escape::encode_double_quoted_attribute(href)
            ));
        }
        html.push_str("</head><body><div id=\"content\"><header>");
        for slot in doc.header.iter().filter(|s| !s.dismissed) {
            html.push_str(&slot.banner.to_html());
        }
        html.push_str("</header>");
        html.push_str(&doc.content.concat());
        html.push_str("</div></body></html>");
        Ok(html)
    }
}

impl RenderSurfacePort for SandboxSurface {
    fn is_ready(&self) -> bool {
        *self.ready_rx.borrow()
    }

    fn append_banner(&self, banner: Banner) -> Result<usize, PortError> {
        let mut doc = self.doc()?;
        if !doc.loaded {
            return Err(PortError::NotReady("append_banner"));
        }
        doc.header.push(BannerSlot {
            banner,
            dismissed: false,
        });
        Ok(doc.header.len() - 1)
    }

    fn append_content(&self, html: &str) -> Result<(), PortError> {
        let mut doc = self.doc()?;
        if !doc.loaded {
            return Err(PortError::NotReady("append_content"));
        }
        doc.content.push(neutralize(html));
        Ok(())
    }

    fn dismiss_banner(&self, index: usize) -> Result<(), PortError> {
        let mut doc = self.doc()?;
        let slot = doc
            .header
            .get_mut(index)
            .ok_or_else(|| PortError::NotFound(format!("banner {index}")))?;
        slot.dismissed = true;
        Ok(())
    }

    fn select_all_content(&self) -> Result<String, PortError> {
        let mut doc = self.doc()?;
        let mut lines: Vec<String> = doc
            .header
            .iter()
            .filter(|s| !s.dismissed)
            .map(|s| s.banner.plain_text())
            .collect();
        let body = html_to_text(&doc.content.concat());
        if !body.is_empty() {
            lines.push(body);
        }
        let text = lines.join("\n");
        doc.selection = Some(text.clone());
        Ok(text)
    }

    fn clear_selection(&self) {
        match self.doc() {
            Ok(mut doc) => doc.selection = None,
            Err(e) => tracing::warn!("failed to clear selection: {e}"),
        }
    }

    fn set_visible(&self, visible: bool) {
        match self.doc() {
            Ok(mut doc) => doc.visible = visible,
            Err(e) => tracing::warn!("failed to toggle surface: {e}"),
        }
    }
}

/// Keeps `<br>` and re-escapes everything else. Idempotent on escaped text.
fn neutralize(html: &str) -> String {
    html.split(LINE_BREAK)
        .map(|segment| {
            let decoded = html_escape::decode_html_entities(segment);
            html_escape::encode_text(&decoded).into_owned()
        })
        .collect::<Vec<_>>()
        .join(LINE_BREAK)
}

fn html_to_text(html: &str) -> String {
    html.split(LINE_BREAK)
        .map(|segment| html_escape::decode_html_entities(segment).into_owned())
        .collect::<Vec<_>>()
        .join("\n")
}
