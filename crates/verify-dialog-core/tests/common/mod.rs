#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use verify_dialog_core::{
    Banner, ChannelConnector, ChannelPort, CorrelationId, LocalizedStrings, MessageKey,
    OutboundMessage, PortError, RenderSurfacePort, VerifyDialog,
};

#[derive(Debug, Clone, Default)]
pub struct RecordingChannel {
    name: String,
    sent: Rc<RefCell<Vec<OutboundMessage>>>,
}

impl RecordingChannel {
    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.borrow().clone()
    }

    pub fn count(&self, event: &str) -> usize {
        self.sent.borrow().iter().filter(|m| m.event() == event).count()
    }
}

impl ChannelPort for RecordingChannel {
    fn name(&self) -> &str {
        &self.name
    }

    fn post(&self, message: &OutboundMessage) -> Result<(), PortError> {
        self.sent.borrow_mut().push(message.clone());
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RecordingConnector {
    pub fail: bool,
}

impl ChannelConnector for RecordingConnector {
    type Channel = RecordingChannel;

    fn connect(&self, name: &str) -> Result<RecordingChannel, PortError> {
        if self.fail {
            return Err(PortError::Transport("host unreachable".to_owned()));
        }
        Ok(RecordingChannel {
            name: name.to_owned(),
            sent: Rc::default(),
        })
    }
}

#[derive(Debug, Default)]
pub struct FakeSurfaceState {
    pub ready: bool,
    pub visible: bool,
    pub banners: Vec<(Banner, bool)>,
    pub content: Vec<String>,
    pub selected: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FakeSurface {
    pub state: Rc<RefCell<FakeSurfaceState>>,
}

impl FakeSurface {
    pub fn ready() -> Self {
        let surface = Self::default();
        surface.state.borrow_mut().ready = true;
        surface
    }

    pub fn finish_loading(&self) {
        self.state.borrow_mut().ready = true;
    }

    pub fn banners(&self) -> Vec<Banner> {
        self.state.borrow().banners.iter().map(|(b, _)| b.clone()).collect()
    }

    pub fn content(&self) -> String {
        self.state.borrow().content.concat()
    }
}

impl RenderSurfacePort for FakeSurface {
    fn is_ready(&self) -> bool {
        self.state.borrow().ready
    }

    fn append_banner(&self, banner: Banner) -> Result<usize, PortError> {
        let mut s = self.state.borrow_mut();
        if !s.ready {
            return Err(PortError::NotReady("append_banner"));
        }
        s.banners.push((banner, false));
        Ok(s.banners.len() - 1)
    }

    fn append_content(&self, html: &str) -> Result<(), PortError> {
        let mut s = self.state.borrow_mut();
        if !s.ready {
            return Err(PortError::NotReady("append_content"));
        }
        s.content.push(html.to_owned());
        Ok(())
    }

    fn dismiss_banner(&self, index: usize) -> Result<(), PortError> {
        let mut s = self.state.borrow_mut();
        let slot = s
            .banners
            .get_mut(index)
            .ok_or_else(|| PortError::NotFound(format!("banner {index}")))?;
        slot.1 = true;
        Ok(())
    }

    fn select_all_content(&self) -> Result<String, PortError> {
        let mut s = self.state.borrow_mut();
        let text = s.content.concat();
        s.selected = Some(text.clone());
        Ok(text)
    }

    fn clear_selection(&self) {
        self.state.borrow_mut().selected = None;
    }

    fn set_visible(&self, visible: bool) {
        self.state.borrow_mut().visible = visible;
    }
}

pub fn english() -> LocalizedStrings {
    let mut messages = HashMap::new();
    messages.insert(MessageKey::VerifyResultSuccess, "Verified signature of".to_owned());
    messages.insert(MessageKey::VerifyResultWarning, "Unknown signer".to_owned());
    messages.insert(MessageKey::VerifyResultError, "Invalid signature of".to_owned());
    messages.insert(MessageKey::AlertHeaderError, "Error!".to_owned());
    messages.insert(MessageKey::DialogKeyidLabel, "Key ID:".to_owned());
    messages.insert(MessageKey::VerifyResultTimeout, "No response from verification".to_owned());
    LocalizedStrings::new(messages)
}

pub type TestDialog = VerifyDialog<RecordingChannel, FakeSurface>;

pub fn open_dialog(surface: FakeSurface) -> TestDialog {
    VerifyDialog::open(
        CorrelationId::new("7f3a"),
        &RecordingConnector::default(),
        surface,
        english(),
    )
    .expect("open dialog")
}
