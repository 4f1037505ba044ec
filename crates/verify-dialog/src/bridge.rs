//! Bridge between the egui shell and the dialog workspace crates.
//! This must remain the only shell-facing boundary for dialog operations.

use std::io;

use tokio::sync::mpsc::{error::TryRecvError, UnboundedReceiver};
use web_time::Instant;

use verify_dialog_adapters::{
    spawn_frame_reader, CatalogLocalizer, DialogConfig, FramedChannel, LaunchParams,
    SandboxSurface, StdioConnector, SurfaceSnapshot,
};
use verify_dialog_core::{
    DialogChrome, DialogError, DialogState, LocalizedStrings, MessageKey, RenderSurfacePort,
    VerifyDialog,
};

type ShellDialog = VerifyDialog<FramedChannel<io::Stdout>, SandboxSurface>;

pub struct DialogBridge {
    dialog: ShellDialog,
    surface: SandboxSurface,
    inbound: UnboundedReceiver<String>,
    inbound_open: bool,
    surface_flushed: bool,
    config: DialogConfig,
    opened_at: Instant,
}

impl DialogBridge {
    pub fn start(launch: LaunchParams, config: DialogConfig) -> eyre::Result<Self> {
        let catalog = match &config.locale_dir {
            Some(dir) => CatalogLocalizer::with_overrides(dir)?,
            None => CatalogLocalizer::embedded()?,
        };
        let strings = LocalizedStrings::load(&catalog)?;
        let surface = SandboxSurface::new();
        let dialog = VerifyDialog::open(
            launch.correlation_id,
            &StdioConnector,
            surface.clone(),
            strings,
        )?;

        let (tx, inbound) = tokio::sync::mpsc::unbounded_channel();
        spawn_frame_reader(io::stdin(), config.max_frame_bytes, tx)?;

        Ok(Self {
            dialog,
            surface,
            inbound,
            inbound_open: true,
            surface_flushed: false,
            config,
            opened_at: Instant::now(),
        })
    }

    pub fn text(&self, key: MessageKey) -> &str {
        self.dialog.strings().get(key)
    }

    pub fn chrome(&self) -> &DialogChrome {
        self.dialog.chrome()
    }

    pub fn snapshot(&self) -> Option<SurfaceSnapshot> {
        match self.surface.snapshot() {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::error!("surface unavailable: {e}");
                None
            }
        }
    }

    /// Starts populating the surface. Content waits for the ready signal.
    pub fn load_surface(&self) {
        if let Err(e) = self.surface.load(&self.config.stylesheets) {
            tracing::error!("surface failed to load: {e}");
        }
    }

    /// Drives the dialog for one frame: readiness, inbound messages, timeout.
    pub fn pump(&mut self) {
        if !self.surface_flushed && self.surface.is_ready() {
            self.surface_flushed = true;
            if let Err(e) = self.dialog.surface_ready() {
                tracing::error!("failed to render buffered outcome: {e}");
            }
        }

        while self.inbound_open {
            match self.inbound.try_recv() {
                Ok(frame) => {
                    if let Err(e) = self.dialog.handle_frame(&frame) {
                        tracing::error!("inbound frame rejected: {e}");
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::info!("inbound channel closed");
                    self.inbound_open = false;
                }
            }
        }

        if self.dialog.state() == DialogState::Loading
            && self.opened_at.elapsed() >= self.config.response_timeout()
        {
            self.dialog.response_timeout();
        }
    }

    pub fn copy(&mut self) -> Result<String, DialogError> {
        self.dialog.copy()
    }

    pub fn dismiss_banner(&mut self, index: usize) {
        if let Err(e) = self.dialog.dismiss_banner(index) {
            tracing::warn!("dismiss failed: {e}");
        }
    }

    pub fn cancel(&mut self) {
        self.dialog.cancel();
    }

    pub fn teardown(&mut self) {
        self.dialog.teardown();
    }
}
