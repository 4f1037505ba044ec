#![allow(dead_code)]

use verify_dialog_adapters::{CatalogLocalizer, MemoryChannel, MemoryConnector, SandboxSurface};
use verify_dialog_core::{CorrelationId, LocalizedStrings, VerifyDialog};

pub type SandboxDialog = VerifyDialog<MemoryChannel, SandboxSurface>;

pub fn strings() -> LocalizedStrings {
    let catalog = CatalogLocalizer::embedded().expect("embedded catalog");
    LocalizedStrings::load(&catalog).expect("load strings")
}

pub fn open_sandbox_dialog(id: &str) -> (SandboxDialog, MemoryConnector, SandboxSurface) {
    let connector = MemoryConnector::default();
    let surface = SandboxSurface::new();
    let dialog = VerifyDialog::open(CorrelationId::new(id), &connector, surface.clone(), strings())
        .expect("open dialog");
    (dialog, connector, surface)
}

pub fn default_stylesheets() -> Vec<String> {
    verify_dialog_adapters::DialogConfig::default().stylesheets
}
