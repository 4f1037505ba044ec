//! Dialog window state and update loop

use std::time::Duration;

use eframe::egui;

use verify_dialog_core::MessageKey;

use crate::bridge::DialogBridge;
use crate::ui;

pub struct App {
    bridge: DialogBridge,
}

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, bridge: DialogBridge) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());
        bridge.load_surface();
        Self { bridge }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.bridge.pump();
        // Inbound frames arrive on a reader thread that cannot wake the UI.
        ctx.request_repaint_after(Duration::from_millis(200));

        let chrome = self.bridge.chrome().clone();
        let snapshot = self.bridge.snapshot();
        let title = self.bridge.text(MessageKey::VerifyPopupTitle).to_owned();
        let close_label = self.bridge.text(MessageKey::FormCancel).to_owned();
        let copy_label = self.bridge.text(MessageKey::FormCopy).to_owned();
        let dismiss_label = self.bridge.text(MessageKey::AlertDismissTitle).to_owned();
        let loading_label = self.bridge.text(MessageKey::VerifyPopupLoading).to_owned();

        let mut close_clicked = false;
        let mut copy_clicked = false;
        let mut dismissed: Option<usize> = None;

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.heading(egui::RichText::new(title.as_str()).strong());
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("actions").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button(close_label.as_str()).clicked() {
                    close_clicked = true;
                }
                if ui
                    .add_enabled(chrome.copy_enabled, egui::Button::new(copy_label.as_str()))
                    .clicked()
                {
                    copy_clicked = true;
                }
            });
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if chrome.spinner_visible {
                ui::loading_spinner(ui, &loading_label);
            }

            if let Some(banner) = &chrome.error_banner {
                ui::alert_banner(ui, banner, &dismiss_label);
            }

            let Some(snapshot) = snapshot.filter(|s| chrome.surface_visible && s.visible) else {
                return;
            };
            egui::ScrollArea::vertical().show(ui, |ui| {
                for (index, banner) in &snapshot.banners {
                    if ui::alert_banner(ui, banner, &dismiss_label) {
                        dismissed = Some(*index);
                    }
                }
                if !snapshot.content_text.is_empty() {
                    ui.add_space(4.0);
                    ui.label(egui::RichText::new(&snapshot.content_text).monospace());
                }
            });
        });

        if let Some(index) = dismissed {
            self.bridge.dismiss_banner(index);
        }

        if copy_clicked {
            match self.bridge.copy() {
                Ok(text) => ui::copy_to_clipboard(&text),
                Err(e) => tracing::warn!("copy failed: {e}"),
            }
        }

        if close_clicked {
            self.bridge.cancel();
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.bridge.teardown();
    }
}
