//! UI helper components

use eframe::egui;

use verify_dialog_core::{Banner, BannerCategory, Inline};

/// Foreground, background and border colours for an alert category
fn alert_colors(category: BannerCategory) -> (egui::Color32, egui::Color32, egui::Color32) {
    match category {
        BannerCategory::Success => (
            egui::Color32::from_rgb(60, 118, 61),
            egui::Color32::from_rgb(223, 240, 216),
            egui::Color32::from_rgb(214, 233, 198),
        ),
        BannerCategory::Warning => (
            egui::Color32::from_rgb(138, 109, 59),
            egui::Color32::from_rgb(252, 248, 227),
            egui::Color32::from_rgb(250, 235, 204),
        ),
        BannerCategory::Danger => (
            egui::Color32::from_rgb(169, 68, 66),
            egui::Color32::from_rgb(242, 222, 222),
            egui::Color32::from_rgb(235, 204, 209),
        ),
    }
}

/// Render an alert banner. Returns true when its dismiss button was clicked.
pub fn alert_banner(ui: &mut egui::Ui, banner: &Banner, dismiss_label: &str) -> bool {
    let (fg, bg, border) = alert_colors(banner.category);
    let mut dismissed = false;

    egui::Frame::none()
        .fill(bg)
        .stroke(egui::Stroke::new(1.0, border))
        .rounding(4.0)
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing.x = 0.0;
                if !banner.header.is_empty() {
                    ui.label(egui::RichText::new(format!("{} ", banner.header)).strong().color(fg));
                }
                for run in &banner.body {
                    match run {
                        Inline::Text(t) => ui.label(egui::RichText::new(t).color(fg)),
                        Inline::Strong(t) => ui.label(egui::RichText::new(t).strong().color(fg)),
                    };
                }
                if banner.dismissible {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .small_button(egui::RichText::new("×").color(fg))
                            .on_hover_text(dismiss_label)
                            .clicked()
                        {
                            dismissed = true;
                        }
                    });
                }
            });
        });
    ui.add_space(6.0);
    dismissed
}

/// Loading spinner with label
pub fn loading_spinner(ui: &mut egui::Ui, label: &str) {
    ui.horizontal(|ui| {
        ui.spinner();
        ui.label(label);
    });
}

/// Copy to clipboard
pub fn copy_to_clipboard(text: &str) {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => {
            if let Err(e) = clipboard.set_text(text) {
                tracing::warn!("clipboard write failed: {e}");
            }
        }
        Err(e) => tracing::warn!("clipboard unavailable: {e}"),
    }
}
