//! Blocking error dialog

use anyhow::anyhow;
use eframe::egui;

/// A small window with a message and an OK button.
#[derive(Debug, Clone)]
pub struct ErrorDialog {
    title: String,
    message: String,
    button_label: String,
    inner_size: [f32; 2],
}

impl ErrorDialog {
    pub fn new(title: &str, message: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            button_label: "OK".to_string(),
            inner_size: [360.0, 140.0],
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Show the dialog and wait until it is dismissed.
    pub fn run(self) -> anyhow::Result<()> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(&self.title)
                .with_inner_size(self.inner_size)
                .with_resizable(false),
            ..Default::default()
        };
        let title = self.title.clone();
        eframe::run_native(&title, options, Box::new(|_cc| Ok(Box::new(self))))
            .map_err(|e| anyhow!("error dialog failed: {e}"))
    }
}

impl eframe::App for ErrorDialog {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("dialog_actions").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                if ui.button(&self.button_label).clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add(egui::Label::new(self.message.as_str()).wrap());
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialog_keeps_message() {
        let d = ErrorDialog::new("Error", "Could not load the image:\n/x.png");
        assert_eq!(d.title(), "Error");
        assert!(d.message().ends_with("/x.png"));
    }
}
