//! eframe statistics window

use super::{DisplaySurface, ErrorDialog, PopupConfig, StatsReport};
use crate::chart::{ChartLayout, ChartStyle, render_boxplot};
use anyhow::anyhow;
use eframe::egui;
use pixstat_core::{Pix, PixelDepth, color};

/// Shows statistics in a native window and errors in a native dialog.
///
/// Each call runs its own event loop and returns once the window closes.
#[derive(Debug, Clone, Default)]
pub struct PopupSurface {
    pub config: PopupConfig,
    pub style: ChartStyle,
}

impl PopupSurface {
    pub fn new(config: PopupConfig, style: ChartStyle) -> Self {
        Self { config, style }
    }
}

impl DisplaySurface for PopupSurface {
    fn show_statistics(&mut self, report: &StatsReport) -> anyhow::Result<()> {
        let (chart, layout) = render_boxplot(&report.boxplot, &self.style)?;
        let window = StatsWindow {
            lines: report.format_lines(self.config.decimals),
            config: self.config.clone(),
            chart: pix_to_color_image(&chart)?,
            layout,
            tick_length: self.style.tick_length,
            texture: None,
        };

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(&self.config.title)
                .with_inner_size(self.config.inner_size),
            ..Default::default()
        };
        log::debug!("opening statistics window for {}", report.path.display());
        eframe::run_native(
            &self.config.title,
            options,
            Box::new(|_cc| Ok(Box::new(window))),
        )
        .map_err(|e| anyhow!("statistics window failed: {e}"))
    }

    fn show_error(&mut self, title: &str, message: &str) -> anyhow::Result<()> {
        ErrorDialog::new(title, message).run()
    }
}

/// Convert a 32 bpp chart into an egui image.
pub fn pix_to_color_image(pix: &Pix) -> anyhow::Result<egui::ColorImage> {
    if pix.depth() != PixelDepth::Bit32 {
        return Err(anyhow!(
            "expected a 32 bpp chart, got {} bpp",
            pix.depth().bits()
        ));
    }
    let (w, h) = (pix.width() as usize, pix.height() as usize);
    let mut rgb = Vec::with_capacity(w * h * 3);
    for y in 0..pix.height() {
        for &word in &pix.row_data(y)[..w] {
            let (r, g, b) = color::extract_rgb(word);
            rgb.extend_from_slice(&[r, g, b]);
        }
    }
    Ok(egui::ColorImage::from_rgb([w, h], &rgb))
}

struct StatsWindow {
    lines: Vec<String>,
    config: PopupConfig,
    chart: egui::ColorImage,
    layout: ChartLayout,
    tick_length: i32,
    texture: Option<egui::TextureHandle>,
}

impl StatsWindow {
    fn chart_texture(&mut self, ctx: &egui::Context) -> egui::TextureHandle {
        self.texture
            .get_or_insert_with(|| {
                ctx.load_texture("boxplot", self.chart.clone(), egui::TextureOptions::LINEAR)
            })
            .clone()
    }

    fn draw_tick_labels(&self, ui: &egui::Ui, rect: egui::Rect, scale: f32) {
        let painter = ui.painter();
        let x = rect.left() + (self.layout.plot.x - self.tick_length - 2) as f32 * scale;
        for (value, y) in self.layout.ticks() {
            painter.text(
                egui::pos2(x, rect.top() + y as f32 * scale),
                egui::Align2::RIGHT_CENTER,
                value.to_string(),
                egui::FontId::proportional(11.0),
                egui::Color32::BLACK,
            );
        }
    }
}

impl eframe::App for StatsWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("actions").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                if ui.button(&self.config.close_label).clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });
        });

        let texture = self.chart_texture(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some((path, values)) = self.lines.split_first() {
                ui.add(egui::Label::new(path.as_str()).wrap());
                ui.add_space(6.0);
                for line in values {
                    ui.label(line.as_str());
                }
            }
            ui.separator();

            ui.vertical_centered(|ui| ui.heading(&self.config.figure_title));
            ui.label(egui::RichText::new(&self.config.y_label).small());

            let [w, h] = self.chart.size;
            let scale = (ui.available_width() / w as f32).min(1.0);
            let size = egui::vec2(w as f32 * scale, h as f32 * scale);
            let response = ui.add(egui::Image::from_texture(
                egui::load::SizedTexture::new(texture.id(), size),
            ));
            self.draw_tick_labels(ui, response.rect, scale);
        });
    }
}
