//! Boxplot chart raster
//!
//! Draws a [`BoxplotSummary`] into a 32 bpp [`Pix`] with the core raster
//! primitives. Text is not rasterised here; [`ChartLayout`] exposes the
//! value-to-row mapping so the window can place tick labels itself.

use pixstat_core::boxplot::DEFAULT_WHISKER_FACTOR;
use pixstat_core::{Box, BoxplotSummary, Color, Error, Pix, PixelDepth, Result};

/// Appearance and geometry of the boxplot chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Space left of the plot area, for tick labels
    pub margin_left: i32,
    pub margin_right: i32,
    pub margin_top: i32,
    pub margin_bottom: i32,
    /// Lowest and highest value on the y axis
    pub value_range: (u8, u8),
    /// Distance between y ticks, in intensity levels
    pub tick_step: u8,
    /// Tick mark length in pixels
    pub tick_length: i32,
    /// Box width as a fraction of the plot width
    pub box_width_fraction: f64,
    /// Whisker reach in multiples of the IQR
    pub whisker_factor: f64,
    /// Outlier marker radius
    pub outlier_radius: u32,
    pub background: Color,
    pub axis_color: Color,
    pub box_fill: Color,
    pub box_outline: Color,
    pub median_color: Color,
    pub whisker_color: Color,
    pub outlier_color: Color,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 550,
            height: 400,
            margin_left: 48,
            margin_right: 16,
            margin_top: 12,
            margin_bottom: 12,
            value_range: (0, 255),
            tick_step: 50,
            tick_length: 5,
            box_width_fraction: 0.3,
            whisker_factor: DEFAULT_WHISKER_FACTOR,
            outlier_radius: 3,
            background: Color::WHITE,
            axis_color: Color::BLACK,
            box_fill: Color::new(173, 216, 230),
            box_outline: Color::BLACK,
            median_color: Color::new(255, 127, 14),
            whisker_color: Color::BLACK,
            outlier_color: Color::BLACK,
        }
    }
}

/// Where things ended up in the rendered chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    /// Plot area inside the axis frame
    pub plot: Box,
    /// Lowest value on the y axis (bottom of the plot)
    pub value_min: f64,
    /// Highest value on the y axis (top of the plot)
    pub value_max: f64,
    tick_step: u8,
}

impl ChartLayout {
    fn new(style: &ChartStyle) -> Result<Self> {
        let (lo, hi) = style.value_range;
        if lo >= hi {
            return Err(Error::InvalidParameter(format!(
                "empty value range {lo}..{hi}"
            )));
        }
        if style.tick_step == 0 {
            return Err(Error::InvalidParameter("tick step must be >= 1".into()));
        }
        let plot = Box::new(
            style.margin_left,
            style.margin_top,
            style.width as i32 - style.margin_left - style.margin_right,
            style.height as i32 - style.margin_top - style.margin_bottom,
        )?;
        if plot.w < 3 || plot.h < 3 {
            return Err(Error::InvalidParameter(format!(
                "plot area too small: {}x{}",
                plot.w, plot.h
            )));
        }
        Ok(Self {
            plot,
            value_min: f64::from(lo),
            value_max: f64::from(hi),
            tick_step: style.tick_step,
        })
    }

    /// Image row of an intensity value; larger values are higher up.
    pub fn y_for_value(&self, value: f64) -> i32 {
        let v = value.clamp(self.value_min, self.value_max);
        let frac = (v - self.value_min) / (self.value_max - self.value_min);
        let bottom = f64::from(self.plot.bottom() - 1);
        (bottom - frac * f64::from(self.plot.h - 1)).round() as i32
    }

    /// Tick values and their rows, from the bottom of the axis up.
    pub fn ticks(&self) -> Vec<(u8, i32)> {
        (self.value_min as u8..=self.value_max as u8)
            .step_by(self.tick_step as usize)
            .map(|v| (v, self.y_for_value(f64::from(v))))
            .collect()
    }
}

/// Render a boxplot of `summary`.
///
/// Returns the chart image and the layout used to draw it.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if the style leaves no room for
/// the plot or has an empty value range.
pub fn render_boxplot(summary: &BoxplotSummary, style: &ChartStyle) -> Result<(Pix, ChartLayout)> {
    let layout = ChartLayout::new(style)?;
    let plot = layout.plot;

    let mut pm = Pix::new(style.width, style.height, PixelDepth::Bit32)?.to_mut();
    pm.set_all_arbitrary(style.background.to_pixel32());

    // Axis frame and y ticks
    pm.render_box_color(&plot, 1, style.axis_color)?;
    for (_, y) in layout.ticks() {
        pm.render_line_color(plot.x - style.tick_length, y, plot.x - 1, y, 1, style.axis_color)?;
    }

    let cx = plot.center_x();
    let half = ((f64::from(plot.w) * style.box_width_fraction) / 2.0).round().max(1.0) as i32;
    let y_q1 = layout.y_for_value(summary.q1);
    let y_q3 = layout.y_for_value(summary.q3);

    // Whiskers with caps
    let cap = (half / 2).max(1);
    for (edge, whisker) in [
        (y_q3, summary.whisker_high),
        (y_q1, summary.whisker_low),
    ] {
        let y_w = layout.y_for_value(f64::from(whisker));
        pm.render_line_color(cx, edge, cx, y_w, 1, style.whisker_color)?;
        pm.render_line_color(cx - cap, y_w, cx + cap, y_w, 1, style.whisker_color)?;
    }

    // Box from q1 to q3
    let quartile_box = Box::from_corners(cx - half, y_q3, cx + half, y_q1);
    pm.render_filled_box_color(&quartile_box, style.box_fill)?;
    pm.render_box_color(&quartile_box, 1, style.box_outline)?;

    let y_med = layout.y_for_value(summary.median);
    pm.render_line_color(cx - half, y_med, cx + half, y_med, 2, style.median_color)?;

    for &(value, _) in &summary.outliers {
        let y = layout.y_for_value(f64::from(value));
        pm.render_circle_color(cx, y, style.outlier_radius, 1, style.outlier_color)?;
    }

    log::debug!(
        "rendered {}x{} boxplot chart, {} outlier markers",
        style.width,
        style.height,
        summary.outliers.len()
    );
    Ok((pm.into(), layout))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(samples: &[u8]) -> BoxplotSummary {
        BoxplotSummary::from_samples(samples, DEFAULT_WHISKER_FACTOR).unwrap()
    }

    #[test]
    fn test_value_mapping_endpoints() {
        let layout = ChartLayout::new(&ChartStyle::default()).unwrap();
        let plot = layout.plot;
        assert_eq!(layout.y_for_value(255.0), plot.y);
        assert_eq!(layout.y_for_value(0.0), plot.bottom() - 1);
        assert!(layout.y_for_value(100.0) > layout.y_for_value(200.0));
        assert_eq!(layout.y_for_value(-5.0), layout.y_for_value(0.0));
    }

    #[test]
    fn test_ticks_every_fifty() {
        let layout = ChartLayout::new(&ChartStyle::default()).unwrap();
        let values: Vec<u8> = layout.ticks().iter().map(|&(v, _)| v).collect();
        assert_eq!(values, vec![0, 50, 100, 150, 200, 250]);
    }

    #[test]
    fn test_render_draws_median_and_box() {
        let style = ChartStyle::default();
        let s = summary(&[10, 20, 30, 40, 50, 60, 70, 80, 90]);
        let (pix, layout) = render_boxplot(&s, &style).unwrap();
        assert_eq!((pix.width(), pix.height()), (style.width, style.height));
        assert_eq!(pix.depth(), PixelDepth::Bit32);

        let cx = layout.plot.center_x() as u32;
        let y_med = layout.y_for_value(s.median) as u32;
        let m = style.median_color;
        assert_eq!(pix.get_rgb(cx, y_med), Some((m.r, m.g, m.b)));

        // Between q1 and median, inside the box
        let y_fill = layout.y_for_value((s.q1 + s.median) / 2.0) as u32;
        let f = style.box_fill;
        assert_eq!(pix.get_rgb(cx + 3, y_fill), Some((f.r, f.g, f.b)));

        // Far left of the plot stays background
        let x_bg = (layout.plot.x + 3) as u32;
        assert_eq!(pix.get_rgb(x_bg, y_fill), Some((255, 255, 255)));
    }

    #[test]
    fn test_outlier_marker() {
        let mut samples = vec![100u8; 20];
        samples.extend_from_slice(&[101, 99, 102, 98, 250]);
        let s = summary(&samples);
        assert_eq!(s.outliers.last().map(|o| o.0), Some(250));
        let style = ChartStyle::default();
        let (pix, layout) = render_boxplot(&s, &style).unwrap();
        let cx = layout.plot.center_x();
        let y = layout.y_for_value(250.0);
        let r = style.outlier_radius as i32;
        assert_eq!(pix.get_rgb((cx + r) as u32, y as u32), Some((0, 0, 0)));
        assert_eq!(pix.get_rgb(cx as u32, y as u32), Some((255, 255, 255)));
    }

    #[test]
    fn test_bad_style() {
        let s = summary(&[1, 2, 3]);
        let tiny = ChartStyle {
            width: 40,
            height: 20,
            ..ChartStyle::default()
        };
        assert!(render_boxplot(&s, &tiny).is_err());
        let flat = ChartStyle {
            value_range: (10, 10),
            ..ChartStyle::default()
        };
        assert!(render_boxplot(&s, &flat).is_err());
    }
}
