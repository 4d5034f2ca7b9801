//! Heads-up display
//!
//! Burns the controller status into a grayscale frame and formats the same
//! information as a one-line status string for logs.
//!
//! ```text
//! ┌────────────────────────────────────────┐
//! │█████ mode band █████                   │  white = MONITOR, grey = EXPLORE
//! │██████████░░░░░░░  uncertainty bar      │  length ∝ smoothed score
//! │                                        │
//! ```

use image::{GrayImage, Luma};
use lumaguard_core::{Phase, TickReport};

/// Layout of the overlay, in pixels
#[derive(Debug, Clone, Copy)]
pub struct Hud {
    pub margin: u32,
    pub band_height: u32,
    pub bar_height: u32,
    /// Smoothed score above which the bar is drawn at full intensity
    pub alert_threshold: f32,
}

impl Default for Hud {
    fn default() -> Self {
        Self {
            margin: 4,
            band_height: 6,
            bar_height: 6,
            alert_threshold: 0.6,
        }
    }
}

impl Hud {
    /// Bar length for `uncertainty` on a frame `width` pixels wide
    pub fn bar_length(&self, width: u32, uncertainty: f32) -> u32 {
        let usable = width.saturating_sub(2 * self.margin);
        let u = if uncertainty.is_nan() { 1.0 } else { uncertainty.clamp(0.0, 1.0) };
        (u * usable as f32).round() as u32
    }

    /// Draw the overlay in place
    pub fn annotate(&self, image: &mut GrayImage, report: &TickReport) {
        let band = match report.state {
            Phase::Monitor => 255,
            Phase::Explore { .. } => 128,
        };
        let band_width = image.width().saturating_sub(2 * self.margin) / 3;
        fill(image, self.margin, self.margin, band_width, self.band_height, band);

        let bar_y = self.margin * 2 + self.band_height;
        let intensity = if report.smoothed_uncertainty > self.alert_threshold { 255 } else { 160 };
        let length = self.bar_length(image.width(), report.smoothed_uncertainty);
        fill(image, self.margin, bar_y, length, self.bar_height, intensity);
    }

    /// `MODE: EXPLORE | Uncertainty: 0.74 | level 3` style line
    pub fn status_line(report: &TickReport) -> String {
        let mut line = format!(
            "MODE: {} | Uncertainty: {:.2} | level {}",
            report.state.label(),
            report.smoothed_uncertainty,
            report.current_action_index
        );
        if let Phase::Explore { step } = report.state {
            line.push_str(&format!(" | probing {}", step));
        }
        if report.metrics.detected {
            line.push_str(&format!(" | marker {:.0} px²", report.metrics.target_area));
        }
        if report.settling {
            line.push_str(" | settling");
        }
        line
    }
}

/// Fill a rectangle, clipped to the image
fn fill(image: &mut GrayImage, x0: u32, y0: u32, w: u32, h: u32, value: u8) {
    let x1 = x0.saturating_add(w).min(image.width());
    let y1 = y0.saturating_add(h).min(image.height());
    for y in y0..y1 {
        for x in x0..x1 {
            image.put_pixel(x, y, Luma([value]));
        }
    }
}
