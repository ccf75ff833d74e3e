//! Weight-loss estimate and its color scale.

use serde::Serialize;

/// Calories per gram of body weight used by the estimate.
pub const CALORIES_PER_GRAM: f64 = 7.7;

const LOSS_HUE: u16 = 120;
const GAIN_HUE: u16 = 0;
const MAX_SATURATION: i64 = 100;

/// Estimated grams lost (positive) or gained (negative).
///
/// `round((metabolism - total) / 7.7)`, rounding half away from zero.
pub fn weight_loss_grams(total: f64, metabolism: f64) -> i64 {
    ((metabolism - total) / CALORIES_PER_GRAM).round() as i64
}

/// HSL background for a loss estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LossColor {
    pub hue: u16,
    /// Percent, `0..=100`.
    pub saturation: u8,
    /// Percent.
    pub lightness: f64,
}

impl LossColor {
    /// Saturation grows with `|loss|` up to 100; losses and gains use different hues.
    pub fn for_loss(loss: i64) -> Self {
        let saturation = loss.saturating_abs().min(MAX_SATURATION) as u8;
        let quarter = f64::from(saturation) / 4.0;
        if loss >= 0 {
            Self {
                hue: LOSS_HUE,
                saturation,
                lightness: 98.0 - quarter,
            }
        } else {
            Self {
                hue: GAIN_HUE,
                saturation,
                lightness: 95.0 - quarter,
            }
        }
    }

    pub fn to_css(self) -> String {
        format!("hsl({}, {}%, {}%)", self.hue, self.saturation, self.lightness)
    }
}

/// A loss estimate together with its background color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LossBadge {
    pub grams: i64,
    pub color: LossColor,
}

impl LossBadge {
    pub fn new(grams: i64) -> Self {
        Self {
            grams,
            color: LossColor::for_loss(grams),
        }
    }

    pub fn from_totals(total: f64, metabolism: f64) -> Self {
        Self::new(weight_loss_grams(total, metabolism))
    }
}
