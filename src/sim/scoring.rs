//! Combo scoring
//!
//! Popping the same color as the immediately previous pop earns 1.5x the
//! bubble's points. There is no streak counter: the third red in a row
//! scores the same as the second.

use super::color::BubbleColor;
use crate::consts::COMBO_MULTIPLIER;

/// Points awarded for one pop and whether the combo bonus applied
pub fn combo_points(base: u32, previous: Option<BubbleColor>, color: BubbleColor) -> (u32, bool) {
    if previous == Some(color) {
        let boosted = (base as f64 * COMBO_MULTIPLIER).round() as u32;
        (boosted, true)
    } else {
        (base, false)
    }
}
