//! Bubble colors, spawn weights and point values
//!
//! Colors are drawn with a cumulative-distribution walk over a fixed
//! enumeration order so that a given uniform draw always maps to the same
//! color.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Bubble color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BubbleColor {
    Red,
    Pink,
    Green,
    Blue,
    Black,
}

impl BubbleColor {
    /// Fixed enumeration order used by the weighted pick
    pub const ALL: [BubbleColor; 5] = [
        BubbleColor::Red,
        BubbleColor::Pink,
        BubbleColor::Green,
        BubbleColor::Blue,
        BubbleColor::Black,
    ];

    /// Points awarded for popping a bubble of this color
    pub fn points(&self) -> u32 {
        match self {
            BubbleColor::Red => 1,
            BubbleColor::Pink => 2,
            BubbleColor::Green => 5,
            BubbleColor::Blue => 8,
            BubbleColor::Black => 10,
        }
    }

    /// Default spawn weight
    pub fn weight(&self) -> f64 {
        match self {
            BubbleColor::Red => 0.4,
            BubbleColor::Pink => 0.3,
            BubbleColor::Green => 0.15,
            BubbleColor::Blue => 0.1,
            BubbleColor::Black => 0.05,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BubbleColor::Red => "red",
            BubbleColor::Pink => "pink",
            BubbleColor::Green => "green",
            BubbleColor::Blue => "blue",
            BubbleColor::Black => "black",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(BubbleColor::Red),
            "pink" => Some(BubbleColor::Pink),
            "green" => Some(BubbleColor::Green),
            "blue" => Some(BubbleColor::Blue),
            "black" => Some(BubbleColor::Black),
            _ => None,
        }
    }
}

/// Point value for a color given by name (0 for unknown names)
pub fn points_for_name(name: &str) -> u32 {
    BubbleColor::from_str(name).map(|c| c.points()).unwrap_or(0)
}

/// Weighted color selection
#[derive(Debug, Clone, PartialEq)]
pub struct ColorPicker {
    /// Weights in `BubbleColor::ALL` order
    weights: [f64; 5],
}

impl Default for ColorPicker {
    fn default() -> Self {
        Self {
            weights: BubbleColor::ALL.map(|c| c.weight()),
        }
    }
}

impl ColorPicker {
    /// Picker with custom weights (in `BubbleColor::ALL` order)
    ///
    /// Negative or non-finite weights are treated as zero.
    pub fn with_weights(weights: [f64; 5]) -> Self {
        Self {
            weights: weights.map(|w| if w.is_finite() && w > 0.0 { w } else { 0.0 }),
        }
    }

    pub fn weight(&self, color: BubbleColor) -> f64 {
        let index = BubbleColor::ALL
            .iter()
            .position(|c| *c == color)
            .unwrap_or(0);
        self.weights[index]
    }

    /// Draw a color from the weight table
    pub fn pick<R: Rng>(&self, rng: &mut R) -> BubbleColor {
        self.pick_with(rng.random::<f64>())
    }

    /// Map a uniform draw `u` in `[0, 1)` to a color
    ///
    /// The draw is scaled by the weight total, so weights need not sum to 1.
    /// Returns the first color whose cumulative weight reaches the scaled draw;
    /// falls back to the last color when every weight is zero.
    pub fn pick_with(&self, u: f64) -> BubbleColor {
        let total: f64 = self.weights.iter().sum();
        if total <= 0.0 {
            return BubbleColor::Black;
        }
        let u = u * total;
        let mut cumulative = 0.0;
        for (color, &weight) in BubbleColor::ALL.iter().zip(self.weights.iter()) {
            if weight <= 0.0 {
                continue;
            }
            cumulative += weight;
            if cumulative >= u {
                return *color;
            }
        }
        BubbleColor::Black
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_points_table() {
        assert_eq!(BubbleColor::Red.points(), 1);
        assert_eq!(BubbleColor::Pink.points(), 2);
        assert_eq!(BubbleColor::Green.points(), 5);
        assert_eq!(BubbleColor::Blue.points(), 8);
        assert_eq!(BubbleColor::Black.points(), 10);
        assert_eq!(points_for_name("Green"), 5);
        assert_eq!(points_for_name("purple"), 0);
    }

    #[test]
    fn test_pick_with_boundaries() {
        let picker = ColorPicker::default();
        assert_eq!(picker.pick_with(0.0), BubbleColor::Red);
        assert_eq!(picker.pick_with(0.4), BubbleColor::Red);
        assert_eq!(picker.pick_with(0.41), BubbleColor::Pink);
        assert_eq!(picker.pick_with(0.75), BubbleColor::Green);
        assert_eq!(picker.pick_with(0.9), BubbleColor::Blue);
        assert_eq!(picker.pick_with(0.96), BubbleColor::Black);
    }

    #[test]
    fn test_pick_scales_by_weight_total() {
        // Weights sum to 0.5: a draw of 0.9 lands at 0.45 of the table
        let picker = ColorPicker::with_weights([0.2, 0.2, 0.1, 0.0, 0.0]);
        assert_eq!(picker.pick_with(0.3), BubbleColor::Red);
        assert_eq!(picker.pick_with(0.6), BubbleColor::Pink);
        assert_eq!(picker.pick_with(0.9), BubbleColor::Green);

        // Weights sum to 2
        let picker = ColorPicker::with_weights([1.0, 1.0, 0.0, 0.0, 0.0]);
        assert_eq!(picker.pick_with(0.25), BubbleColor::Red);
        assert_eq!(picker.pick_with(0.75), BubbleColor::Pink);

        let empty = ColorPicker::with_weights([0.0; 5]);
        assert_eq!(empty.pick_with(0.0), BubbleColor::Black);
        assert_eq!(empty.pick_with(0.99), BubbleColor::Black);
    }

    #[test]
    fn test_weights_above_one_reach_every_color() {
        let picker = ColorPicker::with_weights([1.0, 1.0, 0.0, 0.0, 0.0]);
        let mut rng = Pcg32::seed_from_u64(11);
        let draws = 10_000;
        let pinks = (0..draws)
            .filter(|_| picker.pick(&mut rng) == BubbleColor::Pink)
            .count();
        let freq = pinks as f64 / draws as f64;
        assert!((freq - 0.5).abs() < 0.05, "pink frequency {}", freq);
    }

    #[test]
    fn test_zero_weight_color_never_picked() {
        let picker = ColorPicker::with_weights([0.0, 1.0, -3.0, f64::NAN, 0.0]);
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1_000 {
            assert_eq!(picker.pick(&mut rng), BubbleColor::Pink);
        }
    }

    #[test]
    fn test_color_distribution() {
        let picker = ColorPicker::default();
        let mut rng = Pcg32::seed_from_u64(2025);
        let draws = 10_000;
        let mut counts = [0u32; 5];
        for _ in 0..draws {
            let color = picker.pick(&mut rng);
            let i = BubbleColor::ALL.iter().position(|c| *c == color).unwrap();
            counts[i] += 1;
        }
        for (color, count) in BubbleColor::ALL.iter().zip(counts) {
            let freq = count as f64 / draws as f64;
            assert!(
                (freq - color.weight()).abs() < 0.05,
                "{} frequency {} too far from {}",
                color.as_str(),
                freq,
                color.weight()
            );
        }
    }
}
