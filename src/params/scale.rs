//! Scale functions for non-linear row placement.

use std::f32::consts::PI;

/// Monotonic curve applied symmetrically to bin indices and the canvas
/// height; the ratio of the two values determines vertical pixel position.
/// Values are used purely for relative comparison, never displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleFunction {
    /// f(x) = x
    #[default]
    Linear,

    /// f(x) = log2(x + 1)
    Logarithm,

    /// f(x) = atan(x/10000 - pi) + 0.1 * ln(x + 1) + 1.2629
    ///
    /// Compresses high indices and expands low ones; the constants anchor
    /// f(0) near zero and must stay exact for visual parity.
    Compressed,
}

impl ScaleFunction {
    /// Evaluate the curve at a non-negative index
    pub fn apply(self, x: f32) -> f32 {
        match self {
            ScaleFunction::Linear => x,
            ScaleFunction::Logarithm => (x + 1.0).log2(),
            ScaleFunction::Compressed => {
                (x / 10_000.0 - PI).atan() + 0.1 * (x + 1.0).ln() + 1.2629
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCALES: [ScaleFunction; 3] = [
        ScaleFunction::Linear,
        ScaleFunction::Logarithm,
        ScaleFunction::Compressed,
    ];

    #[test]
    fn test_scales_are_monotonic() {
        // Non-decreasing over the full bin range of a 1024-sample window
        for scale in SCALES {
            for x in 0..512 {
                assert!(
                    scale.apply((x + 1) as f32) >= scale.apply(x as f32),
                    "{:?} decreased at x={}",
                    scale,
                    x
                );
            }
        }
    }

    #[test]
    fn test_logarithm_anchor_points() {
        assert_eq!(ScaleFunction::Logarithm.apply(0.0), 0.0);
        assert_eq!(ScaleFunction::Logarithm.apply(1.0), 1.0);
        assert_eq!(ScaleFunction::Logarithm.apply(3.0), 2.0);
    }

    #[test]
    fn test_compressed_anchors_near_zero() {
        // atan(-pi) + 1.2629 cancels to roughly zero at the origin
        assert!(ScaleFunction::Compressed.apply(0.0).abs() < 1e-3);
    }
}
