//! Display surface configuration.

use super::ScaleFunction;

/// Scrolling canvas configuration
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    /// Canvas width in columns (one column per tick; the tick index wraps
    /// modulo this width)
    pub buffer_size: usize,

    /// Scale function distributing frequency bins across pixel rows
    pub scale: ScaleFunction,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            buffer_size: 1024,
            scale: ScaleFunction::Linear,
        }
    }
}
