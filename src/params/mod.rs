//! Parameter definitions with physical units and documented semantics.
//!
//! All magic numbers are extracted here with:
//! - Physical units (Hz, dBFS, pixels)
//! - Documented ranges and meanings
//! - Validation at construction time

mod analyzer;
mod display;
mod scale;

// Re-export all types
pub use analyzer::AnalyzerConfig;
pub use display::DisplayConfig;
pub use scale::ScaleFunction;
