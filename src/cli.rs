//! Command-line argument parsing.

use clap::Parser;

use crate::params::{AnalyzerConfig, DisplayConfig, ScaleFunction};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "Specdrift")]
#[command(about = "Scrolling microphone spectrogram", long_about = None)]
pub struct Args {
    /// Row scale: linear (default), log, compressed
    #[arg(long, value_name = "SCALE", default_value = "linear")]
    pub scale: String,

    /// Input gain multiplier applied before analysis
    #[arg(long, value_name = "FACTOR", default_value = "10")]
    pub gain: f32,

    /// Lowest displayed frequency (Hz)
    #[arg(long, value_name = "HZ", default_value = "50")]
    pub min_frequency: f32,

    /// Highest displayed frequency (Hz)
    #[arg(long, value_name = "HZ", default_value = "15000")]
    pub max_frequency: f32,

    /// Exponential magnitude smoothing factor in [0, 1)
    #[arg(long, value_name = "FACTOR", default_value = "0")]
    pub smoothing: f32,
}

impl Args {
    /// Parse the row scale from command-line arguments
    pub fn parse_scale(&self) -> ScaleFunction {
        match self.scale.to_lowercase().as_str() {
            "linear" => {
                println!("Scale: linear");
                ScaleFunction::Linear
            }
            "log" | "logarithm" => {
                println!("Scale: logarithmic");
                ScaleFunction::Logarithm
            }
            "compressed" => {
                println!("Scale: compressed");
                ScaleFunction::Compressed
            }
            other => {
                eprintln!("Warning: Unknown scale '{}', using linear", other);
                ScaleFunction::Linear
            }
        }
    }

    /// Analyzer configuration with CLI overrides applied
    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            min_frequency_hz: self.min_frequency,
            max_frequency_hz: self.max_frequency,
            gain: self.gain,
            smoothing: self.smoothing,
            ..AnalyzerConfig::default()
        }
    }

    /// Display configuration with CLI overrides applied
    pub fn display_config(&self) -> DisplayConfig {
        DisplayConfig {
            scale: self.parse_scale(),
            ..DisplayConfig::default()
        }
    }
}
