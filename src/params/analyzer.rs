//! Audio analysis configuration.

/// Frequency analysis configuration with the displayed frequency window
/// and the decibel range mapped onto byte magnitudes
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Audio sample rate (Hz)
    pub sample_rate_hz: usize,

    /// Analysis window size (must be power of 2, bin count = window / 2)
    pub window_size: usize,

    /// Lowest frequency considered relevant for display (Hz)
    pub min_frequency_hz: f32,

    /// Highest frequency considered relevant for display (Hz)
    pub max_frequency_hz: f32,

    /// Input gain multiplier applied before analysis
    pub gain: f32,

    /// Exponential magnitude smoothing factor in [0, 1); 0 disables
    pub smoothing: f32,

    /// Decibel floor mapped to byte magnitude 0 (dBFS)
    pub min_decibels: f32,

    /// Decibel ceiling mapped to byte magnitude 255 (dBFS)
    pub max_decibels: f32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 44100,
            window_size: 1024,
            min_frequency_hz: 50.0,
            max_frequency_hz: 15000.0,
            gain: 10.0,
            smoothing: 0.0,
            min_decibels: -50.0,
            max_decibels: -20.0,
        }
    }
}

impl AnalyzerConfig {
    /// Frequency spacing between adjacent FFT bins (Hz)
    pub fn bin_spacing_hz(&self) -> f32 {
        self.sample_rate_hz as f32 / self.window_size as f32
    }

    /// Number of one-sided frequency bins per magnitude frame
    pub fn bin_count(&self) -> usize {
        self.window_size / 2
    }

    /// Highest representable frequency (Hz)
    pub fn nyquist_hz(&self) -> f32 {
        self.sample_rate_hz as f32 / 2.0
    }

    /// Validate configuration (window size must be power of 2, frequency
    /// window must be consistent, etc.)
    pub fn validate(&self) -> Result<(), String> {
        if !self.window_size.is_power_of_two() {
            return Err(format!(
                "Window size must be power of 2, got {}",
                self.window_size
            ));
        }
        if self.sample_rate_hz == 0 {
            return Err("Sample rate must be > 0".to_string());
        }
        if self.min_frequency_hz <= 0.0 {
            return Err(format!(
                "Minimum frequency must be > 0 Hz, got {}",
                self.min_frequency_hz
            ));
        }
        if self.min_frequency_hz >= self.max_frequency_hz {
            return Err(format!(
                "Frequency window is inverted: {} Hz >= {} Hz",
                self.min_frequency_hz, self.max_frequency_hz
            ));
        }
        if self.max_frequency_hz > self.nyquist_hz() {
            return Err(format!(
                "Maximum frequency {} Hz exceeds Nyquist {} Hz",
                self.max_frequency_hz,
                self.nyquist_hz()
            ));
        }
        if !(0.0..1.0).contains(&self.smoothing) {
            return Err(format!(
                "Smoothing factor must be in [0, 1), got {}",
                self.smoothing
            ));
        }
        if self.min_decibels >= self.max_decibels {
            return Err(format!(
                "Decibel window is inverted: {} dB >= {} dB",
                self.min_decibels, self.max_decibels
            ));
        }
        if !self.gain.is_finite() || self.gain <= 0.0 {
            return Err(format!("Gain must be a positive factor, got {}", self.gain));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AnalyzerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_bin_spacing() {
        let config = AnalyzerConfig::default();

        // At 44100 Hz sample rate and 1024-sample window:
        // Bin resolution = 44100 / 1024 ≈ 43.07 Hz per bin
        assert!((config.bin_spacing_hz() - 43.066).abs() < 0.01);
        assert_eq!(config.bin_count(), 512);
    }

    #[test]
    fn test_rejects_non_power_of_two_window() {
        let config = AnalyzerConfig {
            window_size: 1000,
            ..AnalyzerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_frequency_window() {
        let config = AnalyzerConfig {
            min_frequency_hz: 15000.0,
            max_frequency_hz: 50.0,
            ..AnalyzerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_frequency_above_nyquist() {
        let config = AnalyzerConfig {
            max_frequency_hz: 30000.0,
            ..AnalyzerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_out_of_range_smoothing() {
        let config = AnalyzerConfig {
            smoothing: 1.0,
            ..AnalyzerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
