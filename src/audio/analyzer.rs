//! FFT analysis thread producing byte-magnitude frames.

use rustfft::{num_complex::Complex, FftPlanner};
use std::f32::consts::PI;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::params::AnalyzerConfig;

/// How often the analyzer polls the shared sample buffer
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Floor for the log conversion so silent bins stay finite
const MAGNITUDE_EPSILON: f32 = 1.0e-10;

/// Spawn the analysis thread.
///
/// Each full window of samples becomes one frame of `window_size / 2` byte
/// magnitudes, sent in order. Windows do not overlap, so one frame arrives
/// per `window_size` captured samples - the tick cadence of the renderer.
/// The thread exits once the receiving side of `frames` is dropped.
pub fn spawn_analyzer_thread(
    config: AnalyzerConfig,
    sample_buffer: Arc<Mutex<Vec<f32>>>,
    frames: Sender<Vec<u8>>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let window_size = config.window_size;
        let bins = config.bin_count();

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(window_size);
        let mut fft_input = vec![Complex::new(0.0, 0.0); window_size];
        let mut fft_output = vec![Complex::new(0.0, 0.0); window_size];
        let mut smoothed = vec![0.0f32; bins];

        loop {
            thread::sleep(POLL_INTERVAL);

            let mut samples = sample_buffer.lock().unwrap();

            while samples.len() >= window_size {
                // Apply gain and Hann window
                for i in 0..window_size {
                    let windowed = samples[i] * config.gain * hann_window(i, window_size);
                    fft_input[i] = Complex::new(windowed, 0.0);
                }
                // consume the window whole (non-overlapping blocks)
                samples.drain(0..window_size);

                // Perform FFT
                fft_output.copy_from_slice(&fft_input);
                fft.process(&mut fft_output);

                // One-sided magnitudes, smoothed per bin, rescaled into the
                // configured decibel window
                let norm = 1.0 / window_size as f32;
                let mut frame = Vec::with_capacity(bins);
                for (k, slot) in smoothed.iter_mut().enumerate() {
                    let magnitude = fft_output[k].norm() * norm;
                    *slot = config.smoothing * *slot + (1.0 - config.smoothing) * magnitude;
                    frame.push(magnitude_to_byte(
                        *slot,
                        config.min_decibels,
                        config.max_decibels,
                    ));
                }

                if frames.send(frame).is_err() {
                    return; // display side is gone
                }
            }
        }
    })
}

/// Hann window function for FFT analysis
pub fn hann_window(index: usize, size: usize) -> f32 {
    0.5 * (1.0 - ((2.0 * PI * index as f32) / (size as f32 - 1.0)).cos())
}

/// Rescale a linear magnitude into the configured decibel window:
/// at-or-below `min_db` maps to 0, at-or-above `max_db` maps to 255
pub fn magnitude_to_byte(magnitude: f32, min_db: f32, max_db: f32) -> u8 {
    let db = 20.0 * magnitude.max(MAGNITUDE_EPSILON).log10();
    let normalized = ((db - min_db) / (max_db - min_db)).clamp(0.0, 1.0);
    (normalized * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hann_window() {
        let size = 1024;

        // Hann window should be 0 at edges, 1 at center
        assert!((hann_window(0, size) - 0.0).abs() < 0.01);
        assert!((hann_window(size - 1, size) - 0.0).abs() < 0.01);
        assert!((hann_window(size / 2, size) - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_magnitude_to_byte_endpoints() {
        // silence clamps to the floor
        assert_eq!(magnitude_to_byte(0.0, -50.0, -20.0), 0);
        // -20 dB is exactly the ceiling
        assert_eq!(magnitude_to_byte(0.1, -50.0, -20.0), 255);
        // anything louder stays clamped
        assert_eq!(magnitude_to_byte(1.0, -50.0, -20.0), 255);
    }

    #[test]
    fn test_magnitude_to_byte_midrange() {
        // ≈ -35 dB sits halfway between -50 and -20
        let byte = magnitude_to_byte(0.0178, -50.0, -20.0);
        assert!((126..=130).contains(&byte), "got {}", byte);
    }
}
