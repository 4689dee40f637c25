//! Microphone capture and FFT analysis system.
//!
//! A cpal input stream accumulates samples into a shared buffer; a
//! dedicated analyzer thread turns each full analysis window into one
//! byte-magnitude frame for the renderer.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, StreamConfig};
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::thread;

pub mod analyzer;

use crate::params::AnalyzerConfig;
use analyzer::spawn_analyzer_thread;

/// Audio system managing microphone capture and FFT analysis
pub struct AudioSystem {
    /// Ordered magnitude frames from the analyzer thread
    frames: Receiver<Vec<u8>>,

    /// Audio input stream (kept alive)
    _stream: cpal::Stream,

    /// Analyzer thread handle (optional, for cleanup)
    _analyzer_thread: Option<thread::JoinHandle<()>>,
}

impl AudioSystem {
    /// Create and start the capture + analysis pipeline with the specified
    /// configuration
    pub fn new(config: AnalyzerConfig) -> Result<Self, String> {
        // Validate analyzer configuration
        config
            .validate()
            .map_err(|e| format!("Invalid analyzer config: {}", e))?;

        // Setup audio input device
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or("No audio input device found")?;

        let supported = device
            .default_input_config()
            .map_err(|e| format!("Failed to get audio config: {}", e))?;
        let channels = supported.channels();

        let stream_config = StreamConfig {
            channels,
            sample_rate: cpal::SampleRate(config.sample_rate_hz as u32),
            buffer_size: cpal::BufferSize::Default,
        };

        println!(
            "Audio: {} @ {}Hz ({} ch)",
            device.name().unwrap_or_else(|_| "Unknown".to_string()),
            config.sample_rate_hz,
            channels
        );

        // Shared state between capture callback and analyzer thread
        let sample_buffer = Arc::new(Mutex::new(Vec::<f32>::new()));

        let stream = build_input_stream(
            &device,
            &stream_config,
            supported.sample_format(),
            channels as usize,
            Arc::clone(&sample_buffer),
        )?;

        stream
            .play()
            .map_err(|e| format!("Failed to start audio stream: {}", e))?;

        // Start analyzer thread
        let (sender, frames) = mpsc::channel();
        let analyzer_thread = spawn_analyzer_thread(config, sample_buffer, sender);

        Ok(Self {
            frames,
            _stream: stream,
            _analyzer_thread: Some(analyzer_thread),
        })
    }

    /// Next pending magnitude frame, if the analyzer has produced one
    pub fn try_next_frame(&self) -> Option<Vec<u8>> {
        self.frames.try_recv().ok()
    }
}

/// Build an input stream for the device's native sample format, converting
/// to f32 and downmixing interleaved channels to mono
fn build_input_stream(
    device: &cpal::Device,
    config: &StreamConfig,
    format: SampleFormat,
    channels: usize,
    sample_buffer: Arc<Mutex<Vec<f32>>>,
) -> Result<cpal::Stream, String> {
    let error_callback = |err| eprintln!("Audio stream error: {}", err);

    let stream = match format {
        SampleFormat::F32 => device.build_input_stream(
            config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                push_mono(&sample_buffer, data.iter().copied(), channels);
            },
            error_callback,
            None,
        ),
        SampleFormat::I16 => device.build_input_stream(
            config,
            move |data: &[i16], _: &cpal::InputCallbackInfo| {
                let samples = data.iter().map(|&s| s as f32 / i16::MAX as f32);
                push_mono(&sample_buffer, samples, channels);
            },
            error_callback,
            None,
        ),
        SampleFormat::U16 => device.build_input_stream(
            config,
            move |data: &[u16], _: &cpal::InputCallbackInfo| {
                let samples = data.iter().map(|&s| (s as f32 - 32768.0) / 32768.0);
                push_mono(&sample_buffer, samples, channels);
            },
            error_callback,
            None,
        ),
        other => return Err(format!("Unsupported sample format: {:?}", other)),
    };

    stream.map_err(|e| format!("Failed to build audio stream: {}", e))
}

/// Average interleaved frames down to a single channel and append them to
/// the shared sample buffer
fn push_mono(
    sample_buffer: &Arc<Mutex<Vec<f32>>>,
    samples: impl Iterator<Item = f32>,
    channels: usize,
) {
    let mut buffer = sample_buffer.lock().unwrap();
    let mut frame_sum = 0.0f32;
    let mut in_frame = 0;
    for sample in samples {
        frame_sum += sample;
        in_frame += 1;
        if in_frame == channels {
            buffer.push(frame_sum / channels as f32);
            frame_sum = 0.0;
            in_frame = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_mono_averages_stereo_frames() {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        push_mono(&buffer, [0.5, -0.5, 1.0, 0.0].into_iter(), 2);

        let buffer = buffer.lock().unwrap();
        assert_eq!(buffer.as_slice(), &[0.0, 0.5]);
    }

    #[test]
    fn test_push_mono_passes_single_channel_through() {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        push_mono(&buffer, [0.25, -0.75].into_iter(), 1);

        let buffer = buffer.lock().unwrap();
        assert_eq!(buffer.as_slice(), &[0.25, -0.75]);
    }
}
