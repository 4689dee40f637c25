//! Scrolling canvas compositing.
//!
//! Each tick paints one vertical column of the pixel buffer at the tick
//! index modulo the canvas width, so old columns are silently overwritten
//! once the ring wraps - the scroll illusion costs no pixel shifting.

use bytemuck::{Pod, Zeroable};

use crate::band::BandRange;
use crate::params::{AnalyzerConfig, DisplayConfig, ScaleFunction};

/// One RGBA canvas pixel
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Opaque red cursor marking "now", independent of magnitude
pub const MARKER: Pixel = Pixel {
    r: 255,
    g: 0,
    b: 0,
    a: 255,
};

/// Persistent pixel buffer holding the scrolled spectrogram.
///
/// Row 0 is the top of the canvas; low bins land near the bottom, high bins
/// near the top, with the spread between them governed by the scale
/// function's curvature.
pub struct ScrollCanvas {
    width: usize,
    height: usize,
    band: BandRange,
    scale: ScaleFunction,
    pixels: Vec<Pixel>,
}

impl ScrollCanvas {
    /// Create a canvas sized from the configured buffer width and the
    /// computed band range (height = band max index - band min index)
    pub fn new(analyzer: &AnalyzerConfig, display: &DisplayConfig) -> Result<Self, String> {
        analyzer
            .validate()
            .map_err(|e| format!("Invalid analyzer config: {}", e))?;

        if display.buffer_size == 0 {
            return Err("Canvas width must be > 0 columns".to_string());
        }

        let band = BandRange::compute(analyzer);
        let height = band.height();
        if height == 0 {
            return Err(format!(
                "Frequency window {}..{} Hz spans fewer than two bins",
                analyzer.min_frequency_hz, analyzer.max_frequency_hz
            ));
        }

        Ok(Self {
            width: display.buffer_size,
            height,
            band,
            scale: display.scale,
            pixels: vec![Pixel::default(); display.buffer_size * height],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn band(&self) -> BandRange {
        self.band
    }

    /// Full pixel buffer, row-major from the top-left corner
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Pixel {
        self.pixels[y * self.width + x]
    }

    /// Clear the canvas for restart; the next tick paints on black
    pub fn reset(&mut self) {
        self.pixels.fill(Pixel::default());
    }

    /// Paint one magnitude frame into the column at `tick_index` modulo the
    /// canvas width.
    ///
    /// For each relevant bin the row is `height - round(scale(bin) /
    /// scale(height) * height)`; bins colliding on a row resolve
    /// last-write-wins in ascending bin order. The data pixel carries the
    /// magnitude as grayscale (rescaled to 0..=100) with the raw magnitude
    /// as alpha, and the marker pixel lands one flat offset to its right -
    /// at the last column that offset wraps to column 0 of the row below.
    /// Writes whose flat offset falls outside the buffer are skipped.
    ///
    /// A frame shorter than the band requires fails the tick; the canvas is
    /// untouched and later ticks remain valid.
    pub fn render_tick(&mut self, tick_index: u64, frame: &[u8]) -> Result<(), String> {
        if frame.len() <= self.band.max_index {
            return Err(format!(
                "Magnitude frame has {} bins, band needs {}",
                frame.len(),
                self.band.max_index + 1
            ));
        }

        let width = self.width as i64;
        let pixel_count = self.pixels.len() as i64;
        let x = (tick_index % self.width as u64) as i64;
        let scale_span = self.scale.apply(self.height as f32);

        for i in self.band.min_index..=self.band.max_index {
            let ratio = self.scale.apply(i as f32) / scale_span;
            let y = self.height as i64 - (ratio * self.height as f32).round() as i64;

            let offset = y * width + x;
            if (0..pixel_count).contains(&offset) {
                let level = (frame[i] as f32 / 2.55).round() as u8;
                self.pixels[offset as usize] = Pixel {
                    r: level,
                    g: level,
                    b: level,
                    a: frame[i],
                };
            }

            let marker = offset + 1;
            if (0..pixel_count).contains(&marker) {
                self.pixels[marker as usize] = MARKER;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_canvas() -> ScrollCanvas {
        ScrollCanvas::new(&AnalyzerConfig::default(), &DisplayConfig::default()).unwrap()
    }

    fn narrow_canvas(buffer_size: usize) -> ScrollCanvas {
        let display = DisplayConfig {
            buffer_size,
            ..DisplayConfig::default()
        };
        ScrollCanvas::new(&AnalyzerConfig::default(), &display).unwrap()
    }

    #[test]
    fn test_canvas_dimensions_follow_band() {
        let canvas = default_canvas();
        assert_eq!(canvas.width(), 1024);
        assert_eq!(canvas.height(), 347); // bins 1..=348
    }

    #[test]
    fn test_peak_bin_paints_grayscale_with_raw_alpha() {
        let mut canvas = default_canvas();
        let mut frame = vec![0u8; 512];
        frame[1] = 255; // band minimum, identity scale -> row 346

        canvas.render_tick(0, &frame).unwrap();

        // 255 / 2.55 = 100 grayscale, raw magnitude as alpha
        let peak = canvas.pixel(0, 346);
        assert_eq!(
            peak,
            Pixel {
                r: 100,
                g: 100,
                b: 100,
                a: 255
            }
        );
        // marker sits immediately to the right
        assert_eq!(canvas.pixel(1, 346), MARKER);
    }

    #[test]
    fn test_silent_frame_still_paints_markers() {
        let mut canvas = default_canvas();
        canvas.render_tick(0, &vec![0u8; 512]).unwrap();

        // every mapped row: transparent black data pixel, opaque red marker
        for y in 0..canvas.height() {
            assert_eq!(canvas.pixel(0, y).a, 0);
            assert_eq!(canvas.pixel(0, y).r, 0);
            assert_eq!(canvas.pixel(1, y), MARKER);
        }
    }

    #[test]
    fn test_half_magnitude_rescaling() {
        let mut canvas = default_canvas();
        let mut frame = vec![0u8; 512];
        frame[1] = 128;

        canvas.render_tick(0, &frame).unwrap();

        // 128 / 2.55 rounds to 50
        let pixel = canvas.pixel(0, 346);
        assert_eq!(pixel.r, 50);
        assert_eq!(pixel.a, 128);
    }

    #[test]
    fn test_ring_wraparound_reuses_column_zero() {
        let mut canvas = narrow_canvas(8);
        let mut frame = vec![0u8; 512];
        frame[1] = 255;
        canvas.render_tick(0, &frame).unwrap();
        assert_eq!(canvas.pixel(0, 346).r, 100);

        // one full revolution later the same column is overwritten
        frame[1] = 128;
        canvas.render_tick(8, &frame).unwrap();
        assert_eq!(canvas.pixel(0, 346).r, 50);
        assert_eq!(canvas.pixel(0, 346).a, 128);
    }

    #[test]
    fn test_marker_wraps_at_right_edge() {
        let mut canvas = narrow_canvas(8);
        canvas.render_tick(7, &vec![0u8; 512]).unwrap();

        // the marker one flat offset past column 7 of row 345 lands on
        // column 0 of row 346
        assert_eq!(canvas.pixel(0, 346), MARKER);
        // bin 348 maps one row above the canvas; its data write is skipped
        // but its marker offset wraps forward onto the top-left pixel
        assert_eq!(canvas.pixel(0, 0), MARKER);
        // the bottom row's marker would fall past the buffer end and is
        // skipped, leaving the adjacent data pixel transparent
        assert_eq!(canvas.pixel(7, 346).a, 0);
    }

    #[test]
    fn test_short_frame_fails_tick() {
        let mut canvas = default_canvas();
        let err = canvas.render_tick(0, &vec![0u8; 100]).unwrap_err();
        assert!(err.contains("349"));

        // failed tick leaves the canvas untouched and later ticks run
        assert!(canvas.pixels().iter().all(|p| *p == Pixel::default()));
        canvas.render_tick(1, &vec![0u8; 512]).unwrap();
    }

    #[test]
    fn test_reset_clears_all_pixels() {
        let mut canvas = default_canvas();
        let mut frame = vec![0u8; 512];
        frame[1] = 255;
        canvas.render_tick(0, &frame).unwrap();

        canvas.reset();
        assert!(canvas.pixels().iter().all(|p| *p == Pixel::default()));
    }

    #[test]
    fn test_rejects_degenerate_frequency_window() {
        // both bounds inside one bin -> zero-height canvas
        let analyzer = AnalyzerConfig {
            min_frequency_hz: 1000.0,
            max_frequency_hz: 1001.0,
            ..AnalyzerConfig::default()
        };
        assert!(ScrollCanvas::new(&analyzer, &DisplayConfig::default()).is_err());
    }
}
