//! Specdrift - Scrolling microphone spectrogram
//!
//! Microphone audio is analyzed into frequency bins on a fixed cadence
//! and painted one column per tick into a ring-buffered canvas, producing
//! the scroll illusion without shifting pixel memory.

use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use clap::Parser;

use specdrift::audio::AudioSystem;
use specdrift::canvas::ScrollCanvas;
use specdrift::cli::Args;
use specdrift::params::AnalyzerConfig;
use specdrift::rendering::RenderSystem;

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Pipeline
    canvas: ScrollCanvas,
    audio: Option<AudioSystem>,

    // Configuration
    analyzer_config: AnalyzerConfig,

    // Tick counter; its value modulo the canvas width selects the column
    ticks: u64,
}

impl App {
    fn new(args: &Args) -> Result<Self, String> {
        let analyzer_config = args.analyzer_config();
        let display_config = args.display_config();

        let canvas = ScrollCanvas::new(&analyzer_config, &display_config)?;
        let band = canvas.band();
        println!(
            "Canvas: {}x{} (bins {}..={} @ {:.2}Hz spacing)",
            canvas.width(),
            canvas.height(),
            band.min_index,
            band.max_index,
            analyzer_config.bin_spacing_hz()
        );

        Ok(Self {
            window: None,
            render_system: None,
            canvas,
            audio: None,
            analyzer_config,
            ticks: 0,
        })
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &winit::event_loop::ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        // Create window at the exact canvas size; the surface is fixed and
        // never resized
        let window_attributes = Window::default_attributes()
            .with_title("Specdrift - Scrolling Spectrogram")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.canvas.width() as f64,
                self.canvas.height() as f64,
            ))
            .with_resizable(false);

        let window = Arc::new(event_loop.create_window(window_attributes).unwrap());

        // Initialize rendering system
        let render_system = pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            self.canvas.width() as u32,
            self.canvas.height() as u32,
        ))
        .unwrap();

        // Initialize audio capture and analysis
        let audio = AudioSystem::new(self.analyzer_config.clone()).unwrap();

        println!("\nSpecdrift is running!");
        println!("Press R to clear, ESC to quit\n");

        self.window = Some(window);
        self.render_system = Some(render_system);
        self.audio = Some(audio);
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::KeyR),
                        ..
                    },
                ..
            } => {
                // Restart: clear the canvas and rewind to column 0
                self.canvas.reset();
                self.ticks = 0;
                println!("Canvas cleared");
            }
            WindowEvent::RedrawRequested => {
                self.render_frame();
            }
            _ => {}
        }
    }
}

impl App {
    /// Drain pending magnitude frames into the canvas, then present
    fn render_frame(&mut self) {
        let Some(ref render_system) = self.render_system else {
            return;
        };
        let Some(ref audio) = self.audio else {
            return;
        };

        // One column per delivered frame; a failed tick skips that frame
        // only and later ticks stay valid
        while let Some(frame) = audio.try_next_frame() {
            if let Err(e) = self.canvas.render_tick(self.ticks, &frame) {
                eprintln!("Tick {} failed: {}", self.ticks, e);
            }
            self.ticks += 1;
        }

        // Single batched upload of the modified canvas
        render_system.update_canvas(bytemuck::cast_slice(self.canvas.pixels()));

        if let Err(e) = render_system.render() {
            eprintln!("Render error: {:?}", e);
        }
    }
}

fn main() {
    println!("Specdrift - Scrolling microphone spectrogram");

    let args = Args::parse();

    let mut app = match App::new(&args) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let event_loop = EventLoop::new().unwrap();
    let _ = event_loop.run_app(&mut app);
}
