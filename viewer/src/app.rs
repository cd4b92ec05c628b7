//! winit application driving the framebuffer

use std::time::Instant;

use cpf::{Dimensions, FrameStats, Framebuffer, FramebufferOptions, Painter, Rgba8};
use cpf_common::{ViewerError, ViewerResult};
use tracing::{debug, error, info};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use crate::{config::ViewerConfig, painters::build_painter};

struct Surface {
    framebuffer: Framebuffer<Rgba8>,
    window: Window,
}

/// Application state. Only RGBA8 pixels are presented by the viewer.
pub struct App<P: Painter<Pixel = Rgba8>> {
    // application logic
    dimensions: Dimensions,
    options: FramebufferOptions,
    painter: P,
    stats: FrameStats,

    // window drawing
    surface: Option<Surface>,
    failure: Option<ViewerError>,
}

impl<P: Painter<Pixel = Rgba8>> App<P> {
    /// Create the application; the window opens on the first `resumed`.
    pub fn new(dimensions: Dimensions, options: FramebufferOptions, painter: P) -> Self {
        Self {
            dimensions,
            options,
            painter,
            stats: FrameStats::default(),
            surface: None,
            failure: None,
        }
    }

    /// Frames presented so far.
    pub fn frames(&self) -> u64 {
        self.stats.total_frames()
    }

    /// Consume the app, returning the error that stopped it, if any.
    pub fn finish(self) -> ViewerResult<()> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn record_failure(&mut self, err: ViewerError) {
        error!(error = %err, "Stopping viewer");
        self.failure = Some(err);
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: ViewerError) {
        self.record_failure(err);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        if let Err(err) = surface.framebuffer.draw(&mut self.painter) {
            self.fail(event_loop, err.into());
            return;
        }
        if let Some(report) = self.stats.record(Instant::now()) {
            debug!(
                frames = report.frames,
                fps = format_args!("{:.1}", report.fps),
                "Frame rate"
            );
        }
        surface.window.request_redraw();
    }
}

impl<P: Painter<Pixel = Rgba8>> ApplicationHandler for App<P> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.surface.is_some() {
            return;
        }

        match Framebuffer::init_with_options(event_loop, self.dimensions, self.options.clone()) {
            Ok((window, framebuffer)) => {
                window.request_redraw();
                self.surface = Some(Surface {
                    framebuffer,
                    window,
                });
                info!(dimensions = %self.dimensions, "Application initialized");
            }
            Err(err) => self.fail(event_loop, err.into()),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            WindowEvent::Resized(size) => {
                if let Some(surface) = &self.surface {
                    if let Err(err) = surface.framebuffer.resize(size) {
                        self.fail(event_loop, err.into());
                    }
                }
            }
            WindowEvent::CloseRequested => {
                info!(frames = self.frames(), "Window closed");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(NamedKey::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                info!(frames = self.frames(), "Escape pressed");
                event_loop.exit();
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _: &ActiveEventLoop) {
        // release GL objects while the context is still alive
        self.surface = None;
    }
}

/// Build the configured painter and run the viewer until its window closes.
pub fn run(config: &ViewerConfig) -> ViewerResult<()> {
    let dimensions = config.dimensions()?;
    let painter = build_painter(config.painter, dimensions, config.image.as_deref())?;
    let mut app = App::new(dimensions, config.framebuffer_options(), painter);

    let event_loop = EventLoop::new().map_err(|err| ViewerError::EventLoop(err.to_string()))?;
    event_loop.set_control_flow(ControlFlow::Poll);

    info!(
        painter = ?config.painter,
        %dimensions,
        vsync = config.vsync,
        "Starting viewer"
    );
    event_loop
        .run_app(&mut app)
        .map_err(|err| ViewerError::EventLoop(err.to_string()))?;

    app.finish()
}
