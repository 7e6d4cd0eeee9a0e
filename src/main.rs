//! Contourfield - an animated topographic background
//!
//! Simplex noise drifts through time, the cursor presses a dent into it, and
//! marching squares traces the result as contour lines.

use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use contourfield::animation::Animation;
use contourfield::backdrop::build_backdrop;
use contourfield::cli::Args;
use contourfield::headless;
use contourfield::params::Settings;
use contourfield::rendering::RenderSystem;
use contourfield::surface::FrameBatch;
use contourfield::{Error, Result};

/// Main application state
struct App {
    settings: Settings,

    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,
    batch: FrameBatch,

    // Background state
    animation: Animation,

    /// Physical pixels per logical pixel
    scale_factor: f64,

    /// First fatal error, returned once the loop exits
    failure: Option<Error>,
}

impl App {
    fn new(settings: Settings) -> Self {
        let width = settings.render.window_width as f32;
        let height = settings.render.window_height as f32;
        let backdrop = build_backdrop(&settings, width, height);
        let animation = Animation::new(backdrop, settings.render.target_fps);

        Self {
            settings,
            window: None,
            render_system: None,
            batch: FrameBatch::new(width, height),
            animation,
            scale_factor: 1.0,
            failure: None,
        }
    }

    fn into_result(self) -> Result<()> {
        match self.failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title("Contourfield")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.settings.render.window_width,
                self.settings.render.window_height,
            ));

        let window = Arc::new(event_loop.create_window(window_attributes)?);
        let render_system = pollster::block_on(RenderSystem::new(Arc::clone(&window)))?;

        self.scale_factor = window.scale_factor();
        self.window = Some(window);
        self.render_system = Some(render_system);
        self.sync_size();

        log::info!("contourfield is running, press ESC to quit");
        Ok(())
    }

    /// Propagate the window's logical size to the batch and the backdrop
    fn sync_size(&mut self) {
        let Some(window) = &self.window else {
            return;
        };
        let logical = window.inner_size().to_logical::<f32>(self.scale_factor);
        if logical.width <= 0.0 || logical.height <= 0.0 {
            return;
        }
        self.batch.resize(logical.width, logical.height);
        self.animation.resize(logical.width, logical.height);
    }

    fn to_logical(&self, position: winit::dpi::PhysicalPosition<f64>) -> Vec2 {
        let logical = position.to_logical::<f32>(self.scale_factor);
        Vec2::new(logical.x, logical.y)
    }

    /// Stop the animation and release the window and GPU resources
    fn teardown(&mut self, event_loop: &ActiveEventLoop) {
        self.animation.stop();
        self.render_system = None;
        self.window = None;
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: Error) {
        log::error!("{}", error);
        self.failure.get_or_insert(error);
        self.teardown(event_loop);
    }

    fn handle_touch(&mut self, touch: Touch) {
        let position = self.to_logical(touch.location);
        let Some(pointer) = self.animation.pointer_mut() else {
            return;
        };
        match touch.phase {
            TouchPhase::Started | TouchPhase::Moved => pointer.touch_move(touch.id, position),
            TouchPhase::Ended | TouchPhase::Cancelled => pointer.touch_end(touch.id),
        }
    }

    /// Render a single frame
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(render_system) = self.render_system.as_mut() else {
            return;
        };

        self.batch.begin();
        if !self.animation.tick(Instant::now(), &mut self.batch) {
            return; // Throttled
        }
        log::trace!("frame {}: {} vertices", self.animation.frames(), self.batch.vertices().len());

        match render_system.render(&self.batch) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost, reconfiguring");
                render_system.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory, stopping");
                self.teardown(event_loop);
            }
            Err(e) => log::warn!("frame skipped: {}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if !self.animation.is_running() {
            return;
        }
        let Some(window) = &self.window else {
            return;
        };

        // A throttled frame presents nothing, so vsync cannot pace the loop
        match self.animation.next_frame_due() {
            Some(due) if Instant::now() < due => {
                event_loop.set_control_flow(ControlFlow::WaitUntil(due));
            }
            _ => {
                event_loop.set_control_flow(ControlFlow::Wait);
                window.request_redraw();
            }
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || !self.animation.is_running() {
            return; // Already initialized or torn down
        }
        if let Err(e) = self.init_window(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => self.teardown(event_loop),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => self.teardown(event_loop),
            WindowEvent::Resized(size) => {
                if let Some(render_system) = self.render_system.as_mut() {
                    render_system.resize(size);
                }
                self.sync_size();
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.scale_factor = scale_factor;
                self.sync_size();
            }
            WindowEvent::CursorMoved { position, .. } => {
                let position = self.to_logical(position);
                if let Some(pointer) = self.animation.pointer_mut() {
                    pointer.move_to(position);
                }
            }
            WindowEvent::CursorLeft { .. } => {
                if let Some(pointer) = self.animation.pointer_mut() {
                    pointer.leave();
                }
            }
            WindowEvent::Touch(touch) => self.handle_touch(touch),
            WindowEvent::RedrawRequested => self.render_frame(event_loop),
            _ => {}
        }
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    let settings = args.settings()?;

    if let Some(path) = &args.snapshot {
        return headless::snapshot(&settings, path, args.frames, args.pointer_position());
    }
    if let Some(config) = args.recording_config()? {
        return headless::record(&settings, &config, args.pointer_position());
    }

    log::info!(
        "style {:?}, {} levels, cell {}px",
        settings.style,
        settings.levels.count,
        settings.field.cell_size
    );

    let mut app = App::new(settings);
    let event_loop = EventLoop::new()?;
    event_loop.run_app(&mut app)?;
    app.into_result()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
