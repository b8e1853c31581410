//! Window, drawing surface and the event loop handler.

use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::Instant;

use rand::rngs::StdRng;
use thiserror::Error;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use crate::config::Config;
use crate::game::{Game, TITLE};
use crate::scaler::Upscaler;

/// Startup failures. Keeps only the platform error text; the platform errors are not `Send`.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to create window: {0}")]
    Window(String),
    #[error("no drawing surface available: {0}")]
    Surface(String),
}

impl From<winit::error::OsError> for StartupError {
    fn from(err: winit::error::OsError) -> Self {
        StartupError::Window(err.to_string())
    }
}

impl From<softbuffer::SoftBufferError> for StartupError {
    fn from(err: softbuffer::SoftBufferError) -> Self {
        StartupError::Surface(err.to_string())
    }
}

type Surface = softbuffer::Surface<Rc<Window>, Rc<Window>>;

pub struct App {
    window: Option<Rc<Window>>,
    surface: Option<Surface>,
    game: Game,

    // Fixed-size frame the game draws into
    frame: Vec<u32>,
    upscaler: Upscaler,

    // HUD
    frame_counter: u32,
    last_fps_print: Instant,
    title: String,

    startup_error: Option<StartupError>,
}

impl App {
    pub fn new(cfg: Config, rng: StdRng) -> Self {
        let now = Instant::now();
        let (w, h) = (cfg.screen_w, cfg.screen_h);
        Self {
            window: None,
            surface: None,
            game: Game::new(cfg, rng, now),
            frame: vec![0; w * h],
            upscaler: Upscaler::new(w, h, w, h),
            frame_counter: 0,
            last_fps_print: now,
            title: TITLE.to_string(),
            startup_error: None,
        }
    }

    /// Consume the app after the loop ends, surfacing a startup failure.
    pub fn finish(self) -> Result<(), StartupError> {
        match self.startup_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), StartupError> {
        let cfg = self.game.config();
        let attributes = Window::default_attributes()
            .with_title(TITLE)
            .with_inner_size(LogicalSize::new(cfg.screen_w as f64, cfg.screen_h as f64));

        let window = Rc::new(event_loop.create_window(attributes)?);
        let context = softbuffer::Context::new(window.clone())?;
        let surface = softbuffer::Surface::new(&context, window.clone())?;

        let size = window.inner_size();
        self.rebuild_upscaler(size.width as usize, size.height as usize);

        self.surface = Some(surface);
        self.window = Some(window);
        tracing::info!(width = size.width, height = size.height, "window and surface created");
        Ok(())
    }

    fn rebuild_upscaler(&mut self, dst_w: usize, dst_h: usize) {
        let cfg = self.game.config();
        if self.upscaler.dst_size() != (dst_w, dst_h) {
            self.upscaler = Upscaler::new(dst_w, dst_h, cfg.screen_w, cfg.screen_h);
        }
    }

    fn redraw(&mut self, id: WindowId) {
        let now = Instant::now();
        self.game.frame(now);

        let title = self.game.title();
        if title != self.title {
            if let Some(window) = &self.window {
                window.set_title(&title);
            }
            self.title = title;
        }

        let size = match &self.window {
            Some(w) if w.id() == id => w.inner_size(),
            _ => return,
        };
        let (Some(dw), Some(dh)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return; // Minimized window, skip drawing
        };
        self.rebuild_upscaler(size.width as usize, size.height as usize);

        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        if let Err(err) = surface.resize(dw, dh) {
            tracing::warn!(%err, "surface resize failed, skipping frame");
            return;
        }

        self.game.render(&mut self.frame);

        let mut buf = match surface.buffer_mut() {
            Ok(buf) => buf,
            Err(err) => {
                tracing::warn!(%err, "no frame buffer, skipping frame");
                return;
            }
        };
        self.upscaler.blit(&mut buf, &self.frame);
        if let Err(err) = buf.present() {
            tracing::warn!(%err, "present failed");
        }

        self.frame_counter += 1;
        let elapsed = now.duration_since(self.last_fps_print).as_secs_f32();
        if elapsed >= 1.0 {
            tracing::debug!(fps = self.frame_counter as f32 / elapsed, "frame rate");
            self.frame_counter = 0;
            self.last_fps_print = now;
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init_window(event_loop) {
            tracing::error!(%err, "cannot start: no drawing surface");
            self.startup_error = Some(err);
            event_loop.exit();
            return;
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("close requested, exiting");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat,
                        ..
                    },
                ..
            } => {
                let pressed = state == ElementState::Pressed;
                if !self.game.key_event(code, pressed, repeat, Instant::now()) {
                    tracing::info!("quit requested, exiting");
                    event_loop.exit();
                }
            }

            WindowEvent::Focused(false) => self.game.release_all(),

            WindowEvent::RedrawRequested => self.redraw(id),

            WindowEvent::Resized(new_size) => {
                self.rebuild_upscaler(new_size.width as usize, new_size.height as usize);
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.game.poll_timers(Instant::now());

        // Wake for the monster even if no redraw arrives (e.g. minimized).
        match self.game.next_deadline() {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
