//! Maze Chase
//!
//! A single-level tile-maze chase: reach the portal before the wandering
//! monster reaches you. Two views share one session: a first-person raycaster
//! and the flat top-down grid.

pub mod app;
pub mod config;
pub mod entities;
pub mod game;
pub mod hud;
pub mod input;
pub mod map;
pub mod monster;
pub mod physics;
pub mod raycast;
pub mod renderer;
pub mod scaler;
pub mod schedule;
pub mod session;

use anyhow::Context;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use winit::event_loop::{ControlFlow, EventLoop};

use crate::app::App;
use crate::config::Config;

/// Open the window and run until the player quits.
pub fn run() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("maze_chase=info"));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    tracing::info!("Starting Maze Chase");

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(Config::default(), StdRng::from_entropy());
    event_loop
        .run_app(&mut app)
        .context("event loop terminated abnormally")?;

    app.finish().context("could not start the game")?;
    Ok(())
}
