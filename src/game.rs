//! Window-independent game loop state: session, view, timers, input and RNG.
//! `App` feeds it events and instants; everything here is testable headless.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use winit::keyboard::KeyCode;

use crate::config::Config;
use crate::input::{Command, KeyState, command_for};
use crate::monster;
use crate::physics;
use crate::renderer::{self, ViewMode};
use crate::schedule::Schedule;
use crate::session::{GameSession, GameStatus};

pub const TITLE: &str = "Maze Chase";

pub struct Game {
    cfg: Config,
    session: GameSession,
    view: ViewMode,
    schedule: Schedule,
    keys: KeyState,
    rng: StdRng,
    last_status: GameStatus,
}

impl Game {
    pub fn new(cfg: Config, rng: StdRng, now: Instant) -> Self {
        let session = GameSession::new(&cfg);
        let view = ViewMode::FirstPerson;
        let schedule = Schedule::start(now, cfg.max_dt, monster_period(&cfg, view));
        Self {
            cfg,
            session,
            view,
            schedule,
            keys: KeyState::default(),
            rng,
            last_status: GameStatus::Playing,
        }
    }

    #[inline]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    #[inline]
    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    #[inline]
    pub fn view(&self) -> ViewMode {
        self.view
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    #[inline]
    pub fn epoch(&self) -> u64 {
        self.schedule.epoch()
    }

    /// Feed a key transition. Returns `false` when the loop should exit.
    pub fn key_event(&mut self, code: KeyCode, pressed: bool, repeat: bool, now: Instant) -> bool {
        if !pressed {
            self.keys.release(code);
            return true;
        }
        self.keys.press(code);

        match command_for(code, self.view) {
            Some(Command::Quit) => return false,
            Some(Command::Restart) if !repeat => self.restart(now),
            Some(Command::ToggleView) if !repeat => self.toggle_view(now),
            Some(Command::GridStep(dx, dy)) => {
                physics::grid_step(&mut self.session, dx, dy);
                self.sync_status();
            }
            _ => {}
        }
        true
    }

    /// Drop held keys, e.g. on focus loss.
    pub fn release_all(&mut self) {
        self.keys.clear();
    }

    /// Per-frame update: advance the clock and, in first person, move the player.
    pub fn frame(&mut self, now: Instant) {
        let dt = self.schedule.frame.tick(now);
        let intent = self.keys.intent();
        if self.view == ViewMode::FirstPerson && !intent.is_idle() {
            physics::control_step(&mut self.session, intent, dt, self.cfg.max_dt);
        }
        self.sync_status();
    }

    /// Run the monster if its interval elapsed. Returns whether it moved.
    pub fn poll_timers(&mut self, now: Instant) -> bool {
        if !self.schedule.monster.poll(now) {
            return false;
        }
        let moved = monster::monster_step(&mut self.session, &mut self.rng);
        self.sync_status();
        moved
    }

    /// When the loop next has timed work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.schedule.monster.deadline()
    }

    pub fn restart(&mut self, now: Instant) {
        self.session.restart();
        self.schedule.restart(now, monster_period(&self.cfg, self.view));
        self.last_status = GameStatus::Playing;
        tracing::info!(epoch = self.schedule.epoch(), "session restarted");
    }

    pub fn toggle_view(&mut self, now: Instant) {
        self.view = self.view.toggled();
        if !self.session.status().is_over() {
            let period = monster_period(&self.cfg, self.view);
            self.schedule.reschedule_monster(now, period);
        }
        tracing::info!(view = ?self.view, "view changed");
    }

    /// Draw the current state into a `screen_w * screen_h` buffer.
    pub fn render(&self, buf: &mut [u32]) {
        renderer::render_frame(
            buf,
            self.cfg.screen_w,
            self.cfg.screen_h,
            &self.session,
            self.view,
            &self.cfg,
        );
    }

    pub fn title(&self) -> String {
        match self.session.status().message() {
            Some(msg) => format!("{TITLE} | {msg}"),
            None => TITLE.to_string(),
        }
    }

    /// Once the game ends the monster timer is cancelled; restart recreates it.
    fn sync_status(&mut self) {
        let status = self.session.status();
        if status == self.last_status {
            return;
        }
        self.last_status = status;
        if status.is_over() {
            self.schedule.stop();
        }
    }
}

fn monster_period(cfg: &Config, view: ViewMode) -> Duration {
    match view {
        ViewMode::FirstPerson => cfg.monster_interval,
        ViewMode::TopDown => cfg.grid_monster_interval,
    }
}
