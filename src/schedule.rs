//! The two periodic triggers that drive a session: the per-frame clock and
//! the monster's fixed wall-clock interval. Both are owned by one `Schedule`
//! so a restart tears them down and recreates them together.

use std::time::{Duration, Instant};

/// Measures the time between frames.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    max_dt: f32,
}

impl FrameClock {
    pub fn new(now: Instant, max_dt: f32) -> Self {
        Self { last: now, max_dt }
    }

    /// Seconds since the previous tick, capped to avoid tunnelling on slow frames.
    pub fn tick(&mut self, now: Instant) -> f32 {
        let dt = now.saturating_duration_since(self.last);
        self.last = now;
        dt.as_secs_f32().min(self.max_dt)
    }
}

/// A fixed-period trigger that can be cancelled.
#[derive(Debug, Clone)]
pub struct IntervalTask {
    period: Duration,
    next_due: Instant,
    cancelled: bool,
}

impl IntervalTask {
    /// First firing is one period after `now`.
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next_due: now + period,
            cancelled: false,
        }
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Fires at most once per call. A late task is rescheduled from `now`
    /// instead of replaying every missed period.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.cancelled || now < self.next_due {
            return false;
        }
        self.next_due += self.period;
        if self.next_due <= now {
            self.next_due = now + self.period;
        }
        true
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// When the task next wants to run, `None` once cancelled.
    pub fn deadline(&self) -> Option<Instant> {
        (!self.cancelled).then_some(self.next_due)
    }
}

/// Both triggers of one session lifecycle.
#[derive(Debug, Clone)]
pub struct Schedule {
    epoch: u64,
    pub frame: FrameClock,
    pub monster: IntervalTask,
}

impl Schedule {
    pub fn start(now: Instant, max_dt: f32, monster_period: Duration) -> Self {
        Self {
            epoch: 0,
            frame: FrameClock::new(now, max_dt),
            monster: IntervalTask::new(monster_period, now),
        }
    }

    /// Cancel both tasks and replace them with fresh ones for a new lifecycle.
    pub fn restart(&mut self, now: Instant, monster_period: Duration) {
        self.monster.cancel();
        let epoch = self.epoch + 1;
        *self = Self {
            epoch,
            frame: FrameClock::new(now, self.frame.max_dt),
            monster: IntervalTask::new(monster_period, now),
        };
    }

    /// Replace only the monster task, e.g. when its period changes.
    pub fn reschedule_monster(&mut self, now: Instant, period: Duration) {
        self.monster.cancel();
        self.monster = IntervalTask::new(period, now);
    }

    #[inline]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn stop(&mut self) {
        self.monster.cancel();
    }
}
