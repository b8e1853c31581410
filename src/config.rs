//! Tunables for the whole game. There is no config file; everything is a
//! hard-coded default carried in one value so tests can tweak it.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Logical framebuffer size in pixels.
    pub screen_w: usize,
    pub screen_h: usize,

    pub fov_deg: f32,
    pub ray_count: usize,
    pub ray_step: f32,  // tiles per march step
    pub max_depth: f32, // tiles

    pub move_speed: f32, // tiles/s
    pub turn_speed: f32, // rad/s
    pub max_dt: f32,     // seconds

    /// Player/monster distance below which the player is caught.
    pub catch_radius: f32,
    /// Sprites closer than this are not drawn.
    pub billboard_min_dist: f32,

    pub monster_interval: Duration,
    /// Monster period while in the top-down view.
    pub grid_monster_interval: Duration,

    pub minimap_cell: usize,
    pub grid_cell: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_w: 600,
            screen_h: 440,

            fov_deg: 60.0,
            ray_count: 240,
            ray_step: 0.02,
            max_depth: 20.0,

            move_speed: 2.5,
            turn_speed: 2.2,
            max_dt: 0.05,

            catch_radius: 0.6,
            billboard_min_dist: 0.2,

            monster_interval: Duration::from_millis(1000),
            grid_monster_interval: Duration::from_millis(700),

            minimap_cell: 6,
            grid_cell: 40,
        }
    }
}

impl Config {
    #[inline]
    pub fn fov(&self) -> f32 {
        self.fov_deg.to_radians()
    }

    #[inline]
    pub fn half_fov(&self) -> f32 {
        0.5 * self.fov()
    }
}
