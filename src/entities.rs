use std::f32::consts::{PI, TAU};

use crate::map::cell_of;

pub const PLAYER_SPAWN: [f32; 2] = [1.5, 1.5];
pub const MONSTER_SPAWN: [f32; 2] = [7.5, 5.5];
pub const PORTAL_POS: [f32; 2] = [13.5, 9.5];

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: [f32; 2],   // (x, y) in tiles
    pub angle: f32,      // radians, heading in the X-Y plane, kept in (-pi, pi]
    pub move_speed: f32, // tiles/s
    pub turn_speed: f32, // rad/s
}

impl Player {
    pub fn new(pos: [f32; 2], move_speed: f32, turn_speed: f32) -> Self {
        Self {
            pos,
            angle: 0.0, // facing +X
            move_speed,
            turn_speed,
        }
    }

    #[inline]
    pub fn cell(&self) -> (i32, i32) {
        cell_of(self.pos)
    }

    /// Unit forward vector. Y grows downwards, so +angle turns right.
    #[inline]
    pub fn forward(&self) -> [f32; 2] {
        let (s, c) = self.angle.sin_cos();
        [c, s]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Monster {
    pub pos: [f32; 2], // always a tile centre
}

impl Monster {
    #[inline]
    pub fn cell(&self) -> (i32, i32) {
        cell_of(self.pos)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Portal {
    pub pos: [f32; 2],
}

impl Portal {
    #[inline]
    pub fn cell(&self) -> (i32, i32) {
        cell_of(self.pos)
    }
}

/// Wrap an angle into (-pi, pi].
#[inline]
pub fn wrap_angle(a: f32) -> f32 {
    let mut a = a % TAU;
    if a > PI {
        a -= TAU;
    } else if a <= -PI {
        a += TAU;
    }
    a
}

#[inline]
pub fn distance(a: [f32; 2], b: [f32; 2]) -> f32 {
    (b[0] - a[0]).hypot(b[1] - a[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_stays_in_half_open_range() {
        for i in -200..=200 {
            let a = i as f32 * 0.173;
            let w = wrap_angle(a);
            assert!(w > -PI - 1e-6 && w <= PI + 1e-6, "{a} -> {w}");
            // Same direction after wrapping.
            assert!((w.sin() - a.sin()).abs() < 1e-3);
            assert!((w.cos() - a.cos()).abs() < 1e-3);
        }
    }

    #[test]
    fn wrap_maps_minus_pi_to_pi() {
        assert_eq!(wrap_angle(-PI), PI);
        assert_eq!(wrap_angle(PI), PI);
        assert_eq!(wrap_angle(0.0), 0.0);
    }

    #[test]
    fn forward_follows_heading() {
        let mut p = Player::new(PLAYER_SPAWN, 1.0, 1.0);
        let f = p.forward();
        assert!((f[0] - 1.0).abs() < 1e-6 && f[1].abs() < 1e-6);

        p.angle = std::f32::consts::FRAC_PI_2;
        let f = p.forward();
        assert!(f[0].abs() < 1e-6 && (f[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn spawn_cells() {
        assert_eq!(cell_of(PLAYER_SPAWN), (1, 1));
        assert_eq!(Monster { pos: MONSTER_SPAWN }.cell(), (7, 5));
        assert_eq!(Portal { pos: PORTAL_POS }.cell(), (13, 9));
    }
}
