//! Player movement: the continuous first-person step and the discrete
//! tile step used by the top-down view.

use crate::entities::wrap_angle;
use crate::map::cell_center;
use crate::session::GameSession;

/// Held-key intent, each axis in [-1, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveIntent {
    pub forward: f32, // +forward / -back
    pub strafe: f32,  // +right / -left
    pub turn: f32,    // +right / -left
}

impl MoveIntent {
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.forward == 0.0 && self.strafe == 0.0 && self.turn == 0.0
    }
}

/// Advance the player by one frame. `dt` is clamped to `[0, max_dt]`.
pub fn control_step(session: &mut GameSession, intent: MoveIntent, dt: f32, max_dt: f32) {
    if session.status().is_over() {
        return;
    }
    let dt = if dt.is_finite() { dt.clamp(0.0, max_dt) } else { 0.0 };

    let player = &mut session.player;
    player.angle = wrap_angle(player.angle + intent.turn * player.turn_speed * dt);

    let mut fwd = intent.forward;
    let mut strafe = intent.strafe;

    // Normalize diagonal speed
    if fwd != 0.0 || strafe != 0.0 {
        let len = (fwd * fwd + strafe * strafe).sqrt();
        if len > 1.0 {
            fwd /= len;
            strafe /= len;
        }

        let [c, s] = player.forward();
        // Right is forward rotated +90 degrees (Y down).
        let vx = c * fwd - s * strafe;
        let vy = s * fwd + c * strafe;

        let step = player.move_speed * dt;
        let nx = player.pos[0] + vx * step;
        let ny = player.pos[1] + vy * step;

        // Resolve each axis on its own so the player slides along walls.
        if session.map.is_open_at(nx, player.pos[1]) {
            player.pos[0] = nx;
        }
        if session.map.is_open_at(player.pos[0], ny) {
            player.pos[1] = ny;
        }
    }

    session.resolve_outcome();
}

/// Move one whole tile from the centre of the player's cell. Returns whether
/// the move was applied; blocked moves are ignored.
pub fn grid_step(session: &mut GameSession, dx: i32, dy: i32) -> bool {
    if session.status().is_over() {
        return false;
    }
    let (col, row) = session.player.cell();
    let (nc, nr) = (col + dx, row + dy);
    if !session.map.is_open_cell(nc, nr) {
        return false;
    }
    session.player.pos = cell_center(nc, nr);
    session.resolve_outcome();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::session::GameStatus;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    const DT: f32 = 1.0 / 60.0;

    fn session() -> GameSession {
        GameSession::new(&Config::default())
    }

    fn fwd() -> MoveIntent {
        MoveIntent {
            forward: 1.0,
            ..MoveIntent::default()
        }
    }

    #[test]
    fn forward_moves_along_heading() {
        let mut s = session();
        control_step(&mut s, fwd(), 0.04, 0.05);
        assert!((s.player.pos[0] - (1.5 + 2.5 * 0.04)).abs() < 1e-5);
        assert_eq!(s.player.pos[1], 1.5);
    }

    #[test]
    fn dt_is_clamped() {
        let mut a = session();
        let mut b = session();
        control_step(&mut a, fwd(), 10.0, 0.05);
        control_step(&mut b, fwd(), 0.05, 0.05);
        assert_eq!(a.player.pos, b.player.pos);

        let mut c = session();
        control_step(&mut c, fwd(), -1.0, 0.05);
        control_step(&mut c, fwd(), f32::NAN, 0.05);
        assert_eq!(c.player.pos, [1.5, 1.5]);
    }

    #[test]
    fn turning_wraps_heading() {
        let mut s = session();
        s.player.angle = PI - 0.01;
        let turn = MoveIntent {
            turn: 1.0,
            ..MoveIntent::default()
        };
        control_step(&mut s, turn, 0.05, 0.05);
        assert!(s.player.angle < 0.0 && s.player.angle > -PI);
    }

    #[test]
    fn strafe_right_is_perpendicular() {
        let mut s = session();
        // Facing +X, strafing right goes +Y (down the corridor at column 1).
        let right = MoveIntent {
            strafe: 1.0,
            ..MoveIntent::default()
        };
        control_step(&mut s, right, 0.04, 0.05);
        assert!((s.player.pos[0] - 1.5).abs() < 1e-5);
        assert!(s.player.pos[1] > 1.5);
    }

    #[test]
    fn wall_stops_motion() {
        let mut s = session();
        s.player.angle = PI; // facing the west wall
        for _ in 0..120 {
            control_step(&mut s, fwd(), DT, 0.05);
        }
        assert!(s.player.pos[0] >= 1.0);
        assert!(s.map.is_open_at(s.player.pos[0], s.player.pos[1]));
    }

    #[test]
    fn slides_along_wall() {
        let mut s = session();
        // Diagonally into the north wall: X keeps advancing, Y is blocked.
        s.player.angle = -FRAC_PI_4;
        let start_x = s.player.pos[0];
        for _ in 0..60 {
            control_step(&mut s, fwd(), DT, 0.05);
        }
        assert!(s.player.pos[0] > start_x + 0.5);
        assert!(s.player.pos[1] >= 1.0);
    }

    #[test]
    fn never_enters_a_wall() {
        let mut s = session();
        let intents = [
            MoveIntent {
                forward: 1.0,
                strafe: 0.0,
                turn: 0.3,
            },
            MoveIntent {
                forward: 1.0,
                strafe: 1.0,
                turn: -0.7,
            },
            MoveIntent {
                forward: -1.0,
                strafe: -1.0,
                turn: 1.0,
            },
            MoveIntent {
                forward: 1.0,
                strafe: -1.0,
                turn: 0.0,
            },
        ];
        s.monster.pos = [-100.0, -100.0]; // keep the game running
        for i in 0..4000 {
            control_step(&mut s, intents[(i / 37) % intents.len()], 0.05, 0.05);
            let [x, y] = s.player.pos;
            assert!(s.map.is_open_at(x, y), "entered wall at ({x}, {y})");
        }
    }

    #[test]
    fn finished_game_ignores_input() {
        let mut s = session();
        s.player.pos = [13.5, 9.5];
        s.resolve_outcome();
        assert_eq!(s.status(), GameStatus::Won);
        let before = s.player.clone();
        control_step(&mut s, fwd(), 0.05, 0.05);
        control_step(&mut s, MoveIntent { turn: 1.0, ..fwd() }, 0.05, 0.05);
        assert_eq!(s.player, before);
        assert!(!grid_step(&mut s, -1, 0));
        assert_eq!(s.player, before);
    }

    #[test]
    fn grid_step_moves_one_tile_or_nothing() {
        let mut s = session();
        assert!(grid_step(&mut s, 1, 0));
        assert_eq!(s.player.cell(), (2, 1));
        assert_eq!(s.player.pos, [2.5, 1.5]);

        // (2, 0) is the border wall.
        assert!(!grid_step(&mut s, 0, -1));
        assert_eq!(s.player.pos, [2.5, 1.5]);
    }

    #[test]
    fn grid_step_snaps_from_off_centre() {
        let mut s = session();
        s.player.pos = [1.9, 1.2];
        s.player.angle = FRAC_PI_2;
        assert!(grid_step(&mut s, 0, 1));
        assert_eq!(s.player.pos, [1.5, 2.5]);
    }
}
