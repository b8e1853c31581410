//! One play-through: the maze, the three entities and the win/lose state.
//!
//! The session is owned by the app loop and handed by reference to every step
//! function. The state only ever leaves `Playing` once; `restart` is the only
//! way back.

use crate::config::Config;
use crate::entities::{MONSTER_SPAWN, Monster, PLAYER_SPAWN, PORTAL_POS, Player, Portal, distance};
use crate::map::{Map, MapError, cell_of};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    #[inline]
    pub fn is_over(self) -> bool {
        self != GameStatus::Playing
    }

    /// Banner text, `None` while playing.
    pub fn message(self) -> Option<&'static str> {
        match self {
            GameStatus::Playing => None,
            GameStatus::Won => Some("YOU ESCAPED"),
            GameStatus::Lost => Some("YOU WERE CAUGHT"),
        }
    }
}

/// Spawn points used on every (re)start.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub player: [f32; 2],
    pub monster: [f32; 2],
    pub portal: [f32; 2],
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            player: PLAYER_SPAWN,
            monster: MONSTER_SPAWN,
            portal: PORTAL_POS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameSession {
    pub map: Map,
    pub player: Player,
    pub monster: Monster,
    pub portal: Portal,
    status: GameStatus,
    layout: Layout,
    catch_radius: f32,
    move_speed: f32,
    turn_speed: f32,
}

impl GameSession {
    /// Built-in maze with the default spawns.
    pub fn new(cfg: &Config) -> Self {
        Self::build(Map::maze(), Layout::default(), cfg)
    }

    pub fn with_layout(map: Map, layout: Layout, cfg: &Config) -> Result<Self, MapError> {
        for (what, p) in [
            ("player", layout.player),
            ("monster", layout.monster),
            ("portal", layout.portal),
        ] {
            if !map.is_open_at(p[0], p[1]) {
                let (col, row) = cell_of(p);
                return Err(MapError::Blocked { what, col, row });
            }
        }
        Ok(Self::build(map, layout, cfg))
    }

    fn build(map: Map, layout: Layout, cfg: &Config) -> Self {
        Self {
            map,
            player: Player::new(layout.player, cfg.move_speed, cfg.turn_speed),
            monster: Monster {
                pos: layout.monster,
            },
            portal: Portal {
                pos: layout.portal,
            },
            status: GameStatus::Playing,
            layout,
            catch_radius: cfg.catch_radius,
            move_speed: cfg.move_speed,
            turn_speed: cfg.turn_speed,
        }
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Put every entity back on its spawn and resume play.
    pub fn restart(&mut self) {
        self.player = Player::new(self.layout.player, self.move_speed, self.turn_speed);
        self.monster = Monster {
            pos: self.layout.monster,
        };
        self.portal = Portal {
            pos: self.layout.portal,
        };
        self.status = GameStatus::Playing;
    }

    pub fn on_portal(&self) -> bool {
        self.player.cell() == self.portal.cell()
    }

    pub fn is_caught(&self) -> bool {
        distance(self.player.pos, self.monster.pos) < self.catch_radius
    }

    /// Apply the win, then the loss check. Returns the new status if this call
    /// ended the game.
    pub fn resolve_outcome(&mut self) -> Option<GameStatus> {
        if self.status.is_over() {
            return None;
        }
        let next = if self.on_portal() {
            GameStatus::Won
        } else if self.is_caught() {
            GameStatus::Lost
        } else {
            return None;
        };
        self.status = next;
        tracing::info!(status = ?next, player = ?self.player.pos, "game over");
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_playing_at_spawns() {
        let s = GameSession::new(&Config::default());
        assert_eq!(s.status(), GameStatus::Playing);
        assert_eq!(s.player.pos, [1.5, 1.5]);
        assert_eq!(s.monster.pos, [7.5, 5.5]);
        assert_eq!(s.portal.pos, [13.5, 9.5]);
        assert_eq!(s.player.cell(), (1, 1));
        assert_eq!(s.monster.cell(), (7, 5));
        assert_eq!(s.portal.cell(), (13, 9));
    }

    #[test]
    fn portal_wins_and_is_terminal() {
        let mut s = GameSession::new(&Config::default());
        s.player.pos = [13.2, 9.8];
        assert_eq!(s.resolve_outcome(), Some(GameStatus::Won));
        assert_eq!(s.status(), GameStatus::Won);

        // Even touching the monster afterwards changes nothing.
        s.player.pos = s.monster.pos;
        assert_eq!(s.resolve_outcome(), None);
        assert_eq!(s.status(), GameStatus::Won);
    }

    #[test]
    fn monster_proximity_loses() {
        let mut s = GameSession::new(&Config::default());
        s.player.pos = [7.5, 5.5 - 0.59];
        assert_eq!(s.resolve_outcome(), Some(GameStatus::Lost));
        assert!(s.status().is_over());
    }

    #[test]
    fn outside_catch_radius_keeps_playing() {
        let mut s = GameSession::new(&Config::default());
        s.player.pos = [7.5, 5.5 - 0.61];
        assert_eq!(s.resolve_outcome(), None);
        assert_eq!(s.status(), GameStatus::Playing);
    }

    #[test]
    fn restart_resets_everything() {
        let mut s = GameSession::new(&Config::default());
        s.player.pos = [13.5, 9.5];
        s.player.angle = 2.0;
        s.monster.pos = [5.5, 3.5];
        s.resolve_outcome();
        assert_eq!(s.status(), GameStatus::Won);

        s.restart();
        assert_eq!(s.status(), GameStatus::Playing);
        assert_eq!(s.player.pos, [1.5, 1.5]);
        assert_eq!(s.player.angle, 0.0);
        assert_eq!(s.monster.pos, [7.5, 5.5]);
        assert_eq!(s.portal.pos, [13.5, 9.5]);
    }

    #[test]
    fn layout_on_wall_is_rejected() {
        let layout = Layout {
            monster: [4.5, 1.5],
            ..Layout::default()
        };
        let err = GameSession::with_layout(Map::maze(), layout, &Config::default()).unwrap_err();
        assert_eq!(
            err,
            MapError::Blocked {
                what: "monster",
                col: 4,
                row: 1
            }
        );
    }

    #[test]
    fn status_messages() {
        assert_eq!(GameStatus::Playing.message(), None);
        assert!(GameStatus::Won.message().is_some());
        assert!(GameStatus::Lost.message().is_some());
    }
}
