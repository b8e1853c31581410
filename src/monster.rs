//! Random-walk step for the monster, driven by its own fixed-interval timer.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::map::cell_center;
use crate::session::GameSession;

const DIRS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Open neighbouring cells the monster may enter. The portal cell is off limits.
pub fn monster_moves(session: &GameSession) -> Vec<(i32, i32)> {
    let (col, row) = session.monster.cell();
    let portal = session.portal.cell();
    DIRS.iter()
        .map(|&(dx, dy)| (col + dx, row + dy))
        .filter(|&(c, r)| session.map.is_open_cell(c, r) && (c, r) != portal)
        .collect()
}

/// Move the monster to a uniformly chosen open neighbour. Returns whether it
/// moved; a boxed-in monster stays put.
pub fn monster_step<R: Rng + ?Sized>(session: &mut GameSession, rng: &mut R) -> bool {
    if session.status().is_over() {
        return false;
    }
    let moves = monster_moves(session);
    let Some(&(col, row)) = moves.choose(rng) else {
        return false;
    };
    session.monster.pos = cell_center(col, row);
    tracing::trace!(col, row, "monster moved");
    session.resolve_outcome();
    true
}
