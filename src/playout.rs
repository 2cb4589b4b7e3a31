//! Monte Carlo playouts (random game simulation).
//!
//! A playout plays uniformly random legal moves for a bounded number of plies and
//! then judges the final board by raw stone count.

use crate::board::{Board, Color};

/// Play random legal moves on `board`, starting with `player`, for at most `max_depth`
/// plies. Stops early when the player to move has no legal move.
///
/// Returns the number of plies played.
pub fn rollout(
    board: &mut Board,
    player: Color,
    max_depth: usize,
    rng: &mut fastrand::Rng,
) -> usize {
    let mut current = player;
    let mut depth = 0;

    while depth < max_depth {
        let moves = board.legal_moves(current);
        if moves.is_empty() {
            break;
        }
        let (x, y) = moves[rng.usize(..moves.len())];
        board.commit(x, y, current);
        current = current.opponent();
        depth += 1;
    }
    depth
}

/// Reward for `player` on a finished playout board: 1 for strictly more stones than
/// the opponent, 0 for fewer or equal.
pub fn stone_reward(board: &Board, player: Color) -> f64 {
    if board.count(player) > board.count(player.opponent()) {
        1.0
    } else {
        0.0
    }
}
