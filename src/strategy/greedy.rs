//! Greedy strategy.
//!
//! A token may move the rolled distance forward or back. Greedy looks one
//! move ahead: it resolves every on-board candidate through the board and
//! takes the one that ends furthest along, preferring forward on ties.

use smallvec::SmallVec;

use crate::board::{Board, Roll, Square};

use super::traits::Strategy;

#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyStrategy;

/// Squares reachable from `position` by moving exactly `roll` either way.
#[must_use]
pub fn candidate_moves(board: &Board, position: Square, roll: Roll) -> SmallVec<[Square; 2]> {
    let step = Square::from(roll);
    let mut candidates = SmallVec::new();

    let forward = position.saturating_add(step);
    if board.is_valid_square(forward) {
        candidates.push(forward);
    }
    if let Some(back) = position.checked_sub(step) {
        candidates.push(back);
    }

    candidates
}

impl Strategy for GreedyStrategy {
    fn name(&self) -> &str {
        "Greedy"
    }

    fn decide(&self, board: &Board, position: Square, roll: Roll) -> Square {
        candidate_moves(board, position, roll)
            .into_iter()
            .max_by_key(|&square| (board.resolve(square), square > position))
            .unwrap_or(position.saturating_add(Square::from(roll)))
    }

    fn boxed_clone(&self) -> Box<dyn Strategy> {
        Box::new(*self)
    }
}
