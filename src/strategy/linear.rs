//! Linear strategy: always move forward by the roll, saturating at
//! `Square::MAX`.

use crate::board::{Board, Roll, Square};

use super::traits::Strategy;

#[derive(Clone, Copy, Debug, Default)]
pub struct LinearStrategy;

impl Strategy for LinearStrategy {
    fn name(&self) -> &str {
        "Linear"
    }

    fn decide(&self, _board: &Board, position: Square, roll: Roll) -> Square {
        position.saturating_add(Square::from(roll))
    }

    fn boxed_clone(&self) -> Box<dyn Strategy> {
        Box::new(*self)
    }
}
