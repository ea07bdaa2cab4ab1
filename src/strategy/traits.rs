//! The strategy capability shared by every decision policy.

use crate::board::{Board, Roll, Square};

/// Decides where a token should go for a given position and roll.
///
/// The executor applies board redirects to the returned square and treats a
/// square past the end of the board as "stay put".
///
/// Strategies are cloned into every worker through [`Strategy::boxed_clone`],
/// so implementations must not share mutable state between clones.
pub trait Strategy: Send + Sync + std::fmt::Debug {
    /// Label used in reports.
    fn name(&self) -> &str;

    /// Destination for a token on `position` that rolled `roll`.
    fn decide(&self, board: &Board, position: Square, roll: Roll) -> Square;

    /// Clone into a fresh box.
    fn boxed_clone(&self) -> Box<dyn Strategy>;
}

impl Clone for Box<dyn Strategy> {
    fn clone(&self) -> Self {
        self.boxed_clone()
    }
}
