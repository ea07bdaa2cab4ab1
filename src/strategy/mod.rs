//! Decision strategies.
//!
//! Every strategy implements [`Strategy`]: given the board, the current
//! square and the roll, return the square the token should move to.
//!
//! - [`RuleTable`]: explicit `(square, roll) -> destination` overrides with a
//!   linear fallback
//! - [`GreedyStrategy`]: one-move lookahead over forward/back candidates
//! - [`LinearStrategy`]: always forward by the roll
//!
//! ```
//! use chutes_sim::board::Board;
//! use chutes_sim::strategy::{GreedyStrategy, LinearStrategy, Strategy};
//!
//! let board = Board::standard();
//! let strategies: Vec<Box<dyn Strategy>> = vec![Box::new(GreedyStrategy), Box::new(LinearStrategy)];
//!
//! for strategy in &strategies {
//!     let target = strategy.decide(&board, 0, 1);
//!     assert_eq!(board.resolve(target), 38);
//! }
//! ```

pub mod greedy;
pub mod linear;
pub mod presets;
pub mod rules;
pub mod traits;

pub use greedy::{candidate_moves, GreedyStrategy};
pub use linear::LinearStrategy;
pub use presets::{best_found, BEST_FOUND_NAME};
pub use rules::{Rule, RuleKey, RuleSet, RuleTable};
pub use traits::Strategy;
