//! Built-in rule tables.

use crate::board::{Board, Roll, Square};
use crate::core::ConfigError;

use super::rules::RuleTable;

/// Label of the [`best_found`] table.
pub const BEST_FOUND_NAME: &str = "Best Found";

/// Best rule set found by offline search on the standard board.
const BEST_FOUND_RULES: [(Square, Roll, Square); 168] = [
    (0, 3, 39),
    (0, 4, 40),
    (0, 5, 14),
    (0, 6, 42),
    (1, 1, 38),
    (1, 3, 40),
    (1, 4, 14),
    (1, 5, 42),
    (1, 6, 16),
    (2, 3, 14),
    (2, 4, 15),
    (2, 5, 16),
    (2, 6, 17),
    (3, 2, 14),
    (3, 4, 16),
    (3, 5, 17),
    (3, 6, 18),
    (4, 1, 14),
    (4, 3, 16),
    (4, 4, 17),
    (4, 5, 18),
    (4, 6, 31),
    (6, 4, 31),
    (7, 4, 32),
    (8, 2, 31),
    (8, 3, 32),
    (8, 5, 34),
    (9, 1, 31),
    (9, 4, 34),
    (9, 6, 36),
    (11, 6, 6),
    (12, 5, 6),
    (13, 6, 8),
    (14, 3, 6),
    (14, 5, 8),
    (14, 6, 9),
    (15, 4, 8),
    (15, 6, 10),
    (16, 2, 7),
    (16, 4, 9),
    (16, 5, 10),
    (16, 6, 42),
    (17, 5, 42),
    (19, 4, 43),
    (19, 5, 44),
    (19, 6, 45),
    (20, 2, 42),
    (20, 5, 45),
    (20, 6, 46),
    (21, 1, 42),
    (21, 2, 43),
    (21, 3, 44),
    (21, 5, 46),
    (23, 6, 84),
    (24, 5, 84),
    (24, 6, 85),
    (25, 4, 84),
    (25, 5, 85),
    (25, 6, 86),
    (26, 3, 84),
    (26, 4, 85),
    (26, 5, 86),
    (26, 6, 87),
    (27, 2, 84),
    (27, 3, 85),
    (27, 4, 86),
    (27, 5, 87),
    (27, 6, 24),
    (28, 1, 84),
    (28, 2, 85),
    (28, 3, 86),
    (28, 4, 87),
    (28, 5, 88),
    (28, 6, 89),
    (31, 6, 44),
    (34, 3, 44),
    (34, 5, 46),
    (34, 6, 47),
    (35, 2, 44),
    (35, 3, 45),
    (36, 1, 44),
    (36, 5, 48),
    (36, 6, 27),
    (43, 5, 26),
    (43, 6, 27),
    (44, 4, 26),
    (44, 6, 11),
    (45, 3, 26),
    (45, 4, 27),
    (45, 5, 28),
    (45, 6, 29),
    (46, 4, 28),
    (46, 5, 84),
    (46, 6, 30),
    (47, 2, 27),
    (47, 3, 11),
    (47, 4, 12),
    (47, 5, 85),
    (47, 6, 31),
    (48, 2, 11),
    (48, 3, 12),
    (48, 4, 67),
    (48, 5, 14),
    (48, 6, 69),
    (49, 1, 11),
    (49, 3, 13),
    (49, 4, 68),
    (49, 5, 15),
    (49, 6, 16),
    (50, 2, 67),
    (50, 5, 70),
    (51, 1, 67),
    (51, 6, 53),
    (52, 5, 53),
    (52, 6, 54),
    (53, 6, 55),
    (54, 3, 53),
    (55, 5, 56),
    (55, 6, 53),
    (56, 3, 55),
    (56, 5, 57),
    (56, 6, 58),
    (57, 6, 19),
    (58, 6, 20),
    (59, 4, 19),
    (59, 5, 20),
    (59, 6, 60),
    (60, 5, 60),
    (60, 6, 22),
    (61, 3, 20),
    (61, 4, 60),
    (61, 5, 61),
    (61, 6, 62),
    (62, 3, 21),
    (62, 4, 42),
    (62, 5, 23),
    (62, 6, 63),
    (63, 2, 60),
    (63, 5, 63),
    (64, 2, 61),
    (64, 3, 62),
    (64, 4, 63),
    (64, 5, 20),
    (64, 6, 60),
    (68, 4, 91),
    (69, 3, 91),
    (69, 5, 93),
    (69, 6, 73),
    (70, 4, 93),
    (70, 5, 94),
    (70, 6, 74),
    (71, 3, 93),
    (71, 5, 74),
    (71, 6, 96),
    (83, 6, 25),
    (86, 2, 24),
    (86, 5, 27),
    (87, 1, 24),
    (87, 4, 27),
    (87, 6, 29),
    (91, 5, 75),
    (92, 5, 76),
    (93, 2, 74),
    (93, 4, 76),
    (93, 6, 78),
    (94, 2, 75),
    (94, 4, 77),
    (98, 1, 78),
];

/// The best-found rule table, validated against `board`.
///
/// Fails if `board` is smaller than the standard board or has fewer die faces.
pub fn best_found(board: &Board) -> Result<RuleTable, ConfigError> {
    let mut table = RuleTable::new(BEST_FOUND_NAME, board);
    for &(source, roll, destination) in &BEST_FOUND_RULES {
        table.register(source, roll, destination)?;
    }
    Ok(table)
}
