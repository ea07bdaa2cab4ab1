//! Board topology: squares, die, and one-hop redirects.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::ConfigError;

/// A square on the board. Square 0 is the off-board start.
pub type Square = u16;

/// A die face.
pub type Roll = u8;

/// Ladders on the classic 100-square board.
const STANDARD_LADDERS: [(Square, Square); 9] = [
    (1, 38),
    (4, 14),
    (9, 31),
    (21, 42),
    (28, 84),
    (36, 44),
    (51, 67),
    (71, 91),
    (80, 100),
];

/// Chutes on the classic 100-square board.
const STANDARD_CHUTES: [(Square, Square); 10] = [
    (16, 6),
    (47, 26),
    (49, 11),
    (56, 53),
    (62, 19),
    (64, 60),
    (87, 24),
    (93, 73),
    (95, 75),
    (98, 78),
];

/// Direction of a redirect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RedirectKind {
    /// Moves the token forward.
    Ladder,
    /// Moves the token back.
    Chute,
}

/// A square that sends a token somewhere else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirect {
    pub from: Square,
    pub to: Square,
}

impl Redirect {
    #[must_use]
    pub fn kind(&self) -> RedirectKind {
        if self.to > self.from {
            RedirectKind::Ladder
        } else {
            RedirectKind::Chute
        }
    }
}

/// Square and roll limits shared by a board and the rule tables built on it.
///
/// `last_square + die_faces` always fits in a [`Square`], so moving forward
/// from any valid square never overflows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    last_square: Square,
    die_faces: Roll,
}

impl Bounds {
    /// The winning square.
    #[must_use]
    pub fn last_square(&self) -> Square {
        self.last_square
    }

    /// Number of faces on the die.
    #[must_use]
    pub fn die_faces(&self) -> Roll {
        self.die_faces
    }

    #[must_use]
    pub fn is_valid_square(&self, square: Square) -> bool {
        square <= self.last_square
    }

    #[must_use]
    pub fn is_valid_roll(&self, roll: Roll) -> bool {
        (1..=self.die_faces).contains(&roll)
    }

    pub fn check_square(&self, square: Square) -> Result<(), ConfigError> {
        if self.is_valid_square(square) {
            Ok(())
        } else {
            Err(ConfigError::SquareOutOfRange {
                square,
                last_square: self.last_square,
            })
        }
    }

    pub fn check_roll(&self, roll: Roll) -> Result<(), ConfigError> {
        if self.is_valid_roll(roll) {
            Ok(())
        } else {
            Err(ConfigError::RollOutOfRange {
                roll,
                faces: self.die_faces,
            })
        }
    }
}

/// Immutable board shared by every worker during a batch.
///
/// There is no mutation API; build a new board with [`BoardBuilder`].
///
/// ## Example
///
/// ```
/// use chutes_sim::board::Board;
///
/// let board = Board::builder()
///     .last_square(20)
///     .ladder(3, 11)
///     .chute(17, 4)
///     .build()
///     .unwrap();
///
/// assert_eq!(board.resolve(3), 11);
/// assert_eq!(board.resolve(5), 5);
/// assert!(board.is_winning(20));
/// ```
#[derive(Clone, Debug)]
pub struct Board {
    bounds: Bounds,
    redirects: FxHashMap<Square, Square>,
}

impl Board {
    /// The classic 100-square layout with a six-sided die.
    #[must_use]
    pub fn standard() -> Self {
        let redirects = STANDARD_LADDERS
            .iter()
            .chain(STANDARD_CHUTES.iter())
            .copied()
            .collect();

        Self {
            bounds: Bounds {
                last_square: 100,
                die_faces: 6,
            },
            redirects,
        }
    }

    /// Start building a custom board.
    #[must_use]
    pub fn builder() -> BoardBuilder {
        BoardBuilder::new()
    }

    /// Square and roll limits, for validating anything placed on this board.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[must_use]
    pub fn last_square(&self) -> Square {
        self.bounds.last_square
    }

    #[must_use]
    pub fn die_faces(&self) -> Roll {
        self.bounds.die_faces
    }

    #[must_use]
    pub fn is_valid_square(&self, square: Square) -> bool {
        self.bounds.is_valid_square(square)
    }

    /// Where a token landing on `square` ends up. Redirects never chain.
    #[must_use]
    pub fn resolve(&self, square: Square) -> Square {
        self.redirects.get(&square).copied().unwrap_or(square)
    }

    /// The redirect starting on `square`, if any.
    #[must_use]
    pub fn redirect_at(&self, square: Square) -> Option<Redirect> {
        self.redirects
            .get(&square)
            .map(|&to| Redirect { from: square, to })
    }

    #[must_use]
    pub fn is_winning(&self, square: Square) -> bool {
        square == self.bounds.last_square
    }

    /// All redirects, ordered by source square.
    #[must_use]
    pub fn redirects(&self) -> Vec<Redirect> {
        let mut all: Vec<_> = self
            .redirects
            .iter()
            .map(|(&from, &to)| Redirect { from, to })
            .collect();
        all.sort_by_key(|r| r.from);
        all
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

/// Builder for custom boards.
///
/// All validation happens in [`BoardBuilder::build`].
#[derive(Clone, Debug)]
pub struct BoardBuilder {
    last_square: Square,
    die_faces: Roll,
    redirects: Vec<(Redirect, RedirectKind)>,
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self {
            last_square: 100,
            die_faces: 6,
            redirects: Vec::new(),
        }
    }
}

impl BoardBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_square(mut self, square: Square) -> Self {
        self.last_square = square;
        self
    }

    pub fn die_faces(mut self, faces: Roll) -> Self {
        self.die_faces = faces;
        self
    }

    pub fn ladder(mut self, from: Square, to: Square) -> Self {
        self.redirects.push((Redirect { from, to }, RedirectKind::Ladder));
        self
    }

    pub fn chute(mut self, from: Square, to: Square) -> Self {
        self.redirects.push((Redirect { from, to }, RedirectKind::Chute));
        self
    }

    /// Validate and build the board.
    pub fn build(self) -> Result<Board, ConfigError> {
        if self.last_square == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        if self.die_faces == 0 {
            return Err(ConfigError::NoDieFaces);
        }
        if self
            .last_square
            .checked_add(Square::from(self.die_faces))
            .is_none()
        {
            return Err(ConfigError::BoardTooLarge {
                last_square: self.last_square,
                die_faces: self.die_faces,
            });
        }

        let mut redirects = FxHashMap::default();
        for (redirect, kind) in &self.redirects {
            let Redirect { from, to } = *redirect;

            if from == 0 || from >= self.last_square {
                return Err(ConfigError::RedirectSource(from));
            }
            if to > self.last_square {
                return Err(ConfigError::SquareOutOfRange {
                    square: to,
                    last_square: self.last_square,
                });
            }
            if from == to || redirect.kind() != *kind {
                return Err(ConfigError::RedirectDirection { from, to });
            }
            if redirects.insert(from, to).is_some() {
                return Err(ConfigError::DuplicateRedirect(from));
            }
        }

        for (&from, &to) in &redirects {
            if redirects.contains_key(&to) {
                return Err(ConfigError::ChainedRedirect { from, to });
            }
        }

        Ok(Board {
            bounds: Bounds {
                last_square: self.last_square,
                die_faces: self.die_faces,
            },
            redirects,
        })
    }
}
