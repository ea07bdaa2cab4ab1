//! Rule table decision engine.
//!
//! A `RuleTable` maps `(source, roll)` keys to forced destinations. Keys
//! without a rule fall back to the linear move `source + roll`.
//!
//! ## Conflicts
//!
//! The first registration for a key wins. Later registrations for the same
//! key are ignored and reported as `Ok(false)`.
//!
//! ## Cloning
//!
//! Both the insertion-ordered rule list and the lookup index are `im`
//! persistent structures, so `clone()` is O(1) and a clone that registers
//! more rules never affects the table it came from.

use im::{OrdMap, Vector};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Bounds, Roll, Square};
use crate::core::ConfigError;

use super::traits::Strategy;

/// An override: a token on `source` that rolled `roll` moves to `destination`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rule {
    pub source: Square,
    pub roll: Roll,
    pub destination: Square,
}

impl Rule {
    #[must_use]
    pub const fn new(source: Square, roll: Roll, destination: Square) -> Self {
        Self {
            source,
            roll,
            destination,
        }
    }

    #[must_use]
    pub const fn key(&self) -> RuleKey {
        RuleKey {
            source: self.source,
            roll: self.roll,
        }
    }
}

/// Lookup key of a rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleKey {
    pub source: Square,
    pub roll: Roll,
}

/// Serialisable form of a rule table, for JSON files.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    pub name: String,
    pub rules: Vec<Rule>,
}

impl RuleSet {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Ordered set of override rules, usable as a [`Strategy`].
///
/// ## Example
///
/// ```
/// use chutes_sim::board::Board;
/// use chutes_sim::strategy::RuleTable;
///
/// let board = Board::standard();
/// let mut table = RuleTable::new("Example", &board);
/// table.register(0, 3, 39).unwrap();
/// table.register(0, 4, 40).unwrap();
///
/// assert_eq!(table.decide(0, 3), 39);
/// assert_eq!(table.decide(0, 5), 5);
/// ```
#[derive(Clone, Debug)]
pub struct RuleTable {
    name: String,
    bounds: Bounds,
    order: Vector<Rule>,
    index: OrdMap<RuleKey, Square>,
}

impl RuleTable {
    /// Create an empty table whose rules are validated against `board`.
    pub fn new(name: impl Into<String>, board: &Board) -> Self {
        Self {
            name: name.into(),
            bounds: board.bounds(),
            order: Vector::new(),
            index: OrdMap::new(),
        }
    }

    /// Build a table from a rule set, registering rules in order.
    pub fn from_rule_set(set: &RuleSet, board: &Board) -> Result<Self, ConfigError> {
        let mut table = Self::new(set.name.clone(), board);
        for rule in &set.rules {
            table.register(rule.source, rule.roll, rule.destination)?;
        }
        Ok(table)
    }

    /// Register an override.
    ///
    /// Returns `Ok(true)` if the rule was added and `Ok(false)` if a rule for
    /// the same `(source, roll)` already exists (the existing rule is kept).
    pub fn register(
        &mut self,
        source: Square,
        roll: Roll,
        destination: Square,
    ) -> Result<bool, ConfigError> {
        self.bounds.check_square(source)?;
        self.bounds.check_square(destination)?;
        self.bounds.check_roll(roll)?;

        let rule = Rule::new(source, roll, destination);
        if let Some(&existing) = self.index.get(&rule.key()) {
            warn!(
                "{}: ignoring rule ({}, {}) -> {}, already mapped to {}",
                self.name, source, roll, destination, existing
            );
            return Ok(false);
        }

        self.index.insert(rule.key(), destination);
        self.order.push_back(rule);
        Ok(true)
    }

    /// Destination for a token on `position` that rolled `roll`.
    ///
    /// Never fails: keys without a rule move `roll` squares forward,
    /// saturating at `Square::MAX`.
    #[must_use]
    pub fn decide(&self, position: Square, roll: Roll) -> Square {
        self.index
            .get(&RuleKey {
                source: position,
                roll,
            })
            .copied()
            .unwrap_or(position.saturating_add(Square::from(roll)))
    }

    /// The rule registered for a key, if any.
    #[must_use]
    pub fn get(&self, source: Square, roll: Roll) -> Option<Rule> {
        self.index
            .get(&RuleKey { source, roll })
            .map(|&destination| Rule::new(source, roll, destination))
    }

    #[must_use]
    pub fn contains(&self, source: Square, roll: Roll) -> bool {
        self.index.contains_key(&RuleKey { source, roll })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Rules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.order.iter()
    }

    /// Export the table as a serialisable rule set.
    #[must_use]
    pub fn to_rule_set(&self) -> RuleSet {
        RuleSet {
            name: self.name.clone(),
            rules: self.order.iter().copied().collect(),
        }
    }
}

impl Strategy for RuleTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn decide(&self, _board: &Board, position: Square, roll: Roll) -> Square {
        RuleTable::decide(self, position, roll)
    }

    fn boxed_clone(&self) -> Box<dyn Strategy> {
        Box::new(self.clone())
    }
}
