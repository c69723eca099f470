//! Team record and the raw input row it is validated from.

use serde::{Deserialize, Serialize};

/// Position of a team in the standings table (0-based, table order).
pub type TeamIndex = usize;

/// Current record of one team.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    /// Games left to play, including any against teams outside the table.
    pub remaining: u32,
}

impl TeamRecord {
    pub fn new(name: impl Into<String>, wins: u32, losses: u32, remaining: u32) -> Self {
        Self {
            name: name.into(),
            wins,
            losses,
            remaining,
        }
    }

    /// Best possible final win total: win every remaining game.
    pub fn max_wins(&self) -> u64 {
        u64::from(self.wins) + u64::from(self.remaining)
    }
}

/// One unvalidated row of a standings source, as read from text, CSV or JSON.
///
/// Counts are signed so that negative values reach validation and are reported
/// as malformed input instead of failing to parse.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamRow {
    pub name: String,
    pub wins: i64,
    pub losses: i64,
    pub remaining: i64,
    /// Games left against each team of the table, in table order (own slot is zero).
    pub against: Vec<i64>,
}

impl TeamRow {
    pub fn new(
        name: impl Into<String>,
        wins: i64,
        losses: i64,
        remaining: i64,
        against: Vec<i64>,
    ) -> Self {
        Self {
            name: name.into(),
            wins,
            losses,
            remaining,
            against,
        }
    }
}
