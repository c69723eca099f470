//! Validated standings table and the errors raised while building or querying it.

use crate::logic::flow_network::FlowError;
use crate::models::team::{TeamIndex, TeamRecord, TeamRow};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Errors that can occur while loading standings or querying a division.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EliminationError {
    /// Standings source could not be tokenized or a value is not an integer.
    Parse { line: Option<usize>, message: String },
    /// Standings source could not be read.
    Io(String),
    /// Table has no teams.
    EmptyDivision,
    /// Declared team count differs from the number of team rows.
    TeamCountMismatch { declared: usize, found: usize },
    /// Team name is empty.
    BlankTeamName { index: TeamIndex },
    /// Two rows share a team name.
    DuplicateTeam(String),
    /// A count is negative.
    NegativeField { team: String, field: &'static str, value: i64 },
    /// A count does not fit in 32 bits.
    FieldTooLarge { team: String, field: &'static str, value: i64 },
    /// Games-against row does not have one entry per team.
    RowLength { team: String, expected: usize, found: usize },
    /// A team has games scheduled against itself.
    NonZeroDiagonal(String),
    /// `against[a][b] != against[b][a]`.
    AsymmetricSchedule { first: String, second: String, first_count: u32, second_count: u32 },
    /// Games-against row does not add up to the team's remaining games.
    RemainingMismatch { team: String, remaining: u32, scheduled: u64 },
    /// Query named a team that is not in the table.
    UnknownTeam(String),
    /// Flow network rejected an edge or query. Indicates a construction bug.
    Network(FlowError),
}

impl EliminationError {
    /// True for every variant caused by an inconsistent standings source.
    pub fn is_malformed_input(&self) -> bool {
        !matches!(self, EliminationError::UnknownTeam(_) | EliminationError::Network(_))
    }
}

impl std::fmt::Display for EliminationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EliminationError::Parse { line: Some(line), message } => {
                write!(f, "Line {}: {}", line, message)
            }
            EliminationError::Parse { line: None, message } => write!(f, "{}", message),
            EliminationError::Io(message) => write!(f, "Could not read standings: {}", message),
            EliminationError::EmptyDivision => write!(f, "Standings contain no teams"),
            EliminationError::TeamCountMismatch { declared, found } => {
                write!(f, "Declared {} teams but found {}", declared, found)
            }
            EliminationError::BlankTeamName { index } => {
                write!(f, "Team at position {} has an empty name", index)
            }
            EliminationError::DuplicateTeam(name) => write!(f, "Team {} appears more than once", name),
            EliminationError::NegativeField { team, field, value } => {
                write!(f, "{} has negative {} ({})", team, field, value)
            }
            EliminationError::FieldTooLarge { team, field, value } => {
                write!(f, "{} has {} out of range ({})", team, field, value)
            }
            EliminationError::RowLength { team, expected, found } => {
                write!(f, "{} lists {} opponents, expected {}", team, found, expected)
            }
            EliminationError::NonZeroDiagonal(team) => {
                write!(f, "{} has games scheduled against itself", team)
            }
            EliminationError::AsymmetricSchedule {
                first,
                second,
                first_count,
                second_count,
            } => write!(
                f,
                "{} lists {} games against {}, but {} lists {}",
                first, first_count, second, second, second_count
            ),
            EliminationError::RemainingMismatch {
                team,
                remaining,
                scheduled,
            } => write!(
                f,
                "{} has {} remaining games but {} scheduled within the table",
                team, remaining, scheduled
            ),
            EliminationError::UnknownTeam(name) => write!(f, "Unknown team {}", name),
            EliminationError::Network(e) => write!(f, "Flow network error: {}", e),
        }
    }
}

impl std::error::Error for EliminationError {}

impl From<FlowError> for EliminationError {
    fn from(e: FlowError) -> Self {
        EliminationError::Network(e)
    }
}

/// How strictly to check a standings source.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Accept teams whose remaining games exceed the games scheduled within the table
    /// (the rest are against teams outside it). Off by default: row sum must equal remaining.
    #[serde(default)]
    pub allow_outside_games: bool,
}

/// Immutable standings table: records plus the games-against matrix.
#[derive(Clone, Debug)]
pub struct Standings {
    teams: Vec<TeamRecord>,
    against: Vec<Vec<u32>>,
    index: HashMap<String, TeamIndex>,
}

impl Standings {
    /// Validate raw rows into a standings table.
    pub fn from_rows(rows: Vec<TeamRow>, options: LoadOptions) -> Result<Self, EliminationError> {
        let n = rows.len();
        if n == 0 {
            return Err(EliminationError::EmptyDivision);
        }

        let mut index = HashMap::with_capacity(n);
        let mut teams = Vec::with_capacity(n);
        let mut against = Vec::with_capacity(n);
        for (i, row) in rows.into_iter().enumerate() {
            let name = row.name.trim().to_string();
            if name.is_empty() {
                return Err(EliminationError::BlankTeamName { index: i });
            }
            if index.insert(name.clone(), i).is_some() {
                return Err(EliminationError::DuplicateTeam(name));
            }
            if row.against.len() != n {
                return Err(EliminationError::RowLength {
                    team: name,
                    expected: n,
                    found: row.against.len(),
                });
            }
            let wins = count(&name, "wins", row.wins)?;
            let losses = count(&name, "losses", row.losses)?;
            let remaining = count(&name, "remaining", row.remaining)?;
            let games = row
                .against
                .iter()
                .map(|&g| count(&name, "games against", g))
                .collect::<Result<Vec<_>, _>>()?;
            against.push(games);
            teams.push(TeamRecord::new(name, wins, losses, remaining));
        }

        for i in 0..n {
            if against[i][i] != 0 {
                return Err(EliminationError::NonZeroDiagonal(teams[i].name.clone()));
            }
            for j in (i + 1)..n {
                if against[i][j] != against[j][i] {
                    return Err(EliminationError::AsymmetricSchedule {
                        first: teams[i].name.clone(),
                        second: teams[j].name.clone(),
                        first_count: against[i][j],
                        second_count: against[j][i],
                    });
                }
            }
            let scheduled: u64 = against[i].iter().map(|&g| u64::from(g)).sum();
            let remaining = u64::from(teams[i].remaining);
            let consistent = if options.allow_outside_games {
                scheduled <= remaining
            } else {
                scheduled == remaining
            };
            if !consistent {
                return Err(EliminationError::RemainingMismatch {
                    team: teams[i].name.clone(),
                    remaining: teams[i].remaining,
                    scheduled,
                });
            }
        }

        log::debug!("Loaded standings for {} teams", n);
        Ok(Self {
            teams,
            against,
            index,
        })
    }

    /// Number of teams (always at least one).
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// All records in table order.
    pub fn teams(&self) -> &[TeamRecord] {
        &self.teams
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.teams.iter().map(|t| t.name.as_str())
    }

    /// Record by index. Panics on an out-of-range index, like slice indexing.
    pub fn record(&self, team: TeamIndex) -> &TeamRecord {
        &self.teams[team]
    }

    pub fn index_of(&self, name: &str) -> Result<TeamIndex, EliminationError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| EliminationError::UnknownTeam(name.to_string()))
    }

    /// Remaining games between two teams, by index.
    pub fn against(&self, first: TeamIndex, second: TeamIndex) -> u32 {
        self.against[first][second]
    }
}

fn count(team: &str, field: &'static str, value: i64) -> Result<u32, EliminationError> {
    if value < 0 {
        return Err(EliminationError::NegativeField {
            team: team.to_string(),
            field,
            value,
        });
    }
    u32::try_from(value).map_err(|_| EliminationError::FieldTooLarge {
        team: team.to_string(),
        field,
        value,
    })
}
