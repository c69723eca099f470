//! Division: standings plus the cached verdict of every team.

use crate::logic::evaluate_all;
use crate::models::standings::{EliminationError, Standings};
use crate::models::team::{TeamIndex, TeamRecord};
use crate::models::verdict::{TeamReport, Verdict};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a division.
pub type DivisionId = Uuid;

/// Standings with every team's elimination verdict computed up front.
/// Immutable: changed standings need a new division.
#[derive(Clone, Debug)]
pub struct Division {
    pub id: DivisionId,
    standings: Standings,
    verdicts: Vec<Verdict>,
}

/// Full division view (for API responses).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DivisionSummary {
    pub id: DivisionId,
    pub teams: Vec<TeamReport>,
}

impl Division {
    /// Evaluate every team of the standings.
    pub fn new(standings: Standings) -> Result<Self, EliminationError> {
        let verdicts = evaluate_all(&standings)?;
        let eliminated = verdicts.iter().filter(|v| v.is_eliminated()).count();
        log::info!(
            "Evaluated {} teams: {} eliminated",
            standings.len(),
            eliminated
        );
        Ok(Self {
            id: Uuid::new_v4(),
            standings,
            verdicts,
        })
    }

    pub fn standings(&self) -> &Standings {
        &self.standings
    }

    pub fn number_of_teams(&self) -> usize {
        self.standings.len()
    }

    /// Team names in table order.
    pub fn teams(&self) -> impl Iterator<Item = &str> {
        self.standings.names()
    }

    pub fn wins(&self, team: &str) -> Result<u32, EliminationError> {
        Ok(self.record_of(team)?.wins)
    }

    pub fn losses(&self, team: &str) -> Result<u32, EliminationError> {
        Ok(self.record_of(team)?.losses)
    }

    pub fn remaining(&self, team: &str) -> Result<u32, EliminationError> {
        Ok(self.record_of(team)?.remaining)
    }

    /// Remaining games between two teams.
    pub fn against(&self, team1: &str, team2: &str) -> Result<u32, EliminationError> {
        let a = self.standings.index_of(team1)?;
        let b = self.standings.index_of(team2)?;
        Ok(self.standings.against(a, b))
    }

    pub fn verdict(&self, team: &str) -> Result<&Verdict, EliminationError> {
        Ok(&self.verdicts[self.standings.index_of(team)?])
    }

    pub fn is_eliminated(&self, team: &str) -> Result<bool, EliminationError> {
        Ok(self.verdict(team)?.is_eliminated())
    }

    /// Names of the subset that eliminates `team`; `Ok(None)` if it is not eliminated.
    pub fn certificate_of_elimination(&self, team: &str) -> Result<Option<Vec<&str>>, EliminationError> {
        Ok(self.verdict(team)?.certificate().map(|c| {
            c.teams
                .iter()
                .map(|&i| self.standings.record(i).name.as_str())
                .collect()
        }))
    }

    /// Report for one team.
    pub fn team_report(&self, team: &str) -> Result<TeamReport, EliminationError> {
        Ok(self.report_at(self.standings.index_of(team)?))
    }

    /// Reports for every team in table order.
    pub fn report(&self) -> Vec<TeamReport> {
        (0..self.number_of_teams()).map(|i| self.report_at(i)).collect()
    }

    pub fn summary(&self) -> DivisionSummary {
        DivisionSummary {
            id: self.id,
            teams: self.report(),
        }
    }

    fn record_of(&self, team: &str) -> Result<&TeamRecord, EliminationError> {
        Ok(self.standings.record(self.standings.index_of(team)?))
    }

    fn report_at(&self, team: TeamIndex) -> TeamReport {
        let record = self.standings.record(team);
        let certificate = self.verdicts[team].certificate();
        TeamReport {
            name: record.name.clone(),
            wins: record.wins,
            losses: record.losses,
            remaining: record.remaining,
            eliminated: certificate.is_some(),
            certificate: certificate.map(|c| {
                c.teams
                    .iter()
                    .map(|&i| self.standings.record(i).name.clone())
                    .collect()
            }),
            certificate_kind: certificate.map(|c| c.kind),
        }
    }
}
