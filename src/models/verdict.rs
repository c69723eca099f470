//! Per-team elimination verdict, certificate, and the report view of both.

use crate::models::team::TeamIndex;
use serde::{Deserialize, Serialize};

/// How a certificate was found.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificateKind {
    /// A single team already has more wins than the evaluated team can reach.
    Trivial,
    /// Source side of the minimum cut of the team's flow network.
    MinCut,
}

/// Witness subset R proving elimination. Never empty.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    /// Team indices in table order.
    pub teams: Vec<TeamIndex>,
    pub kind: CertificateKind,
}

/// Outcome of evaluating one team.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Alive,
    Eliminated(Certificate),
}

impl Verdict {
    pub fn is_eliminated(&self) -> bool {
        matches!(self, Verdict::Eliminated(_))
    }

    pub fn certificate(&self) -> Option<&Certificate> {
        match self {
            Verdict::Alive => None,
            Verdict::Eliminated(c) => Some(c),
        }
    }
}

/// Report view of one team (for API responses and the text report).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamReport {
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub remaining: u32,
    pub eliminated: bool,
    /// Names of the eliminating subset; `None` if not eliminated.
    pub certificate: Option<Vec<String>>,
    pub certificate_kind: Option<CertificateKind>,
}

impl std::fmt::Display for TeamReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.certificate {
            Some(teams) => write!(
                f,
                "{} is eliminated by the subset R = {{ {} }}",
                self.name,
                teams.join(" ")
            ),
            None => write!(f, "{} is not eliminated", self.name),
        }
    }
}
