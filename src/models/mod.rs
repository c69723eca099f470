//! Data structures for elimination analysis: team records, standings, verdicts, divisions.

mod division;
mod standings;
mod team;
mod verdict;

pub use division::{Division, DivisionId, DivisionSummary};
pub use standings::{EliminationError, LoadOptions, Standings};
pub use team::{TeamIndex, TeamRecord, TeamRow};
pub use verdict::{Certificate, CertificateKind, TeamReport, Verdict};
