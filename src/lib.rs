//! Division elimination: library with models, elimination logic, and configuration.

pub mod config;
pub mod logic;
pub mod models;

pub use logic::{
    build_network, evaluate_all, evaluate_team, load_standings, parse_standings,
    read_standings_csv, trivial_eliminator, FlowError, FlowNetwork, NetworkOutcome, TeamNetwork,
};
pub use models::{
    Certificate, CertificateKind, Division, DivisionId, DivisionSummary, EliminationError,
    LoadOptions, Standings, TeamIndex, TeamRecord, TeamReport, TeamRow, Verdict,
};
