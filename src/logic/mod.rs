//! Elimination logic: flow solver, per-team networks, standings loaders.

mod elimination;
pub mod flow_network;
mod parse;

pub use elimination::{
    build_network, evaluate_all, evaluate_team, trivial_eliminator, NetworkOutcome, TeamNetwork,
};
pub use flow_network::{EdgeId, FlowError, FlowNetwork, UNBOUNDED};
pub use parse::{load_standings, parse_standings, read_standings_csv};
