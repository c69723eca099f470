//! Elimination decision: trivial check, per-team flow network, certificate from the min cut.
//!
//! For the evaluated team `t` with best case `w[t] + r[t]`, the network is
//!
//! ```text
//! source --g(a,b)--> game(a,b) --inf--> team a --(w[t] + r[t] - w[a])--> sink
//!                              \--inf--> team b --(w[t] + r[t] - w[b])--> sink
//! ```
//!
//! over every pair of teams other than `t`. If the max flow carries every game,
//! the remaining games can be split without any team passing `t`.

use crate::logic::flow_network::{FlowNetwork, UNBOUNDED};
use crate::models::{Certificate, CertificateKind, EliminationError, Standings, TeamIndex, Verdict};
use rayon::prelude::*;

/// First team (table order) that already has more wins than `team` can possibly reach.
pub fn trivial_eliminator(standings: &Standings, team: TeamIndex) -> Option<TeamIndex> {
    let best = standings.record(team).max_wins();
    standings
        .teams()
        .iter()
        .enumerate()
        .find(|(i, other)| *i != team && u64::from(other.wins) > best)
        .map(|(i, _)| i)
}

/// Flow network for one evaluated team, with the mapping back to team indices.
///
/// Vertex layout: source `0`, the other teams at `1..=m` in table order, one game
/// vertex per unordered pair of other teams, sink last.
#[derive(Clone, Debug)]
pub struct TeamNetwork {
    network: FlowNetwork,
    source: usize,
    sink: usize,
    /// `others[k]` is the team at vertex `k + 1`.
    others: Vec<TeamIndex>,
    scheduled: i64,
}

/// Result of solving a [`TeamNetwork`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NetworkOutcome {
    pub flow: i64,
    /// Games left among the teams other than the evaluated one.
    pub scheduled: i64,
    /// Team vertices on the source side of the minimum cut, in table order.
    pub cut: Vec<TeamIndex>,
}

impl NetworkOutcome {
    /// Every remaining game among the other teams fits under the win caps.
    pub fn is_saturated(&self) -> bool {
        self.flow == self.scheduled
    }
}

impl TeamNetwork {
    pub fn vertex_count(&self) -> usize {
        self.network.vertex_count()
    }

    pub fn edge_count(&self) -> usize {
        self.network.edge_count()
    }

    pub fn scheduled(&self) -> i64 {
        self.scheduled
    }

    /// Run max flow and read the team side of the minimum cut.
    pub fn solve(mut self) -> Result<NetworkOutcome, EliminationError> {
        let flow = self.network.max_flow(self.source, self.sink)?;
        let mut cut = Vec::new();
        for (k, &team) in self.others.iter().enumerate() {
            if self.network.in_min_cut(k + 1)? {
                cut.push(team);
            }
        }
        Ok(NetworkOutcome {
            flow,
            scheduled: self.scheduled,
            cut,
        })
    }
}

/// Build the flow network deciding whether `team` can still finish first.
///
/// Fails with [`EliminationError::Network`] if some other team already exceeds
/// `team`'s best case; run [`trivial_eliminator`] first.
pub fn build_network(standings: &Standings, team: TeamIndex) -> Result<TeamNetwork, EliminationError> {
    let record = standings.record(team);
    let best = i64::from(record.wins) + i64::from(record.remaining);

    let others: Vec<TeamIndex> = (0..standings.len()).filter(|&i| i != team).collect();
    let m = others.len();
    let pairs = m * m.saturating_sub(1) / 2;
    let source = 0;
    let sink = m + pairs + 1;
    let mut network = FlowNetwork::new(m + pairs + 2);

    for (k, &other) in others.iter().enumerate() {
        let cap = best - i64::from(standings.record(other).wins);
        network.add_edge(k + 1, sink, cap)?;
    }

    let mut scheduled = 0;
    let mut game = m + 1;
    for a in 0..m {
        for b in (a + 1)..m {
            let games = i64::from(standings.against(others[a], others[b]));
            if games > 0 {
                network.add_edge(source, game, games)?;
                network.add_edge(game, a + 1, UNBOUNDED)?;
                network.add_edge(game, b + 1, UNBOUNDED)?;
                scheduled += games;
            }
            game += 1;
        }
    }

    Ok(TeamNetwork {
        network,
        source,
        sink,
        others,
        scheduled,
    })
}

/// Decide whether `team` is eliminated and, if so, by which subset.
pub fn evaluate_team(standings: &Standings, team: TeamIndex) -> Result<Verdict, EliminationError> {
    let name = &standings.record(team).name;
    if let Some(leader) = trivial_eliminator(standings, team) {
        log::debug!(
            "{} trivially eliminated by {}",
            name,
            standings.record(leader).name
        );
        return Ok(Verdict::Eliminated(Certificate {
            teams: vec![leader],
            kind: CertificateKind::Trivial,
        }));
    }

    let outcome = build_network(standings, team)?.solve()?;
    log::debug!(
        "{}: flow {} of {} scheduled games",
        name,
        outcome.flow,
        outcome.scheduled
    );
    if outcome.is_saturated() {
        Ok(Verdict::Alive)
    } else {
        Ok(Verdict::Eliminated(Certificate {
            teams: outcome.cut,
            kind: CertificateKind::MinCut,
        }))
    }
}

/// Evaluate every team. Each team gets its own network, so teams run in parallel.
pub fn evaluate_all(standings: &Standings) -> Result<Vec<Verdict>, EliminationError> {
    (0..standings.len())
        .into_par_iter()
        .map(|team| evaluate_team(standings, team))
        .collect()
}
