//! Directed capacitated graph with Edmonds-Karp max flow and min-cut membership.
//!
//! Vertices are plain indices `0..vertex_count`. Edges live in one shared arena;
//! every forward edge is immediately followed by its reverse residual edge, so the
//! partner of edge `e` is always `e ^ 1`.

use std::collections::VecDeque;

/// Index of a forward edge returned by [`FlowNetwork::add_edge`].
pub type EdgeId = usize;

/// Capacity used for edges that must never be the bottleneck.
pub const UNBOUNDED: i64 = i64::MAX;

/// Errors raised by the flow solver. All of them indicate caller misuse.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FlowError {
    /// Edge capacity was negative.
    InvalidCapacity { from: usize, to: usize, capacity: i64 },
    /// Vertex index is not below the network's vertex count.
    VertexOutOfRange { vertex: usize, vertex_count: usize },
    /// Edge from a vertex to itself.
    SelfLoop(usize),
    /// `max_flow` called with the same vertex as source and sink.
    SourceIsSink(usize),
    /// Min-cut queried before `max_flow` ran (or after the graph changed).
    NotSolved,
}

impl std::fmt::Display for FlowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlowError::InvalidCapacity { from, to, capacity } => {
                write!(f, "Edge {} -> {} has negative capacity {}", from, to, capacity)
            }
            FlowError::VertexOutOfRange { vertex, vertex_count } => {
                write!(f, "Vertex {} out of range (network has {} vertices)", vertex, vertex_count)
            }
            FlowError::SelfLoop(v) => write!(f, "Self-loop on vertex {}", v),
            FlowError::SourceIsSink(v) => write!(f, "Source and sink are both vertex {}", v),
            FlowError::NotSolved => write!(f, "Max flow has not been computed"),
        }
    }
}

impl std::error::Error for FlowError {}

#[derive(Clone, Debug)]
struct Edge {
    to: usize,
    capacity: i64,
    flow: i64,
}

impl Edge {
    fn residual(&self) -> i64 {
        self.capacity - self.flow
    }
}

/// Flow network addressed by vertex index.
#[derive(Clone, Debug)]
pub struct FlowNetwork {
    adjacency: Vec<Vec<EdgeId>>,
    edges: Vec<Edge>,
    /// Source-side vertices of the last computed cut. `None` until `max_flow` runs.
    source_side: Option<Vec<bool>>,
}

impl FlowNetwork {
    /// Empty network with `vertex_count` vertices and no edges.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); vertex_count],
            edges: Vec::new(),
            source_side: None,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of forward edges (reverse residual edges are not counted).
    pub fn edge_count(&self) -> usize {
        self.edges.len() / 2
    }

    /// Insert `from -> to` with the given capacity and its zero-capacity reverse edge.
    pub fn add_edge(&mut self, from: usize, to: usize, capacity: i64) -> Result<EdgeId, FlowError> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;
        if from == to {
            return Err(FlowError::SelfLoop(from));
        }
        if capacity < 0 {
            return Err(FlowError::InvalidCapacity { from, to, capacity });
        }
        let id = self.edges.len();
        self.edges.push(Edge { to, capacity, flow: 0 });
        self.edges.push(Edge { to: from, capacity: 0, flow: 0 });
        self.adjacency[from].push(id);
        self.adjacency[to].push(id + 1);
        self.source_side = None;
        Ok(id)
    }

    /// Current flow on a forward edge.
    pub fn flow(&self, edge: EdgeId) -> Option<i64> {
        self.forward(edge).map(|e| e.flow)
    }

    /// Capacity of a forward edge.
    pub fn capacity(&self, edge: EdgeId) -> Option<i64> {
        self.forward(edge).map(|e| e.capacity)
    }

    fn forward(&self, edge: EdgeId) -> Option<&Edge> {
        self.edges.get(edge).filter(|_| edge % 2 == 0)
    }

    /// Push flow along shortest augmenting paths until none remain.
    ///
    /// Returns the net flow leaving `source`. Calling it again on a solved network
    /// finds no further paths and returns the same value.
    pub fn max_flow(&mut self, source: usize, sink: usize) -> Result<i64, FlowError> {
        self.check_vertex(source)?;
        self.check_vertex(sink)?;
        if source == sink {
            return Err(FlowError::SourceIsSink(source));
        }

        let mut augmentations = 0usize;
        loop {
            let parent = self.bfs(source);
            if parent[sink].is_none() {
                // Final BFS visited exactly the source side of the minimum cut.
                let reachable = parent
                    .iter()
                    .enumerate()
                    .map(|(v, p)| v == source || p.is_some())
                    .collect();
                self.source_side = Some(reachable);
                break;
            }

            let mut bottleneck = UNBOUNDED;
            let mut v = sink;
            while let Some(e) = parent[v] {
                bottleneck = bottleneck.min(self.edges[e].residual());
                v = self.edges[e ^ 1].to;
            }

            let mut v = sink;
            while let Some(e) = parent[v] {
                self.edges[e].flow += bottleneck;
                self.edges[e ^ 1].flow -= bottleneck;
                v = self.edges[e ^ 1].to;
            }
            augmentations += 1;
            log::trace!("augmenting path {} carries {}", augmentations, bottleneck);
        }

        let value: i64 = self.adjacency[source]
            .iter()
            .map(|&e| self.edges[e].flow)
            .sum();
        log::trace!(
            "max flow {} after {} augmentations ({} vertices, {} edges)",
            value,
            augmentations,
            self.vertex_count(),
            self.edge_count()
        );
        Ok(value)
    }

    /// Whether `vertex` is on the source side of the minimum cut.
    pub fn in_min_cut(&self, vertex: usize) -> Result<bool, FlowError> {
        self.check_vertex(vertex)?;
        let side = self.source_side.as_ref().ok_or(FlowError::NotSolved)?;
        Ok(side[vertex])
    }

    /// All source-side vertices of the minimum cut, ascending.
    pub fn min_cut(&self) -> Result<Vec<usize>, FlowError> {
        let side = self.source_side.as_ref().ok_or(FlowError::NotSolved)?;
        Ok(side
            .iter()
            .enumerate()
            .filter_map(|(v, &inside)| inside.then_some(v))
            .collect())
    }

    /// Breadth-first search over positive-residual edges.
    /// `parent[v]` is the edge used to reach `v`; the source itself has no parent.
    fn bfs(&self, source: usize) -> Vec<Option<EdgeId>> {
        let mut parent = vec![None; self.vertex_count()];
        let mut visited = vec![false; self.vertex_count()];
        let mut queue = VecDeque::new();
        visited[source] = true;
        queue.push_back(source);
        while let Some(u) = queue.pop_front() {
            for &e in &self.adjacency[u] {
                let edge = &self.edges[e];
                if edge.residual() > 0 && !visited[edge.to] {
                    visited[edge.to] = true;
                    parent[edge.to] = Some(e);
                    queue.push_back(edge.to);
                }
            }
        }
        parent
    }

    fn check_vertex(&self, vertex: usize) -> Result<(), FlowError> {
        if vertex < self.vertex_count() {
            Ok(())
        } else {
            Err(FlowError::VertexOutOfRange {
                vertex,
                vertex_count: self.vertex_count(),
            })
        }
    }
}
