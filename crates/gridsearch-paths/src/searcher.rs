use std::collections::BinaryHeap;
use std::fmt;
use std::str::FromStr;

use gridsearch_core::{Dims, Pos};

use crate::path::reconstruct;
use crate::traits::{AstarPather, Pather, WeightedPather};

/// Sentinel value meaning "unreachable" in the distance scratch map.
pub const UNREACHABLE: i32 = i32::MAX;

// ---------------------------------------------------------------------------
// Algorithm
// ---------------------------------------------------------------------------

/// The four search strategies.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Algorithm {
    /// Depth-first descent in neighbor priority order.
    Dfs,
    /// Breadth-first, minimum hop count.
    Bfs,
    /// Minimum total cell weight.
    Dijkstra,
    /// Manhattan-guided best-first at unit step cost.
    Astar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Dfs,
        Algorithm::Bfs,
        Algorithm::Dijkstra,
        Algorithm::Astar,
    ];

    /// The request token used by input layers (`dfs`, `bfs`, `dijkstra`, `astar`).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dfs => "dfs",
            Self::Bfs => "bfs",
            Self::Dijkstra => "dijkstra",
            Self::Astar => "astar",
        }
    }

    /// Human-readable name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dfs => "Depth-first search",
            Self::Bfs => "Breadth-first search",
            Self::Dijkstra => "Dijkstra",
            Self::Astar => "A*",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request token that names no algorithm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAlgorithm(pub String);

impl fmt::Display for UnknownAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown algorithm \u{201c}{}\u{201d} (expected dfs, bfs, dijkstra or astar)",
            self.0
        )
    }
}

impl std::error::Error for UnknownAlgorithm {}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == token)
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Predecessors
// ---------------------------------------------------------------------------

/// Per-run mapping from a cell to the cell it was reached from.
///
/// Stored densely, one slot per lattice position, so a cell can never have
/// two entries.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Predecessors {
    dims: Dims,
    parent: Vec<Option<Pos>>,
    len: usize,
}

impl Predecessors {
    /// An empty table for the given lattice.
    pub fn new(dims: Dims) -> Self {
        Self {
            dims,
            parent: vec![None; dims.len()],
            len: 0,
        }
    }

    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// The cell `p` was reached from, if any.
    #[inline]
    pub fn get(&self, p: Pos) -> Option<Pos> {
        self.dims.index(p).and_then(|i| self.parent[i])
    }

    #[inline]
    pub fn contains(&self, p: Pos) -> bool {
        self.get(p).is_some()
    }

    /// Record the first discovery of `p` from `from`.
    ///
    /// Returns `false` (and changes nothing) if `p` already has a
    /// predecessor or lies outside the lattice.
    pub fn discover(&mut self, p: Pos, from: Pos) -> bool {
        let Some(i) = self.dims.index(p) else {
            return false;
        };
        if self.parent[i].is_some() {
            return false;
        }
        self.parent[i] = Some(from);
        self.len += 1;
        true
    }

    /// Point `p` at a cheaper predecessor.
    ///
    /// Only called after a strict cost improvement where `from` is already
    /// finalized, which keeps the table acyclic.
    pub fn improve(&mut self, p: Pos, from: Pos) {
        if let Some(i) = self.dims.index(p) {
            if self.parent[i].replace(from).is_none() {
                self.len += 1;
            }
        }
    }

    /// Number of cells with a predecessor.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate over `(cell, predecessor)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, Pos)> + '_ {
        self.parent
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.map(|from| (self.dims.pos(i), from)))
    }
}

// ---------------------------------------------------------------------------
// SearchOutcome
// ---------------------------------------------------------------------------

/// The result of one search run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchOutcome {
    pub algorithm: Algorithm,
    pub start: Pos,
    pub end: Pos,
    /// Whether `end` was reached.
    pub found: bool,
    /// Cells in the order they were marked visited. Never contains `start`
    /// or `end`.
    pub trace: Vec<Pos>,
    pub predecessors: Predecessors,
}

impl SearchOutcome {
    /// Cells strictly between start and end, in start-to-end order.
    ///
    /// Empty when nothing was found.
    pub fn path(&self) -> Vec<Pos> {
        if !self.found {
            return Vec::new();
        }
        reconstruct(&self.predecessors, self.start, self.end)
    }
}

// ---------------------------------------------------------------------------
// Priority frontier
// ---------------------------------------------------------------------------

/// Reference into the lattice, ordered by `priority` then insertion `seq`.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) priority: i32,
    seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops the smallest priority first,
        // and the earliest insertion among equals.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority frontier with FIFO tie-breaking.
#[derive(Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<NodeRef>,
    seq: u64,
}

impl Frontier {
    pub(crate) fn push(&mut self, idx: usize, priority: i32) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(NodeRef { idx, priority, seq });
    }

    pub(crate) fn pop(&mut self) -> Option<NodeRef> {
        self.heap.pop()
    }
}

// ---------------------------------------------------------------------------
// Searcher
// ---------------------------------------------------------------------------

/// Runs searches over a lattice and owns their scratch buffers.
///
/// The visited/closed marks, the distance map and the neighbor buffer are
/// reused across runs; every run starts from a clean slate and returns a
/// fresh [`SearchOutcome`].
pub struct Searcher {
    pub(crate) dims: Dims,
    pub(crate) closed: Vec<bool>,
    pub(crate) dist: Vec<i32>,
    pub(crate) nbuf: Vec<Pos>,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(Dims::default())
    }
}

impl Searcher {
    /// Create a searcher with scratch space for `dims`.
    pub fn new(dims: Dims) -> Self {
        Self {
            dims,
            closed: vec![false; dims.len()],
            dist: vec![UNREACHABLE; dims.len()],
            nbuf: Vec::with_capacity(4),
        }
    }

    /// The lattice the scratch space is currently sized for.
    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Run `algorithm` from `start` to `end`.
    pub fn run<P>(&mut self, algorithm: Algorithm, pather: &P, start: Pos, end: Pos) -> SearchOutcome
    where
        P: WeightedPather + AstarPather,
    {
        match algorithm {
            Algorithm::Dfs => self.dfs(pather, start, end),
            Algorithm::Bfs => self.bfs(pather, start, end),
            Algorithm::Dijkstra => self.dijkstra(pather, start, end),
            Algorithm::Astar => self.astar(pather, start, end),
        }
    }

    /// Reset scratch space for a run over `pather` and build the empty
    /// outcome the algorithm fills in.
    pub(crate) fn begin<P: Pather>(
        &mut self,
        algorithm: Algorithm,
        pather: &P,
        start: Pos,
        end: Pos,
    ) -> SearchOutcome {
        let dims = pather.dims();
        if dims != self.dims {
            self.dims = dims;
            self.closed = vec![false; dims.len()];
            self.dist = vec![UNREACHABLE; dims.len()];
        } else {
            self.closed.fill(false);
            self.dist.fill(UNREACHABLE);
        }
        SearchOutcome {
            algorithm,
            start,
            end,
            found: false,
            trace: Vec::new(),
            predecessors: Predecessors::new(dims),
        }
    }

    #[inline]
    pub(crate) fn idx(&self, p: Pos) -> Option<usize> {
        self.dims.index(p)
    }
}
