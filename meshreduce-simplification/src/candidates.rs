//! Candidate collapse set
//!
//! A min-priority queue of edge collapses keyed by cost. Entries are value
//! snapshots: when a vertex changes, fresh entries are pushed for its edges
//! and the superseded ones are left in the queue to be recognised as stale
//! when they surface.

use crate::params::SimplifyParams;
use crate::topology::Mesh;
use meshreduce_core::Point3d;
use priority_queue::PriorityQueue;
use std::cmp::Ordering;
use tracing::trace;

/// A scored edge collapse `(v1, v2)` with `v1 < v2`.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub v1: usize,
    pub v2: usize,
    /// Merge position for the surviving vertex
    pub target: Point3d,
    pub cost: f64,
    /// Endpoint versions the score was computed from
    stamps: [u32; 2],
    seq: u64,
}

impl Candidate {
    /// Still describes the current state of `mesh`: both endpoints live and
    /// unchanged since scoring, and the edge still on a valid triangle.
    pub fn is_fresh(&self, mesh: &Mesh) -> bool {
        let (a, b) = (mesh.vertex(self.v1), mesh.vertex(self.v2));
        a.is_alive()
            && b.is_alive()
            && a.version() == self.stamps[0]
            && b.version() == self.stamps[1]
            && mesh.edge_exists(self.v1, self.v2)
    }

    /// Insertion order, used to break cost ties.
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max-queue: lower cost, then earlier insertion, pops first
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Priority structure over unique undirected edges.
pub struct CandidateSet {
    queue: PriorityQueue<u64, Candidate>,
    next_seq: u64,
    boundary_penalty: f64,
    determinant_epsilon: f64,
    midpoint_fallbacks: usize,
}

impl CandidateSet {
    /// An empty set scoring with the given parameters.
    pub fn new(params: &SimplifyParams) -> Self {
        Self {
            queue: PriorityQueue::new(),
            next_seq: 0,
            boundary_penalty: params.boundary_penalty,
            determinant_epsilon: params.determinant_epsilon,
            midpoint_fallbacks: 0,
        }
    }

    /// Score every unique edge of the valid triangles of `mesh`.
    pub fn build(mesh: &Mesh, params: &SimplifyParams) -> Self {
        let mut set = Self::new(params);
        for (a, b) in mesh.unique_edges() {
            let candidate = set.score(mesh, a, b);
            set.push(candidate);
        }
        set
    }

    /// Optimal merge position and cost of collapsing `(v1, v2)`.
    ///
    /// The position minimises the summed endpoint quadrics, or is the edge
    /// midpoint when that system is singular. The cost is multiplied by the
    /// boundary penalty when either endpoint lies on a boundary.
    pub fn score(&mut self, mesh: &Mesh, v1: usize, v2: usize) -> Candidate {
        let (a, b) = (v1.min(v2), v1.max(v2));
        let (va, vb) = (mesh.vertex(a), mesh.vertex(b));

        let combined = *va.quadric() + *vb.quadric();
        let target = match combined.minimizer(self.determinant_epsilon) {
            Some(p) => p,
            None => {
                trace!(v1 = a, v2 = b, "singular quadric, using edge midpoint");
                self.midpoint_fallbacks += 1;
                Point3d::from((va.position().coords + vb.position().coords) * 0.5)
            }
        };

        let mut cost = (va.quadric().error(&target) + vb.quadric().error(&target)).max(0.0);
        if mesh.is_boundary_vertex(a) || mesh.is_boundary_vertex(b) {
            cost *= self.boundary_penalty;
        }

        Candidate {
            v1: a,
            v2: b,
            target,
            cost,
            stamps: [va.version(), vb.version()],
            seq: 0,
        }
    }

    /// Insert a candidate behind every equal-cost entry already queued.
    pub fn push(&mut self, mut candidate: Candidate) {
        candidate.seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(candidate.seq, candidate);
    }

    /// Put back a popped candidate at its original position in the order.
    pub fn restore(&mut self, candidate: Candidate) {
        self.queue.push(candidate.seq, candidate);
    }

    /// Remove and return the minimum-cost entry, stale or not.
    pub fn pop_cheapest(&mut self) -> Option<Candidate> {
        self.queue.pop().map(|(_, candidate)| candidate)
    }

    /// Cost of the entry [`pop_cheapest`](Self::pop_cheapest) would return.
    pub fn peek_cost(&self) -> Option<f64> {
        self.queue.peek().map(|(_, candidate)| candidate.cost)
    }

    /// Rescore every edge still incident to `v` and queue the new scores.
    ///
    /// Older entries for those edges stay queued and fail the freshness
    /// check once popped. Returns the number of entries pushed.
    pub fn invalidate_and_rescore_around(&mut self, mesh: &Mesh, v: usize) -> usize {
        if !mesh.is_alive(v) {
            return 0;
        }
        let neighbors = mesh.neighbors(v);
        for &w in &neighbors {
            let candidate = self.score(mesh, v, w);
            self.push(candidate);
        }
        neighbors.len()
    }

    /// Queued entries, including stale ones.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// How many scores fell back to the edge midpoint.
    pub fn midpoint_fallbacks(&self) -> usize {
        self.midpoint_fallbacks
    }
}
