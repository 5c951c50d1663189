//! Bounded bidirectional BFS connectivity score.
//!
//! Used as a low-confidence fallback for predicates without a dedicated
//! rule: the closer two entities are in the reference graph, ignoring edge
//! labels, the higher the score. Work is bounded by `frontier_cap` visited
//! nodes per side and by `max_depth` hops per side, independent of graph
//! size.

use std::collections::{HashMap, VecDeque};

use super::index::Adjacency;
use crate::symbol::SymbolId;

/// Why a search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Start and end are the same entity.
    SameNode,
    /// The two frontiers met.
    Met,
    /// One side's visited map reached `frontier_cap`.
    FrontierCap,
    /// The next node to expand already sits at `max_depth`.
    DepthBound,
    /// Both queues ran empty.
    Exhausted,
}

/// Full result of a path search.
#[derive(Debug, Clone, PartialEq)]
pub struct PathOutcome {
    /// `1 / (d + 1)` on a meeting, 1.0 for identical ends, else 0.0.
    pub score: f64,
    /// Hop distance of the path found.
    pub distance: Option<usize>,
    /// Nodes popped and expanded from the forward queue.
    pub expanded_forward: usize,
    /// Nodes popped and expanded from the backward queue.
    pub expanded_backward: usize,
    pub stop: StopReason,
}

impl PathOutcome {
    fn stopped(stop: StopReason, expanded_forward: usize, expanded_backward: usize) -> Self {
        Self {
            score: 0.0,
            distance: None,
            expanded_forward,
            expanded_backward,
            stop,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Forward,
    Backward,
}

/// Search bounds for [`score_path`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathScorer {
    pub max_depth: usize,
    pub frontier_cap: usize,
}

impl PathScorer {
    pub fn new(max_depth: usize, frontier_cap: usize) -> Self {
        Self {
            max_depth,
            frontier_cap,
        }
    }

    /// Connectivity score between `start` and `end`.
    pub fn score<G: Adjacency + ?Sized>(&self, graph: &G, start: SymbolId, end: SymbolId) -> f64 {
        self.search(graph, start, end).score
    }

    /// Run the search and report how it ended.
    ///
    /// Each step expands one node from the smaller open queue (ties go
    /// forward). Forward expansion follows outgoing edges of any predicate,
    /// backward expansion follows incoming edges.
    pub fn search<G: Adjacency + ?Sized>(
        &self,
        graph: &G,
        start: SymbolId,
        end: SymbolId,
    ) -> PathOutcome {
        if start == end {
            return PathOutcome {
                score: 1.0,
                distance: Some(0),
                expanded_forward: 0,
                expanded_backward: 0,
                stop: StopReason::SameNode,
            };
        }

        let mut forward: HashMap<SymbolId, usize> = HashMap::from([(start, 0)]);
        let mut backward: HashMap<SymbolId, usize> = HashMap::from([(end, 0)]);
        let mut forward_queue = VecDeque::from([start]);
        let mut backward_queue = VecDeque::from([end]);
        let mut expanded = [0usize; 2];

        loop {
            if forward.len() >= self.frontier_cap || backward.len() >= self.frontier_cap {
                return PathOutcome::stopped(StopReason::FrontierCap, expanded[0], expanded[1]);
            }

            let side = match (forward_queue.is_empty(), backward_queue.is_empty()) {
                (true, true) => {
                    return PathOutcome::stopped(StopReason::Exhausted, expanded[0], expanded[1]);
                }
                (false, true) => Side::Forward,
                (true, false) => Side::Backward,
                (false, false) if forward_queue.len() <= backward_queue.len() => Side::Forward,
                (false, false) => Side::Backward,
            };

            let (queue, own, other) = match side {
                Side::Forward => (&mut forward_queue, &mut forward, &backward),
                Side::Backward => (&mut backward_queue, &mut backward, &forward),
            };

            let Some(&node) = queue.front() else {
                continue;
            };
            let dist = own.get(&node).copied().unwrap_or(0);
            if dist >= self.max_depth {
                return PathOutcome::stopped(StopReason::DepthBound, expanded[0], expanded[1]);
            }
            queue.pop_front();

            let neighbors = match side {
                Side::Forward => {
                    expanded[0] += 1;
                    graph.successors(node)
                }
                Side::Backward => {
                    expanded[1] += 1;
                    graph.predecessors(node)
                }
            };

            for &next in neighbors {
                if let Some(&opposite) = other.get(&next) {
                    let d = dist + 1 + opposite;
                    return PathOutcome {
                        score: 1.0 / (d as f64 + 1.0),
                        distance: Some(d),
                        expanded_forward: expanded[0],
                        expanded_backward: expanded[1],
                        stop: StopReason::Met,
                    };
                }
                if !own.contains_key(&next) {
                    own.insert(next, dist + 1);
                    queue.push_back(next);
                }
            }
        }
    }
}

/// Convenience wrapper: `PathScorer::new(max_depth, frontier_cap).score(..)`.
pub fn score_path<G: Adjacency + ?Sized>(
    graph: &G,
    start: SymbolId,
    end: SymbolId,
    max_depth: usize,
    frontier_cap: usize,
) -> f64 {
    PathScorer::new(max_depth, frontier_cap).score(graph, start, end)
}
