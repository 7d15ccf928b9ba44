//! This module implements the A* core used by the grid solvers. It follows the shape of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html)
//! but keeps an explicit closed set, a deterministic tie-break and an optional expansion budget.
//!
//! All scoring state (g, h, parent links, closed flags) lives in a `SearchContext` that is created
//! for a single call and dropped when it returns, so searches never leak state into each other.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use num_traits::Zero;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

/// Outcome of a single [astar] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchResult<N, C> {
    /// A path from the start to a node accepted by the success predicate, both inclusive.
    Found { path: Vec<N>, cost: C },
    /// The open set ran empty without reaching the goal.
    Exhausted,
    /// The expansion budget ran out before the goal was reached.
    BudgetExceeded { expanded: usize },
}

struct SmallestCostHolder<K> {
    estimated_cost: K,
    heuristic: K,
    cost: K,
    sequence: u64,
    index: usize,
}

impl<K: PartialEq> Eq for SmallestCostHolder<K> {}

impl<K: PartialEq> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost)
            && self.heuristic.eq(&other.heuristic)
            && self.sequence == other.sequence
    }
}

impl<K: Ord> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap, so every key is reversed: smallest f first, then smallest h
        // (the node closest to the goal), then whichever entry entered the open set first.
        other
            .estimated_cost
            .cmp(&self.estimated_cost)
            .then_with(|| other.heuristic.cmp(&self.heuristic))
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

#[derive(Clone, Copy, Debug)]
struct NodeState<C> {
    parent: usize,
    cost: C,
    heuristic: C,
    closed: bool,
}

/// Per-invocation open and closed set storage. Nodes are interned into an index map; the heap
/// refers to them by index and stale heap entries are skipped when popped.
struct SearchContext<N, C> {
    to_see: BinaryHeap<SmallestCostHolder<C>>,
    parents: FxIndexMap<N, NodeState<C>>,
    sequence: u64,
    expanded: usize,
}

impl<N, C> SearchContext<N, C>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
{
    fn new() -> Self {
        SearchContext {
            to_see: BinaryHeap::new(),
            parents: FxIndexMap::default(),
            sequence: 0,
            expanded: 0,
        }
    }

    fn push(&mut self, index: usize, cost: C, heuristic: C) {
        self.to_see.push(SmallestCostHolder {
            estimated_cost: cost + heuristic,
            heuristic,
            cost,
            sequence: self.sequence,
            index,
        });
        self.sequence += 1;
    }

    fn reverse_path(&self, goal_index: usize) -> Vec<N> {
        let mut path = Vec::new();
        let mut index = goal_index;
        while let Some((node, state)) = self.parents.get_index(index) {
            path.push(node.clone());
            index = state.parent;
        }
        path.reverse();
        path
    }

    fn run<FN, IN, FH, FS>(
        mut self,
        start: &N,
        mut successors: FN,
        mut heuristic: FH,
        mut success: FS,
        max_expansions: Option<usize>,
    ) -> SearchResult<N, C>
    where
        FN: FnMut(&N) -> IN,
        IN: IntoIterator<Item = (N, C)>,
        FH: FnMut(&N) -> C,
        FS: FnMut(&N) -> bool,
    {
        let start_h = heuristic(start);
        self.parents.insert(
            start.clone(),
            NodeState {
                parent: usize::MAX,
                cost: Zero::zero(),
                heuristic: start_h,
                closed: false,
            },
        );
        self.push(0, Zero::zero(), start_h);

        while let Some(SmallestCostHolder { cost, index, .. }) = self.to_see.pop() {
            let node = match self.parents.get_index(index) {
                Some((node, state)) => {
                    // A node is pushed again each time a cheaper route to it is found, only the
                    // entry carrying its current cost is live.
                    if state.closed || cost > state.cost {
                        continue;
                    }
                    node.clone()
                }
                None => continue,
            };
            if success(&node) {
                return SearchResult::Found {
                    path: self.reverse_path(index),
                    cost,
                };
            }
            if max_expansions.is_some_and(|limit| self.expanded >= limit) {
                return SearchResult::BudgetExceeded {
                    expanded: self.expanded,
                };
            }
            self.expanded += 1;
            if let Some((_, state)) = self.parents.get_index_mut(index) {
                state.closed = true;
            }

            for (successor, move_cost) in successors(&node) {
                let new_cost = cost + move_cost;
                let (n, h) = match self.parents.entry(successor) {
                    Vacant(e) => {
                        let h = heuristic(e.key());
                        let n = e.index();
                        e.insert(NodeState {
                            parent: index,
                            cost: new_cost,
                            heuristic: h,
                            closed: false,
                        });
                        (n, h)
                    }
                    Occupied(mut e) => {
                        let n = e.index();
                        let state = e.get_mut();
                        if state.closed || state.cost <= new_cost {
                            continue;
                        }
                        state.parent = index;
                        state.cost = new_cost;
                        (n, state.heuristic)
                    }
                };
                self.push(n, new_cost, h);
            }
        }
        SearchResult::Exhausted
    }
}

/// Runs A* from `start` until `success` accepts a node. `successors` yields neighbours together
/// with the cost of moving to them and `heuristic` must never overestimate the remaining cost for
/// the returned path to be optimal.
///
/// Among open nodes with equal `f = g + h` the one with the smallest `h` is expanded first and
/// remaining ties go to the node that entered (or was last improved in) the open set earliest.
pub fn astar<N, C, FN, IN, FH, FS>(
    start: &N,
    successors: FN,
    heuristic: FH,
    success: FS,
    max_expansions: Option<usize>,
) -> SearchResult<N, C>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    SearchContext::new().run(start, successors, heuristic, success, max_expansions)
}
