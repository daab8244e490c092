use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use waygrid_core::{Bounds, Cell};

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::neighbors::ObstacleMap;
use crate::path::Path;
use crate::traits::AstarPather;

// ---------------------------------------------------------------------------
// Search nodes and frontier entries
// ---------------------------------------------------------------------------

/// Whether a search node is still waiting in the frontier or finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatus {
    Open,
    Closed,
}

/// Per-cell bookkeeping for one A* run.
///
/// `cost_from_start` only ever decreases while the node is open, and
/// `status` moves from `Open` to `Closed` once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchNode {
    pub cost_from_start: f64,
    pub estimate_to_goal: f64,
    pub status: NodeStatus,
    /// Best known predecessor. `None` only for the start cell.
    pub parent: Option<Cell>,
}

impl SearchNode {
    /// Estimated total cost of a route through this node.
    #[inline]
    pub fn total(&self) -> f64 {
        self.cost_from_start + self.estimate_to_goal
    }
}

/// Frontier entry, ordered for use in `BinaryHeap`.
#[derive(Clone, Copy, Debug)]
struct FrontierEntry {
    cell: Cell,
    priority: f64,
    seq: u64,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops the smallest priority first;
        // equal priorities pop in insertion order.
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

/// Counters for the most recent search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes popped from the frontier and closed.
    pub expanded: usize,
    /// Open nodes whose cost improved.
    pub relaxed: usize,
    /// Largest frontier size seen.
    pub max_frontier: usize,
}

// ---------------------------------------------------------------------------
// AStar
// ---------------------------------------------------------------------------

/// A* shortest-path search.
///
/// The node table, frontier and neighbour buffer are kept between calls
/// only to reuse their allocations; each search starts from empty ones.
#[derive(Debug, Default)]
pub struct AStar {
    config: SearchConfig,
    nodes: HashMap<Cell, SearchNode>,
    open: BinaryHeap<FrontierEntry>,
    seq: u64,
    nbuf: Vec<Cell>,
    stats: SearchStats,
}

impl AStar {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Counters from the most recent search.
    pub fn last_stats(&self) -> SearchStats {
        self.stats
    }

    /// The node recorded for `c` by the most recent search, if it was reached.
    pub fn node(&self, c: Cell) -> Option<&SearchNode> {
        self.nodes.get(&c)
    }

    /// Validate the endpoints, then search from `start` to `end` on the grid.
    ///
    /// Returns `Ok(None)` when no route exists.
    pub fn navigate(
        &mut self,
        start: Cell,
        end: Cell,
        obstacles: &HashSet<Cell>,
        bounds: Bounds,
    ) -> Result<Option<Path>, SearchError> {
        let map = ObstacleMap::new(obstacles, bounds, self.config.diagonal);
        map.check_endpoint(start)?;
        map.check_endpoint(end)?;
        self.astar_path(&map, start, end)
    }

    /// Compute the shortest path from `from` to `to` using A*.
    ///
    /// Returns the full path (including both endpoints) or `None` if the
    /// frontier runs dry. Endpoints are not validated here.
    pub fn astar_path<P: AstarPather>(
        &mut self,
        pather: &P,
        from: Cell,
        to: Cell,
    ) -> Result<Option<Path>, SearchError> {
        self.nodes.clear();
        self.open.clear();
        self.seq = 0;
        self.stats = SearchStats::default();

        let estimate = pather.estimate(from, to);
        self.nodes.insert(
            from,
            SearchNode {
                cost_from_start: 0.0,
                estimate_to_goal: estimate,
                status: NodeStatus::Open,
                parent: None,
            },
        );
        self.push(from, estimate);

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let outcome = 'search: loop {
            let Some(entry) = self.open.pop() else {
                break 'search Ok(false);
            };
            let current = entry.cell;

            let Some(node) = self.nodes.get_mut(&current) else {
                continue;
            };
            // An improved entry for this cell was pushed and already popped.
            if node.status == NodeStatus::Closed {
                continue;
            }
            node.status = NodeStatus::Closed;
            let current_cost = node.cost_from_start;
            self.stats.expanded += 1;

            if current == to {
                break 'search Ok(true);
            }

            if let Some(limit) = self.config.max_expansions {
                if self.stats.expanded >= limit {
                    break 'search Err(SearchError::ExpansionLimit { from, to, limit });
                }
            }

            nbuf.clear();
            pather.neighbors(current, &mut nbuf);

            for &n in nbuf.iter() {
                let candidate = current_cost + pather.cost(current, n);

                let priority = match self.nodes.get_mut(&n) {
                    Some(node) if node.status == NodeStatus::Closed => continue,
                    Some(node) => {
                        if candidate >= node.cost_from_start {
                            continue;
                        }
                        node.cost_from_start = candidate;
                        node.estimate_to_goal = pather.estimate(n, to);
                        node.parent = Some(current);
                        self.stats.relaxed += 1;
                        node.total()
                    }
                    None => {
                        let node = SearchNode {
                            cost_from_start: candidate,
                            estimate_to_goal: pather.estimate(n, to),
                            status: NodeStatus::Open,
                            parent: Some(current),
                        };
                        self.nodes.insert(n, node);
                        node.total()
                    }
                };
                self.push(n, priority);
            }
        };

        self.nbuf = nbuf;

        let found = match outcome {
            Ok(found) => found,
            Err(err) => {
                log::warn!("{err}");
                return Err(err);
            }
        };

        log::debug!(
            "astar {from} -> {to}: found={found} expanded={} relaxed={} max_frontier={}",
            self.stats.expanded,
            self.stats.relaxed,
            self.stats.max_frontier
        );

        if !found {
            return Ok(None);
        }
        Ok(Some(self.retrace(to)))
    }

    fn push(&mut self, cell: Cell, priority: f64) {
        self.open.push(FrontierEntry {
            cell,
            priority,
            seq: self.seq,
        });
        self.seq += 1;
        self.stats.max_frontier = self.stats.max_frontier.max(self.open.len());
    }

    /// Follow parent links back from `goal` and return the path start→goal.
    fn retrace(&self, goal: Cell) -> Path {
        let mut cells = Vec::new();
        let mut cur = Some(goal);
        while let Some(c) = cur {
            cells.push(c);
            cur = self.nodes.get(&c).and_then(|n| n.parent);
        }
        cells.reverse();
        Path::new(cells)
    }
}

/// Search from `start` to `end` with the default configuration.
///
/// `Ok(None)` means no route exists; invalid endpoints are errors.
pub fn navigate(
    start: Cell,
    end: Cell,
    obstacles: &HashSet<Cell>,
    bounds: Bounds,
) -> Result<Option<Path>, SearchError> {
    AStar::default().navigate(start, end, obstacles, bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::SQRT_2;

    fn set(cells: &[(i32, i32)]) -> HashSet<Cell> {
        cells.iter().map(|&c| Cell::from(c)).collect()
    }

    #[test]
    fn direct_diagonal() {
        let path = navigate(
            Cell::new(1, 1),
            Cell::new(3, 3),
            &HashSet::new(),
            Bounds::new(5, 5),
        )
        .unwrap()
        .unwrap();
        assert_eq!(
            path.cells(),
            &[Cell::new(1, 1), Cell::new(2, 2), Cell::new(3, 3)]
        );
        assert!((path.length() - 2.0 * SQRT_2).abs() < 1e-9);
    }

    #[test]
    fn start_equals_end() {
        let mut astar = AStar::default();
        let c = Cell::new(2, 2);
        let path = astar
            .navigate(c, c, &HashSet::new(), Bounds::new(5, 5))
            .unwrap()
            .unwrap();
        assert_eq!(path.cells(), &[c]);
        assert_eq!(astar.last_stats().expanded, 1);
        assert_eq!(astar.node(c).map(|n| n.status), Some(NodeStatus::Closed));
    }

    #[test]
    fn enclosed_start_has_no_path() {
        let obs = set(&[
            (1, 1),
            (1, 2),
            (1, 3),
            (2, 1),
            (2, 3),
            (3, 1),
            (3, 2),
            (3, 3),
        ]);
        let mut astar = AStar::default();
        let res = astar
            .navigate(Cell::new(2, 2), Cell::new(4, 4), &obs, Bounds::new(6, 6))
            .unwrap();
        assert_eq!(res, None);
        assert_eq!(astar.last_stats().expanded, 1);
    }

    #[test]
    fn detours_around_wall() {
        // Wall across column 3 except row 4.
        let obs = set(&[(1, 3), (2, 3), (3, 3)]);
        let path = navigate(Cell::new(1, 1), Cell::new(1, 5), &obs, Bounds::new(6, 7))
            .unwrap()
            .unwrap();
        assert!(path.is_connected());
        assert!(path.contains(Cell::new(4, 3)));
        assert!(path.cells().iter().all(|c| !obs.contains(c)));
        // No corner cutting past (3, 3): the path goes through (4, 2) and (4, 4).
        assert!(path.contains(Cell::new(4, 2)));
        assert!(path.contains(Cell::new(4, 4)));
    }

    #[test]
    fn relaxation_improves_open_nodes() {
        let obs = set(&[(2, 3), (3, 3), (4, 3)]);
        let mut astar = AStar::default();
        let path = astar
            .navigate(Cell::new(3, 1), Cell::new(3, 5), &obs, Bounds::new(7, 7))
            .unwrap()
            .unwrap();
        assert!(path.is_connected());
        let stats = astar.last_stats();
        assert!(stats.expanded >= path.len());
        assert!(stats.max_frontier > 0);
        // Closed nodes along the path carry their final cost.
        let end = astar.node(Cell::new(3, 5)).unwrap();
        assert!((end.cost_from_start - path.length()).abs() < 1e-9);
    }

    #[test]
    fn invalid_endpoints_rejected_before_search() {
        let obs = set(&[(2, 2)]);
        assert_eq!(
            navigate(Cell::new(1, 1), Cell::new(2, 2), &obs, Bounds::new(5, 5)),
            Err(SearchError::BlockedEndpoint {
                cell: Cell::new(2, 2)
            })
        );
        assert!(matches!(
            navigate(Cell::new(0, 1), Cell::new(3, 3), &obs, Bounds::new(5, 5)),
            Err(SearchError::OutOfBounds { .. })
        ));
        assert!(matches!(
            navigate(Cell::new(1, 1), Cell::new(3, 9), &obs, Bounds::new(5, 5)),
            Err(SearchError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn expansion_limit_aborts() {
        let mut astar = AStar::new(SearchConfig::default().with_max_expansions(3));
        let err = astar
            .navigate(
                Cell::new(1, 1),
                Cell::new(18, 18),
                &HashSet::new(),
                Bounds::new(20, 20),
            )
            .unwrap_err();
        assert_eq!(
            err,
            SearchError::ExpansionLimit {
                from: Cell::new(1, 1),
                to: Cell::new(18, 18),
                limit: 3
            }
        );
    }

    #[test]
    fn repeated_searches_are_identical() {
        let obs = set(&[(2, 2), (2, 3), (3, 2), (5, 5), (4, 6)]);
        let mut astar = AStar::default();
        let a = astar
            .navigate(Cell::new(1, 1), Cell::new(7, 7), &obs, Bounds::new(9, 9))
            .unwrap();
        let b = astar
            .navigate(Cell::new(1, 1), Cell::new(7, 7), &obs, Bounds::new(9, 9))
            .unwrap();
        assert!(a.is_some());
        assert_eq!(a, b);
    }

    #[test]
    fn frontier_pops_lowest_then_oldest() {
        let mut heap = BinaryHeap::new();
        let c = Cell::new(0, 0);
        heap.push(FrontierEntry { cell: c, priority: 2.0, seq: 0 });
        heap.push(FrontierEntry { cell: c, priority: 1.0, seq: 1 });
        heap.push(FrontierEntry { cell: c, priority: 1.0, seq: 2 });
        let order: Vec<u64> = std::iter::from_fn(|| heap.pop().map(|e| e.seq)).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }
}
