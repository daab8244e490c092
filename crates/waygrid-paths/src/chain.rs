//! Chaining pairwise searches across an ordered list of waypoints.
//!
//! A [`Route`] is assembled one segment per consecutive waypoint pair. When
//! a pair cannot be joined, the [`ChainPolicy`] decides what the route
//! reports before it stops:
//!
//! - [`ChainPolicy::StopAtGap`] records an empty segment for the pair.
//! - [`ChainPolicy::ApproachNearestObstacle`] ranks obstacles by
//!   `dist(from, o) + dist(o, to)` and ends the route on the best one it
//!   can reach, as if that obstacle were cleared.

use std::collections::HashSet;

use waygrid_core::{Bounds, Cell};

use crate::astar::AStar;
use crate::config::{ChainPolicy, SearchConfig};
use crate::distance::euclidean;
use crate::error::SearchError;
use crate::neighbors::ObstacleMap;
use crate::path::Path;

/// Why a route stopped before its last waypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    /// `target` could not be reached and nothing was approached.
    Unreachable { target: Cell },
    /// `target` could not be reached; the route ends on the blocking
    /// obstacle closest to it.
    ApproachedObstacle { target: Cell },
}

/// Where and why an incomplete route stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stop {
    /// The last cell of the route: the obstacle approached, or the last
    /// waypoint reached.
    pub at: Cell,
    /// Index of the waypoint pair that failed.
    pub segment: usize,
    pub reason: StopReason,
}

/// The outcome of chaining searches across waypoints.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// One entry per attempted waypoint pair. A failed pair contributes an
    /// empty path or a partial path ending on an obstacle.
    pub segments: Vec<Path>,
    pub complete: bool,
    pub stop: Option<Stop>,
}

impl Route {
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// All cells of the route in order, without repeating the cell shared by
    /// consecutive segments.
    pub fn cells(&self) -> Vec<Cell> {
        let mut out: Vec<Cell> = Vec::new();
        for (i, seg) in self.segments.iter().enumerate() {
            let skip = usize::from(i > 0);
            out.extend(seg.cells().iter().skip(skip));
        }
        out
    }

    /// Total Euclidean length of all segments.
    pub fn length(&self) -> f64 {
        self.segments.iter().map(Path::length).sum()
    }
}

/// Runs A* between consecutive waypoints and assembles a [`Route`].
#[derive(Debug, Default)]
pub struct Router {
    search: AStar,
}

impl Router {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            search: AStar::new(config),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        self.search.config()
    }

    /// Route through `waypoints` in order.
    ///
    /// Every waypoint must be a valid search endpoint. Failing to join a
    /// pair is not an error: the returned route is marked incomplete.
    pub fn find_path(
        &mut self,
        waypoints: &[Cell],
        obstacles: &HashSet<Cell>,
        bounds: Bounds,
    ) -> Result<Route, SearchError> {
        if waypoints.len() < 2 {
            return Err(SearchError::TooFewWaypoints {
                count: waypoints.len(),
            });
        }
        let config = *self.search.config();
        let map = ObstacleMap::new(obstacles, bounds, config.diagonal);
        for &w in waypoints {
            map.check_endpoint(w)?;
        }

        let mut route = Route::default();
        for (i, pair) in waypoints.windows(2).enumerate() {
            let (from, to) = (pair[0], pair[1]);
            if let Some(path) = self.search.astar_path(&map, from, to)? {
                log::debug!("segment {i}: {from} -> {to} in {} cells", path.len());
                route.segments.push(path);
                continue;
            }

            let partial = match config.policy {
                ChainPolicy::StopAtGap => None,
                ChainPolicy::ApproachNearestObstacle => {
                    self.approach_nearest_obstacle(from, to, obstacles, bounds)?
                }
            };
            let stop = match partial {
                Some(path) => {
                    let at = path.end().unwrap_or(from);
                    route.segments.push(path);
                    Stop {
                        at,
                        segment: i,
                        reason: StopReason::ApproachedObstacle { target: to },
                    }
                }
                None => {
                    route.segments.push(Path::default());
                    Stop {
                        at: from,
                        segment: i,
                        reason: StopReason::Unreachable { target: to },
                    }
                }
            };
            log::info!(
                "route stopped at {} on segment {i}: no path {from} -> {to}",
                stop.at
            );
            route.stop = Some(stop);
            return Ok(route);
        }

        route.complete = true;
        Ok(route)
    }

    /// Search toward the obstacles between `from` and `to`, closest first,
    /// treating each candidate as passable in turn. Returns the first path
    /// found; it ends on the obstacle.
    fn approach_nearest_obstacle(
        &mut self,
        from: Cell,
        to: Cell,
        obstacles: &HashSet<Cell>,
        bounds: Bounds,
    ) -> Result<Option<Path>, SearchError> {
        let mut candidates: Vec<(f64, Cell)> = obstacles
            .iter()
            .filter(|&&o| bounds.is_passable(o))
            .map(|&o| (euclidean(from, o) + euclidean(o, to), o))
            .collect();
        candidates.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        let diagonal = self.search.config().diagonal;
        let mut relaxed = obstacles.clone();
        for (_, o) in candidates {
            relaxed.remove(&o);
            let map = ObstacleMap::new(&relaxed, bounds, diagonal);
            let found = self.search.astar_path(&map, from, o)?;
            relaxed.insert(o);
            if let Some(path) = found {
                log::debug!("approached obstacle {o} from {from} toward {to}");
                return Ok(Some(path));
            }
        }
        Ok(None)
    }
}

/// Route through `waypoints` with the default configuration.
pub fn find_path(
    waypoints: &[Cell],
    obstacles: &HashSet<Cell>,
    bounds: Bounds,
) -> Result<Route, SearchError> {
    Router::default().find_path(waypoints, obstacles, bounds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(cells: &[(i32, i32)]) -> HashSet<Cell> {
        cells.iter().map(|&c| Cell::from(c)).collect()
    }

    fn cells(cs: &[(i32, i32)]) -> Vec<Cell> {
        cs.iter().map(|&c| Cell::from(c)).collect()
    }

    #[test]
    fn too_few_waypoints() {
        let err = find_path(&cells(&[(1, 1)]), &HashSet::new(), Bounds::new(5, 5)).unwrap_err();
        assert_eq!(err, SearchError::TooFewWaypoints { count: 1 });
    }

    #[test]
    fn invalid_waypoint_rejected() {
        let obs = set(&[(2, 2)]);
        let err = find_path(&cells(&[(1, 1), (2, 2)]), &obs, Bounds::new(5, 5)).unwrap_err();
        assert_eq!(
            err,
            SearchError::BlockedEndpoint {
                cell: Cell::new(2, 2)
            }
        );
    }

    #[test]
    fn segments_join_without_duplicates() {
        let wps = cells(&[(1, 1), (1, 4), (4, 4)]);
        let route = find_path(&wps, &HashSet::new(), Bounds::new(6, 6)).unwrap();
        assert!(route.is_complete());
        assert_eq!(route.stop, None);
        assert_eq!(route.segments.len(), 2);
        assert_eq!(route.segments[0].end(), route.segments[1].start());

        let all = route.cells();
        assert_eq!(all.len(), route.segments[0].len() + route.segments[1].len() - 1);
        for w in &wps {
            assert_eq!(all.iter().filter(|&c| c == w).count(), 1);
        }
        assert_eq!(all.first(), Some(&Cell::new(1, 1)));
        assert_eq!(all.last(), Some(&Cell::new(4, 4)));
    }

    #[test]
    fn stop_at_gap_records_empty_segment() {
        let obs = set(&[(1, 3), (2, 3), (3, 3)]);
        let mut router = Router::new(SearchConfig::default().with_policy(ChainPolicy::StopAtGap));
        let wps = cells(&[(1, 1), (3, 1), (2, 5), (3, 5)]);
        let route = router.find_path(&wps, &obs, Bounds::new(4, 7)).unwrap();
        assert!(!route.is_complete());
        assert_eq!(route.segments.len(), 2);
        assert!(!route.segments[0].is_empty());
        assert!(route.segments[1].is_empty());
        assert_eq!(
            route.stop,
            Some(Stop {
                at: Cell::new(3, 1),
                segment: 1,
                reason: StopReason::Unreachable {
                    target: Cell::new(2, 5)
                }
            })
        );
        assert_eq!(route.cells(), route.segments[0].cells());
    }

    #[test]
    fn approach_stops_on_nearest_obstacle() {
        let obs = set(&[(1, 2), (2, 2), (3, 2)]);
        let route = find_path(&cells(&[(1, 1), (1, 4)]), &obs, Bounds::new(4, 6)).unwrap();
        assert!(!route.is_complete());
        let stop = route.stop.unwrap();
        assert_eq!(stop.at, Cell::new(1, 2));
        assert_eq!(
            stop.reason,
            StopReason::ApproachedObstacle {
                target: Cell::new(1, 4)
            }
        );
        assert_eq!(route.cells(), cells(&[(1, 1), (1, 2)]));
    }

    #[test]
    fn approach_after_completed_segment_does_not_repeat_waypoint() {
        let obs = set(&[(1, 4), (2, 4), (3, 4)]);
        let wps = cells(&[(3, 1), (1, 2), (1, 6)]);
        let route = find_path(&wps, &obs, Bounds::new(4, 8)).unwrap();
        assert_eq!(route.segments.len(), 2);
        let all = route.cells();
        assert_eq!(all.iter().filter(|&&c| c == Cell::new(1, 2)).count(), 1);
        assert_eq!(all.last(), Some(&Cell::new(1, 4)));
        assert_eq!(route.stop.map(|s| s.segment), Some(1));
    }

    #[test]
    fn approach_skips_candidates_behind_corners() {
        let pocket = set(&[
            (2, 2),
            (2, 3),
            (2, 4),
            (3, 2),
            (3, 4),
            (4, 2),
            (4, 3),
            (4, 4),
        ]);
        // (2, 2) ranks first but the diagonal step into it cuts two corners;
        // (2, 3) and (3, 2) tie next and the lower cell wins.
        let route = find_path(&cells(&[(3, 3), (1, 1)]), &pocket, Bounds::new(6, 6)).unwrap();
        assert_eq!(route.stop.unwrap().at, Cell::new(2, 3));
        assert_eq!(route.cells(), cells(&[(3, 3), (2, 3)]));
    }

    #[test]
    fn nothing_to_approach() {
        let mut router = Router::default();
        let bounds = Bounds::new(6, 6);
        let from = Cell::new(1, 1);
        let to = Cell::new(4, 4);
        assert_eq!(
            router
                .approach_nearest_obstacle(from, to, &HashSet::new(), bounds)
                .unwrap(),
            None
        );
        // Border obstacles can never be stepped on.
        let border = set(&[(0, 2), (3, 0)]);
        assert_eq!(
            router
                .approach_nearest_obstacle(from, to, &border, bounds)
                .unwrap(),
            None
        );
    }
}
