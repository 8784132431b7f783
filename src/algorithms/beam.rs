use crate::algorithms::common::{extend, SearchCore, SearchResult, SearchState, SearchStrategy};
use crate::error::{Result, SearchError};
use crate::grid::{Grid, Position};
use rustc_hash::FxHashSet;

pub const DEFAULT_BEAM_WIDTH: usize = 2;

/// Weight on the heuristic. Above 1, so the search leans toward cells close
/// to a goal and is no longer admissible.
const HEURISTIC_WEIGHT: f64 = 1.1;

/// Round-based search keeping only the `width` most promising cells per
/// round.
#[derive(Debug, Clone, Copy)]
pub struct Beam {
    width: usize,
}

#[derive(Debug, Clone)]
struct Candidate {
    f: f64,
    g: usize,
    position: Position,
    /// Path up to, but excluding, `position`.
    path: Vec<Position>,
}

impl Default for Beam {
    fn default() -> Self {
        Beam {
            width: DEFAULT_BEAM_WIDTH,
        }
    }
}

impl Beam {
    pub fn new(width: usize) -> Result<Self> {
        if width == 0 {
            return Err(SearchError::InvalidBeamWidth(0));
        }
        Ok(Beam { width })
    }

    pub fn width(&self) -> usize {
        self.width
    }
}

/// Drops later duplicates of a position, orders by `(f, g)` and keeps the
/// best `width`. The sort is stable, so equal keys stay in generation order.
fn select(candidates: Vec<Candidate>, width: usize) -> Vec<Candidate> {
    let mut seen = FxHashSet::default();
    let mut unique: Vec<Candidate> = candidates
        .into_iter()
        .filter(|c| seen.insert(c.position))
        .collect();
    unique.sort_by(|a, b| a.f.total_cmp(&b.f).then(a.g.cmp(&b.g)));
    unique.truncate(width);
    unique
}

impl SearchStrategy for Beam {
    fn name(&self) -> &'static str {
        "Beam Search"
    }

    fn search(&self, grid: &Grid) -> SearchResult {
        let core = SearchCore::new(grid);
        let mut state = SearchState::new();
        let start = core.start();

        let mut beam = vec![Candidate {
            f: core.min_heuristic(start) as f64,
            g: 0,
            position: start,
            path: Vec::new(),
        }];
        state.discover(start);

        let mut round = 0;
        while !beam.is_empty() {
            round += 1;
            let mut candidates = Vec::new();

            for entry in &beam {
                state.expand(entry.position);

                if core.is_goal(entry.position) {
                    log::debug!(
                        "beam(width={}) reached {} in round {} after {} expansions",
                        self.width,
                        entry.position,
                        round,
                        state.nodes_explored
                    );
                    return state.found(extend(&entry.path, entry.position));
                }

                for (next, next_path) in state.neighbors(&core, entry.position, &entry.path) {
                    let g = entry.g + 1;
                    let h = core.min_heuristic(next) as f64;
                    candidates.push(Candidate {
                        f: g as f64 + h * HEURISTIC_WEIGHT,
                        g,
                        position: next,
                        path: next_path,
                    });
                }
            }

            let generated = candidates.len();
            beam = select(candidates, self.width);
            log::trace!(
                "beam round {}: {} candidates, kept {}",
                round,
                generated,
                beam.len()
            );

            for entry in &beam {
                state.discover(entry.position);
            }
        }

        log::debug!(
            "beam(width={}) ran dry after {} expansions",
            self.width,
            state.nodes_explored
        );
        state.exhausted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze_file::{MazeConfig, Wall};

    fn candidate(f: f64, g: usize, x: usize) -> Candidate {
        Candidate {
            f,
            g,
            position: Position::new(x, 0),
            path: Vec::new(),
        }
    }

    #[test]
    fn zero_width_is_rejected() {
        assert!(matches!(Beam::new(0), Err(SearchError::InvalidBeamWidth(0))));
        assert_eq!(Beam::default().width(), 2);
    }

    #[test]
    fn select_keeps_first_duplicate_and_best_keys() {
        let picked = select(
            vec![
                candidate(5.0, 3, 1),
                candidate(4.0, 2, 2),
                candidate(1.0, 1, 1), // duplicate of x=1, dropped
                candidate(4.0, 1, 3),
                candidate(6.0, 1, 4),
            ],
            2,
        );
        let xs: Vec<_> = picked.iter().map(|c| c.position.x).collect();
        assert_eq!(xs, vec![3, 2]);
    }

    #[test]
    fn select_never_exceeds_width() {
        let many: Vec<_> = (0..10).map(|x| candidate(x as f64, 0, x)).collect();
        for width in 1..5 {
            assert_eq!(select(many.clone(), width).len(), width);
        }
    }

    #[test]
    fn finds_goal_on_open_grid() {
        let grid = Grid::new(&MazeConfig {
            dimensions: (5, 5),
            start: Position::new(0, 0),
            goals: vec![Position::new(4, 4)],
            walls: vec![],
        })
        .unwrap();
        let result = Beam::default().search(&grid);
        assert!(result.found);
        assert_eq!(result.path_cost(), 8);
    }

    #[test]
    fn narrow_beam_can_prune_the_only_route() {
        // The goal sits behind a wall with a gap on the far right. Width 1
        // drifts left and ends in the dead end at (0,1).
        let grid = Grid::new(&MazeConfig {
            dimensions: (5, 5),
            start: Position::new(2, 0),
            goals: vec![Position::new(2, 4)],
            walls: vec![Wall::new(0, 2, 4, 1)],
        })
        .unwrap();
        let narrow = Beam::new(1).unwrap().search(&grid);
        assert!(!narrow.found);
        assert_eq!(narrow.nodes_explored, 6);

        let wide = Beam::new(8).unwrap().search(&grid);
        assert!(wide.found);
        assert_eq!(wide.path_cost(), 8);
    }
}
