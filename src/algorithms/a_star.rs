use crate::algorithms::common::{extend, RankedNode, SearchCore, SearchResult, SearchState, SearchStrategy};
use crate::grid::Grid;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BinaryHeap;

/// A* over unit move costs with the Manhattan distance to the nearest goal as
/// heuristic.
///
/// The heuristic is consistent on a 4-connected grid, so the first goal popped
/// is reached along a shortest path. Equal f-scores are broken by insertion
/// order, then by position.
#[derive(Debug, Default, Clone, Copy)]
pub struct AStar;

impl AStar {
    pub fn new() -> Self {
        AStar
    }
}

impl SearchStrategy for AStar {
    fn name(&self) -> &'static str {
        "A* Search"
    }

    fn search(&self, grid: &Grid) -> SearchResult {
        let core = SearchCore::new(grid);
        let mut state = SearchState::new();
        let start = core.start();

        let mut g_scores = FxHashMap::default();
        g_scores.insert(start, 0usize);

        let mut open = BinaryHeap::new();
        open.push(RankedNode {
            priority: core.min_heuristic(start),
            order: 0,
            position: start,
            path: Vec::new(),
        });
        state.discover(start);

        // `state.visited` tracks discovery for the trace; expansion is tracked
        // separately so that a cheaper route can still update a queued cell.
        let mut closed = FxHashSet::default();

        while let Some(RankedNode { position, path, .. }) = open.pop() {
            if !closed.insert(position) {
                continue;
            }
            state.expand(position);

            if core.is_goal(position) {
                log::debug!(
                    "a* reached {} after {} expansions",
                    position,
                    state.nodes_explored
                );
                return state.found(extend(&path, position));
            }

            let current_g = g_scores[&position];
            for next in core.passable_neighbors(position) {
                if closed.contains(&next) {
                    continue;
                }
                let new_g = current_g + 1;
                if g_scores.get(&next).is_some_and(|&known| known <= new_g) {
                    continue;
                }
                g_scores.insert(next, new_g);
                state.discover(next);
                open.push(RankedNode {
                    priority: new_g + core.min_heuristic(next),
                    order: state.nodes_explored,
                    position: next,
                    path: extend(&path, position),
                });
            }
        }

        log::debug!("a* exhausted after {} expansions", state.nodes_explored);
        state.exhausted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Position;
    use crate::maze_file::{MazeConfig, Wall};

    #[test]
    fn goes_around_a_wall() {
        let grid = Grid::new(&MazeConfig {
            dimensions: (3, 3),
            start: Position::new(0, 0),
            goals: vec![Position::new(2, 0)],
            walls: vec![Wall::new(1, 0, 1, 2)],
        })
        .unwrap();
        let result = AStar::new().search(&grid);
        assert!(result.found);
        assert_eq!(result.path_cost(), 6);
    }

    #[test]
    fn straight_line_expands_only_the_line() {
        let grid = Grid::new(&MazeConfig {
            dimensions: (1, 6),
            start: Position::new(0, 0),
            goals: vec![Position::new(5, 0)],
            walls: vec![],
        })
        .unwrap();
        let result = AStar::new().search(&grid);
        assert_eq!(result.nodes_explored, 6);
        assert_eq!(result.path.len(), 6);
    }

    #[test]
    fn skips_enclosed_nearer_goal() {
        let grid = Grid::new(&MazeConfig {
            dimensions: (5, 5),
            start: Position::new(0, 0),
            goals: vec![Position::new(2, 0), Position::new(4, 4)],
            walls: vec![
                Wall::new(1, 0, 1, 2),
                Wall::new(3, 0, 1, 2),
                Wall::new(2, 1, 1, 1),
            ],
        })
        .unwrap();
        let result = AStar::new().search(&grid);
        assert!(result.found);
        assert_eq!(result.goal(), Some(Position::new(4, 4)));
        assert_eq!(result.path_cost(), 8);
    }
}
