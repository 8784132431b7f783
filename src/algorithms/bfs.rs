use crate::algorithms::common::{extend, SearchCore, SearchResult, SearchState, SearchStrategy};
use crate::grid::{Grid, Position};
use std::collections::VecDeque;

/// Level-order search. Returns a shortest path in number of moves.
#[derive(Debug, Default, Clone, Copy)]
pub struct BreadthFirst;

impl BreadthFirst {
    pub fn new() -> Self {
        BreadthFirst
    }
}

impl SearchStrategy for BreadthFirst {
    fn name(&self) -> &'static str {
        "Breadth First Search"
    }

    fn search(&self, grid: &Grid) -> SearchResult {
        let core = SearchCore::new(grid);
        let mut state = SearchState::new();
        let start = core.start();

        let mut queue: VecDeque<(Position, Vec<Position>)> = VecDeque::new();
        queue.push_back((start, Vec::new()));
        state.discover(start);

        while let Some((pos, path)) = queue.pop_front() {
            state.expand(pos);

            if core.is_goal(pos) {
                log::debug!("bfs reached {} after {} expansions", pos, state.nodes_explored);
                return state.found(extend(&path, pos));
            }

            for (next, next_path) in state.neighbors(&core, pos, &path) {
                state.discover(next);
                queue.push_back((next, next_path));
            }
        }

        log::debug!("bfs exhausted after {} expansions", state.nodes_explored);
        state.exhausted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze_file::{MazeConfig, Wall};

    fn grid(rows: usize, cols: usize, goals: Vec<Position>, walls: Vec<Wall>) -> Grid {
        Grid::new(&MazeConfig {
            dimensions: (rows, cols),
            start: Position::new(0, 0),
            goals,
            walls,
        })
        .unwrap()
    }

    #[test]
    fn open_grid_shortest_path() {
        let grid = grid(5, 5, vec![Position::new(4, 4)], vec![]);
        let result = BreadthFirst::new().search(&grid);
        assert!(result.found);
        assert_eq!(result.path.len(), 9);
        assert_eq!(result.path.first(), Some(&Position::new(0, 0)));
        assert_eq!(result.path.last(), Some(&Position::new(4, 4)));
        assert!(result.nodes_explored <= 25);
    }

    #[test]
    fn visited_order_starts_with_start_then_priority() {
        let grid = grid(3, 3, vec![Position::new(2, 2)], vec![]);
        let result = BreadthFirst::new().search(&grid);
        // from (0,0) up and left are off-grid, so down comes before right
        assert_eq!(
            &result.visited_order[..3],
            &[Position::new(0, 0), Position::new(0, 1), Position::new(1, 0)]
        );
    }

    #[test]
    fn start_on_goal_expands_once() {
        let grid = grid(2, 2, vec![Position::new(0, 0)], vec![]);
        let result = BreadthFirst::new().search(&grid);
        assert!(result.found);
        assert_eq!(result.path, vec![Position::new(0, 0)]);
        assert_eq!(result.nodes_explored, 1);
    }

    #[test]
    fn barrier_exhausts_reachable_component() {
        let grid = grid(
            4,
            4,
            vec![Position::new(3, 3)],
            vec![Wall::new(1, 1, 3, 2), Wall::new(0, 3, 4, 1)],
        );
        let result = BreadthFirst::new().search(&grid);
        assert!(!result.found);
        assert!(result.path.is_empty());
        assert_eq!(result.nodes_explored, 6);
    }
}
