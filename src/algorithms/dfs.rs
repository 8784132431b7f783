use crate::algorithms::common::{extend, Direction, SearchCore, SearchResult, SearchState, SearchStrategy};
use crate::grid::{Grid, Position};

/// Stack-based depth-first search. Finds a path, not necessarily a short one.
#[derive(Debug, Default, Clone, Copy)]
pub struct DepthFirst;

impl DepthFirst {
    pub fn new() -> Self {
        DepthFirst
    }
}

impl SearchStrategy for DepthFirst {
    fn name(&self) -> &'static str {
        "Depth First Search"
    }

    fn search(&self, grid: &Grid) -> SearchResult {
        let core = SearchCore::new(grid);
        let mut state = SearchState::new();
        let start = core.start();

        // Entries carry the path including their own position.
        let mut stack: Vec<(Position, Vec<Position>)> = vec![(start, vec![start])];

        while let Some((pos, path)) = stack.pop() {
            // A position can sit on the stack several times; only the first
            // pop is processed.
            if state.visited.contains(&pos) {
                continue;
            }
            state.expand(pos);
            state.discover(pos);

            if core.is_goal(pos) {
                log::debug!("dfs reached {} after {} expansions", pos, state.nodes_explored);
                return state.found(path);
            }

            // Pushed in reverse so they pop in direction priority order.
            for dir in Direction::PRIORITY.iter().rev() {
                let (dx, dy) = dir.delta();
                let Some(next) = pos.offset(dx, dy) else {
                    continue;
                };
                if grid.is_passable(next) && !state.visited.contains(&next) {
                    stack.push((next, extend(&path, next)));
                }
            }
        }

        log::debug!("dfs exhausted after {} expansions", state.nodes_explored);
        state.exhausted()
    }
}
