use crate::algorithms::common::{extend, RankedNode, SearchCore, SearchResult, SearchState, SearchStrategy};
use crate::grid::Grid;
use std::collections::BinaryHeap;

/// Greedy best-first search: always expands the cell that looks closest to a
/// goal, ignoring the distance already travelled.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyBestFirst;

impl GreedyBestFirst {
    pub fn new() -> Self {
        GreedyBestFirst
    }
}

impl SearchStrategy for GreedyBestFirst {
    fn name(&self) -> &'static str {
        "Greedy Best First Search"
    }

    fn search(&self, grid: &Grid) -> SearchResult {
        let core = SearchCore::new(grid);
        let mut state = SearchState::new();
        let start = core.start();

        let mut open = BinaryHeap::new();
        open.push(RankedNode {
            priority: core.min_heuristic(start),
            order: 0,
            position: start,
            path: Vec::new(),
        });
        state.discover(start);

        while let Some(RankedNode { position, path, .. }) = open.pop() {
            state.expand(position);

            if core.is_goal(position) {
                log::debug!(
                    "gbfs reached {} after {} expansions",
                    position,
                    state.nodes_explored
                );
                return state.found(extend(&path, position));
            }

            for (next, next_path) in state.neighbors(&core, position, &path) {
                state.discover(next);
                open.push(RankedNode {
                    priority: core.min_heuristic(next),
                    order: state.nodes_explored,
                    position: next,
                    path: next_path,
                });
            }
        }

        log::debug!("gbfs exhausted after {} expansions", state.nodes_explored);
        state.exhausted()
    }
}
