use crate::algorithms::common::{SearchCore, SearchResult, SearchState, SearchStrategy};
use crate::grid::{Grid, Position};
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

/// Two breadth-first searches, one from the start and one from the first
/// goal in input order, alternating single expansions until they touch.
///
/// Only that first goal is searched for. Only the meeting of the two
/// frontiers ends a successful run.
#[derive(Debug, Default, Clone, Copy)]
pub struct Bidirectional;

/// One side of the search. `paths` maps every seen position to the path from
/// this side's origin to it, inclusive at both ends.
struct Frontier {
    queue: VecDeque<(Position, Vec<Position>)>,
    paths: FxHashMap<Position, Vec<Position>>,
}

impl Frontier {
    fn seeded(origin: Position) -> Self {
        let mut paths = FxHashMap::default();
        paths.insert(origin, vec![origin]);
        Frontier {
            queue: VecDeque::from([(origin, Vec::new())]),
            paths,
        }
    }

    /// Pops one cell and discovers its neighbors. Returns the first neighbor
    /// already seen by `other`, if any.
    fn step(
        &mut self,
        core: &SearchCore<'_>,
        state: &mut SearchState,
        other: &Frontier,
    ) -> Option<Position> {
        let (current, path) = self.queue.pop_front()?;
        state.expand(current);

        for next in core.passable_neighbors(current) {
            if !self.paths.contains_key(&next) {
                let mut through = path.clone();
                through.push(current);
                let mut full = through.clone();
                full.push(next);
                self.paths.insert(next, full);
                self.queue.push_back((next, through));
                state.visited_order.push(next);
            }
            if other.paths.contains_key(&next) {
                return Some(next);
            }
        }
        None
    }
}

impl Bidirectional {
    pub fn new() -> Self {
        Bidirectional
    }

    /// Forward path to `meeting`, then the backward path walked in reverse,
    /// without repeating `meeting`.
    fn join(forward: &Frontier, backward: &Frontier, meeting: Position) -> Vec<Position> {
        let mut path = forward.paths[&meeting].clone();
        path.extend(backward.paths[&meeting].iter().rev().skip(1));
        path
    }
}

impl SearchStrategy for Bidirectional {
    fn name(&self) -> &'static str {
        "Bidirectional Search"
    }

    fn search(&self, grid: &Grid) -> SearchResult {
        let core = SearchCore::new(grid);
        let mut state = SearchState::new();
        let start = core.start();
        let Some(&goal) = grid.goals().first() else {
            return state.exhausted();
        };

        state.visited_order.push(start);
        if start == goal {
            state.expand(start);
            return state.found(vec![start]);
        }

        let mut forward = Frontier::seeded(start);
        let mut backward = Frontier::seeded(goal);

        while !forward.queue.is_empty() && !backward.queue.is_empty() {
            let meeting = match forward.step(&core, &mut state, &backward) {
                Some(meeting) => Some(meeting),
                None => backward.step(&core, &mut state, &forward),
            };

            if let Some(meeting) = meeting {
                log::debug!(
                    "bidirectional frontiers met at {} after {} expansions",
                    meeting,
                    state.nodes_explored
                );
                let path = Self::join(&forward, &backward, meeting);
                let mut result = state.found(path);
                result.meeting_point = Some(meeting);
                return result;
            }
        }

        log::debug!(
            "bidirectional exhausted after {} expansions",
            state.nodes_explored
        );
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
    fn corridor_meets_in_the_middle() {
        let grid = grid(1, 5, vec![Position::new(4, 0)], vec![]);
        let result = Bidirectional::new().search(&grid);
        assert!(result.found);
        assert_eq!(
            result.path,
            (0..5).map(|x| Position::new(x, 0)).collect::<Vec<_>>()
        );
        let meeting = result.meeting_point.unwrap();
        assert_eq!(result.path.iter().filter(|&&p| p == meeting).count(), 1);
    }

    fn distance(grid: &Grid, from: Position, to: Position) -> usize {
        let core = SearchCore::new(grid);
        pathfinding::prelude::bfs(&from, |&p| core.passable_neighbors(p).collect::<Vec<_>>(), |&p| p == to)
            .map(|path| path.len() - 1)
            .unwrap()
    }

    #[test]
    fn both_halves_are_shortest_to_the_meeting_point() {
        let grid = grid(6, 6, vec![Position::new(5, 5)], vec![Wall::new(2, 0, 1, 4)]);
        let start = Position::new(0, 0);
        let goal = Position::new(5, 5);
        let result = Bidirectional::new().search(&grid);
        assert!(result.found);
        assert_eq!(result.path.first(), Some(&start));
        assert_eq!(result.path.last(), Some(&goal));

        let meeting = result.meeting_point.unwrap();
        let split = result.path.iter().position(|&p| p == meeting).unwrap();
        assert_eq!(split, distance(&grid, start, meeting));
        assert_eq!(result.path.len() - 1 - split, distance(&grid, goal, meeting));
        assert_eq!(result.path.iter().filter(|&&p| p == meeting).count(), 1);
    }

    #[test]
    fn uses_first_goal_for_the_backward_side() {
        let grid = grid(1, 7, vec![Position::new(6, 0), Position::new(2, 0)], vec![]);
        let result = Bidirectional::new().search(&grid);
        assert!(result.found);
        assert_eq!(result.goal(), Some(Position::new(6, 0)));
    }

    #[test]
    fn start_on_first_goal() {
        let grid = grid(2, 2, vec![Position::new(0, 0)], vec![]);
        let result = Bidirectional::new().search(&grid);
        assert!(result.found);
        assert_eq!(result.path, vec![Position::new(0, 0)]);
        assert_eq!(result.nodes_explored, 1);
    }

    #[test]
    fn disconnected_sides_exhaust() {
        let grid = grid(
            4,
            4,
            vec![Position::new(3, 3)],
            vec![Wall::new(1, 1, 3, 2), Wall::new(0, 3, 4, 1)],
        );
        let result = Bidirectional::new().search(&grid);
        assert!(!result.found);
        assert!(result.meeting_point.is_none());
        assert!(result.nodes_explored >= 1);
    }
}
