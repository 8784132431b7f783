use crate::grid::{Grid, Position};
use rustc_hash::FxHashSet;
use std::cmp::Ordering;
use std::fmt;

/// A unit step on the 4-connected grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
}

impl Direction {
    /// Expansion order shared by every strategy. Ties between equally ranked
    /// candidates resolve in this order.
    pub const PRIORITY: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Down => (0, 1),
            Direction::Right => (1, 0),
        }
    }

    /// The step leading from `from` to `to`, if they are orthogonal neighbors.
    pub fn between(from: Position, to: Position) -> Option<Direction> {
        match (to.x as isize - from.x as isize, to.y as isize - from.y as isize) {
            (1, 0) => Some(Direction::Right),
            (-1, 0) => Some(Direction::Left),
            (0, 1) => Some(Direction::Down),
            (0, -1) => Some(Direction::Up),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Left => "LEFT",
            Direction::Down => "DOWN",
            Direction::Right => "RIGHT",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of a single search run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub found: bool,
    /// Start to the reached goal, inclusive. Empty when nothing was found.
    pub path: Vec<Position>,
    pub nodes_explored: usize,
    /// Positions in the order they entered the frontier or were expanded.
    pub visited_order: Vec<Position>,
    /// Positions in the order they were expanded.
    pub expanded: Vec<Position>,
    /// Where the two frontiers of a bidirectional search met.
    pub meeting_point: Option<Position>,
}

impl SearchResult {
    pub fn goal(&self) -> Option<Position> {
        if self.found {
            self.path.last().copied()
        } else {
            None
        }
    }

    /// Number of moves along the path.
    pub fn path_cost(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn moves(&self) -> Vec<Direction> {
        self.path
            .windows(2)
            .filter_map(|step| Direction::between(step[0], step[1]))
            .collect()
    }
}

/// Stamps a finished search onto the grid: expanded cells become visited,
/// the meeting point gets its own marker, then the path is drawn over the
/// visited cells.
pub fn annotate(grid: &mut Grid, result: &SearchResult) {
    for &pos in &result.expanded {
        grid.mark_visited(pos);
    }
    if let Some(meeting) = result.meeting_point {
        grid.mark_meeting_point(meeting);
    }
    grid.mark_path(&result.path);
}

/// Read-only view of the grid shared by all strategies.
pub struct SearchCore<'a> {
    grid: &'a Grid,
    goals: FxHashSet<Position>,
}

impl<'a> SearchCore<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        SearchCore {
            grid,
            goals: grid.goals().iter().copied().collect(),
        }
    }

    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    pub fn start(&self) -> Position {
        self.grid.start()
    }

    pub fn is_goal(&self, pos: Position) -> bool {
        self.goals.contains(&pos)
    }

    /// Manhattan distance.
    pub fn heuristic(&self, pos: Position, goal: Position) -> usize {
        pos.manhattan(goal)
    }

    /// Distance to the nearest goal, ignoring walls.
    pub fn min_heuristic(&self, pos: Position) -> usize {
        self.goals
            .iter()
            .map(|&goal| self.heuristic(pos, goal))
            .min()
            .unwrap_or(0)
    }

    /// In-bounds, non-wall neighbors in direction priority order.
    pub fn passable_neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        Direction::PRIORITY.into_iter().filter_map(move |dir| {
            let (dx, dy) = dir.delta();
            pos.offset(dx, dy).filter(|&next| self.grid.is_passable(next))
        })
    }
}

/// Per-run bookkeeping. Every call to [`SearchStrategy::search`] starts from
/// a fresh one.
#[derive(Debug, Default)]
pub struct SearchState {
    pub visited: FxHashSet<Position>,
    pub visited_order: Vec<Position>,
    pub expanded: Vec<Position>,
    pub nodes_explored: usize,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// In bounds, not a wall and not yet visited in this run.
    pub fn is_valid_move(&self, core: &SearchCore<'_>, pos: Position) -> bool {
        core.grid().is_passable(pos) && !self.visited.contains(&pos)
    }

    /// Valid neighbors of `pos`, each paired with `path` extended by `pos`.
    pub fn neighbors(
        &self,
        core: &SearchCore<'_>,
        pos: Position,
        path: &[Position],
    ) -> Vec<(Position, Vec<Position>)> {
        core.passable_neighbors(pos)
            .filter(|&next| self.is_valid_move(core, next))
            .map(|next| (next, extend(path, pos)))
            .collect()
    }

    /// Adds `pos` to the visited set, recording it in the trace the first
    /// time only.
    pub fn discover(&mut self, pos: Position) {
        if self.visited.insert(pos) {
            self.visited_order.push(pos);
        }
    }

    pub fn expand(&mut self, pos: Position) {
        self.nodes_explored += 1;
        self.expanded.push(pos);
    }

    pub fn found(self, path: Vec<Position>) -> SearchResult {
        SearchResult {
            found: true,
            path,
            nodes_explored: self.nodes_explored,
            visited_order: self.visited_order,
            expanded: self.expanded,
            meeting_point: None,
        }
    }

    pub fn exhausted(self) -> SearchResult {
        SearchResult {
            found: false,
            path: Vec::new(),
            nodes_explored: self.nodes_explored,
            visited_order: self.visited_order,
            expanded: self.expanded,
            meeting_point: None,
        }
    }
}

pub(crate) fn extend(path: &[Position], pos: Position) -> Vec<Position> {
    let mut extended = Vec::with_capacity(path.len() + 1);
    extended.extend_from_slice(path);
    extended.push(pos);
    extended
}

/// Frontier entry for the priority-queue strategies.
///
/// `BinaryHeap` is a max-heap, so the comparison is reversed: the smallest
/// `(priority, order, position)` pops first. `order` is the expansion count
/// at push time, which keeps equal priorities roughly first-in first-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedNode {
    pub priority: usize,
    pub order: usize,
    pub position: Position,
    /// Path up to, but excluding, `position`.
    pub path: Vec<Position>,
}

impl Ord for RankedNode {
    fn cmp(&self, other: &Self) -> Ordering {
        (other.priority, other.order, other.position, &other.path).cmp(&(
            self.priority,
            self.order,
            self.position,
            &self.path,
        ))
    }
}

impl PartialOrd for RankedNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A search algorithm that can be run against a grid.
pub trait SearchStrategy {
    /// Human readable name used in reports.
    fn name(&self) -> &'static str;

    /// Runs to completion. Never fails: an exhausted frontier yields a result
    /// with `found == false`.
    fn search(&self, grid: &Grid) -> SearchResult;
}
