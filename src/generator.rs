//! Random maze construction and the built-in test-case set.

use crate::error::{Result, SearchError};
use crate::grid::Position;
use crate::maze_file::{MazeConfig, Wall};
use pathfinding::prelude::bfs;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::cmp::Reverse;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const MAX_ATTEMPTS: usize = 10;
const STEPS: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Medium,
    Hard,
    /// May produce mazes with no route to the goal.
    Extreme,
}

impl Difficulty {
    fn wall_density(self) -> f64 {
        match self {
            Difficulty::Medium => 0.15,
            Difficulty::Hard => 0.25,
            Difficulty::Extreme => 0.35,
        }
    }

    fn fallback_density(self) -> f64 {
        match self {
            Difficulty::Medium => 0.1,
            Difficulty::Hard => 0.2,
            Difficulty::Extreme => 0.3,
        }
    }

    fn min_goal_distance(self, rows: usize, cols: usize) -> f64 {
        let base = ((rows + cols) / 4) as f64;
        match self {
            Difficulty::Medium => base,
            Difficulty::Hard => base * 1.5,
            Difficulty::Extreme => base * 2.0,
        }
    }
}

impl FromStr for Difficulty {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "extreme" => Ok(Difficulty::Extreme),
            other => Err(SearchError::Configuration(format!(
                "unknown difficulty '{}'",
                other
            ))),
        }
    }
}

/// `true` marks a wall. Indexed `[y][x]`.
type Cells = Vec<Vec<bool>>;

fn step(cells: &Cells, pos: Position, dx: isize, dy: isize) -> Option<Position> {
    let next = pos.offset(dx, dy)?;
    (next.y < cells.len() && next.x < cells[0].len()).then_some(next)
}

fn open_neighbors(cells: &Cells, pos: Position) -> Vec<Position> {
    STEPS
        .iter()
        .filter_map(|&(dx, dy)| step(cells, pos, dx, dy))
        .filter(|p| !cells[p.y][p.x])
        .collect()
}

fn path_exists(cells: &Cells, start: Position, goal: Position) -> bool {
    bfs(&start, |&p| open_neighbors(cells, p), |&p| p == goal).is_some()
}

fn shuffled_jumps<R: Rng + ?Sized>(rng: &mut R) -> Vec<(isize, isize)> {
    let mut jumps = vec![(0, 2), (2, 0), (0, -2), (-2, 0)];
    jumps.shuffle(rng);
    jumps
}

/// Recursive backtracking carve from `origin`, two cells at a time. The
/// recursion is unrolled onto an explicit stack.
fn carve<R: Rng + ?Sized>(cells: &mut Cells, origin: Position, rng: &mut R) {
    let mut stack = vec![(origin, shuffled_jumps(rng))];
    while let Some((pos, dirs)) = stack.last_mut() {
        let pos = *pos;
        let Some((dx, dy)) = dirs.pop() else {
            stack.pop();
            continue;
        };
        let Some(next) = step(cells, pos, dx, dy) else {
            continue;
        };
        if !cells[next.y][next.x] {
            continue;
        }
        cells[next.y][next.x] = false;
        if let Some(between) = pos.offset(dx / 2, dy / 2) {
            cells[between.y][between.x] = false;
        }
        stack.push((next, shuffled_jumps(rng)));
    }
}

/// The farthest open cell at least `min_distance` moves away, preferring
/// cells on the left/right edge, then on the top/bottom edge.
fn distant_goal(cells: &Cells, start: Position, min_distance: f64) -> Option<Position> {
    let rows = cells.len();
    let cols = cells[0].len();

    let mut seen = vec![vec![false; cols]; rows];
    seen[start.y][start.x] = true;
    let mut queue = VecDeque::from([(start, 0usize)]);
    let mut candidates = Vec::new();

    while let Some((pos, dist)) = queue.pop_front() {
        if dist as f64 >= min_distance {
            candidates.push((pos, dist));
        }
        for next in open_neighbors(cells, pos) {
            if !seen[next.y][next.x] {
                seen[next.y][next.x] = true;
                queue.push_back((next, dist + 1));
            }
        }
    }

    candidates.sort_by_key(|&(p, dist)| {
        (
            Reverse(dist),
            Reverse(p.x == 0 || p.x == cols - 1),
            Reverse(p.y == 0 || p.y == rows - 1),
        )
    });
    candidates.first().map(|&(p, _)| p)
}

/// Sprinkles interior walls. With `keep_path`, a wall that would cut the
/// start off from the goal is taken back.
fn add_random_walls<R: Rng + ?Sized>(
    cells: &mut Cells,
    start: Position,
    goal: Position,
    density: f64,
    keep_path: bool,
    rng: &mut R,
) {
    let rows = cells.len();
    let cols = cells[0].len();
    if rows < 3 || cols < 3 {
        return;
    }

    let target = (rows as f64 * cols as f64 * density) as usize;
    let mut added = 0;
    for _ in 0..target * 3 {
        if added >= target {
            break;
        }
        let pos = Position::new(rng.gen_range(1..=cols - 2), rng.gen_range(1..=rows - 2));
        if pos == start || pos == goal || cells[pos.y][pos.x] {
            continue;
        }
        cells[pos.y][pos.x] = true;
        if keep_path && !path_exists(cells, start, goal) {
            cells[pos.y][pos.x] = false;
        } else {
            added += 1;
        }
    }
}

/// Greedily covers wall cells with rectangles, extending right first and
/// then down.
fn to_rectangles(cells: &Cells) -> Vec<Wall> {
    let rows = cells.len();
    let cols = cells[0].len();
    let mut covered = vec![vec![false; cols]; rows];
    let mut walls = Vec::new();

    for y in 0..rows {
        for x in 0..cols {
            if !cells[y][x] || covered[y][x] {
                continue;
            }
            let mut width = 1;
            while x + width < cols && cells[y][x + width] {
                width += 1;
            }
            let mut height = 1;
            while y + height < rows && (0..width).all(|w| cells[y + height][x + w]) {
                height += 1;
            }
            for row in covered.iter_mut().skip(y).take(height) {
                for cell in row.iter_mut().skip(x).take(width) {
                    *cell = true;
                }
            }
            walls.push(Wall::new(x, y, width, height));
        }
    }
    walls
}

fn to_config(cells: &Cells, start: Position, goal: Position) -> MazeConfig {
    MazeConfig {
        dimensions: (cells.len(), cells[0].len()),
        start,
        goals: vec![goal],
        walls: to_rectangles(cells),
    }
}

/// Generates a maze with its start in the top-left corner and a single,
/// distant goal.
///
/// Every difficulty except [`Difficulty::Extreme`] guarantees a route. After
/// repeated failures an open grid with scattered walls is returned instead.
pub fn generate_random_maze<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    difficulty: Difficulty,
    rng: &mut R,
) -> MazeConfig {
    let start = Position::new(0, 0);
    let min_distance = difficulty.min_goal_distance(rows, cols);

    for attempt in 0..MAX_ATTEMPTS {
        let mut cells = vec![vec![true; cols]; rows];
        cells[0][0] = false;
        carve(&mut cells, start, rng);

        let Some(goal) = distant_goal(&cells, start, min_distance) else {
            log::debug!("attempt {}: no goal at distance {}", attempt, min_distance);
            continue;
        };

        add_random_walls(&mut cells, start, goal, difficulty.wall_density(), true, rng);
        if difficulty == Difficulty::Extreme && rng.gen_bool(0.3) {
            add_random_walls(&mut cells, start, goal, 0.2, false, rng);
        }

        if difficulty != Difficulty::Extreme && !path_exists(&cells, start, goal) {
            continue;
        }
        return to_config(&cells, start, goal);
    }

    log::warn!(
        "falling back to an open {}x{} grid after {} attempts",
        cols,
        rows,
        MAX_ATTEMPTS
    );
    let mut cells = vec![vec![false; cols]; rows];
    let goal = Position::new(cols - 1, rows - 1);
    add_random_walls(&mut cells, start, goal, difficulty.fallback_density(), true, rng);
    to_config(&cells, start, goal)
}

/// Hand-written cases covering a straight run, several goals, no solution, a
/// narrow passage and a blocky maze.
pub const HARDCODED_CASES: [(&str, &str); 5] = [
    ("test1.txt", "[5,5]\n[0,0]\n[4,4]\n"),
    (
        "test2.txt",
        "[8,8]\n[0,0]\n[5,7]|[7,2]\n[1,1,2,2]\n[5,1,2,2]\n[1,5,2,2]",
    ),
    ("test3.txt", "[4,4]\n[0,0]\n[3,3]\n[1,1,3,2]\n[0,3,4,1]"),
    ("test4.txt", "[7,7]\n[0,0]\n[6,6]\n[2,0,1,5]\n[4,2,1,5]"),
    (
        "test5.txt",
        "[10,10]\n[0,0]\n[9,9]\n[2,2,2,2]\n[6,2,2,2]\n[2,6,2,2]\n[6,6,2,2]\n[4,4,2,2]\n[0,4,1,2]\n[9,4,1,2]",
    ),
];

const RANDOM_CASES: [(&str, usize, Difficulty); 9] = [
    ("test6.txt", 15, Difficulty::Medium),
    ("test7.txt", 15, Difficulty::Medium),
    ("test8.txt", 20, Difficulty::Medium),
    ("test9.txt", 20, Difficulty::Hard),
    ("test10.txt", 25, Difficulty::Hard),
    ("test11.txt", 25, Difficulty::Hard),
    ("test12.txt", 30, Difficulty::Hard),
    ("test13.txt", 35, Difficulty::Extreme),
    ("test14.txt", 50, Difficulty::Extreme),
];

/// Writes the test-case set into a directory.
pub struct TestCaseGenerator {
    dir: PathBuf,
    rng: StdRng,
}

impl TestCaseGenerator {
    pub fn new(dir: impl Into<PathBuf>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        TestCaseGenerator {
            dir: dir.into(),
            rng,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.dir.join(name);
        fs::write(&path, content).map_err(|e| SearchError::io(&path, e))?;
        Ok(path)
    }

    pub fn generate_hardcoded(&mut self) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.dir).map_err(|e| SearchError::io(&self.dir, e))?;
        HARDCODED_CASES
            .iter()
            .map(|(name, content)| self.write(name, content))
            .collect()
    }

    /// Writes one random square maze as `name`.
    pub fn generate_one(&mut self, name: &str, size: usize, difficulty: Difficulty) -> Result<PathBuf> {
        if size == 0 {
            return Err(SearchError::Configuration(
                "maze size must be positive".to_string(),
            ));
        }
        fs::create_dir_all(&self.dir).map_err(|e| SearchError::io(&self.dir, e))?;
        let maze = generate_random_maze(size, size, difficulty, &mut self.rng);
        log::info!(
            "generated {} ({}x{}, {:?}, {} walls)",
            name,
            size,
            size,
            difficulty,
            maze.walls.len()
        );
        self.write(name, &maze.to_text())
    }

    /// Writes `test1.txt` through `test14.txt`.
    pub fn generate_all(&mut self) -> Result<Vec<PathBuf>> {
        let mut written = self.generate_hardcoded()?;
        for (name, size, difficulty) in RANDOM_CASES {
            written.push(self.generate_one(name, size, difficulty)?);
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Cell, Grid};

    fn cells_of(config: &MazeConfig) -> Cells {
        let grid = Grid::new(config).unwrap();
        (0..grid.rows())
            .map(|y| {
                (0..grid.cols())
                    .map(|x| grid.cell(Position::new(x, y)) == Some(Cell::Wall))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn rectangles_cover_exactly_the_walls() {
        let cells: Cells = vec![
            vec![true, true, false],
            vec![true, true, false],
            vec![false, true, true],
        ];
        let walls = to_rectangles(&cells);
        assert_eq!(walls[0], Wall::new(0, 0, 2, 2));

        let config = MazeConfig {
            dimensions: (3, 3),
            start: Position::new(2, 0),
            goals: vec![Position::new(2, 0)],
            walls,
        };
        assert_eq!(cells_of(&config), cells);
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = generate_random_maze(15, 15, Difficulty::Hard, &mut StdRng::seed_from_u64(7));
        let b = generate_random_maze(15, 15, Difficulty::Hard, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn non_extreme_mazes_are_solvable() {
        let mut rng = StdRng::seed_from_u64(42);
        for (size, difficulty) in [(15, Difficulty::Medium), (20, Difficulty::Hard)] {
            let maze = generate_random_maze(size, size, difficulty, &mut rng);
            let cells = cells_of(&maze);
            assert!(!cells[0][0]);
            assert!(path_exists(&cells, maze.start, maze.goals[0]));
            assert!(
                maze.start.manhattan(maze.goals[0]) > 0,
                "goal should not sit on the start"
            );
        }
    }

    #[test]
    fn writes_the_full_case_set() {
        let dir = tempfile::tempdir().unwrap();
        let mut generator = TestCaseGenerator::new(dir.path(), Some(3));
        let written = generator.generate_all().unwrap();
        assert_eq!(written.len(), 14);
        for path in &written {
            let text = fs::read_to_string(path).unwrap();
            assert!(MazeConfig::parse(&text).is_ok(), "{}", path.display());
        }
    }

    #[test]
    fn difficulty_parses() {
        assert_eq!("hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("easy".parse::<Difficulty>().is_err());
    }

    #[test]
    fn single_maze_lands_in_the_case_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut generator = TestCaseGenerator::new(dir.path().join("mazes"), Some(5));
        let path = generator.generate_one("big.txt", 12, Difficulty::Medium).unwrap();
        let maze = MazeConfig::parse(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(maze.dimensions, (12, 12));
        assert!(path_exists(&cells_of(&maze), maze.start, maze.goals[0]));
        assert!(generator.generate_one("empty.txt", 0, Difficulty::Hard).is_err());
    }
}
