use crate::error::{Result, SearchError};
use crate::maze_file::{MazeConfig, Wall};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }

    /// Moves by a signed delta, returning `None` when either coordinate would
    /// go negative. Upper bounds are the grid's business.
    pub fn offset(self, dx: isize, dy: isize) -> Option<Position> {
        Some(Position {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }

    pub fn manhattan(self, other: Position) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Open,
    Wall,
    Start,
    Goal,
    Visited,
    Path,
    MeetingPoint,
}

impl Cell {
    pub fn symbol(self) -> char {
        match self {
            Cell::Open => '•',
            Cell::Wall => '#',
            Cell::Start => 'S',
            Cell::Goal => 'G',
            Cell::Visited => 'V',
            Cell::Path => 'P',
            Cell::MeetingPoint => 'X',
        }
    }
}

/// Dense rectangular map of cells, stored row-major.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    start: Position,
    goals: Vec<Position>,
}

impl Grid {
    /// Builds the grid from a maze configuration.
    ///
    /// Walls are stamped first, then the start, then the goals, so a start or
    /// goal placed on a wall overrides it. Any position outside the grid is
    /// rejected before a single cell is written.
    pub fn new(config: &MazeConfig) -> Result<Self> {
        let (rows, cols) = config.dimensions;
        if rows == 0 || cols == 0 {
            return Err(SearchError::Configuration(format!(
                "grid dimensions must be positive, got [{},{}]",
                rows, cols
            )));
        }
        if config.goals.is_empty() {
            return Err(SearchError::Configuration(
                "at least one goal is required".to_string(),
            ));
        }

        let in_bounds = |p: Position| p.x < cols && p.y < rows;
        let out_of_bounds = |item: String| SearchError::OutOfBounds { item, rows, cols };

        if !in_bounds(config.start) {
            return Err(out_of_bounds(format!("Start position {}", config.start)));
        }
        for &goal in &config.goals {
            if !in_bounds(goal) {
                return Err(out_of_bounds(format!("Goal position {}", goal)));
            }
        }
        for wall in &config.walls {
            if wall.width == 0 || wall.height == 0 {
                return Err(SearchError::Configuration(format!(
                    "wall {} has an empty extent",
                    wall
                )));
            }
            let far_corner = wall
                .x
                .checked_add(wall.width - 1)
                .zip(wall.y.checked_add(wall.height - 1))
                .map(|(x, y)| Position::new(x, y));
            match far_corner {
                Some(corner) if in_bounds(Position::new(wall.x, wall.y)) && in_bounds(corner) => {}
                _ => return Err(out_of_bounds(format!("Wall {}", wall))),
            }
        }

        let area = rows.checked_mul(cols).ok_or_else(|| {
            SearchError::Configuration(format!("grid [{},{}] is too large", rows, cols))
        })?;

        let mut grid = Grid {
            rows,
            cols,
            cells: vec![Cell::Open; area],
            start: config.start,
            goals: config.goals.clone(),
        };

        for wall in &config.walls {
            grid.stamp_wall(wall);
        }
        grid.set(config.start, Cell::Start);
        for &goal in &config.goals {
            grid.set(goal, Cell::Goal);
        }

        Ok(grid)
    }

    fn stamp_wall(&mut self, wall: &Wall) {
        for y in wall.y..wall.y + wall.height {
            for x in wall.x..wall.x + wall.width {
                self.set(Position::new(x, y), Cell::Wall);
            }
        }
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.contains(pos).then(|| pos.y * self.cols + pos.x)
    }

    fn set(&mut self, pos: Position, cell: Cell) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = cell;
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn start(&self) -> Position {
        self.start
    }

    /// Goals in input order. Duplicates are kept as given.
    pub fn goals(&self) -> &[Position] {
        &self.goals
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.cols && pos.y < self.rows
    }

    pub fn cell(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// In bounds and not a wall.
    pub fn is_passable(&self, pos: Position) -> bool {
        matches!(self.cell(pos), Some(cell) if cell != Cell::Wall)
    }

    /// Stamps an open cell as visited. Start, goal and already marked cells
    /// are left alone.
    pub fn mark_visited(&mut self, pos: Position) {
        if self.cell(pos) == Some(Cell::Open) {
            self.set(pos, Cell::Visited);
        }
    }

    pub fn mark_meeting_point(&mut self, pos: Position) {
        self.set(pos, Cell::MeetingPoint);
    }

    /// Turns visited cells along `path` into path cells.
    pub fn mark_path(&mut self, path: &[Position]) {
        for &pos in path {
            match self.cell(pos) {
                Some(Cell::Visited) => self.set(pos, Cell::Path),
                _ if self.goals.contains(&pos) => self.set(pos, Cell::Goal),
                _ => {}
            }
        }
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row_index, row) in self.cells.chunks(self.cols).enumerate() {
            if row_index > 0 {
                writeln!(f)?;
            }
            for (col_index, cell) in row.iter().enumerate() {
                if col_index > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}
