//! Reading and writing the textual maze format.
//!
//! ```text
//! [rows,cols]
//! [x,y]
//! [x,y] | [x,y]
//! [x,y,width,height]
//! ```
//!
//! The first three lines are the dimensions, the start and the goals; every
//! further line is a wall rectangle.

use crate::error::{Result, SearchError};
use crate::grid::Position;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory searched when a maze path does not exist as given.
pub const TEST_CASES_DIR: &str = "test_cases";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wall {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Wall {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Wall {
            x,
            y,
            width,
            height,
        }
    }
}

impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.width, self.height)
    }
}

/// A validated maze description, ready for [`crate::grid::Grid::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeConfig {
    /// `(rows, cols)`
    pub dimensions: (usize, usize),
    pub start: Position,
    pub goals: Vec<Position>,
    pub walls: Vec<Wall>,
}

impl MazeConfig {
    pub fn parse(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if lines.len() < 3 {
            return Err(SearchError::Configuration(
                "Incomplete maze configuration file".to_string(),
            ));
        }

        let dims = parse_tuple(lines[0], 2)?;
        if dims[0] <= 0 || dims[1] <= 0 {
            return Err(SearchError::Configuration(format!(
                "grid dimensions must be positive, got {}",
                lines[0]
            )));
        }
        let (rows, cols) = (dims[0] as usize, dims[1] as usize);

        let start = parse_position(lines[1], "Start", rows, cols)?;

        let goals = lines[2]
            .split('|')
            .map(|goal| parse_position(goal.trim(), "Goal", rows, cols))
            .collect::<Result<Vec<_>>>()?;

        let walls = lines[3..]
            .iter()
            .map(|line| parse_wall(line, rows, cols))
            .collect::<Result<Vec<_>>>()?;

        Ok(MazeConfig {
            dimensions: (rows, cols),
            start,
            goals,
            walls,
        })
    }

    /// Renders the config back into the file format.
    pub fn to_text(&self) -> String {
        let mut lines = vec![
            format!("[{},{}]", self.dimensions.0, self.dimensions.1),
            format!("[{},{}]", self.start.x, self.start.y),
            self.goals
                .iter()
                .map(|g| format!("[{},{}]", g.x, g.y))
                .collect::<Vec<_>>()
                .join("|"),
        ];
        lines.extend(
            self.walls
                .iter()
                .map(|w| format!("[{},{},{},{}]", w.x, w.y, w.width, w.height)),
        );
        lines.join("\n")
    }
}

/// Resolves a maze path, falling back to [`TEST_CASES_DIR`] when the path
/// does not exist as given.
pub fn resolve_path(path: &Path) -> PathBuf {
    if path.is_file() {
        path.to_path_buf()
    } else {
        Path::new(TEST_CASES_DIR).join(path)
    }
}

pub fn read_maze_file(path: &Path) -> Result<MazeConfig> {
    let resolved = resolve_path(path);
    let text = fs::read_to_string(&resolved).map_err(|e| SearchError::io(&resolved, e))?;
    MazeConfig::parse(&text)
}

fn parse_tuple(item: &str, arity: usize) -> Result<Vec<i64>> {
    let inner = item
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| SearchError::Configuration(format!("expected [..], got '{}'", item)))?;

    let values = inner
        .split(',')
        .map(|v| {
            v.trim().parse::<i64>().map_err(|_| {
                SearchError::Configuration(format!("invalid integer '{}' in '{}'", v.trim(), item))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if values.len() != arity {
        return Err(SearchError::Configuration(format!(
            "expected {} values in '{}', found {}",
            arity,
            item,
            values.len()
        )));
    }
    Ok(values)
}

fn in_range(value: i64, limit: usize) -> bool {
    value >= 0 && (value as u64) < limit as u64
}

fn parse_position(item: &str, kind: &str, rows: usize, cols: usize) -> Result<Position> {
    let v = parse_tuple(item, 2)?;
    if !in_range(v[0], cols) || !in_range(v[1], rows) {
        return Err(SearchError::OutOfBounds {
            item: format!("{} position ({}, {})", kind, v[0], v[1]),
            rows,
            cols,
        });
    }
    Ok(Position::new(v[0] as usize, v[1] as usize))
}

fn parse_wall(item: &str, rows: usize, cols: usize) -> Result<Wall> {
    let v = parse_tuple(item, 4)?;
    let (x, y, w, h) = (v[0], v[1], v[2], v[3]);
    if w <= 0 || h <= 0 {
        return Err(SearchError::Configuration(format!(
            "wall ({}, {}, {}, {}) has an empty extent",
            x, y, w, h
        )));
    }
    let far_x = x.checked_add(w - 1).filter(|&v| in_range(v, cols));
    let far_y = y.checked_add(h - 1).filter(|&v| in_range(v, rows));
    if !in_range(x, cols) || !in_range(y, rows) || far_x.is_none() || far_y.is_none() {
        return Err(SearchError::OutOfBounds {
            item: format!("Wall ({}, {}, {}, {})", x, y, w, h),
            rows,
            cols,
        });
    }
    Ok(Wall::new(x as usize, y as usize, w as usize, h as usize))
}
