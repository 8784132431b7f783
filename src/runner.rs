use crate::algorithms::common::{annotate, SearchResult};
use crate::algorithms::Method;
use crate::error::Result;
use crate::grid::{Cell, Grid, Position};
use crate::maze_file::{read_maze_file, resolve_path};
use std::fmt;
use std::path::Path;
use std::time::{Duration, Instant};

/// A finished single search, with the grid already marked up.
#[derive(Debug)]
pub struct RunReport {
    pub file: String,
    pub method: Method,
    pub grid: Grid,
    pub result: SearchResult,
    pub elapsed: Duration,
}

/// Loads a maze file, runs one strategy on it and marks the outcome on the
/// grid.
pub fn run_search(path: &Path, method: Method, beam_width: usize) -> Result<RunReport> {
    let strategy = method.build(beam_width)?;
    let config = read_maze_file(path)?;
    let mut grid = Grid::new(&config)?;

    let started = Instant::now();
    let result = strategy.search(&grid);
    let elapsed = started.elapsed();

    log::info!(
        "{} on {}: found={} nodes={} in {:.2?}",
        method,
        path.display(),
        result.found,
        result.nodes_explored,
        elapsed
    );

    annotate(&mut grid, &result);
    Ok(RunReport {
        file: resolve_path(path).display().to_string(),
        method,
        grid,
        result,
        elapsed,
    })
}

/// Renders the unsolved maze.
pub fn render_maze(path: &Path) -> Result<String> {
    let config = read_maze_file(path)?;
    let grid = Grid::new(&config)?;
    Ok(format!("\nMaze from {}:\n{}", resolve_path(path).display(), grid))
}

pub fn format_positions(positions: &[Position]) -> String {
    let items: Vec<String> = positions.iter().map(Position::to_string).collect();
    format!("[{}]", items.join(", "))
}

impl RunReport {
    /// The short answer: file and method, then either the reached goal with
    /// the node count and the moves, or the failure line.
    pub fn summary(&self) -> Summary<'_> {
        Summary(self)
    }

    /// Annotated grid and full trace, for checking a run by eye.
    pub fn details(&self) -> Details<'_> {
        Details(self)
    }
}

pub struct Summary<'a>(&'a RunReport);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(f, "{} {}", report.file, report.method.full_name())?;
        match report.result.goal() {
            Some(goal) => {
                let moves: Vec<&str> = report.result.moves().iter().map(|m| m.label()).collect();
                writeln!(f, "{} {}", goal, report.result.nodes_explored)?;
                write!(f, "{}", moves.join(" "))
            }
            None => write!(f, "No goal is reachable; {}", report.result.nodes_explored),
        }
    }
}

pub struct Details<'a>(&'a RunReport);

impl fmt::Display for Details<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let result = &report.result;
        writeln!(f, "\n--- To Check ---")?;
        writeln!(f, "\nGrid after {}:", report.method.full_name())?;
        writeln!(f, "{}", report.grid)?;
        writeln!(
            f,
            "Cells visited: {}, on path: {}",
            report.grid.count(Cell::Visited),
            report.grid.count(Cell::Path)
        )?;
        writeln!(f, "\nPath found: {}", result.found)?;
        if !result.found {
            return Ok(());
        }
        writeln!(f, "Path taken: {}", format_positions(&result.path))?;
        writeln!(f, "Total nodes explored: {}", result.nodes_explored)?;
        writeln!(f, "Time taken: {:.2} ms", report.elapsed.as_secs_f64() * 1000.0)?;
        if let Some(meeting) = result.meeting_point {
            writeln!(f, "Frontiers met at: {}", meeting)?;
        }
        writeln!(f, "Visited nodes in order: {}", format_positions(&result.visited_order))?;
        write!(f, "\n--------------------------------")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn maze_file(dir: &tempfile::TempDir, text: &str) -> std::path::PathBuf {
        let path = dir.path().join("maze.txt");
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn summary_lists_goal_nodes_and_moves() {
        let dir = tempfile::tempdir().unwrap();
        let path = maze_file(&dir, "[1,4]\n[0,0]\n[3,0]\n");
        let report = run_search(&path, Method::BreadthFirst, 2).unwrap();
        let summary = report.summary().to_string();
        let lines: Vec<&str> = summary.lines().collect();
        assert!(lines[0].ends_with("maze.txt Breadth First Search"));
        assert_eq!(lines[1], "(3, 0) 4");
        assert_eq!(lines[2], "RIGHT RIGHT RIGHT");
    }

    #[test]
    fn summary_reports_unreachable() {
        let dir = tempfile::tempdir().unwrap();
        let path = maze_file(&dir, "[1,3]\n[0,0]\n[2,0]\n[1,0,1,1]");
        let report = run_search(&path, Method::DepthFirst, 2).unwrap();
        assert!(report.summary().to_string().ends_with("No goal is reachable; 1"));
        assert!(report.details().to_string().contains("Path found: false"));
    }

    #[test]
    fn details_show_marked_grid() {
        let dir = tempfile::tempdir().unwrap();
        let path = maze_file(&dir, "[1,3]\n[0,0]\n[2,0]\n");
        let report = run_search(&path, Method::AStar, 2).unwrap();
        let details = report.details().to_string();
        assert!(details.contains("S P G"));
        assert!(details.contains("Cells visited: 0, on path: 1"));
        assert!(details.contains("Path taken: [(0, 0), (1, 0), (2, 0)]"));
    }

    #[test]
    fn strategy_errors_come_before_file_errors() {
        let missing = Path::new("definitely-not-here.txt");
        assert!(matches!(
            run_search(missing, Method::Beam, 0),
            Err(crate::error::SearchError::InvalidBeamWidth(0))
        ));
    }

    #[test]
    fn renders_unsolved_maze() {
        let dir = tempfile::tempdir().unwrap();
        let path = maze_file(&dir, "[2,2]\n[0,0]\n[1,1]\n[1,0,1,1]");
        let rendered = render_maze(&path).unwrap();
        assert!(rendered.ends_with("S #\n• G"));
    }
}
