use crate::algorithms::Method;
use crate::error::{Result, SearchError};
use crate::generator::TestCaseGenerator;
use crate::grid::{Grid, Position};
use crate::maze_file::read_maze_file;
use crate::statistics::{MethodSummary, PerformanceRange, RunRecord};
use pathfinding::prelude::bfs;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use sysinfo::{Pid, System};

const CSV_HEADER: &str = "test_name,method,passed,time_ms,nodes_explored,path_length,reference_moves,memory_kb,error";

/// Settings for a suite run.
#[derive(Debug, Clone)]
pub struct BenchmarkOptions {
    pub cases_dir: PathBuf,
    pub output_file: PathBuf,
    pub beam_width: usize,
    /// Seed for the random test cases; entropy when absent.
    pub seed: Option<u64>,
    /// Skip regenerating the case files and run whatever is in `cases_dir`.
    pub reuse_cases: bool,
    pub quiet: bool,
}

/// Runs every strategy over every `test<N>.txt` file in a directory.
pub struct Benchmark {
    options: BenchmarkOptions,
    records: Vec<RunRecord>,
    system: System,
    pid: Option<Pid>,
}

/// Fewest moves from the start to any goal, found by an independent
/// breadth-first search.
pub fn reference_moves(grid: &Grid) -> Option<usize> {
    let goals = grid.goals();
    bfs(
        &grid.start(),
        |&p: &Position| {
            [(0, -1), (-1, 0), (0, 1), (1, 0)]
                .into_iter()
                .filter_map(move |(dx, dy)| p.offset(dx, dy))
                .filter(|&n| grid.is_passable(n))
                .collect::<Vec<_>>()
        },
        |p| goals.contains(p),
    )
    .map(|path| path.len() - 1)
}

/// `test<N>.txt` files in `dir`, ordered by `N`.
pub fn list_test_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| SearchError::io(dir, e))?;
    let mut numbered: Vec<(u32, PathBuf)> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter_map(|path| {
            let name = path.file_name()?.to_str()?;
            let number = name.strip_prefix("test")?.strip_suffix(".txt")?.parse().ok()?;
            Some((number, path))
        })
        .collect();
    numbered.sort();
    Ok(numbered.into_iter().map(|(_, path)| path).collect())
}

impl Benchmark {
    pub fn new(options: BenchmarkOptions) -> Self {
        Benchmark {
            options,
            records: Vec::new(),
            system: System::new(),
            pid: sysinfo::get_current_pid().ok(),
        }
    }

    pub fn records(&self) -> &[RunRecord] {
        &self.records
    }

    /// Resident set size of this process in KB, 0 when unavailable.
    fn resident_kb(&mut self) -> f64 {
        let Some(pid) = self.pid else {
            return 0.0;
        };
        self.system.refresh_process(pid);
        self.system
            .process(pid)
            .map(|process| process.memory() as f64 / 1024.0)
            .unwrap_or(0.0)
    }

    pub fn run(&mut self) -> Result<()> {
        if !self.options.reuse_cases {
            println!("\nPhase 1: Generating Test Cases");
            println!("{}", "-".repeat(30));
            let mut generator = TestCaseGenerator::new(&self.options.cases_dir, self.options.seed);
            let written = generator.generate_all()?;
            println!("Generated {} test cases in {}", written.len(), generator.dir().display());
        }

        println!("\nPhase 2: Running Tests");
        println!("{}", "-".repeat(30));
        let files = list_test_files(&self.options.cases_dir)?;
        let total = files.len() * Method::ALL.len();
        let mut completed = 0;

        for file in &files {
            for method in Method::ALL {
                completed += 1;
                if !self.options.quiet {
                    println!(
                        "Progress: {:.1}% - Running {} on {}",
                        completed as f64 / total as f64 * 100.0,
                        method.code().to_uppercase(),
                        file.display()
                    );
                }
                let record = self.run_single(file, method);
                self.records.push(record);
            }
        }

        println!("\nPhase 3: Generating Report");
        println!("{}", "-".repeat(30));
        self.print_report();
        self.export_csv(&self.options.output_file)?;
        println!("\nResults exported to {}", self.options.output_file.display());
        Ok(())
    }

    /// Runs one strategy on one file. Failures of any kind end up in the
    /// record rather than aborting the suite.
    pub fn run_single(&mut self, file: &Path, method: Method) -> RunRecord {
        let test_name = file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string());

        let memory_before = self.resident_kb();
        let started = Instant::now();

        let prepared = read_maze_file(file)
            .and_then(|config| Grid::new(&config))
            .and_then(|grid| Ok((method.build(self.options.beam_width)?, grid)));
        let (strategy, grid) = match prepared {
            Ok(prepared) => prepared,
            Err(e) => {
                log::warn!("{} on {} failed to start: {}", method, test_name, e);
                return RunRecord::failed(&test_name, method, e.to_string());
            }
        };

        let result = strategy.search(&grid);
        let time_ms = started.elapsed().as_secs_f64() * 1000.0;
        let memory_kb = self.resident_kb() - memory_before;
        let reference = reference_moves(&grid);

        if !result.found {
            log::warn!("{} found no path in {}", method, test_name);
        }

        RunRecord {
            test_name,
            method,
            passed: result.found,
            error: (!result.found).then(|| "No path found to valid goal".to_string()),
            // Never report a zero duration; zero marks runs that did not start.
            time_ms: time_ms.max(f64::MIN_POSITIVE),
            nodes_explored: result.nodes_explored,
            path_length: result.path.len(),
            reference_moves: reference,
            memory_kb,
        }
    }

    pub fn summaries(&self) -> Vec<MethodSummary> {
        Method::ALL
            .iter()
            .map(|&method| MethodSummary::from_records(method, &self.records))
            .collect()
    }

    pub fn print_report(&self) {
        println!("\n{}", "=".repeat(122));
        println!("SEARCH ALGORITHM TEST REPORT");
        println!("{}", "=".repeat(122));

        println!("\nOverall Summary:");
        println!(
            "{:<26} {:>6} {:>7} {:>7} {:>14} {:>10} {:>16} {:>16} {:>11}",
            "Method",
            "Tests",
            "Passed",
            "Failed",
            "Avg Time (ms)",
            "Avg Nodes",
            "Avg Path Length",
            "Avg Memory (KB)",
            "Efficiency"
        );
        println!("{}", "-".repeat(122));
        let summaries = self.summaries();
        for summary in &summaries {
            println!("{}", summary);
        }

        println!("\nPerformance Comparison:");
        println!(
            "{:<26} {:>13} {:>13} {:>9} {:>9} {:>15} {:>15}",
            "Method", "Min Time (ms)", "Max Time (ms)", "Min Nodes", "Max Nodes", "Min Memory (KB)", "Max Memory (KB)"
        );
        println!("{}", "-".repeat(110));
        for method in Method::ALL {
            if let Some(range) = PerformanceRange::from_records(method, &self.records) {
                println!("{}", range);
            }
        }

        println!("\nDetailed Failure Report:");
        println!("{}", "-".repeat(80));
        let mut failures_found = false;
        for summary in summaries.iter().filter(|s| !s.failed_tests.is_empty()) {
            failures_found = true;
            println!("\n{} failures:", summary.method.full_name());
            for test_name in &summary.failed_tests {
                let record = self
                    .records
                    .iter()
                    .find(|r| r.method == summary.method && &r.test_name == test_name);
                let error = record
                    .and_then(|r| r.error.as_deref())
                    .unwrap_or("unknown error");
                let unsolvable = match record {
                    Some(r) if r.reference_moves.is_none() => " (no route exists)",
                    _ => "",
                };
                println!("  - Test {}: {}{}", test_name, error, unsolvable);
            }
        }
        if !failures_found {
            println!("No failures reported for solved mazes!");
        }
    }

    pub fn export_csv(&self, path: &Path) -> Result<()> {
        let mut file = File::create(path).map_err(|e| SearchError::io(path, e))?;
        writeln!(file, "{}", CSV_HEADER).map_err(|e| SearchError::io(path, e))?;

        for r in &self.records {
            writeln!(
                file,
                "{},{},{},{:.4},{},{},{},{:.2},{}",
                r.test_name,
                r.method.code(),
                r.passed,
                r.time_ms,
                r.nodes_explored,
                r.path_length,
                r.reference_moves.map(|m| m.to_string()).unwrap_or_default(),
                r.memory_kb,
                r.error.as_deref().unwrap_or("").replace(',', ";"),
            )
            .map_err(|e| SearchError::io(path, e))?;
        }
        log::info!("wrote {} rows to {}", self.records.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze_file::MazeConfig;

    fn options(dir: &Path) -> BenchmarkOptions {
        BenchmarkOptions {
            cases_dir: dir.join("cases"),
            output_file: dir.join("results.csv"),
            beam_width: 2,
            seed: Some(11),
            reuse_cases: false,
            quiet: true,
        }
    }

    #[test]
    fn lists_test_files_numerically() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["test10.txt", "test2.txt", "test1.txt", "notes.txt", "testx.txt"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        let names: Vec<_> = list_test_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["test1.txt", "test2.txt", "test10.txt"]);
    }

    #[test]
    fn reference_moves_handles_multiple_goals() {
        let grid = Grid::new(
            &MazeConfig::parse("[8,8]\n[0,0]\n[5,7]|[7,2]\n[1,1,2,2]\n[5,1,2,2]\n[1,5,2,2]").unwrap(),
        )
        .unwrap();
        assert_eq!(reference_moves(&grid), Some(9));

        let blocked =
            Grid::new(&MazeConfig::parse("[4,4]\n[0,0]\n[3,3]\n[1,1,3,2]\n[0,3,4,1]").unwrap()).unwrap();
        assert_eq!(reference_moves(&blocked), None);
    }

    #[test]
    fn bad_file_becomes_failed_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test1.txt");
        fs::write(&path, "[4,4]\n[9,9]\n[3,3]").unwrap();
        let mut bench = Benchmark::new(options(dir.path()));
        let record = bench.run_single(&path, Method::BreadthFirst);
        assert!(!record.passed);
        assert_eq!(record.time_ms, 0.0);
        assert!(record.error.unwrap().contains("out of bounds"));
    }

    #[test]
    fn full_suite_writes_csv() {
        let dir = tempfile::tempdir().unwrap();
        let mut bench = Benchmark::new(options(dir.path()));
        bench.run().unwrap();

        assert_eq!(bench.records().len(), 14 * Method::ALL.len());
        // test3 has no route, so every method fails on it
        let test3: Vec<_> = bench
            .records()
            .iter()
            .filter(|r| r.test_name == "test3.txt")
            .collect();
        assert!(test3.iter().all(|r| !r.passed));

        let csv = fs::read_to_string(dir.path().join("results.csv")).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(CSV_HEADER));
        assert_eq!(lines.count(), 14 * 6);

        let summaries = bench.summaries();
        assert_eq!(summaries.len(), 6);
        assert!(summaries.iter().all(|s| s.total_tests == 14));
    }
}
