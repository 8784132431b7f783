use crate::algorithms::beam::DEFAULT_BEAM_WIDTH;
use crate::algorithms::{beam_width, Method};
use crate::benchmark::BenchmarkOptions;
use crate::error::{Result, SearchError};
use crate::generator::Difficulty;
use crate::maze_file::TEST_CASES_DIR;
use clap::Parser;
use std::path::PathBuf;

/// Find a route through a grid maze with one of six search strategies.
///
/// Methods: bfs, dfs, astar, gbfs, bdfs (bidirectional), bs (beam).
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Maze file; looked up under test_cases/ when not found as given
    pub file: Option<PathBuf>,

    /// Search method
    pub method: Option<String>,

    /// Beam width, only used by `bs`
    #[arg(allow_negative_numbers = true)]
    pub beam_width: Option<i64>,

    /// Print a maze without solving it
    #[arg(long, value_name = "FILE", conflicts_with_all = ["file", "test"])]
    pub print: Option<PathBuf>,

    /// Generate the test cases and benchmark every method on them
    #[arg(long, default_value_t = false, conflicts_with = "file")]
    pub test: bool,

    /// Write one random maze with this file name into --cases-dir
    #[arg(long, value_name = "NAME", conflicts_with_all = ["file", "test", "print"])]
    pub generate: Option<String>,

    /// Rows and columns of a --generate maze
    #[arg(long, default_value_t = 20)]
    pub size: usize,

    /// Difficulty of a --generate maze: medium, hard or extreme
    #[arg(long, default_value = "hard")]
    pub difficulty: String,

    #[arg(long, default_value = TEST_CASES_DIR)]
    pub cases_dir: PathBuf,

    /// CSV file the benchmark results are written to
    #[arg(long, alias = "output", default_value = "search_results.csv")]
    pub output_file: PathBuf,

    /// Seed for the randomly generated test cases
    #[arg(long)]
    pub seed: Option<u64>,

    /// Benchmark the existing files in --cases-dir instead of regenerating them
    #[arg(long, default_value_t = false)]
    pub reuse_cases: bool,

    /// Only print the short answer / summary tables
    #[arg(long, default_value_t = false)]
    pub quiet: bool,

    /// Log specification, e.g. `info` or `grid_search=debug`
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// What the command line asked for, after validation.
#[derive(Debug, Clone)]
pub enum Mode {
    Solve {
        file: PathBuf,
        method: Method,
        beam_width: usize,
    },
    Print(PathBuf),
    Generate {
        cases_dir: PathBuf,
        name: String,
        size: usize,
        difficulty: Difficulty,
        seed: Option<u64>,
    },
    Benchmark(BenchmarkOptions),
}

impl Config {
    pub fn mode(&self) -> Result<Mode> {
        if self.test {
            return Ok(Mode::Benchmark(BenchmarkOptions {
                cases_dir: self.cases_dir.clone(),
                output_file: self.output_file.clone(),
                beam_width: DEFAULT_BEAM_WIDTH,
                seed: self.seed,
                reuse_cases: self.reuse_cases,
                quiet: self.quiet,
            }));
        }
        if let Some(file) = &self.print {
            return Ok(Mode::Print(file.clone()));
        }
        if let Some(name) = &self.generate {
            return Ok(Mode::Generate {
                cases_dir: self.cases_dir.clone(),
                name: name.clone(),
                size: self.size,
                difficulty: self.difficulty.parse()?,
                seed: self.seed,
            });
        }

        let (Some(file), Some(method)) = (&self.file, &self.method) else {
            return Err(SearchError::Configuration(
                "a maze file and a search method are required".to_string(),
            ));
        };
        let method: Method = method.parse()?;

        let width = match (method, self.beam_width) {
            (Method::Beam, Some(raw)) => beam_width(raw)?,
            (_, Some(raw)) => {
                log::warn!("beam width {} ignored for {}", raw, method);
                DEFAULT_BEAM_WIDTH
            }
            (_, None) => DEFAULT_BEAM_WIDTH,
        };

        Ok(Mode::Solve {
            file: file.clone(),
            method,
            beam_width: width,
        })
    }

    pub fn wants_usage(&self) -> bool {
        !self.test && self.print.is_none() && self.generate.is_none() && self.file.is_none()
    }
}
