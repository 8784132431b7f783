use clap::{CommandFactory, Parser};

use grid_search::benchmark::Benchmark;
use grid_search::config::{Config, Mode};
use grid_search::error::Result;
use grid_search::generator::TestCaseGenerator;
use grid_search::logging;
use grid_search::runner::{render_maze, run_search};

fn run(config: &Config) -> Result<()> {
    match config.mode()? {
        Mode::Solve {
            file,
            method,
            beam_width,
        } => {
            let report = run_search(&file, method, beam_width)?;
            println!("{}", report.summary());
            if !config.quiet {
                println!("{}", report.details());
            }
        }
        Mode::Print(file) => {
            println!("{}", render_maze(&file)?);
        }
        Mode::Generate {
            cases_dir,
            name,
            size,
            difficulty,
            seed,
        } => {
            let path = TestCaseGenerator::new(cases_dir, seed).generate_one(&name, size, difficulty)?;
            println!("Wrote {}", path.display());
        }
        Mode::Benchmark(options) => {
            println!("\n{}", "=".repeat(50));
            println!("Starting Search Algorithm Test Suite");
            println!("{}", "=".repeat(50));

            let mut benchmark = Benchmark::new(options);
            benchmark.run()?;

            println!("\n{}", "=".repeat(50));
            println!("Test Suite Execution Complete");
            println!("{}", "=".repeat(50));
        }
    }
    Ok(())
}

fn main() {
    let config = Config::parse();

    let _logger = match logging::init(&config.log_level) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Could not start logging ({}), continuing without it", e);
            None
        }
    };

    if config.wants_usage() {
        if let Err(e) = Config::command().print_help() {
            eprintln!("Error: could not print usage: {}", e);
        }
        std::process::exit(1);
    }

    if let Err(e) = run(&config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
