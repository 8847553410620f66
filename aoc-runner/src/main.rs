//! AOC CLI - Command-line interface for running Advent of Code solvers

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod input;
mod output;

// Link the solver plugins
use aoc_2024 as _;

use aggregator::{ResultAggregator, ResultKey};
use aoc_core::{SolverRegistry, SolverRegistryBuilder};
use clap::Parser;
use cli::Args;
use config::Config;
use error::CliError;
use executor::{Executor, WorkItem};
use log::{debug, info, warn};
use output::OutputFormatter;

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = Config::from_args(args)?;
    init_logging(&config);
    debug!("{:?}", config);

    let registry = build_registry(&config.tags)?;
    info!("{} solver(s) registered", registry.len());

    let executor =
        Executor::new(registry, &config).map_err(|e| CliError::Config(e.to_string()))?;

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        println!("No solvers found matching the specified filters.");
        return Ok(());
    }

    for work in &work_items {
        if !executor.inputs().contains(work.year, work.day) {
            warn!(
                "missing input for {}/{:02}, expected at {}",
                work.year,
                work.day,
                executor.inputs().input_path(work.year, work.day).display()
            );
        }
    }

    run_executor(executor, &work_items, config.quiet)
}

/// `RUST_LOG`, when set, overrides the level chosen with `-v`
fn init_logging(config: &Config) {
    env_logger::Builder::new()
        .filter_level(config.log_level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

/// Run the executor and print results in order as they become ready
fn run_executor(executor: Executor, work_items: &[WorkItem], quiet: bool) -> Result<(), CliError> {
    if !quiet {
        println!("Running {} solver(s)...", work_items.len());
    }

    let expected_keys = work_items.iter().flat_map(|w| {
        w.parts.clone().map(move |part| ResultKey {
            year: w.year,
            day: w.day,
            part,
        })
    });

    let (tx, rx) = std::sync::mpsc::channel();
    let executor_handle = std::thread::spawn(move || executor.execute(tx));

    let formatter = OutputFormatter::new(quiet);
    let mut aggregator = ResultAggregator::new(expected_keys);
    let mut results = Vec::new();

    for result in rx {
        for ready in aggregator.add(result) {
            formatter.print_result(&ready);
            results.push(ready);
        }
    }

    // Only non-empty if some expected result never arrived
    for ready in aggregator.drain() {
        formatter.print_result(&ready);
        results.push(ready);
    }
    for key in aggregator.missing() {
        warn!("no result for {}/{:02} part {}", key.year, key.day, key.part);
    }

    executor_handle
        .join()
        .map_err(|_| CliError::Config("Executor thread panicked".to_string()))??;

    formatter.print_summary(&results);

    Ok(())
}

/// Build registry with tag filtering
fn build_registry(tags: &[String]) -> Result<SolverRegistry, CliError> {
    let builder = SolverRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_2024_day_is_registered() {
        let registry = build_registry(&[]).unwrap();
        let days: Vec<u8> = registry
            .iter_info()
            .filter(|info| info.year == 2024)
            .map(|info| info.day)
            .collect();
        assert_eq!(days, vec![1, 2, 3, 4, 5, 6, 7]);
        assert!(registry.iter_info().all(|info| info.parts == 2));
    }

    #[test]
    fn tags_must_all_match() {
        let registry = build_registry(&["grid".to_string()]).unwrap();
        let days: Vec<u8> = registry.iter_info().map(|info| info.day).collect();
        assert_eq!(days, vec![4, 6]);

        let registry =
            build_registry(&["grid".to_string(), "simulation".to_string()]).unwrap();
        assert_eq!(registry.iter_info().map(|info| info.day).collect::<Vec<_>>(), vec![6]);

        assert!(build_registry(&["no-such-tag".to_string()]).unwrap().is_empty());
    }

    #[test]
    fn day_seven_answers_through_the_registry() {
        let registry = build_registry(&["search".to_string()]).unwrap();
        let mut solver = registry
            .create_solver(2024, 7, "190: 10 19\n3267: 81 40 27\n83: 17 5\n156: 15 6\n")
            .unwrap();
        assert_eq!(solver.solve(1).unwrap().answer, "3457");
        assert_eq!(solver.solve(2).unwrap().answer, "3613");
    }
}
