//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::input::InputStore;
use aoc_core::{DynSolver, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use log::{debug, info, warn};
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;

/// Result from a single solver execution
#[derive(Debug, Clone)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, ArcExecutorError>,
    pub solve_duration: TimeDelta,
    /// Absent when the input never made it through parsing
    pub parse_duration: Option<TimeDelta>,
}

/// Work item representing a solver to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Parallel executor for running solvers
pub struct Executor {
    sync_executor_config: SyncExecutorConfig,
    thread_pool: rayon::ThreadPool,
}

/// The part of the executor shared by reference across worker threads
pub struct SyncExecutorConfig {
    registry: SolverRegistry,
    inputs: InputStore,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            sync_executor_config: SyncExecutorConfig {
                registry,
                inputs: InputStore::new(config.input_dir.clone()),
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    pub fn inputs(&self) -> &InputStore {
        &self.sync_executor_config.inputs
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let cfg = &self.sync_executor_config;
        cfg.registry
            .iter_info()
            .filter(|info| cfg.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| cfg.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: filter_parts(cfg.part_filter, info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Execute all work items and send results to channel
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        let cfg = &self.sync_executor_config;
        info!(
            "running {} solver(s) on {} thread(s), parallelized by {:?}",
            work_items.len(),
            self.thread_pool.current_num_threads(),
            cfg.parallelize_by
        );

        match cfg.parallelize_by {
            ParallelizeBy::Sequential => {
                let mut collected_error: Option<ArcExecutorError> = None;
                for work in work_items {
                    if let Err(e) = run_work_item(&work, &tx, cfg) {
                        collected_error = Some(ArcExecutorError::combine_opt(collected_error, e));
                    }
                }
                collected_error.map_or(Ok(()), Err)
            }
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.execute_parallel_grouped(by_year, &tx)
            }
            // Part additionally fans out inside each work item
            ParallelizeBy::Day | ParallelizeBy::Part => {
                self.execute_parallel_grouped(work_items.into_iter().map(|w| vec![w]).collect(), &tx)
            }
        }
    }

    /// Run groups in parallel; items within one group run in order
    fn execute_parallel_grouped(
        &self,
        groups: Vec<Vec<WorkItem>>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let cfg = &self.sync_executor_config;

        self.thread_pool.install(|| {
            groups
                .into_par_iter()
                .map(|items| {
                    items.iter().fold(None, |err, work| match run_work_item(work, tx, cfg) {
                        Ok(()) => err,
                        Err(e) => Some(ArcExecutorError::combine_opt(err, e)),
                    })
                })
                .reduce(
                    || None,
                    |left, right| match (left, right) {
                        (Some(l), Some(r)) => Some(ArcExecutorError::combine(l, r)),
                        (l, r) => l.or(r),
                    },
                )
                .map_or(Ok(()), Err)
        })
    }
}

/// Parts of a solver with `max_parts` parts that pass the part filter
#[allow(clippy::reversed_empty_ranges)]
fn filter_parts(part_filter: Option<u8>, max_parts: u8) -> RangeInclusive<u8> {
    match part_filter {
        Some(p) if p <= max_parts => p..=p,
        Some(_) => 1..=0,
        None => 1..=max_parts,
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

/// Report the same failure for every requested part of `work`
fn send_failure(
    work: &WorkItem,
    error: ArcExecutorError,
    tx: &Sender<SolverResult>,
) -> Result<(), ArcExecutorError> {
    warn!("{}/{:02}: {}", work.year, work.day, error);
    for part in work.parts.clone() {
        send(
            tx,
            SolverResult {
                year: work.year,
                day: work.day,
                part,
                answer: Err(error.clone()),
                solve_duration: TimeDelta::zero(),
                parse_duration: None,
            },
        )?;
    }
    Ok(())
}

/// Load the input for one work item and solve its parts.
///
/// Input and parse failures become error results rather than errors, so
/// the remaining days keep running. Only a closed channel is fatal.
fn run_work_item(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    cfg: &SyncExecutorConfig,
) -> Result<(), ArcExecutorError> {
    let input = match cfg.inputs.read(work.year, work.day) {
        Ok(input) => input,
        Err(source) => {
            let error = ExecutorError::Input {
                year: work.year,
                day: work.day,
                source,
            };
            return send_failure(work, error.into(), tx);
        }
    };
    debug!(
        "{}/{:02}: read {} bytes of input",
        work.year,
        work.day,
        input.len()
    );

    if matches!(cfg.parallelize_by, ParallelizeBy::Part) {
        run_parts_parallel(work, &input, tx, cfg)
    } else {
        run_parts_sequential(work, &input, tx, cfg)
    }
}

/// Parse once, then solve each part in order
fn run_parts_sequential(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    cfg: &SyncExecutorConfig,
) -> Result<(), ArcExecutorError> {
    let mut solver = match cfg.registry.create_solver(work.year, work.day, input) {
        Ok(solver) => solver,
        Err(e) => return send_failure(work, ExecutorError::from(e).into(), tx),
    };
    for part in work.parts.clone() {
        send(tx, solve_part(work.year, work.day, part, &mut *solver))?;
    }
    Ok(())
}

/// Solve parts in parallel, each on its own parsed instance, and emit them
/// in part order
fn run_parts_parallel(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    cfg: &SyncExecutorConfig,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);
    let registry = &cfg.registry;

    let mut results: Vec<SolverResult> = work
        .parts
        .clone()
        .into_par_iter()
        .map(|part| match registry.create_solver(year, day, input) {
            Ok(mut solver) => solve_part(year, day, part, &mut *solver),
            Err(e) => SolverResult {
                year,
                day,
                part,
                answer: Err(ExecutorError::from(e).into()),
                solve_duration: TimeDelta::zero(),
                parse_duration: None,
            },
        })
        .collect();
    results.sort_by_key(|r| r.part);

    results.into_iter().try_for_each(|result| send(tx, result))
}

/// Solve a single part
fn solve_part(year: u16, day: u8, part: u8, solver: &mut dyn DynSolver) -> SolverResult {
    let parse_duration = Some(solver.parse_duration());
    match solver.solve(part) {
        Ok(solved) => SolverResult {
            year,
            day,
            part,
            solve_duration: solved.duration(),
            answer: Ok(solved.answer),
            parse_duration,
        },
        Err(e) => {
            warn!("{}/{:02} part {}: {}", year, day, part, e);
            SolverResult {
                year,
                day,
                part,
                answer: Err(ExecutorError::Solver(e.into()).into()),
                solve_duration: TimeDelta::zero(),
                parse_duration,
            }
        }
    }
}
