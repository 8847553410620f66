//! Day 6: Guard Gallivant
//!
//! A guard walks the lab map, turning right whenever an obstacle blocks the
//! way, until it leaves the map. Part 1 counts the cells it covers; part 2
//! counts the single extra obstacles that would trap it in a loop instead.

mod grid;
mod guard;

pub use grid::{Grid, PatrolMap};
pub use guard::{Guard, Heading, Point};

use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use log::{debug, trace};
use rayon::prelude::*;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatrolError {
    #[error("no guard marker '^' in the map")]
    NoGuardFound,
    #[error("guard at ({}, {}) is boxed in on all four sides", .0.x, .0.y)]
    GuardTrapped(Point),
    #[error("guard walks in a loop and never leaves the map")]
    GuardLooped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkState {
    Moving,
    Exited,
}

/// How a full patrol ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatrolOutcome {
    /// Left the map; holds every cell stepped off along the way
    Exited(HashSet<Point>),
    /// Came back to an earlier position with the same heading
    Looped,
}

/// Advance the guard by one cell, turning first as often as obstacles demand.
///
/// A guard already outside the grid does not move and nothing is recorded.
pub fn step(grid: &Grid, guard: &mut Guard) -> Result<WalkState, PatrolError> {
    if !grid.contains(guard.position()) {
        return Ok(WalkState::Exited);
    }

    let mut turns = 0;
    while grid.is_obstacle(guard.next_position()) {
        if turns == 3 {
            return Err(PatrolError::GuardTrapped(guard.position()));
        }
        guard.turn_right();
        turns += 1;
    }
    guard.step_forward();

    if grid.contains(guard.position()) {
        Ok(WalkState::Moving)
    } else {
        Ok(WalkState::Exited)
    }
}

/// Walk until the guard exits or repeats a (position, heading) state
pub fn patrol(grid: &Grid, mut guard: Guard) -> Result<PatrolOutcome, PatrolError> {
    let mut states = HashSet::new();
    loop {
        if !states.insert((guard.position(), guard.heading())) {
            return Ok(PatrolOutcome::Looped);
        }
        if step(grid, &mut guard)? == WalkState::Exited {
            trace!("guard exited at {:?} after {} states", guard.position(), states.len());
            return Ok(PatrolOutcome::Exited(guard.into_visited()));
        }
    }
}

/// Cells covered by the guard starting at `start`, facing up
pub fn patrol_path(grid: &Grid, start: Point) -> Result<HashSet<Point>, PatrolError> {
    match patrol(grid, Guard::new(start, Heading::Up))? {
        PatrolOutcome::Exited(visited) => Ok(visited),
        PatrolOutcome::Looped => Err(PatrolError::GuardLooped),
    }
}

/// Whether one extra obstacle at `candidate` keeps the guard from ever leaving
pub fn obstacle_causes_loop(grid: &Grid, start: Point, candidate: Point) -> bool {
    let mut grid = grid.clone();
    if candidate == start || !grid.place_obstacle(candidate) {
        return false;
    }
    match patrol(&grid, Guard::new(start, Heading::Up)) {
        Ok(PatrolOutcome::Looped) | Err(PatrolError::GuardTrapped(_)) => true,
        Ok(PatrolOutcome::Exited(_))
        | Err(PatrolError::NoGuardFound | PatrolError::GuardLooped) => false,
    }
}

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 6, tags = ["2024", "grid", "simulation"])]
pub struct Day06;

#[derive(Debug)]
pub struct SharedData {
    map: PatrolMap,
    path: Option<HashSet<Point>>,
}

impl AocParser for Day06 {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Ok(SharedData {
            map: PatrolMap::parse(input)?,
            path: None,
        })
    }
}

impl PartSolver<1> for Day06 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(cached_path(&shared.map, &mut shared.path)?.len().to_string())
    }
}

impl PartSolver<2> for Day06 {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let SharedData { map, path } = shared;
        let path = cached_path(map, path)?;
        let start = map
            .start
            .ok_or_else(|| SolveError::failed(PatrolError::NoGuardFound))?;
        let grid = &map.grid;

        // Only cells on the original path can change the walk
        let loops = path
            .par_iter()
            .filter(|&&candidate| obstacle_causes_loop(grid, start, candidate))
            .count();
        debug!("{} of {} path cells cause a loop", loops, path.len());
        Ok(loops.to_string())
    }
}

/// Part 1's path, computed once and shared with part 2
fn cached_path<'s>(
    map: &PatrolMap,
    cache: &'s mut Option<HashSet<Point>>,
) -> Result<&'s HashSet<Point>, SolveError> {
    let path = match cache.take() {
        Some(path) => path,
        None => map
            .start
            .ok_or(PatrolError::NoGuardFound)
            .and_then(|start| patrol_path(&map.grid, start))
            .map_err(SolveError::failed)?,
    };
    Ok(cache.insert(path))
}
