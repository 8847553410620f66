//! Output formatting for solver results

use crate::executor::SolverResult;
use chrono::TimeDelta;

/// Output formatter for solver results
pub struct OutputFormatter {
    quiet: bool,
    start_time: std::time::Instant,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: std::time::Instant::now(),
        }
    }

    /// Format and print a single result
    pub fn print_result(&self, result: &SolverResult) {
        match &result.answer {
            Ok(answer) if self.quiet => println!("{}", answer),
            Ok(_) => println!("{}", format_line(result)),
            Err(_) => eprintln!("{}", format_line(result)),
        }
    }

    /// Print a summary after all results
    /// Shows both total solve time (sum of durations) and actual elapsed wall-clock time
    pub fn print_summary(&self, results: &[SolverResult]) {
        if self.quiet {
            return;
        }

        let successes = results.iter().filter(|r| r.answer.is_ok()).count();
        let failures = results.len() - successes;

        // Parts of one day share a parse, so count it once per day
        let mut parsed_days: Vec<(u16, u8, TimeDelta)> = results
            .iter()
            .filter_map(|r| r.parse_duration.map(|d| (r.year, r.day, d)))
            .collect();
        parsed_days.dedup_by_key(|(year, day, _)| (*year, *day));
        let total_parse_time: TimeDelta = parsed_days.iter().map(|(_, _, d)| *d).sum();
        let total_solve_time: TimeDelta = results.iter().map(|r| r.solve_duration).sum();
        let total_compute_time = total_parse_time + total_solve_time;
        let elapsed_time = self.start_time.elapsed();

        println!();
        println!("--- Summary ---");
        println!("Parts: {} solved, {} failed", successes, failures);
        println!("Total parse time: {}", format_duration(total_parse_time));
        println!("Total solve time: {}", format_duration(total_solve_time));
        println!(
            "Elapsed wall-clock time: {}",
            format_std_duration(elapsed_time)
        );
        if !elapsed_time.is_zero() {
            let total_compute_secs =
                total_compute_time.num_microseconds().unwrap_or(0) as f64 / 1_000_000.0;
            let speedup = total_compute_secs / elapsed_time.as_secs_f64();
            println!("Speedup factor: {:.2}x", speedup);
        }
    }
}

/// One line per part: answer with timings, or the error
fn format_line(result: &SolverResult) -> String {
    let prefix = format!("{}/{:02} Part {}", result.year, result.day, result.part);
    match &result.answer {
        Ok(answer) => {
            let parse_timing = result
                .parse_duration
                .map(|d| format!("parse: {}, ", format_duration(d)))
                .unwrap_or_default();
            format!(
                "{}: {} ({}solve: {})",
                prefix,
                answer,
                parse_timing,
                format_duration(result.solve_duration)
            )
        }
        Err(e) => format!("{}: Error - {}", prefix, e),
    }
}

/// Format a TimeDelta for display
fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

/// Format a std::time::Duration for display (used for wall-clock time)
fn format_std_duration(d: std::time::Duration) -> String {
    match TimeDelta::from_std(d) {
        Ok(delta) => format_duration(delta),
        Err(_) => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ArcExecutorError, ExecutorError};

    #[test]
    fn durations_pick_a_readable_unit() {
        assert_eq!(format_duration(TimeDelta::microseconds(250)), "250µs");
        assert_eq!(format_duration(TimeDelta::microseconds(1500)), "1.50ms");
        assert_eq!(format_duration(TimeDelta::milliseconds(2500)), "2.50s");
        assert_eq!(format_duration(TimeDelta::microseconds(-40)), "-40µs");
        assert_eq!(
            format_std_duration(std::time::Duration::from_micros(12)),
            "12µs"
        );
    }

    #[test]
    fn answer_line_shows_timings() {
        let result = SolverResult {
            year: 2024,
            day: 7,
            part: 1,
            answer: Ok("3749".to_string()),
            solve_duration: TimeDelta::microseconds(120),
            parse_duration: Some(TimeDelta::microseconds(30)),
        };
        assert_eq!(
            format_line(&result),
            "2024/07 Part 1: 3749 (parse: 30µs, solve: 120µs)"
        );
    }

    #[test]
    fn error_line_shows_the_cause() {
        let error: ArcExecutorError = ExecutorError::Solver(aoc_core::SolverError::NotFound(2024, 9)).into();
        let result = SolverResult {
            year: 2024,
            day: 9,
            part: 2,
            answer: Err(error),
            solve_duration: TimeDelta::zero(),
            parse_duration: None,
        };
        assert_eq!(
            format_line(&result),
            "2024/09 Part 2: Error - Solver not found for year 2024 day 9"
        );
    }
}
