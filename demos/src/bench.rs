//! Timed solver trials and their summary statistics.

use std::io::Write;
use std::time::{Duration, Instant};

use mazer_core::Grid;
use mazer_paths::{SearchStatus, SolveError, solve};

use crate::{Case, DemoError};

/// Outcome of a single solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialResult {
    pub duration: Duration,
    /// Number of expansions performed.
    pub steps: usize,
    /// Cells on the final path, zero when End was not reached.
    pub path_len: usize,
    pub found: bool,
}

/// Solve `grid` to completion and time it.
pub fn run_trial(grid: &mut Grid) -> Result<TrialResult, SolveError> {
    let t0 = Instant::now();
    let mut search = solve(grid)?;
    let status = search.run();
    let steps = search.expanded();
    let duration = t0.elapsed();
    Ok(TrialResult {
        duration,
        steps,
        path_len: grid.path().len(),
        found: status == SearchStatus::Found,
    })
}

/// Aggregate over the kept trials of one experiment.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub trials: usize,
    /// Trials dropped because the generated maze was unsolvable.
    pub skipped: usize,
    /// Mean solve time in seconds.
    pub mean_time: f64,
    /// Sample standard deviation of solve time in seconds.
    pub stdev_time: f64,
    pub mean_steps: f64,
    pub mean_path_len: f64,
}

impl Summary {
    /// Summarize a set of trials. `skipped` is carried through unchanged.
    pub fn from_trials(results: &[TrialResult], skipped: usize) -> Self {
        let n = results.len();
        if n == 0 {
            return Summary {
                skipped,
                ..Default::default()
            };
        }
        let nf = n as f64;
        let times: Vec<f64> = results.iter().map(|r| r.duration.as_secs_f64()).collect();
        let mean_time = times.iter().sum::<f64>() / nf;
        let stdev_time = if n > 1 {
            let var = times.iter().map(|t| (t - mean_time).powi(2)).sum::<f64>() / (nf - 1.0);
            var.sqrt()
        } else {
            0.0
        };
        Summary {
            trials: n,
            skipped,
            mean_time,
            stdev_time,
            mean_steps: results.iter().map(|r| r.steps as f64).sum::<f64>() / nf,
            mean_path_len: results.iter().map(|r| r.path_len as f64).sum::<f64>() / nf,
        }
    }
}

/// Parameters of one benchmark row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Experiment {
    pub case: Case,
    pub rows: usize,
    pub cols: usize,
    pub density: f64,
    pub trials: usize,
    /// Base seed; trial `i` uses `seed + i`.
    pub seed: Option<u64>,
}

/// Run `exp.trials` solves and summarize them.
///
/// Each kept trial is appended to `out`, if any, as one line.
pub fn run_experiment(
    exp: &Experiment,
    mut out: Option<&mut dyn Write>,
) -> Result<Summary, DemoError> {
    let mut results = Vec::with_capacity(exp.trials);
    let mut skipped = 0;
    for i in 0..exp.trials {
        let seed = exp.seed.map(|s| s.wrapping_add(i as u64));
        let mut grid = exp.case.build(exp.rows, exp.cols, exp.density, seed)?;
        let res = run_trial(&mut grid)?;
        if !res.found && exp.case.skips_unsolvable() {
            log::warn!(
                "skipping unsolvable {}x{} maze in trial {}",
                grid.rows(),
                grid.cols(),
                i + 1
            );
            skipped += 1;
            continue;
        }
        log::debug!(
            "{} trial {}: {} steps, path {}, {:?}",
            exp.case,
            i + 1,
            res.steps,
            res.path_len,
            res.duration
        );
        if let Some(w) = out.as_deref_mut() {
            writeln!(
                w,
                "Test: {}, Size: {}x{}, Density: {}, Time: {:.6}s, Iterations: {}, Path Length: {}",
                exp.case,
                grid.rows(),
                grid.cols(),
                exp.density,
                res.duration.as_secs_f64(),
                res.steps,
                res.path_len
            )?;
        }
        results.push(res);
    }
    Ok(Summary::from_trials(&results, skipped))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trial(ms: u64, steps: usize, path_len: usize) -> TrialResult {
        TrialResult {
            duration: Duration::from_millis(ms),
            steps,
            path_len,
            found: path_len > 0,
        }
    }

    #[test]
    fn summary_statistics() {
        let s = Summary::from_trials(&[trial(1, 10, 5), trial(3, 20, 7)], 1);
        assert_eq!(s.trials, 2);
        assert_eq!(s.skipped, 1);
        assert!((s.mean_time - 0.002).abs() < 1e-12);
        assert!((s.stdev_time - 0.002f64.sqrt() / 1000f64.sqrt()).abs() < 1e-9);
        assert_eq!(s.mean_steps, 15.0);
        assert_eq!(s.mean_path_len, 6.0);
    }

    #[test]
    fn summary_of_nothing() {
        let s = Summary::from_trials(&[], 4);
        assert_eq!(s.trials, 0);
        assert_eq!(s.skipped, 4);
        assert_eq!(s.mean_time, 0.0);
        assert_eq!(Summary::from_trials(&[trial(5, 1, 1)], 0).stdev_time, 0.0);
    }

    #[test]
    fn trial_on_open_room() {
        let mut g = Case::Best.build(10, 10, 0.0, None).unwrap();
        let r = run_trial(&mut g).unwrap();
        assert!(r.found);
        assert_eq!(r.steps, 18);
        assert_eq!(r.path_len, 19);
    }

    #[test]
    fn experiment_writes_log_lines() {
        let exp = Experiment {
            case: Case::Random,
            rows: 9,
            cols: 9,
            density: 0.1,
            trials: 3,
            seed: Some(7),
        };
        let mut out = Vec::new();
        let s = run_experiment(&exp, Some(&mut out as &mut dyn Write)).unwrap();
        assert_eq!(s.trials, 3);
        assert_eq!(s.skipped, 0);
        assert!(s.mean_path_len >= 17.0);
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Test: random, Size: 9x9, Density: 0.1, Time: "));
        assert!(lines[0].contains("Iterations: "));
    }

    #[test]
    fn unsolvable_cases_are_kept() {
        let exp = Experiment {
            case: Case::Blocked,
            rows: 6,
            cols: 6,
            density: 0.0,
            trials: 2,
            seed: None,
        };
        let s = run_experiment(&exp, None).unwrap();
        assert_eq!(s.trials, 2);
        assert_eq!(s.mean_path_len, 0.0);
        assert_eq!(s.mean_steps, 1.0);
    }
}
