//! Rung generation.
//!
//! DESIGN
//! ======
//! Generation runs in two phases over a shared `Occupancy` index:
//!
//! 1. Sweep: every level from `start_gap` down scans pairs left to right,
//!    placing a rung with probability `density` and skipping the next pair
//!    after each placement. Realized density sits a little below nominal;
//!    the auto-density constants are tuned against that.
//! 2. Repair: any pair short of `min_rungs_per_pair` gets rungs added at
//!    random open levels (bounded attempts), then at the first open level
//!    found by a linear scan. When every level is blocked, a neighbouring
//!    rung gives way: it is dropped if its pair has rungs to spare, or moved
//!    to another open level of its pair otherwise. Only when no neighbour
//!    can give way does the call fail with `LadderError::Unsatisfiable`.
//!
//! Pairs are repaired left to right and a rung is only ever dropped from a
//! pair above its minimum, so a repaired pair stays repaired.
//!
//! Parameters that cannot possibly satisfy the gap and minimum are rejected
//! up front with `LadderError::InvalidParameter`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::layout::Occupancy;
use crate::{DEFAULT_MAX_LINES, LadderError, MIN_LINES, Rung, invalid};

pub const DEFAULT_MIN_RUNGS_PER_PAIR: usize = 2;
pub const DEFAULT_START_GAP: usize = 0;
pub const DEFAULT_TARGET_RUNGS_PER_PAIR: f64 = 4.0;
pub const DEFAULT_AUTO_DENSITY_MIN: f64 = 0.05;
pub const DEFAULT_AUTO_DENSITY_MAX: f64 = 0.60;
pub const DEFAULT_MAX_DENSITY: f64 = 0.95;
pub const DEFAULT_REPAIR_ATTEMPTS_PER_LEVEL: usize = 2;

// =============================================================================
// CONFIG
// =============================================================================

/// Tuning knobs for the generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
    /// Largest accepted line count.
    pub max_lines: usize,
    /// Every pair ends up with at least this many rungs.
    pub min_rungs_per_pair: usize,
    /// Leading levels that never receive a rung.
    pub start_gap: usize,
    /// Expected rungs per pair that auto-derived density aims for.
    pub target_rungs_per_pair: f64,
    pub auto_density_min: f64,
    pub auto_density_max: f64,
    /// Explicit densities above this are clamped down to it.
    pub max_density: f64,
    /// Random repair tries per missing rung, as a multiple of the level count.
    pub repair_attempts_per_level: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_lines: DEFAULT_MAX_LINES,
            min_rungs_per_pair: DEFAULT_MIN_RUNGS_PER_PAIR,
            start_gap: DEFAULT_START_GAP,
            target_rungs_per_pair: DEFAULT_TARGET_RUNGS_PER_PAIR,
            auto_density_min: DEFAULT_AUTO_DENSITY_MIN,
            auto_density_max: DEFAULT_AUTO_DENSITY_MAX,
            max_density: DEFAULT_MAX_DENSITY,
            repair_attempts_per_level: DEFAULT_REPAIR_ATTEMPTS_PER_LEVEL,
        }
    }
}

impl GeneratorConfig {
    /// Check that the knobs describe a usable generator.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` naming the first inconsistent field.
    pub fn validate(&self) -> Result<(), LadderError> {
        if self.max_lines < MIN_LINES {
            return Err(invalid(format!("max_lines must be at least {MIN_LINES}")));
        }
        if !(self.target_rungs_per_pair > 0.0 && self.target_rungs_per_pair.is_finite()) {
            return Err(invalid("target_rungs_per_pair must be positive"));
        }
        let auto_range_ok = self.auto_density_min > 0.0
            && self.auto_density_min <= self.auto_density_max
            && self.auto_density_max <= 1.0;
        if !auto_range_ok {
            return Err(invalid("auto density bounds must satisfy 0 < min <= max <= 1"));
        }
        if !(self.max_density > 0.0 && self.max_density <= 1.0) {
            return Err(invalid("max_density must be in (0, 1]"));
        }
        Ok(())
    }
}

// =============================================================================
// DENSITY
// =============================================================================

/// Density that gives each pair roughly `target_rungs_per_pair` expected
/// rungs over the levels below the start gap, clamped to the auto range.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn auto_density(levels: usize, config: &GeneratorConfig) -> f64 {
    let effective = levels.saturating_sub(config.start_gap).max(1) as f64;
    (config.target_rungs_per_pair / effective)
        .max(config.auto_density_min)
        .min(config.auto_density_max)
}

/// Turn a requested density into the one generation will use.
///
/// Absent or non-positive requests fall back to [`auto_density`]; requests
/// above `max_density` are clamped.
///
/// # Errors
///
/// Returns `InvalidParameter` for NaN.
pub fn resolve_density(requested: Option<f64>, levels: usize, config: &GeneratorConfig) -> Result<f64, LadderError> {
    match requested {
        Some(d) if d.is_nan() => Err(invalid("rungDensity must be a number")),
        Some(d) if d > 0.0 => Ok(d.min(config.max_density)),
        _ => Ok(auto_density(levels, config)),
    }
}

// =============================================================================
// GENERATION
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerateParams {
    pub lines: usize,
    pub levels: usize,
    /// Per-slot placement probability in `(0, 1]`.
    pub density: f64,
}

/// Generate a rung layout using a caller-owned random source.
///
/// # Errors
///
/// `InvalidParameter` when the line count, level count, or density is out of
/// range, or when the levels below the start gap cannot hold the minimum
/// rungs per pair. `Unsatisfiable` when repair can neither find nor free a
/// level for some pair.
pub fn generate<R: Rng>(
    params: &GenerateParams,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Vec<Rung>, LadderError> {
    check_params(params, config)?;

    let mut occupancy = Occupancy::new(params.lines, params.levels);
    let mut rungs = Vec::new();
    sweep(params, config.start_gap, rng, &mut occupancy, &mut rungs);
    repair(params, config, rng, &mut occupancy, &mut rungs)?;
    Ok(rungs)
}

/// [`generate`] driven by a `StdRng` seeded from `seed`.
///
/// # Errors
///
/// Same as [`generate`].
pub fn generate_seeded(params: &GenerateParams, config: &GeneratorConfig, seed: u64) -> Result<Vec<Rung>, LadderError> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate(params, config, &mut rng)
}

fn check_params(params: &GenerateParams, config: &GeneratorConfig) -> Result<(), LadderError> {
    if params.lines < MIN_LINES || params.lines > config.max_lines {
        return Err(invalid(format!("n must be between {MIN_LINES} and {}", config.max_lines)));
    }
    if params.levels <= config.start_gap {
        return Err(invalid(format!(
            "levels ({}) must exceed the start gap ({})",
            params.levels, config.start_gap
        )));
    }
    if !(params.density > 0.0 && params.density <= 1.0) {
        return Err(invalid("rungDensity must be in (0, 1]"));
    }

    // Neighbouring pairs can never share a level, so with two or more pairs
    // each needs its own share of the open levels.
    let effective = params.levels - config.start_gap;
    let pairs = params.lines - 1;
    let needed = if pairs > 1 {
        2 * config.min_rungs_per_pair
    } else {
        config.min_rungs_per_pair
    };
    if effective < needed {
        return Err(invalid(format!(
            "{effective} open levels cannot give every pair {} rungs (need {needed})",
            config.min_rungs_per_pair
        )));
    }
    Ok(())
}

fn sweep<R: Rng>(
    params: &GenerateParams,
    start_gap: usize,
    rng: &mut R,
    occupancy: &mut Occupancy,
    rungs: &mut Vec<Rung>,
) {
    let pairs = params.lines - 1;
    for level in start_gap..params.levels {
        let mut left = 0;
        while left < pairs {
            if rng.random::<f64>() < params.density {
                let rung = Rung::new(left, level);
                occupancy.place(rung);
                rungs.push(rung);
                left += 2;
            } else {
                left += 1;
            }
        }
    }
}

fn repair<R: Rng>(
    params: &GenerateParams,
    config: &GeneratorConfig,
    rng: &mut R,
    occupancy: &mut Occupancy,
    rungs: &mut Vec<Rung>,
) -> Result<(), LadderError> {
    let attempts = config.repair_attempts_per_level * params.levels;
    for left in 0..params.lines - 1 {
        while occupancy.count(left) < config.min_rungs_per_pair {
            let level = random_open_level(occupancy, left, config.start_gap, params.levels, attempts, rng)
                .or_else(|| first_open_level(occupancy, left, config.start_gap, params.levels))
                .or_else(|| make_room(params, config, left, rng, occupancy, rungs))
                .ok_or(LadderError::Unsatisfiable {
                    pair: left,
                    placed: occupancy.count(left),
                    required: config.min_rungs_per_pair,
                })?;
            let rung = Rung::new(left, level);
            occupancy.place(rung);
            rungs.push(rung);
        }
    }
    Ok(())
}

fn random_open_level<R: Rng>(
    occupancy: &Occupancy,
    left: usize,
    start_gap: usize,
    levels: usize,
    attempts: usize,
    rng: &mut R,
) -> Option<usize> {
    (0..attempts)
        .map(|_| rng.random_range(start_gap..levels))
        .find(|&level| occupancy.is_open(left, level))
}

fn first_open_level(occupancy: &Occupancy, left: usize, start_gap: usize, levels: usize) -> Option<usize> {
    (start_gap..levels).find(|&level| occupancy.is_open(left, level))
}

/// How a neighbouring rung clears a level for a short pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GiveWay {
    /// The neighbour's pair has rungs to spare.
    Drop(Rung),
    /// The neighbour moves to another open level of its own pair.
    Move(Rung, usize),
}

/// Clear a level for `left` by dropping or moving the neighbouring rungs
/// that block it. No pair falls below `min_rungs_per_pair` in the process.
/// Returns the cleared level, or `None` with nothing changed.
fn make_room<R: Rng>(
    params: &GenerateParams,
    config: &GeneratorConfig,
    left: usize,
    rng: &mut R,
    occupancy: &mut Occupancy,
    rungs: &mut Vec<Rung>,
) -> Option<usize> {
    let mut candidates: Vec<(usize, Vec<GiveWay>)> = (config.start_gap..params.levels)
        .filter_map(|level| give_way_at(params, config, occupancy, left, level).map(|steps| (level, steps)))
        .collect();
    if candidates.is_empty() {
        return None;
    }
    let (level, steps) = candidates.swap_remove(rng.random_range(0..candidates.len()));

    for step in steps {
        match step {
            GiveWay::Drop(rung) => {
                occupancy.remove(rung);
                rungs.retain(|r| *r != rung);
            }
            GiveWay::Move(rung, to) => {
                let moved = Rung::new(rung.left, to);
                occupancy.remove(rung);
                occupancy.place(moved);
                if let Some(slot) = rungs.iter_mut().find(|r| **r == rung) {
                    *slot = moved;
                }
            }
        }
    }
    Some(level)
}

/// What the neighbours of `left` must do to free `level`, if they can.
/// Both neighbours are two pairs apart, so their steps never conflict.
fn give_way_at(
    params: &GenerateParams,
    config: &GeneratorConfig,
    occupancy: &Occupancy,
    left: usize,
    level: usize,
) -> Option<Vec<GiveWay>> {
    if occupancy.is_taken(left, level) {
        return None;
    }
    [left.checked_sub(1), Some(left + 1)]
        .into_iter()
        .flatten()
        .filter(|&other| occupancy.is_taken(other, level))
        .map(|other| {
            let rung = Rung::new(other, level);
            if occupancy.count(other) > config.min_rungs_per_pair {
                return Some(GiveWay::Drop(rung));
            }
            (config.start_gap..params.levels)
                .find(|&to| to != level && occupancy.is_open(other, to))
                .map(|to| GiveWay::Move(rung, to))
        })
        .collect()
}

#[cfg(test)]
#[path = "generate_test.rs"]
mod tests;
