//! Ladder service: request validation, label filling, and core dispatch.
//!
//! DESIGN
//! ======
//! Routes hand over already-decoded request bodies. This module turns loose
//! wire values (signed integers, optional fields) into checked core
//! parameters, fills in defaults, and calls `ladder::generate_seeded` or
//! `ladder::trace`. Nothing is computed until every parameter has passed.

use ladder::{GenerateParams, LadderError, MIN_LINES, Point, Rung};
use serde::{Deserialize, Serialize};

use crate::config::LadderConfig;

pub const HIT_LABEL: &str = "hit";
pub const MISS_LABEL: &str = "miss";

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub n: i64,
    #[serde(default)]
    pub levels: Option<i64>,
    #[serde(default)]
    pub rung_density: Option<f64>,
    #[serde(default)]
    pub seed: Option<i64>,
    #[serde(default, alias = "bottomLabels")]
    pub bottom: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ladder {
    pub n: usize,
    pub levels: usize,
    pub rungs: Vec<Rung>,
    #[serde(alias = "topLabels")]
    pub top: Vec<String>,
    #[serde(alias = "bottomLabels")]
    pub bottom: Vec<String>,
    /// Seed that reproduces this ladder when sent back with the same params.
    pub seed: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub ladder: Ladder,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TraceRequest {
    pub n: i64,
    pub levels: i64,
    #[serde(default)]
    pub rungs: Vec<Rung>,
    pub start: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceResponse {
    pub end_index: usize,
    pub path: Vec<Point>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiagramRequest {
    pub n: i64,
    pub levels: i64,
    #[serde(default)]
    pub rungs: Vec<Rung>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermutationResponse {
    pub end_indices: Vec<usize>,
}

// =============================================================================
// GENERATE
// =============================================================================

/// Checked generation inputs, ready for the core.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratePlan {
    pub params: GenerateParams,
    pub seed: i64,
    pub bottom: Vec<String>,
}

/// Validate a generate request and resolve every defaulted field.
///
/// # Errors
///
/// `InvalidParameter` when `n` or `levels` is out of range or the density is
/// not a number.
pub fn plan_generate(req: &GenerateRequest, config: &LadderConfig) -> Result<GeneratePlan, LadderError> {
    let lines = line_count(req.n, config)?;
    let levels = match req.levels {
        Some(levels) if levels > 0 => level_count(levels, config)?,
        _ => default_level_count(lines, config)?,
    };
    let density = ladder::resolve_density(req.rung_density, levels, &config.generator)?;
    let seed = req.seed.unwrap_or_else(rand::random);

    Ok(GeneratePlan {
        params: GenerateParams { lines, levels, density },
        seed,
        bottom: fill_bottom_labels(&req.bottom, lines),
    })
}

/// Generate a fresh ladder for `req`.
///
/// # Errors
///
/// Anything [`plan_generate`] or `ladder::generate` reports.
pub fn generate(req: &GenerateRequest, config: &LadderConfig) -> Result<Ladder, LadderError> {
    let plan = plan_generate(req, config)?;
    let GenerateParams { lines, levels, density } = plan.params;

    #[allow(clippy::cast_sign_loss)]
    let rungs = ladder::generate_seeded(&plan.params, &config.generator, plan.seed as u64)?;
    tracing::debug!(n = lines, levels, density, seed = plan.seed, rungs = rungs.len(), "ladder generated");

    Ok(Ladder {
        n: lines,
        levels,
        rungs,
        top: vec![String::new(); lines],
        bottom: plan.bottom,
        seed: plan.seed,
    })
}

/// Pad with [`MISS_LABEL`] or truncate to `n` labels. An empty list becomes
/// one [`HIT_LABEL`] followed by misses.
#[must_use]
pub fn fill_bottom_labels(labels: &[String], n: usize) -> Vec<String> {
    if labels.is_empty() {
        return (0..n)
            .map(|i| (if i == 0 { HIT_LABEL } else { MISS_LABEL }).to_owned())
            .collect();
    }
    labels
        .iter()
        .cloned()
        .chain(std::iter::repeat(MISS_LABEL.to_owned()))
        .take(n)
        .collect()
}

// =============================================================================
// TRACE
// =============================================================================

/// Trace one start column through the submitted diagram.
///
/// # Errors
///
/// `InvalidParameter` when `n`, `levels`, `start`, or any rung lies outside
/// the diagram.
pub fn trace(req: &TraceRequest, config: &LadderConfig) -> Result<TraceResponse, LadderError> {
    let (lines, levels) = check_diagram(req.n, req.levels, &req.rungs, config)?;
    let start = usize::try_from(req.start)
        .ok()
        .filter(|s| *s < lines)
        .ok_or_else(|| LadderError::InvalidParameter(format!("start must be between 0 and {}", lines - 1)))?;

    let traced = ladder::trace(lines, levels, &req.rungs, start)?;
    Ok(TraceResponse { end_index: traced.end, path: traced.path })
}

/// End column for every start column of the submitted diagram.
///
/// # Errors
///
/// Same diagram checks as [`trace`].
pub fn permutation(req: &DiagramRequest, config: &LadderConfig) -> Result<PermutationResponse, LadderError> {
    let (lines, levels) = check_diagram(req.n, req.levels, &req.rungs, config)?;
    let end_indices = ladder::permutation(lines, levels, &req.rungs)?;
    Ok(PermutationResponse { end_indices })
}

// =============================================================================
// HELPERS
// =============================================================================

fn line_count(n: i64, config: &LadderConfig) -> Result<usize, LadderError> {
    let max = config.generator.max_lines;
    usize::try_from(n)
        .ok()
        .filter(|n| (MIN_LINES..=max).contains(n))
        .ok_or_else(|| LadderError::InvalidParameter(format!("n must be between {MIN_LINES} and {max}")))
}

fn level_count(levels: i64, config: &LadderConfig) -> Result<usize, LadderError> {
    let max = config.max_levels;
    usize::try_from(levels)
        .ok()
        .filter(|l| (1..=max).contains(l))
        .ok_or_else(|| LadderError::InvalidParameter(format!("levels must be between 1 and {max}")))
}

fn default_level_count(lines: usize, config: &LadderConfig) -> Result<usize, LadderError> {
    let max = config.max_levels;
    lines
        .checked_mul(config.levels_per_line)
        .filter(|levels| *levels <= max)
        .ok_or_else(|| {
            LadderError::InvalidParameter(format!("default level count for {lines} lines exceeds the limit of {max}"))
        })
}

fn check_diagram(n: i64, levels: i64, rungs: &[Rung], config: &LadderConfig) -> Result<(usize, usize), LadderError> {
    let lines = line_count(n, config)?;
    let levels = level_count(levels, config)?;
    ladder::check_bounds(lines, levels, rungs).map_err(|e| LadderError::InvalidParameter(e.to_string()))?;
    Ok((lines, levels))
}

#[cfg(test)]
#[path = "ladder_test.rs"]
mod tests;
