//! Path tracing.
//!
//! A token starts at `(start, 0)` and falls straight down. Rungs are applied
//! in `(level, left)` order; a rung whose pair touches the token's column
//! moves it one column sideways. Rungs outside the diagram are ignored.
//! The tracer does not check the no-touching rule, so feed it
//! `validate_layout`-clean rungs if the permutation guarantee matters.

use crate::{LadderError, MIN_LINES, Point, Rung, invalid};

/// Where a token ends up and the polyline it drew on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub end: usize,
    pub path: Vec<Point>,
}

/// Trace the token dropped at column `start`.
///
/// `rungs` may be in any order.
///
/// # Errors
///
/// Returns `InvalidParameter` when `lines < 2`, `levels == 0`, or `start` is
/// not a column of the diagram.
pub fn trace(lines: usize, levels: usize, rungs: &[Rung], start: usize) -> Result<Trace, LadderError> {
    check_diagram(lines, levels)?;
    if start >= lines {
        return Err(invalid(format!("start must be between 0 and {}", lines - 1)));
    }
    Ok(descend(&sorted(rungs, lines, levels), levels, start))
}

/// End column for every start column; index `i` holds the end of start `i`.
///
/// # Errors
///
/// Same diagram checks as [`trace`].
pub fn permutation(lines: usize, levels: usize, rungs: &[Rung]) -> Result<Vec<usize>, LadderError> {
    check_diagram(lines, levels)?;
    let ordered = sorted(rungs, lines, levels);
    Ok((0..lines).map(|start| descend(&ordered, levels, start).end).collect())
}

fn check_diagram(lines: usize, levels: usize) -> Result<(), LadderError> {
    if lines < MIN_LINES {
        return Err(invalid(format!("n must be at least {MIN_LINES}")));
    }
    if levels == 0 {
        return Err(invalid("levels must be positive"));
    }
    Ok(())
}

fn sorted(rungs: &[Rung], lines: usize, levels: usize) -> Vec<Rung> {
    let pairs = lines.saturating_sub(1);
    let mut ordered: Vec<Rung> = rungs
        .iter()
        .copied()
        .filter(|r| r.left < pairs && r.level < levels)
        .collect();
    ordered.sort_by_key(|r| (r.level, r.left));
    ordered
}

fn descend(ordered: &[Rung], levels: usize, start: usize) -> Trace {
    let mut column = start;
    let mut level = 0;
    let mut path = Vec::with_capacity(ordered.len() * 2 + 2);
    path.push(Point::at(column, level));

    for rung in ordered {
        if rung.level > level {
            level = rung.level;
            path.push(Point::at(column, level));
        }
        if rung.left == column {
            column += 1;
            path.push(Point::at(column, level));
        } else if column.checked_sub(1) == Some(rung.left) {
            column -= 1;
            path.push(Point::at(column, level));
        }
    }

    if level < levels {
        path.push(Point::at(column, levels));
    }
    Trace { end: column, path }
}

#[cfg(test)]
#[path = "trace_test.rs"]
mod tests;
