//! Per-level occupancy tracking and structural validation of rung layouts.
//!
//! `Occupancy` is the generator's working index (level -> occupied pairs,
//! plus a running count per pair). `validate_layout` reuses it to check an
//! arbitrary layout against the same rules.

use crate::Rung;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("rung pair {left} is out of range for {lines} lines")]
    PairOutOfRange { left: usize, lines: usize },
    #[error("rung level {level} is out of range for {levels} levels")]
    LevelOutOfRange { level: usize, levels: usize },
    #[error("duplicate rung at pair {left}, level {level}")]
    Duplicate { left: usize, level: usize },
    #[error("rungs at pairs {left} and {other} touch on level {level}")]
    Adjacent { left: usize, other: usize, level: usize },
}

// =============================================================================
// OCCUPANCY
// =============================================================================

pub(crate) struct Occupancy {
    /// `rows[level][left]` is set when a rung occupies that slot.
    rows: Vec<Vec<bool>>,
    counts: Vec<usize>,
}

impl Occupancy {
    pub(crate) fn new(lines: usize, levels: usize) -> Self {
        let pairs = lines.saturating_sub(1);
        Self { rows: vec![vec![false; pairs]; levels], counts: vec![0; pairs] }
    }

    /// Whether a rung may go at `(left, level)` without duplicating or
    /// touching an existing rung on that level.
    pub(crate) fn is_open(&self, left: usize, level: usize) -> bool {
        let Some(row) = self.rows.get(level) else {
            return false;
        };
        if row.get(left).is_none_or(|taken| *taken) {
            return false;
        }
        let left_neighbour = left.checked_sub(1).is_some_and(|l| row[l]);
        let right_neighbour = row.get(left + 1).is_some_and(|taken| *taken);
        !left_neighbour && !right_neighbour
    }

    pub(crate) fn is_taken(&self, left: usize, level: usize) -> bool {
        self.rows.get(level).and_then(|row| row.get(left)).is_some_and(|taken| *taken)
    }

    pub(crate) fn place(&mut self, rung: Rung) {
        self.rows[rung.level][rung.left] = true;
        self.counts[rung.left] += 1;
    }

    /// Clear a slot. Clearing an empty or out-of-range slot does nothing.
    pub(crate) fn remove(&mut self, rung: Rung) {
        let Some(taken) = self.rows.get_mut(rung.level).and_then(|row| row.get_mut(rung.left)) else {
            return;
        };
        if *taken {
            *taken = false;
            self.counts[rung.left] -= 1;
        }
    }

    pub(crate) fn count(&self, left: usize) -> usize {
        self.counts.get(left).copied().unwrap_or_default()
    }

    fn neighbour_at(&self, left: usize, level: usize) -> Option<usize> {
        let row = &self.rows[level];
        if left.checked_sub(1).is_some_and(|l| row[l]) {
            return Some(left - 1);
        }
        row.get(left + 1).is_some_and(|taken| *taken).then_some(left + 1)
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Check that every rung lies inside a `lines` x `levels` diagram.
///
/// # Errors
///
/// Returns the first rung whose pair or level index is out of range.
pub fn check_bounds(lines: usize, levels: usize, rungs: &[Rung]) -> Result<(), LayoutError> {
    let pairs = lines.saturating_sub(1);
    for rung in rungs {
        if rung.left >= pairs {
            return Err(LayoutError::PairOutOfRange { left: rung.left, lines });
        }
        if rung.level >= levels {
            return Err(LayoutError::LevelOutOfRange { level: rung.level, levels });
        }
    }
    Ok(())
}

/// Check bounds, duplicates, and the no-touching rule for a whole layout.
///
/// # Errors
///
/// Returns the first violation found, scanning rungs in the given order.
pub fn validate_layout(lines: usize, levels: usize, rungs: &[Rung]) -> Result<(), LayoutError> {
    check_bounds(lines, levels, rungs)?;

    let mut occupancy = Occupancy::new(lines, levels);
    for &rung in rungs {
        if occupancy.is_taken(rung.left, rung.level) {
            return Err(LayoutError::Duplicate { left: rung.left, level: rung.level });
        }
        if let Some(other) = occupancy.neighbour_at(rung.left, rung.level) {
            return Err(LayoutError::Adjacent { left: rung.left, other, level: rung.level });
        }
        occupancy.place(rung);
    }
    Ok(())
}

#[cfg(test)]
#[path = "layout_test.rs"]
mod tests;
