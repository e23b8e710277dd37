//! Plain-text drawing of a ladder, optionally with one traced path.
//!
//! Lines are `|` columns four characters apart and rungs are `---`. Level
//! `k` is drawn on row `2k + 1`; row 0 is the top edge and the last row is
//! the bottom edge. A highlighted path is drawn with `#` along columns and
//! `=` across rungs.
//!
//! ```text
//! #   |   |
//! #===#   |
//! |   #   |
//! |   #===#
//! |   |   #
//! |   |   #
//! ```

use crate::{Point, Rung};

const COLUMN_SPACING: usize = 4;

/// Render the ladder as newline-separated rows. Rungs or path points that
/// fall outside the diagram are skipped.
#[must_use]
pub fn render(lines: usize, levels: usize, rungs: &[Rung], highlight: Option<&[Point]>) -> String {
    if lines == 0 {
        return String::new();
    }
    let width = (lines - 1) * COLUMN_SPACING + 1;
    let height = 2 * levels + 2;
    let mut grid = vec![vec![' '; width]; height];

    for row in &mut grid {
        for column in 0..lines {
            row[column * COLUMN_SPACING] = '|';
        }
    }
    let pairs = lines.saturating_sub(1);
    for rung in rungs.iter().filter(|r| r.left < pairs && r.level < levels) {
        let row = level_row(rung.level, levels);
        for x in rung.left * COLUMN_SPACING + 1..(rung.left + 1) * COLUMN_SPACING {
            grid[row][x] = '-';
        }
    }
    if let Some(path) = highlight {
        paint_path(&mut grid, path, lines, levels);
    }

    grid.into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn level_row(level: usize, levels: usize) -> usize {
    if level >= levels { 2 * levels + 1 } else { 2 * level + 1 }
}

/// Snap a path point to `(column, level)`, or `None` if it is off the grid.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn cell(point: Point, lines: usize, levels: usize) -> Option<(usize, usize)> {
    if !(point.x.is_finite() && point.y.is_finite()) || point.x < 0.0 || point.y < 0.0 {
        return None;
    }
    let column = point.x.round() as usize;
    let level = point.y.round() as usize;
    (column < lines).then_some((column, level.min(levels)))
}

fn paint_path(grid: &mut [Vec<char>], path: &[Point], lines: usize, levels: usize) {
    let cells: Vec<(usize, usize)> = path.iter().filter_map(|p| cell(*p, lines, levels)).collect();
    let Some(&(column, level)) = cells.first() else {
        return;
    };
    paint_vertical(grid, column, 0, level_row(level, levels));

    for pair in cells.windows(2) {
        let ((from_col, from_level), (to_col, to_level)) = (pair[0], pair[1]);
        if from_col == to_col {
            paint_vertical(grid, from_col, level_row(from_level, levels), level_row(to_level, levels));
        } else {
            paint_horizontal(grid, level_row(from_level, levels), from_col, to_col);
        }
    }
}

fn paint_vertical(grid: &mut [Vec<char>], column: usize, from_row: usize, to_row: usize) {
    let x = column * COLUMN_SPACING;
    for row in from_row.min(to_row)..=from_row.max(to_row) {
        grid[row][x] = '#';
    }
}

fn paint_horizontal(grid: &mut [Vec<char>], row: usize, from_col: usize, to_col: usize) {
    let start = from_col.min(to_col) * COLUMN_SPACING;
    let end = from_col.max(to_col) * COLUMN_SPACING;
    for x in start..=end {
        grid[row][x] = if x % COLUMN_SPACING == 0 { '#' } else { '=' };
    }
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
