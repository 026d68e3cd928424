//! Match detection
//!
//! Scans every line of the visible field (rows, columns and both diagonal
//! families) for maximal runs of adjacent, same-colored, occupied cells. Every
//! run at least `min_len` long contributes all of its cells to the result.
//!
//! The result is a set: a cell that lies on a matching row *and* a matching
//! diagonal is reported once.

use crate::field::Field;
use crate::types::BlockType;

/// Find all matched cells, returned in row-major order without duplicates.
pub fn find_matches(field: &Field, min_len: usize) -> Vec<(i32, i32)> {
    let width = field.width() as i32;
    let height = field.visible_height() as i32;
    let mut marked = vec![false; (width * height) as usize];
    let mut line = Vec::with_capacity(field.width().max(field.visible_height()));

    // Rows.
    for y in 0..height {
        line.clear();
        line.extend((0..width).map(|x| (x, y)));
        mark_runs(field, &line, min_len, width, &mut marked);
    }

    // Columns.
    for x in 0..width {
        line.clear();
        line.extend((0..height).map(|y| (x, y)));
        mark_runs(field, &line, min_len, width, &mut marked);
    }

    // Anti-diagonals: constant x + y.
    for sum in 0..(width + height - 1) {
        line.clear();
        let x_start = (sum - (height - 1)).max(0);
        let x_end = sum.min(width - 1);
        line.extend((x_start..=x_end).map(|x| (x, sum - x)));
        mark_runs(field, &line, min_len, width, &mut marked);
    }

    // Diagonals: constant x - y.
    for diff in -(height - 1)..width {
        line.clear();
        let y_start = (-diff).max(0);
        let y_end = (width - 1 - diff).min(height - 1);
        line.extend((y_start..=y_end).map(|y| (y + diff, y)));
        mark_runs(field, &line, min_len, width, &mut marked);
    }

    marked
        .iter()
        .enumerate()
        .filter(|(_, &m)| m)
        .map(|(i, _)| ((i as i32) % width, (i as i32) / width))
        .collect()
}

/// Walk one line and mark every run of length >= `min_len`.
fn mark_runs(
    field: &Field,
    line: &[(i32, i32)],
    min_len: usize,
    width: i32,
    marked: &mut [bool],
) {
    let mut run_start = 0;
    let mut run_kind = BlockType::None;

    for i in 0..=line.len() {
        let kind = line
            .get(i)
            .and_then(|&(x, y)| field.get(x, y))
            .map(|b| b.kind)
            .unwrap_or(BlockType::None);

        if kind == run_kind && kind.is_color() {
            continue;
        }

        if run_kind.is_color() && i - run_start >= min_len {
            for &(x, y) in &line[run_start..i] {
                marked[(y * width + x) as usize] = true;
            }
        }
        run_start = i;
        run_kind = kind;
    }
}
