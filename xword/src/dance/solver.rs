//! Algorithm X recursive search with cooperative cancellation (§4.4, §5).

use crate::dance::matrix::DanceMatrix;

/// What the solution callback asks the search to do next.
///
/// Returning [`CallbackResult::Bail`] unwinds every recursion frame
/// immediately, uncovering exactly the columns covered so far, leaving the
/// matrix as if `solve` had never been called. There is no partial-undo
/// state visible to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackResult {
    /// Keep searching; `0` contributes to the running total `solve` returns.
    Continue(i64),
    /// Stop searching immediately.
    Bail,
}

/// Sentinel total returned by [`solve`] when the search was cancelled via
/// [`CallbackResult::Bail`].
pub const BAIL_SENTINEL: i64 = -99;

/// Runs Algorithm X over `matrix`, invoking `on_solution` with the stack of
/// data-node indices (one per covered row, in selection order) each time a
/// complete exact cover is found.
///
/// Column selection uses the smallest-size heuristic, ties broken by
/// leftmost position in the header row. Returns the sum of every
/// `CallbackResult::Continue(n)` emitted, or [`BAIL_SENTINEL`] if the
/// search was cancelled.
pub fn solve(matrix: &mut DanceMatrix, on_solution: &mut dyn FnMut(&[usize]) -> CallbackResult) -> i64 {
    let mut stack = Vec::new();
    match search(matrix, &mut stack, on_solution) {
        Some(total) => total,
        None => BAIL_SENTINEL,
    }
}

fn search(
    matrix: &mut DanceMatrix,
    stack: &mut Vec<usize>,
    on_solution: &mut dyn FnMut(&[usize]) -> CallbackResult,
) -> Option<i64> {
    if matrix.header_row_is_empty() {
        return match on_solution(stack) {
            CallbackResult::Continue(n) => Some(n),
            CallbackResult::Bail => None,
        };
    }

    let col = matrix
        .header_row()
        .min_by_key(|&c| matrix.column_size(c))?;
    if matrix.column_size(col) == 0 {
        return Some(0);
    }

    matrix.cover(col);
    let mut total = 0i64;
    let rows: Vec<usize> = matrix.column_rows(col).collect();
    for row in rows {
        stack.push(row);
        let other_cols: Vec<usize> = matrix
            .row_nodes(row)
            .map(|n| matrix.column_of(n))
            .collect();
        for c in &other_cols {
            matrix.cover(*c);
        }

        match search(matrix, stack, on_solution) {
            Some(n) => total += n,
            None => {
                for c in other_cols.iter().rev() {
                    matrix.uncover(*c);
                }
                stack.pop();
                matrix.uncover(col);
                return None;
            }
        }

        for c in other_cols.iter().rev() {
            matrix.uncover(*c);
        }
        stack.pop();
    }
    matrix.uncover(col);
    Some(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Knuth's canonical 6-row, 7-column exact cover instance (Dancing
    /// Links, §1): rows A..F, columns 1..7, unique exact cover {B, D, F}.
    fn knuth_matrix() -> DanceMatrix {
        let mut m = DanceMatrix::new(7);
        let rows: [&[usize]; 6] = [
            &[0, 3, 6], // A: 1 4 7
            &[0, 3],    // B: 1 4
            &[1, 2, 5], // C: 2 3 6
            &[0, 2, 5], // D: 1 3 6
            &[1, 6],    // E: 2 7
            &[3, 4, 5], // F: 4 5 6
        ];
        for r in rows {
            m.add_row(r).unwrap();
        }
        m
    }

    #[test]
    fn finds_knuths_unique_exact_cover() {
        let mut m = knuth_matrix();
        let mut solutions = Vec::new();
        let total = solve(&mut m, &mut |rows| {
            solutions.push(rows.to_vec());
            CallbackResult::Continue(1)
        });
        assert_eq!(total, 1);
        assert_eq!(solutions.len(), 1);
    }

    #[test]
    fn empty_matrix_has_trivial_solution() {
        let mut m = DanceMatrix::new(0);
        let mut count = 0;
        let total = solve(&mut m, &mut |_| {
            count += 1;
            CallbackResult::Continue(1)
        });
        assert_eq!(total, 1);
        assert_eq!(count, 1);
    }

    #[test]
    fn unsatisfiable_instance_finds_nothing() {
        let mut m = DanceMatrix::new(2);
        // Column 1 has no rows through it: no exact cover is possible.
        m.add_row(&[0]).unwrap();
        let mut count = 0;
        let total = solve(&mut m, &mut |_| {
            count += 1;
            CallbackResult::Continue(1)
        });
        assert_eq!(total, 0);
        assert_eq!(count, 0);
    }

    #[test]
    fn bail_unwinds_and_restores_matrix() {
        let mut m = knuth_matrix();
        let before: Vec<_> = (0..m.num_columns()).map(|c| m.column_size(c)).collect();
        let total = solve(&mut m, &mut |_| CallbackResult::Bail);
        assert_eq!(total, BAIL_SENTINEL);
        let after: Vec<_> = (0..m.num_columns()).map(|c| m.column_size(c)).collect();
        assert_eq!(before, after);
    }
}
