//! Toroidal sparse 0/1 matrix for Algorithm X, represented as an arena of
//! indices rather than an arena of pointers (§3.1, §9).

use crate::errors::{Result, XwordError};

const ROOT: usize = 0;

#[derive(Debug, Clone, Copy)]
struct Node {
    left: usize,
    right: usize,
    up: usize,
    down: usize,
    /// Index into `headers` this node belongs to (or itself, for a header).
    column: usize,
    /// Ordinal of the row this node belongs to, shared by every node on
    /// the same row. Unused (0) for header/root nodes.
    row: usize,
}

#[derive(Debug, Clone, Copy)]
struct Header {
    size: usize,
}

/// An exact-cover matrix. Columns are allocated once at construction;
/// rows may be added afterward. `cover`/`uncover` mutate in place,
/// restoring exact invariants on the matching `uncover`.
#[derive(Debug, Clone)]
pub struct DanceMatrix {
    nodes: Vec<Node>,
    headers: Vec<Header>,
    num_rows: usize,
}

impl DanceMatrix {
    /// Builds a matrix with `cols` columns, no rows.
    pub fn new(cols: usize) -> Self {
        let mut nodes = Vec::with_capacity(cols + 1);
        // Root node, column field unused.
        nodes.push(Node {
            left: 0,
            right: 0,
            up: 0,
            down: 0,
            column: usize::MAX,
            row: 0,
        });
        for c in 0..cols {
            let idx = nodes.len();
            nodes.push(Node {
                left: idx - 1,
                right: ROOT,
                up: idx,
                down: idx,
                column: idx,
                row: 0,
            });
            nodes[idx - 1].right = idx;
            nodes[ROOT].left = idx;
        }
        let headers = (0..cols).map(|_| Header { size: 0 }).collect();
        Self { nodes, headers, num_rows: 0 }
    }

    /// Number of columns this matrix was constructed with.
    pub fn num_columns(&self) -> usize {
        self.headers.len()
    }

    fn header_idx(&self, col: usize) -> usize {
        col + 1
    }

    /// Appends a row spanning `col_indices`, in the given order.
    ///
    /// Fails with [`XwordError::InvalidColumn`] if any index is out of
    /// range. An empty row is a no-op (never satisfiable but harmless).
    pub fn add_row(&mut self, col_indices: &[usize]) -> Result<()> {
        for &c in col_indices {
            if c >= self.headers.len() {
                return Err(XwordError::invalid_column(
                    "col",
                    format!("column {c} out of range (have {})", self.headers.len()),
                ));
            }
        }
        let row_id = self.num_rows;
        let mut first_in_row: Option<usize> = None;
        let mut prev_in_row: Option<usize> = None;
        for &c in col_indices {
            let h = self.header_idx(c);
            let idx = self.nodes.len();
            let up = self.nodes[h].up;
            self.nodes.push(Node {
                left: idx,
                right: idx,
                up,
                down: h,
                column: h,
                row: row_id,
            });
            self.nodes[up].down = idx;
            self.nodes[h].up = idx;
            self.headers[c].size += 1;

            match (first_in_row, prev_in_row) {
                (None, _) => {
                    first_in_row = Some(idx);
                }
                (Some(first), Some(prev)) => {
                    self.nodes[prev].right = idx;
                    self.nodes[idx].left = prev;
                    self.nodes[idx].right = first;
                    self.nodes[first].left = idx;
                }
                _ => unreachable!(),
            }
            prev_in_row = Some(idx);
        }
        self.num_rows += 1;
        Ok(())
    }

    /// The ordinal (in `add_row` call order) of the row `row_node` belongs to.
    pub(crate) fn row_of(&self, row_node: usize) -> usize {
        self.nodes[row_node].row
    }

    /// Total number of rows added so far.
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Size of column `col`'s vertical cycle (number of rows through it).
    pub fn column_size(&self, col: usize) -> usize {
        self.headers[col].size
    }

    /// The column the header row, leftmost to rightmost (excluding root).
    pub(crate) fn header_row(&self) -> impl Iterator<Item = usize> + '_ {
        let mut cur = self.nodes[ROOT].right;
        std::iter::from_fn(move || {
            if cur == ROOT {
                None
            } else {
                let col = self.nodes[cur].column - 1;
                cur = self.nodes[cur].right;
                Some(col)
            }
        })
    }

    pub(crate) fn header_row_is_empty(&self) -> bool {
        self.nodes[ROOT].right == ROOT
    }

    /// Covers `col`: unlinks its header and every row through it.
    pub(crate) fn cover(&mut self, col: usize) {
        let h = self.header_idx(col);
        let (l, r) = (self.nodes[h].left, self.nodes[h].right);
        self.nodes[l].right = r;
        self.nodes[r].left = l;

        let mut row = self.nodes[h].down;
        while row != h {
            let mut node = self.nodes[row].right;
            while node != row {
                let (u, d) = (self.nodes[node].up, self.nodes[node].down);
                self.nodes[u].down = d;
                self.nodes[d].up = u;
                self.headers[self.nodes[node].column - 1].size -= 1;
                node = self.nodes[node].right;
            }
            row = self.nodes[row].down;
        }
    }

    /// Exact inverse of [`DanceMatrix::cover`]; must be called with the
    /// columns uncovered in reverse order of their covering.
    pub(crate) fn uncover(&mut self, col: usize) {
        let h = self.header_idx(col);
        let mut row = self.nodes[h].up;
        while row != h {
            let mut node = self.nodes[row].left;
            while node != row {
                let (u, d) = (self.nodes[node].up, self.nodes[node].down);
                self.headers[self.nodes[node].column - 1].size += 1;
                self.nodes[u].down = node;
                self.nodes[d].up = node;
                node = self.nodes[node].left;
            }
            row = self.nodes[row].up;
        }
        let (l, r) = (self.nodes[h].left, self.nodes[h].right);
        self.nodes[l].right = h;
        self.nodes[r].left = h;
    }

    /// Nodes on `col`'s vertical cycle, top to bottom, excluding the header.
    pub(crate) fn column_rows(&self, col: usize) -> impl Iterator<Item = usize> + '_ {
        let h = self.header_idx(col);
        let mut cur = self.nodes[h].down;
        std::iter::from_fn(move || {
            if cur == h {
                None
            } else {
                let r = cur;
                cur = self.nodes[cur].down;
                Some(r)
            }
        })
    }

    /// Nodes on `row_node`'s horizontal cycle, excluding `row_node` itself.
    pub(crate) fn row_nodes(&self, row_node: usize) -> impl Iterator<Item = usize> + '_ {
        let mut cur = self.nodes[row_node].right;
        std::iter::from_fn(move || {
            if cur == row_node {
                None
            } else {
                let r = cur;
                cur = self.nodes[cur].right;
                Some(r)
            }
        })
    }

    /// The zero-based column index that `row_node` belongs to.
    pub(crate) fn column_of(&self, row_node: usize) -> usize {
        self.nodes[row_node].column - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_matrix_has_empty_columns() {
        let m = DanceMatrix::new(4);
        assert_eq!(m.num_columns(), 4);
        for c in 0..4 {
            assert_eq!(m.column_size(c), 0);
        }
        assert!(m.header_row_is_empty() == false || m.num_columns() == 0);
    }

    #[test]
    fn add_row_rejects_bad_column() {
        let mut m = DanceMatrix::new(2);
        assert!(m.add_row(&[0, 5]).is_err());
    }

    #[test]
    fn add_row_increments_column_size() {
        let mut m = DanceMatrix::new(3);
        m.add_row(&[0, 1]).unwrap();
        m.add_row(&[1, 2]).unwrap();
        assert_eq!(m.column_size(0), 1);
        assert_eq!(m.column_size(1), 2);
        assert_eq!(m.column_size(2), 1);
    }

    #[test]
    fn cover_uncover_restores_sizes() {
        let mut m = DanceMatrix::new(3);
        m.add_row(&[0, 1]).unwrap();
        m.add_row(&[1, 2]).unwrap();
        let before: Vec<_> = (0..3).map(|c| m.column_size(c)).collect();
        m.cover(1);
        m.uncover(1);
        let after: Vec<_> = (0..3).map(|c| m.column_size(c)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn header_row_shrinks_after_cover() {
        let mut m = DanceMatrix::new(3);
        m.add_row(&[0, 1, 2]).unwrap();
        m.cover(1);
        let remaining: Vec<_> = m.header_row().collect();
        assert_eq!(remaining, vec![0, 2]);
        m.uncover(1);
        let restored: Vec<_> = m.header_row().collect();
        assert_eq!(restored, vec![0, 1, 2]);
    }
}
