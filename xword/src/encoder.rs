//! Translates a [`Grid`] and [`Dictionary`] into an exact-cover instance
//! for the dance-matrix solver (§4.5).

use crate::common::{is_consonant, is_vowel, YIsVowel};
use crate::dance::DanceMatrix;
use crate::dictionary::Dictionary;
use crate::errors::Result;
use crate::grid::{Cell, Direction, Grid};

const COLS_PER_SLICE: usize = 27 * 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fit {
    None,
    Fits,
    Exact,
}

/// How the data-row at a given index should be interpreted when
/// reconstructing a filled grid from a solver's chosen rows.
#[derive(Debug, Clone)]
pub enum Placement {
    /// A dictionary word placed at `(row, col)` running in `direction`.
    Word {
        word: String,
        row: usize,
        col: usize,
        direction: Direction,
    },
    /// A black-cell or forced-placement filler row (naive method only);
    /// contributes no new letters on reconstruction.
    Filler,
}

/// Builds the exact-cover matrix for a grid, under either the compressed
/// (unknown-cells-only) or naive (all-cells) slicing method.
pub struct GridEncoder<'a> {
    grid: &'a Grid,
    naive: bool,
    cell_to_slice: Vec<Option<usize>>,
    num_slices: usize,
}

impl<'a> GridEncoder<'a> {
    /// Builds an encoder for `grid`. `naive` selects the all-cells slicing
    /// method (every cell gets a slice, including fixed ones, and black
    /// cells/forced runs get their own filler rows) over the default
    /// compressed method (only unknown cells get a slice).
    pub fn new(grid: &'a Grid, naive: bool) -> Self {
        let n = grid.width() * grid.height();
        let (cell_to_slice, num_slices) = if naive {
            ((0..n).map(Some).collect(), n)
        } else {
            let mut map = vec![None; n];
            let mut next = 0;
            for i in 0..n {
                let (row, col) = grid.coords(i);
                if !grid.cell(row, col).is_fixed() {
                    map[i] = Some(next);
                    next += 1;
                }
            }
            (map, next)
        };
        Self {
            grid,
            naive,
            cell_to_slice,
            num_slices,
        }
    }

    /// Total matrix columns: `27 * 2` per slice.
    pub fn num_columns(&self) -> usize {
        COLS_PER_SLICE * self.num_slices
    }

    fn cell_matches(&self, cell: Cell, letter: u8, y_is_vowel: YIsVowel) -> Option<bool> {
        match cell {
            Cell::Black => None,
            Cell::Letter(c) => (c == letter).then_some(true),
            Cell::VowelClass => is_vowel(letter, y_is_vowel).then_some(false),
            Cell::ConsonantClass => is_consonant(letter, y_is_vowel).then_some(false),
            Cell::Unknown => Some(false),
        }
    }

    fn fits_across(&self, row: usize, col: usize, word: &[u8], y_is_vowel: YIsVowel) -> Fit {
        let w = self.grid.width();
        let wlen = word.len();
        if col + wlen > w {
            return Fit::None;
        }
        if col > 0 && self.grid.cell(row, col - 1) != Cell::Black {
            return Fit::None;
        }
        if col + wlen < w && self.grid.cell(row, col + wlen) != Cell::Black {
            return Fit::None;
        }
        let mut exact = true;
        for (k, &letter) in word.iter().enumerate() {
            match self.cell_matches(self.grid.cell(row, col + k), letter, y_is_vowel) {
                None => return Fit::None,
                Some(true) => {}
                Some(false) => exact = false,
            }
        }
        if exact {
            Fit::Exact
        } else {
            Fit::Fits
        }
    }

    fn fits_down(&self, row: usize, col: usize, word: &[u8], y_is_vowel: YIsVowel) -> Fit {
        let h = self.grid.height();
        let wlen = word.len();
        if row + wlen > h {
            return Fit::None;
        }
        if row > 0 && self.grid.cell(row - 1, col) != Cell::Black {
            return Fit::None;
        }
        if row + wlen < h && self.grid.cell(row + wlen, col) != Cell::Black {
            return Fit::None;
        }
        let mut exact = true;
        for (k, &letter) in word.iter().enumerate() {
            match self.cell_matches(self.grid.cell(row + k, col), letter, y_is_vowel) {
                None => return Fit::None,
                Some(true) => {}
                Some(false) => exact = false,
            }
        }
        if exact {
            Fit::Exact
        } else {
            Fit::Fits
        }
    }

    fn add_row_across(
        &self,
        mat: &mut DanceMatrix,
        placements: &mut Vec<Placement>,
        row: usize,
        col: usize,
        word: &str,
    ) -> Result<()> {
        let mut cols = Vec::new();
        for (k, letter) in word.bytes().enumerate() {
            let cell_idx = self.grid.index(row, col + k);
            if self.naive || !self.grid.cell(row, col + k).is_fixed() {
                let slice = self.cell_to_slice[cell_idx].unwrap();
                let relevant = (letter - b'a') as usize;
                for m in 0..26 {
                    cols.push(slice * COLS_PER_SLICE + 2 * m + usize::from(relevant != m));
                }
                cols.push(slice * COLS_PER_SLICE + 52);
            }
        }
        mat.add_row(&cols)?;
        placements.push(Placement::Word {
            word: word.to_string(),
            row,
            col,
            direction: Direction::Across,
        });
        Ok(())
    }

    fn add_row_down(
        &self,
        mat: &mut DanceMatrix,
        placements: &mut Vec<Placement>,
        row: usize,
        col: usize,
        word: &str,
    ) -> Result<()> {
        let mut cols = Vec::new();
        for (k, letter) in word.bytes().enumerate() {
            let cell_idx = self.grid.index(row + k, col);
            if self.naive || !self.grid.cell(row + k, col).is_fixed() {
                let slice = self.cell_to_slice[cell_idx].unwrap();
                let relevant = (letter - b'a') as usize;
                for m in 0..26 {
                    cols.push(slice * COLS_PER_SLICE + 2 * m + usize::from(relevant == m));
                }
                cols.push(slice * COLS_PER_SLICE + 53);
            }
        }
        mat.add_row(&cols)?;
        placements.push(Placement::Word {
            word: word.to_string(),
            row,
            col,
            direction: Direction::Down,
        });
        Ok(())
    }

    fn add_row_black(
        &self,
        mat: &mut DanceMatrix,
        placements: &mut Vec<Placement>,
        cell: usize,
    ) -> Result<()> {
        let slice = self.cell_to_slice[cell].unwrap();
        let mut cols = Vec::with_capacity(COLS_PER_SLICE);
        for m in 0..27 {
            cols.push(slice * COLS_PER_SLICE + 2 * m);
            cols.push(slice * COLS_PER_SLICE + 2 * m + 1);
        }
        mat.add_row(&cols)?;
        placements.push(Placement::Filler);
        Ok(())
    }

    fn add_row_forced_across(
        &self,
        mat: &mut DanceMatrix,
        placements: &mut Vec<Placement>,
        row: usize,
        col: usize,
        len: usize,
    ) -> Result<()> {
        let mut cols = Vec::new();
        for k in 0..len {
            let letter = match self.grid.cell(row, col + k) {
                Cell::Letter(c) => c,
                _ => unreachable!("forced run must be all letters"),
            };
            let cell_idx = self.grid.index(row, col + k);
            let slice = self.cell_to_slice[cell_idx].unwrap();
            let relevant = (letter - b'a') as usize;
            for m in 0..26 {
                cols.push(slice * COLS_PER_SLICE + 2 * m + usize::from(relevant != m));
            }
            cols.push(slice * COLS_PER_SLICE + 52);
        }
        mat.add_row(&cols)?;
        placements.push(Placement::Filler);
        Ok(())
    }

    fn add_row_forced_down(
        &self,
        mat: &mut DanceMatrix,
        placements: &mut Vec<Placement>,
        row: usize,
        col: usize,
        len: usize,
    ) -> Result<()> {
        let mut cols = Vec::new();
        for k in 0..len {
            let letter = match self.grid.cell(row + k, col) {
                Cell::Letter(c) => c,
                _ => unreachable!("forced run must be all letters"),
            };
            let cell_idx = self.grid.index(row + k, col);
            let slice = self.cell_to_slice[cell_idx].unwrap();
            let relevant = (letter - b'a') as usize;
            for m in 0..26 {
                cols.push(slice * COLS_PER_SLICE + 2 * m + usize::from(relevant == m));
            }
            cols.push(slice * COLS_PER_SLICE + 53);
        }
        mat.add_row(&cols)?;
        placements.push(Placement::Filler);
        Ok(())
    }

    /// Maximal runs of letter-only cells bounded by black cells or the grid
    /// edge, including length-1 runs. A run touching any non-letter
    /// (unknown or class) cell before the next black cell is skipped
    /// entirely rather than forced.
    fn forced_runs_across(&self) -> Vec<(usize, usize, usize)> {
        let w = self.grid.width();
        let mut runs = Vec::new();
        for row in 0..self.grid.height() {
            let mut word_starts_here = 0usize;
            let mut i = 0usize;
            while i <= w {
                let at_boundary = i == w || self.grid.cell(row, i) == Cell::Black;
                if at_boundary && word_starts_here < i {
                    runs.push((row, word_starts_here, i - word_starts_here));
                    word_starts_here = i + 1;
                    i += 1;
                } else if i == w {
                    break;
                } else if !matches!(self.grid.cell(row, i), Cell::Letter(_)) {
                    while i < w && self.grid.cell(row, i) != Cell::Black {
                        i += 1;
                    }
                    word_starts_here = i + 1;
                    i += 1;
                } else {
                    i += 1;
                }
            }
        }
        runs
    }

    fn forced_runs_down(&self) -> Vec<(usize, usize, usize)> {
        let h = self.grid.height();
        let mut runs = Vec::new();
        for col in 0..self.grid.width() {
            let mut word_starts_here = 0usize;
            let mut j = 0usize;
            while j <= h {
                let at_boundary = j == h || self.grid.cell(j, col) == Cell::Black;
                if at_boundary && word_starts_here < j {
                    runs.push((word_starts_here, col, j - word_starts_here));
                    word_starts_here = j + 1;
                    j += 1;
                } else if j == h {
                    break;
                } else if !matches!(self.grid.cell(j, col), Cell::Letter(_)) {
                    while j < h && self.grid.cell(j, col) != Cell::Black {
                        j += 1;
                    }
                    word_starts_here = j + 1;
                    j += 1;
                } else {
                    j += 1;
                }
            }
        }
        runs
    }

    /// Builds the dance matrix for `dict` against this encoder's grid.
    ///
    /// `dict` should already be stripped (see [`strip_dict`]) for a
    /// reasonably sized search, though stripping is not required for
    /// correctness. Returns the matrix paired with a `Placement` for every
    /// row, in the order rows were added (row ordinal == index).
    pub fn build(&self, dict: &Dictionary, y_is_vowel: YIsVowel) -> Result<(DanceMatrix, Vec<Placement>)> {
        let mut mat = DanceMatrix::new(self.num_columns());
        let mut placements = Vec::new();

        for entry in self.grid.entries() {
            for word in dict.bucket(entry.len) {
                let bytes = word.as_bytes();
                let fit = match entry.direction {
                    Direction::Across => self.fits_across(entry.row, entry.col, bytes, y_is_vowel),
                    Direction::Down => self.fits_down(entry.row, entry.col, bytes, y_is_vowel),
                };
                if fit == Fit::None {
                    continue;
                }
                match entry.direction {
                    Direction::Across => {
                        self.add_row_across(&mut mat, &mut placements, entry.row, entry.col, word.as_str())?
                    }
                    Direction::Down => {
                        self.add_row_down(&mut mat, &mut placements, entry.row, entry.col, word.as_str())?
                    }
                }
            }
        }

        if self.naive {
            for i in 0..self.grid.width() * self.grid.height() {
                let (row, col) = self.grid.coords(i);
                if self.grid.cell(row, col) == Cell::Black {
                    self.add_row_black(&mut mat, &mut placements, i)?;
                }
            }
            for (row, col, len) in self.forced_runs_across() {
                self.add_row_forced_across(&mut mat, &mut placements, row, col, len)?;
            }
            for (row, col, len) in self.forced_runs_down() {
                self.add_row_forced_down(&mut mat, &mut placements, row, col, len)?;
            }
        }

        Ok((mat, placements))
    }

    /// Reconstructs the filled grid's letters (row-major, one byte per
    /// cell) from a solver's chosen row ordinals. Cells never touched by a
    /// `Placement::Word` keep the original grid's letter, if any.
    pub fn fill_from_solution(&self, placements: &[Placement], row_ids: &[usize]) -> Vec<u8> {
        let mut out: Vec<u8> = self
            .grid
            .cells()
            .iter()
            .map(|c| match c {
                Cell::Letter(l) => *l,
                _ => b'.',
            })
            .collect();
        for &rid in row_ids {
            if let Placement::Word { word, row, col, direction } = &placements[rid] {
                for (k, letter) in word.bytes().enumerate() {
                    let idx = match direction {
                        Direction::Across => self.grid.index(*row, col + k),
                        Direction::Down => self.grid.index(row + k, *col),
                    };
                    out[idx] = letter;
                }
            }
        }
        out
    }
}

/// Returns a copy of `dict` with every word that cannot be placed anywhere
/// in `grid` removed, and (if `reject_duplicates`) every word that fits
/// *exactly* somewhere also removed, on the theory that it will simply be
/// reused as an unavoidable duplicate. This copy is meant to be
/// solve-scoped scratch state, never the caller's long-lived dictionary.
pub fn strip_dict(dict: &Dictionary, grid: &Grid, reject_duplicates: bool, y_is_vowel: YIsVowel) -> Dictionary {
    let encoder = GridEncoder::new(grid, false);
    let entries = grid.entries();
    let mut out = Dictionary::new();

    for word in dict.iter() {
        let bytes = word.as_bytes();
        let mut fits = false;
        let mut exact = false;
        for entry in &entries {
            if entry.len != word.len() {
                continue;
            }
            let fit = match entry.direction {
                Direction::Across => encoder.fits_across(entry.row, entry.col, bytes, y_is_vowel),
                Direction::Down => encoder.fits_down(entry.row, entry.col, bytes, y_is_vowel),
            };
            match fit {
                Fit::Exact => {
                    fits = true;
                    if reject_duplicates {
                        exact = true;
                        break;
                    }
                    break;
                }
                Fit::Fits => {
                    fits = true;
                    if !reject_duplicates {
                        break;
                    }
                }
                Fit::None => {}
            }
        }
        let keep = if reject_duplicates { fits && !exact } else { fits };
        if keep {
            let _ = out.add(word.as_str(), None);
        }
    }
    out.sort();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dance::{solve, CallbackResult};

    fn dict_with(words: &[&str]) -> Dictionary {
        let mut d = Dictionary::new();
        for w in words {
            d.add(w, None).unwrap();
        }
        d.sort();
        d
    }

    #[test]
    fn compressed_slices_cover_only_unknown_cells() {
        let g = Grid::parse(".AS\n.R.\nETA\n").unwrap();
        let enc = GridEncoder::new(&g, false);
        // Cells (0,0), (1,0) and (1,2) are unknown ('.').
        assert_eq!(enc.num_slices, 3);
    }

    #[test]
    fn naive_slices_cover_every_cell() {
        let g = Grid::parse(".AS\n.R.\nETA\n").unwrap();
        let enc = GridEncoder::new(&g, true);
        assert_eq!(enc.num_slices, 9);
    }

    #[test]
    fn strip_dict_removes_words_that_never_fit() {
        let g = Grid::parse("cat\nxyz\nzzz\n").unwrap();
        let d = dict_with(&["cat", "dog"]);
        let stripped = strip_dict(&d, &g, false, YIsVowel::Always);
        let words: Vec<_> = stripped.iter().map(|w| w.as_str().to_string()).collect();
        assert!(words.contains(&"cat".to_string()));
        assert!(!words.contains(&"dog".to_string()));
    }

    #[test]
    fn tiny_grid_solves_to_expected_fill() {
        // The classic 3x3 example from the original tutorial comment:
        // 1A HAS, 4A IRE, 5A ETA, 1D HIE, 2D ART, 3D SEA.
        let g = Grid::parse(".as\n.r.\neta\n").unwrap();
        let d = dict_with(&["art", "eta", "has", "hie", "hit", "ire", "sea"]);
        let enc = GridEncoder::new(&g, false);
        let (mut mat, placements) = enc.build(&d, YIsVowel::Always).unwrap();
        let mut fills = Vec::new();
        solve(&mut mat, &mut |rows| {
            fills.push(enc.fill_from_solution(&placements, rows));
            CallbackResult::Continue(1)
        });
        let solved: Vec<String> = fills
            .iter()
            .map(|f| String::from_utf8(f.clone()).unwrap())
            .collect();
        assert!(solved.contains(&"hasireeta".to_string()));
    }
}
