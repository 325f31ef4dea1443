//! Dense dynamic-programming tables for sequence alignment.
//!
//! An [`AlignmentTable`] over sequences of lengths `m` and `n` has
//! `(m + 1) × (n + 1)` cells stored row-major in one contiguous buffer.
//! Row 0 and column 0 hold the empty-prefix base cases; every other cell is
//! derived from its up, left and diagonal neighbours.

/// A `rows × cols` table of `usize` cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlignmentTable {
    rows: usize,
    cols: usize,
    cells: Vec<usize>,
}

impl AlignmentTable {
    /// A zero-filled table sized for sequences of lengths `m` and `n`.
    pub fn for_sequences(m: usize, n: usize) -> Self {
        let (rows, cols) = (m + 1, n + 1);
        Self {
            rows,
            cols,
            cells: vec![0; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> usize {
        self.cells[i * self.cols + j]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: usize) {
        self.cells[i * self.cols + j] = value;
    }

    /// The bottom-right cell: the answer for the full sequences.
    pub fn last(&self) -> usize {
        self.get(self.rows - 1, self.cols - 1)
    }

    /// Longest-common-subsequence lengths of every prefix pair.
    ///
    /// `get(i, j)` is the LCS length of `old[..i]` and `new[..j]`.
    pub fn lcs<T: PartialEq>(old: &[T], new: &[T]) -> Self {
        let mut table = Self::for_sequences(old.len(), new.len());
        for i in 1..table.rows {
            for j in 1..table.cols {
                let value = if old[i - 1] == new[j - 1] {
                    table.get(i - 1, j - 1) + 1
                } else {
                    table.get(i - 1, j).max(table.get(i, j - 1))
                };
                table.set(i, j, value);
            }
        }
        table
    }

    /// Levenshtein distances of every prefix pair, with unit costs for
    /// insertion, deletion and substitution.
    ///
    /// `get(i, j)` is the edit distance between `a[..i]` and `b[..j]`.
    pub fn levenshtein<T: PartialEq>(a: &[T], b: &[T]) -> Self {
        let mut table = Self::for_sequences(a.len(), b.len());
        for i in 0..table.rows {
            table.set(i, 0, i);
        }
        for j in 0..table.cols {
            table.set(0, j, j);
        }
        for i in 1..table.rows {
            for j in 1..table.cols {
                let value = if a[i - 1] == b[j - 1] {
                    table.get(i - 1, j - 1)
                } else {
                    1 + table
                        .get(i - 1, j)
                        .min(table.get(i, j - 1))
                        .min(table.get(i - 1, j - 1))
                };
                table.set(i, j, value);
            }
        }
        table
    }
}
