/*!
Score grids.

A grid is one contiguous buffer of `f64` scores, `columns * rows` long. Column `i` holds
the scores for every y index `j` at x index `i`, so `grid.column(i)[j] == grid[(i, j)]`.

Renderers that upload the scores somewhere else (a texture, a file) can take the raw
memory with [`ScoreGrid::as_bytes`]; [`bytemuck`] does the cast.
*/

use std::ops::Index;

#[derive(Clone, Debug, PartialEq)]
pub struct ScoreGrid {
    columns: usize,
    rows: usize,
    scores: Vec<f64>,
}

impl ScoreGrid {
    pub(crate) fn from_scores(columns: usize, rows: usize, scores: Vec<f64>) -> Self {
        debug_assert_eq!(scores.len(), columns * rows);
        Self {
            columns,
            rows,
            scores,
        }
    }

    /// Size of the outer (x) dimension.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Size of the inner (y) dimension.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.columns && j < self.rows {
            Some(self.scores[i * self.rows + j])
        } else {
            None
        }
    }

    pub fn column(&self, i: usize) -> &[f64] {
        &self.scores[i * self.rows..(i + 1) * self.rows]
    }

    pub fn iter_columns(&self) -> impl Iterator<Item = &[f64]> + '_ {
        // `chunks_exact` panics on a zero chunk size
        self.scores.chunks_exact(self.rows.max(1))
    }

    /// All scores, column after column.
    pub fn as_slice(&self) -> &[f64] {
        &self.scores
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.scores)
    }

    pub fn into_scores(self) -> Vec<f64> {
        self.scores
    }
}

impl Index<(usize, usize)> for ScoreGrid {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        assert!(
            i < self.columns && j < self.rows,
            "cell ({}, {}) out of bounds for a {}x{} grid",
            i,
            j,
            self.columns,
            self.rows
        );
        &self.scores[i * self.rows + j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> ScoreGrid {
        // 3 columns, 2 rows
        ScoreGrid::from_scores(3, 2, vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6])
    }

    #[test]
    fn test_indexing_is_column_major() {
        let grid = grid();
        assert_eq!(grid[(0, 1)], 0.2);
        assert_eq!(grid[(2, 0)], 0.5);
        assert_eq!(grid.column(1), &[0.3, 0.4]);
        assert_eq!(grid.get(1, 1), Some(0.4));
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.get(0, 2), None);
    }

    #[test]
    #[should_panic]
    fn test_index_checks_rows() {
        // flat index 2 exists, but (0, 2) is not a cell
        let _ = grid()[(0, 2)];
    }

    #[test]
    fn test_iter_columns() {
        let grid = grid();
        let columns: Vec<&[f64]> = grid.iter_columns().collect();
        assert_eq!(columns.len(), 3);
        assert_eq!(columns[2], &[0.5, 0.6]);
    }

    #[test]
    fn test_as_bytes() {
        let grid = grid();
        let bytes = grid.as_bytes();
        assert_eq!(bytes.len(), 6 * std::mem::size_of::<f64>());
        assert_eq!(&bytes[8..16], &0.2f64.to_ne_bytes());
    }
}
