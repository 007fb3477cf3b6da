//! Eigenvalue surfaces over the (lag, angle) search grid.

use crate::config::SearchGrid;

/// Dense row-major 2-D grid of `f64` values.
///
/// Rows index lags and columns index angles.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Grid {
    pub(crate) fn filled(rows: usize, cols: usize, value: f64) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }

    /// Returns `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the value at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.rows && col < self.cols, "grid index out of bounds");
        self.data[row * self.cols + col]
    }

    /// Returns one row as a slice.
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Returns one column as an owned vector.
    pub fn column(&self, col: usize) -> Vec<f64> {
        (0..self.rows).map(|r| self.get(r, col)).collect()
    }

    /// Returns all values in row-major order.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Smallest value, or `NaN` for an empty grid.
    pub fn min(&self) -> f64 {
        self.data.iter().copied().reduce(f64::min).unwrap_or(f64::NAN)
    }

    /// Largest value, or `NaN` for an empty grid.
    pub fn max(&self) -> f64 {
        self.data.iter().copied().reduce(f64::max).unwrap_or(f64::NAN)
    }

    /// Index `(row, col)` of the smallest value. Ties resolve to the first
    /// occurrence in row-major order.
    pub fn argmin(&self) -> Option<(usize, usize)> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &v) in self.data.iter().enumerate() {
            match best {
                Some((_, b)) if v >= b => {}
                _ => best = Some((i, v)),
            }
        }
        best.map(|(i, _)| (i / self.cols, i % self.cols))
    }

    /// Copies the grid into nested rows.
    pub fn to_nested(&self) -> Vec<Vec<f64>> {
        (0..self.rows).map(|r| self.row(r).to_vec()).collect()
    }
}

/// Result of a grid search: eigenvalue grids plus the axes they were
/// computed on.
#[derive(Clone, Debug, PartialEq)]
pub struct EigenvalueSurface {
    pub(crate) grid: SearchGrid,
    pub(crate) lam1: Grid,
    pub(crate) lam2: Grid,
    pub(crate) srcpol: Grid,
    pub(crate) degenerate: Vec<bool>,
}

impl EigenvalueSurface {
    /// Returns the resolved search grid.
    pub fn search_grid(&self) -> &SearchGrid {
        &self.grid
    }

    /// Returns `(n_lags, n_angles)`.
    pub fn shape(&self) -> (usize, usize) {
        self.grid.shape()
    }

    /// Angle of every cell in degrees, same shape as the eigenvalue grids.
    pub fn degs(&self) -> Grid {
        let (rows, cols) = self.shape();
        let mut g = Grid::filled(rows, cols, 0.0);
        for r in 0..rows {
            for (c, &a) in self.grid.angles().iter().enumerate() {
                g.set(r, c, a);
            }
        }
        g
    }

    /// Lag of every cell in time units, same shape as the eigenvalue grids.
    pub fn lags(&self) -> Grid {
        let (rows, cols) = self.shape();
        let delta = self.grid.delta();
        let mut g = Grid::filled(rows, cols, 0.0);
        for (r, &l) in self.grid.lags().iter().enumerate() {
            for c in 0..cols {
                g.set(r, c, l as f64 * delta);
            }
        }
        g
    }

    /// Larger eigenvalue at every cell.
    pub fn lam1(&self) -> &Grid {
        &self.lam1
    }

    /// Smaller eigenvalue at every cell.
    pub fn lam2(&self) -> &Grid {
        &self.lam2
    }

    /// Source polarization implied by each cell, degrees in `[0, 180)`.
    pub fn srcpol(&self) -> &Grid {
        &self.srcpol
    }

    /// Returns `true` if the cell had zero variance on both components.
    pub fn is_degenerate(&self, row: usize, col: usize) -> bool {
        self.degenerate[row * self.grid.angles().len() + col]
    }

    /// Number of degenerate cells.
    pub fn n_degenerate(&self) -> usize {
        self.degenerate.iter().filter(|&&d| d).count()
    }

    /// Energy ratio `(lam1 - lam2) / lam2` at every cell. Cells with
    /// `lam2 == 0` map to infinity, or zero when the cell is degenerate.
    pub fn energy_ratio(&self) -> Grid {
        let (rows, cols) = self.shape();
        let mut g = Grid::filled(rows, cols, 0.0);
        for r in 0..rows {
            for c in 0..cols {
                let l1 = self.lam1.get(r, c);
                let l2 = self.lam2.get(r, c);
                let v = if self.is_degenerate(r, c) {
                    0.0
                } else if l2 == 0.0 {
                    f64::INFINITY
                } else {
                    (l1 - l2) / l2
                };
                g.set(r, c, v);
            }
        }
        g
    }

    /// Number of cells with `lam2 <= threshold`.
    pub fn count_within(&self, threshold: f64) -> usize {
        self.lam2
            .as_slice()
            .iter()
            .filter(|&&v| v <= threshold)
            .count()
    }

    /// Returns the time-unit label of the lag axis.
    pub fn units(&self) -> &str {
        self.grid.units()
    }
}
