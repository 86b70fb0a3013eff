//! Reproducible run seeds
//!
//! A [`SeedTable`] is a fixed grid of pre-drawn seeds. An experiment records a
//! [`SeedTableCoordinate`] once and reads its seeds down that column, so the
//! same table and coordinate always reproduce the same seeds.

use ndarray::Array2;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::warn;

use crate::error::{Result, SweepError};

/// A position in a seed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeedTableCoordinate {
    row: usize,
    column: usize,
}

impl SeedTableCoordinate {
    /// Create a coordinate, checking the column against the table width.
    pub fn new(row: usize, column: usize, width: usize) -> Result<Self> {
        if column >= width {
            return Err(SweepError::InvalidArgument(format!(
                "seed column {} is outside table width {}",
                column, width
            )));
        }
        Ok(Self { row, column })
    }

    /// Pick a coordinate at random: the row from `next_u64`, the column uniformly.
    pub fn random<R: Rng + ?Sized>(rows: usize, width: usize, rng: &mut R) -> Result<Self> {
        if rows == 0 || width == 0 {
            return Err(SweepError::InvalidArgument(
                "cannot pick a coordinate in an empty seed table".to_string(),
            ));
        }
        let row = (rng.next_u64() % rows as u64) as usize;
        let column = rng.gen_range(0..width);
        if row >= rows - rows / 10 {
            warn!(row, rows, "seed coordinate drawn near the end of the table");
        }
        Ok(Self { row, column })
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// The coordinate `rows` further down the same column.
    pub fn advance(&self, rows: usize) -> Self {
        Self {
            row: self.row.saturating_add(rows),
            column: self.column,
        }
    }
}

/// An immutable grid of seeds, `rows` x `width`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedTable {
    seeds: Array2<i64>,
}

impl SeedTable {
    /// Wrap an existing grid. Both dimensions must be non-zero.
    pub fn from_array(seeds: Array2<i64>) -> Result<Self> {
        if seeds.nrows() == 0 || seeds.ncols() == 0 {
            return Err(SweepError::InvalidArgument(format!(
                "seed table must be non-empty, got {}x{}",
                seeds.nrows(),
                seeds.ncols()
            )));
        }
        Ok(Self { seeds })
    }

    /// Build a table from rows of equal length.
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Result<Self> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(SweepError::InvalidArgument(format!(
                "seed table row {} has {} columns, expected {}",
                i,
                row.len(),
                width
            )));
        }

        let height = rows.len();
        let flat: Vec<i64> = rows.into_iter().flatten().collect();
        let seeds = Array2::from_shape_vec((height, width), flat)
            .map_err(|e| SweepError::InvalidArgument(format!("seed table shape: {}", e)))?;
        Self::from_array(seeds)
    }

    /// Draw a fresh table, one `next_u64` per cell in row-major order.
    ///
    /// Dimensions whose cell count overflows, or whose storage cannot be
    /// reserved, fail with [`SweepError::InvalidArgument`].
    pub fn generate<R: RngCore + ?Sized>(rows: usize, width: usize, rng: &mut R) -> Result<Self> {
        let too_large = || {
            SweepError::InvalidArgument(format!(
                "seed table of {}x{} seeds is too large",
                rows, width
            ))
        };
        let cells = rows.checked_mul(width).ok_or_else(too_large)?;

        let mut flat: Vec<i64> = Vec::new();
        flat.try_reserve_exact(cells).map_err(|_| too_large())?;
        flat.extend((0..cells).map(|_| rng.next_u64() as i64));
        let seeds = Array2::from_shape_vec((rows, width), flat)
            .map_err(|e| SweepError::InvalidArgument(format!("seed table shape: {}", e)))?;
        Self::from_array(seeds)
    }

    pub fn rows(&self) -> usize {
        self.seeds.nrows()
    }

    pub fn width(&self) -> usize {
        self.seeds.ncols()
    }

    pub fn get(&self, row: usize, column: usize) -> Option<i64> {
        self.seeds.get((row, column)).copied()
    }

    /// Read `count` seeds down the coordinate's column.
    ///
    /// The column is reduced modulo the table width. Reading past the last row
    /// fails with [`SweepError::SeedTableExhausted`].
    ///
    /// # Examples
    ///
    /// ```
    /// use sweepcase_rs::seed::{SeedTable, SeedTableCoordinate};
    ///
    /// let table = SeedTable::from_rows(vec![vec![1, 2], vec![3, 4], vec![5, 6]]).unwrap();
    /// let coord = SeedTableCoordinate::new(1, 1, table.width()).unwrap();
    /// assert_eq!(table.next_seeds(coord, 2).unwrap(), vec![4, 6]);
    /// assert!(table.next_seeds(coord, 3).is_err());
    /// ```
    pub fn next_seeds(&self, coordinate: SeedTableCoordinate, count: usize) -> Result<Vec<i64>> {
        let column = coordinate.column % self.width();
        let exhausted = || SweepError::SeedTableExhausted {
            row: coordinate.row,
            column,
            requested: count,
            rows: self.rows(),
        };

        let end = coordinate.row.checked_add(count).ok_or_else(exhausted)?;
        if end > self.rows() {
            return Err(exhausted());
        }

        Ok(self
            .seeds
            .column(column)
            .iter()
            .skip(coordinate.row)
            .take(count)
            .copied()
            .collect())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let table: SeedTable = serde_json::from_str(json)?;
        Self::from_array(table.seeds)
    }

    /// Save the table to a JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = self.to_json()?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Load a table from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Self::from_json(&contents)
    }
}
