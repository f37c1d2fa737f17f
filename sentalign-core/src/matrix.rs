//! Dense DP tables
//!
//! [`ScoreMatrix`] holds the `(n+1) x (m+1)` scores of one alignment run,
//! rows indexing sequence A and columns indexing sequence B. Row and column 0
//! are the boundary. [`DirectionMask`] records which recurrence branches
//! produced each local-alignment cell.

use crate::error::{AlignError, AlignResult};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Row-major 2D storage
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: Copy> Grid<T> {
    pub fn new(rows: usize, cols: usize, fill: T) -> Self {
        Self {
            data: vec![fill; rows * cols],
            rows,
            cols,
        }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.data[row * self.cols + col] = value;
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }
}

/// Boundary initialization of a score matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryMode {
    /// Needleman-Wunsch: `M[i][0] = i*g`, `M[0][j] = j*g`
    Global,
    /// Smith-Waterman: the whole boundary is zero
    Local,
}

/// Reject gap/indel penalties that are not strictly negative and finite
pub(crate) fn validate_penalty(name: &str, value: f64) -> AlignResult<()> {
    if !value.is_finite() || value >= 0.0 {
        return Err(AlignError::invalid_config(format!(
            "{} must be a negative finite number, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Score table of one alignment run
#[derive(Debug, Clone)]
pub struct ScoreMatrix {
    cells: Grid<f64>,
}

impl ScoreMatrix {
    /// Allocate a matrix for sequences of length `len_a` and `len_b` and
    /// initialize its boundary.
    pub fn new(
        len_a: usize,
        len_b: usize,
        gap_penalty: f64,
        mode: BoundaryMode,
    ) -> AlignResult<Self> {
        validate_penalty("gap penalty", gap_penalty)?;

        let mut cells = Grid::new(len_a + 1, len_b + 1, 0.0);
        if mode == BoundaryMode::Global {
            for i in 1..=len_a {
                cells.set(i, 0, i as f64 * gap_penalty);
            }
            for j in 1..=len_b {
                cells.set(0, j, j as f64 * gap_penalty);
            }
        }

        Ok(Self { cells })
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.cells.get(i, j)
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self.cells.set(i, j, value);
    }

    pub fn rows(&self) -> usize {
        self.cells.rows()
    }

    pub fn cols(&self) -> usize {
        self.cells.cols()
    }

}

/// One backtracking move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `(i, j) -> (i, j-1)`: consumes `B[j-1]` against a gap in A
    Left,
    /// `(i, j) -> (i-1, j)`: consumes `A[i-1]` against a gap in B
    Up,
    /// `(i, j) -> (i-1, j-1)`
    Diag,
}

impl Step {
    /// Cell reached from `(i, j)`
    pub fn apply(self, i: usize, j: usize) -> (usize, usize) {
        match self {
            Step::Left => (i, j - 1),
            Step::Up => (i - 1, j),
            Step::Diag => (i - 1, j - 1),
        }
    }
}

/// Bitflags over the recurrence branches that reached a cell's maximum
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DirectionMask(u8);

impl DirectionMask {
    pub const EMPTY: Self = Self(0);
    pub const LEFT: Self = Self(0b0001);
    pub const UP: Self = Self(0b0010);
    pub const DIAG: Self = Self(0b0100);
    pub const ZERO: Self = Self(0b1000);

    /// Backtracking priority among the movement flags
    const PRIORITY: [(DirectionMask, Step); 3] = [
        (Self::LEFT, Step::Left),
        (Self::UP, Step::Up),
        (Self::DIAG, Step::Diag),
    ];

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    /// First movement flag set, in priority LEFT, UP, DIAG
    pub fn first_step(self) -> Option<Step> {
        Self::PRIORITY
            .iter()
            .find(|(flag, _)| self.contains(*flag))
            .map(|&(_, step)| step)
    }
}

impl BitOr for DirectionMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for DirectionMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for DirectionMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Self::LEFT, "LEFT"),
            (Self::UP, "UP"),
            (Self::DIAG, "DIAG"),
            (Self::ZERO, "ZERO"),
        ];
        let set: Vec<&str> = names
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|&(_, name)| name)
            .collect();
        write!(f, "DirectionMask({})", set.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_boundary() {
        let matrix = ScoreMatrix::new(3, 2, -2.0, BoundaryMode::Global).unwrap();

        assert_eq!(matrix.rows(), 4);
        assert_eq!(matrix.cols(), 3);
        assert_eq!(matrix.get(0, 0), 0.0);
        assert_eq!(matrix.get(3, 0), -6.0);
        assert_eq!(matrix.get(0, 2), -4.0);
        assert_eq!(matrix.get(1, 1), 0.0);
    }

    #[test]
    fn test_local_boundary() {
        let matrix = ScoreMatrix::new(3, 2, -2.0, BoundaryMode::Local).unwrap();

        for i in 0..matrix.rows() {
            assert_eq!(matrix.get(i, 0), 0.0);
        }
        for j in 0..matrix.cols() {
            assert_eq!(matrix.get(0, j), 0.0);
        }
    }

    #[test]
    fn test_rejects_non_negative_gap() {
        for gap in [0.0, 1.5, f64::NAN, f64::NEG_INFINITY] {
            let err = ScoreMatrix::new(2, 2, gap, BoundaryMode::Global).unwrap_err();
            assert!(matches!(err, AlignError::InvalidConfiguration(_)));
        }
    }

    #[test]
    fn test_empty_sequences_allocate_boundary_only() {
        let matrix = ScoreMatrix::new(0, 0, -1.0, BoundaryMode::Global).unwrap();
        assert_eq!(matrix.rows(), 1);
        assert_eq!(matrix.cols(), 1);
        assert_eq!(matrix.get(0, 0), 0.0);
    }

    #[test]
    fn test_direction_priority() {
        let mask = DirectionMask::DIAG | DirectionMask::UP;
        assert_eq!(mask.first_step(), Some(Step::Up));
        assert_eq!((DirectionMask::DIAG | DirectionMask::ZERO).first_step(), Some(Step::Diag));

        let mut mask = DirectionMask::ZERO;
        assert_eq!(mask.first_step(), None);
        mask |= DirectionMask::LEFT;
        assert_eq!(mask.first_step(), Some(Step::Left));
        assert!(mask.contains(DirectionMask::ZERO));
        assert!(!mask.contains(DirectionMask::EMPTY));
        assert_eq!(format!("{:?}", mask), "DirectionMask(LEFT | ZERO)");
    }

    #[test]
    fn test_step_apply() {
        assert_eq!(Step::Left.apply(3, 4), (3, 3));
        assert_eq!(Step::Up.apply(3, 4), (2, 4));
        assert_eq!(Step::Diag.apply(3, 4), (2, 3));
    }
}
