//! Error types.

use std::fmt;

use thiserror::Error;

pub type Result<A> = std::result::Result<A, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("box count must be at least 1")]
    ZeroBoxCount,

    #[error("{axis} extent [{min}, {max}] is empty or too large to sample")]
    EmptyExtent { axis: Axis, min: f64, max: f64 },

    #[error("a {columns}x{rows} grid does not fit in memory")]
    GridTooLarge { columns: usize, rows: usize },

    #[error("{name} is not finite: {value}")]
    NonFiniteBound { name: &'static str, value: f64 },

    #[error("iteration cap must be at least 1")]
    ZeroIterations,

    #[error("division by a complex value with zero modulus")]
    DivisionByZero,

    #[error("render cancelled")]
    Cancelled,
}

impl Error {
    /// `true` for caller contract violations (bad viewport, box count or iteration cap).
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Error::ZeroBoxCount
                | Error::EmptyExtent { .. }
                | Error::GridTooLarge { .. }
                | Error::NonFiniteBound { .. }
                | Error::ZeroIterations
        )
    }
}
