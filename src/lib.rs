//! Escape-time sampling of the Mandelbrot set.
//!
//! [`sample`] turns a [`Viewport`] and an iteration cap into a [`ScoreGrid`] of
//! normalized escape times, calling [`escape::evaluate`]'s logic once per cell.

pub mod cancel;
pub mod complex;
pub mod error;
pub mod escape;
pub mod grid;
pub mod progress;
pub mod sample;
pub mod viewport;

pub use cancel::{CancelFlag, CancellationChecker, NeverCancel};
pub use complex::Complex;
pub use error::{Axis, Error, Result};
pub use escape::{escape_iteration, evaluate};
pub use grid::ScoreGrid;
pub use progress::{LogProgress, Progress};
pub use sample::{sample, Sampler};
pub use viewport::Viewport;
