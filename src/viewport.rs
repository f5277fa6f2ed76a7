//! The sampled region of the complex plane.

use std::mem::size_of;

use crate::{
    complex::Complex,
    error::{Axis, Error, Result},
};

/**
A rectangle in the complex plane plus the number of sample boxes along the x axis.

Both step sizes divide by the same `box_count`, so a viewport whose x and y extents
differ is sampled with non-square cells.
*/
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub box_count: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x_min: -2.0,
            x_max: 2.0,
            y_min: -2.0,
            y_max: 2.0,
            box_count: 100,
        }
    }
}

impl Viewport {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64, box_count: u32) -> Result<Self> {
        let viewport = Self {
            x_min,
            x_max,
            y_min,
            y_max,
            box_count,
        };
        viewport.validate()?;
        Ok(viewport)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("x_min", self.x_min),
            ("x_max", self.x_max),
            ("y_min", self.y_min),
            ("y_max", self.y_max),
        ] {
            if !value.is_finite() {
                return Err(Error::NonFiniteBound { name, value });
            }
        }

        if self.box_count == 0 {
            return Err(Error::ZeroBoxCount);
        }

        if !sampleable(self.width(), self.step_x()) {
            return Err(Error::EmptyExtent {
                axis: Axis::X,
                min: self.x_min,
                max: self.x_max,
            });
        }
        if !sampleable(self.height(), self.step_y()) {
            return Err(Error::EmptyExtent {
                axis: Axis::Y,
                min: self.y_min,
                max: self.y_max,
            });
        }

        // the ceiling can exceed `box_count`, and huge counts overflow the cell total
        let (columns, rows) = (self.columns(), self.rows());
        let bytes = columns
            .checked_mul(rows)
            .and_then(|cells| cells.checked_mul(size_of::<f64>()));
        match bytes {
            Some(bytes) if bytes <= isize::MAX as usize => Ok(()),
            _ => Err(Error::GridTooLarge { columns, rows }),
        }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn step_x(&self) -> f64 {
        self.width() / self.box_count as f64
    }

    pub fn step_y(&self) -> f64 {
        self.height() / self.box_count as f64
    }

    /// Number of samples along x (the grid's outer dimension).
    pub fn columns(&self) -> usize {
        (self.width() / self.step_x()).ceil() as usize
    }

    /// Number of samples along y (the grid's inner dimension).
    pub fn rows(&self) -> usize {
        (self.height() / self.step_y()).ceil() as usize
    }

    /// The plane coordinate sampled by grid cell `(i, j)`.
    pub fn coordinate(&self, i: usize, j: usize) -> Complex {
        Complex::new(
            self.x_min + i as f64 * self.step_x(),
            self.y_min + j as f64 * self.step_y(),
        )
    }

    /**
    Move every bound toward the centre by `fraction` of its axis' extent.

    Positive fractions zoom in, negative ones zoom out. A fraction of `0.5` or more
    collapses the viewport, which is reported as [`Error::EmptyExtent`].
    */
    pub fn zoom(&self, fraction: f64) -> Result<Self> {
        let dx = self.width() * fraction;
        let dy = self.height() * fraction;
        Self::new(
            self.x_min + dx,
            self.x_max - dx,
            self.y_min + dy,
            self.y_max - dy,
            self.box_count,
        )
    }

    /// Shift the viewport by `dx` widths horizontally and `dy` heights vertically.
    pub fn pan(&self, dx: f64, dy: f64) -> Result<Self> {
        let dx = self.width() * dx;
        let dy = self.height() * dy;
        Self::new(
            self.x_min + dx,
            self.x_max + dx,
            self.y_min + dy,
            self.y_max + dy,
            self.box_count,
        )
    }
}

/// A positive, finite extent whose step doesn't underflow to zero.
fn sampleable(extent: f64, step: f64) -> bool {
    extent > 0.0 && extent.is_finite() && step > 0.0
}
