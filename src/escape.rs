//! Escape-time evaluation of `z <- z^2 + c`.

use crate::{
    complex::Complex,
    error::{Error, Result},
};

/// Squared divergence radius. Once `|z| > 2` the orbit diverges.
pub const ESCAPE_RADIUS_SQR: f64 = 4.0;

/// The first iteration (1-based) at which the orbit of `c` leaves the radius-2 disc,
/// or `None` if it stays inside for all `max_iterations` steps.
pub fn escape_iteration(c: Complex, max_iterations: u32) -> Option<u32> {
    let mut z = Complex::ZERO;
    for iteration in 1..=max_iterations {
        z = z * z + c;
        if z.norm_sqr() > ESCAPE_RADIUS_SQR {
            return Some(iteration);
        }
    }
    None
}

/**
Normalized divergence score for the point `x + yi`.

Returns `i / max_iterations` when the orbit escapes at iteration `i`, and exactly `1.0`
when it doesn't escape within the cap. The result is always in `(0, 1]`. Non-finite
coordinates are rejected.
*/
pub fn evaluate(x: f64, y: f64, max_iterations: u32) -> Result<f64> {
    if max_iterations == 0 {
        return Err(Error::ZeroIterations);
    }
    // a NaN orbit never compares greater than the radius, so it would read as "inside"
    for (name, value) in [("x", x), ("y", y)] {
        if !value.is_finite() {
            return Err(Error::NonFiniteBound { name, value });
        }
    }
    Ok(score(Complex::new(x, y), max_iterations))
}

/// [`evaluate`] without the argument check, for callers that validated the cap already.
pub(crate) fn score(c: Complex, max_iterations: u32) -> f64 {
    match escape_iteration(c, max_iterations) {
        Some(iteration) => iteration as f64 / max_iterations as f64,
        None => 1.0,
    }
}
