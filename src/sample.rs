//! Sampling a viewport into a score grid.

use log::{debug, trace};
use rayon::prelude::{IndexedParallelIterator, ParallelIterator, ParallelSliceMut};

use crate::{
    cancel::{CancellationChecker, NeverCancel},
    error::{Error, Result},
    escape,
    grid::ScoreGrid,
    progress::{Progress, Tracker},
    viewport::Viewport,
};

/// Sample `viewport` with the default [`Sampler`] settings: parallel, no progress
/// observer, not cancellable.
pub fn sample(viewport: &Viewport, max_iterations: u32) -> Result<ScoreGrid> {
    Sampler::new(max_iterations).sample(viewport)
}

/**
Evaluates every cell of a viewport's grid.

Cell `(i, j)` samples the point `(x_min + i * step_x, y_min + j * step_y)`. Sequential
sampling visits the cells column by column (`i` outer, `j` inner); parallel sampling hands
whole columns to the rayon pool. Both produce identical grids.
*/
pub struct Sampler<'a> {
    max_iterations: u32,
    parallel: bool,
    progress: Option<&'a dyn Progress>,
    cancellation: &'a dyn CancellationChecker,
}

impl<'a> Sampler<'a> {
    pub fn new(max_iterations: u32) -> Self {
        Self {
            max_iterations,
            parallel: true,
            progress: None,
            cancellation: &NeverCancel,
        }
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_progress(mut self, progress: &'a dyn Progress) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn with_cancellation(mut self, cancellation: &'a dyn CancellationChecker) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub fn sample(&self, viewport: &Viewport) -> Result<ScoreGrid> {
        viewport.validate()?;
        if self.max_iterations == 0 {
            return Err(Error::ZeroIterations);
        }

        let columns = viewport.columns();
        let rows = viewport.rows();
        let total = columns * rows;

        trace!("begin sample");
        debug!(
            "sampling {}x{} cells, step ({}, {}), {} iterations{}",
            columns,
            rows,
            viewport.step_x(),
            viewport.step_y(),
            self.max_iterations,
            if self.parallel { ", parallel" } else { "" }
        );

        let tracker = Tracker::new(self.progress, total);
        let mut scores = vec![0.0; total];

        if self.parallel {
            scores
                .par_chunks_mut(rows)
                .enumerate()
                .try_for_each(|(i, column)| -> Result<()> {
                    self.fill_column(viewport, i, column)?;
                    tracker.advance(rows);
                    Ok(())
                })?;
        } else {
            for (i, column) in scores.chunks_mut(rows).enumerate() {
                self.fill_column_tracked(viewport, i, column, &tracker)?;
            }
        }

        trace!("end sample");
        Ok(ScoreGrid::from_scores(columns, rows, scores))
    }

    fn fill_column(&self, viewport: &Viewport, i: usize, column: &mut [f64]) -> Result<()> {
        self.check_cancelled()?;
        for (j, score) in column.iter_mut().enumerate() {
            *score = escape::score(viewport.coordinate(i, j), self.max_iterations);
        }
        Ok(())
    }

    /// Like `fill_column`, but advances progress after every cell.
    fn fill_column_tracked(
        &self,
        viewport: &Viewport,
        i: usize,
        column: &mut [f64],
        tracker: &Tracker,
    ) -> Result<()> {
        self.check_cancelled()?;
        for (j, score) in column.iter_mut().enumerate() {
            *score = escape::score(viewport.coordinate(i, j), self.max_iterations);
            tracker.advance(1);
        }
        Ok(())
    }

    fn check_cancelled(&self) -> Result<()> {
        if self.cancellation.is_cancelled() {
            return Err(Error::Cancelled);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    };

    use super::*;
    use crate::{cancel::CancelFlag, complex::Complex};

    fn square(box_count: u32) -> Viewport {
        Viewport::new(-2.0, 2.0, -2.0, 2.0, box_count).unwrap()
    }

    #[test]
    fn test_four_by_four() {
        let grid = sample(&square(4), 50).unwrap();
        assert_eq!(grid.columns(), 4);
        assert_eq!(grid.rows(), 4);
        assert_eq!(grid[(0, 0)], 0.02);
        // (0, 0) in the plane is cell (2, 2)
        assert_eq!(grid[(2, 2)], 1.0);
    }

    #[test]
    fn test_cells_match_evaluate() {
        let viewport = Viewport::new(-2.1, 0.7, -1.3, 1.1, 23).unwrap();
        let grid = sample(&viewport, 80).unwrap();
        for i in 0..grid.columns() {
            for j in 0..grid.rows() {
                let x = viewport.x_min + i as f64 * viewport.step_x();
                let y = viewport.y_min + j as f64 * viewport.step_y();
                assert_eq!(viewport.coordinate(i, j), Complex::new(x, y));
                assert_eq!(grid[(i, j)], escape::evaluate(x, y, 80).unwrap());
            }
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let viewport = Viewport::new(-1.5, 0.5, -1.0, 1.0, 64).unwrap();
        let parallel = Sampler::new(200).sample(&viewport).unwrap();
        let sequential = Sampler::new(200).parallel(false).sample(&viewport).unwrap();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_invalid_arguments() {
        let mut viewport = square(4);
        viewport.box_count = 0;
        assert_eq!(sample(&viewport, 50), Err(Error::ZeroBoxCount));

        assert_eq!(sample(&square(4), 0), Err(Error::ZeroIterations));

        let mut viewport = square(4);
        viewport.y_max = viewport.y_min;
        assert!(sample(&viewport, 50).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_overflowing_grid_is_rejected_before_sampling() {
        let viewport = Viewport {
            x_min: 0.0,
            x_max: 0.7,
            y_min: 0.0,
            y_max: 0.7,
            box_count: u32::MAX,
        };
        for parallel in [true, false] {
            let result = Sampler::new(1).parallel(parallel).sample(&viewport);
            assert!(matches!(result, Err(Error::GridTooLarge { .. })));
        }
    }

    #[test]
    fn test_invalid_arguments_report_no_progress() {
        let calls = AtomicUsize::new(0);
        let observer = |_: usize, _: usize| {
            calls.fetch_add(1, Ordering::Relaxed);
        };
        let result = Sampler::new(0).with_progress(&observer).sample(&square(4));
        assert_eq!(result, Err(Error::ZeroIterations));
        assert_eq!(calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_sequential_progress() {
        let reports = Mutex::new(Vec::new());
        let observer = |completed: usize, total: usize| {
            reports.lock().unwrap().push(completed * 100 / total)
        };
        Sampler::new(20)
            .parallel(false)
            .with_progress(&observer)
            .sample(&square(10))
            .unwrap();

        assert_eq!(
            reports.into_inner().unwrap(),
            vec![10, 20, 30, 40, 50, 60, 70, 80, 90, 100]
        );
    }

    #[test]
    fn test_parallel_progress() {
        let reports = Mutex::new(Vec::new());
        let observer = |completed: usize, _: usize| reports.lock().unwrap().push(completed);
        Sampler::new(20)
            .with_progress(&observer)
            .sample(&square(10))
            .unwrap();

        let mut reports = reports.into_inner().unwrap();
        reports.sort_unstable();
        assert_eq!(reports, vec![10, 20, 30, 40, 50, 60, 70, 80, 90, 100]);
    }

    #[test]
    fn test_cancelled_render() {
        let flag = CancelFlag::new();
        flag.cancel();
        for parallel in [true, false] {
            let result = Sampler::new(50)
                .parallel(parallel)
                .with_cancellation(&flag)
                .sample(&square(8));
            assert_eq!(result, Err(Error::Cancelled));
        }

        flag.reset();
        let grid = Sampler::new(50)
            .with_cancellation(&flag)
            .sample(&square(8))
            .unwrap();
        assert_eq!(grid.len(), 64);
    }
}
