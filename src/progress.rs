//! Coarse progress reporting for long renders.

use std::sync::atomic::{AtomicUsize, Ordering};

use log::info;

/// Number of milestones reported per render (one every 10% of cells).
pub const MILESTONES: usize = 10;

/**
Observer notified as a render passes each 10% milestone.

`completed` is the cell count at which the milestone is reached, `total` the number of
cells in the grid. The last notification always has `completed == total`.

Reports are advisory. When the sampler runs in parallel they may arrive from several
threads, in any order.
*/
pub trait Progress: Send + Sync {
    fn report(&self, completed: usize, total: usize);
}

impl<F> Progress for F
where
    F: Fn(usize, usize) + Send + Sync,
{
    fn report(&self, completed: usize, total: usize) {
        self(completed, total)
    }
}

/// Logs each milestone at `info` level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogProgress;

impl Progress for LogProgress {
    fn report(&self, completed: usize, total: usize) {
        info!(
            "Finished {} out of {} ({}%)",
            completed,
            total,
            completed * 100 / total
        );
    }
}

/// Counts finished cells and forwards milestone crossings to an observer.
pub(crate) struct Tracker<'a> {
    observer: Option<&'a dyn Progress>,
    total: usize,
    completed: AtomicUsize,
}

impl<'a> Tracker<'a> {
    pub fn new(observer: Option<&'a dyn Progress>, total: usize) -> Self {
        Self {
            observer,
            total,
            completed: AtomicUsize::new(0),
        }
    }

    pub fn advance(&self, cells: usize) {
        let observer = match self.observer {
            Some(observer) if self.total > 0 => observer,
            _ => return,
        };

        let before = self.completed.fetch_add(cells, Ordering::Relaxed);
        let after = before + cells;

        let first = self.milestone(before) + 1;
        let last = self.milestone(after);
        for milestone in first..=last {
            observer.report(self.threshold(milestone), self.total);
        }
    }

    fn milestone(&self, completed: usize) -> usize {
        completed * MILESTONES / self.total
    }

    /// Smallest cell count that reaches `milestone`.
    fn threshold(&self, milestone: usize) -> usize {
        (milestone * self.total + MILESTONES - 1) / MILESTONES
    }
}
