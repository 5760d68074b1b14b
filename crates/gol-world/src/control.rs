//! Hooks between the driver loop and its collaborators.

use crate::grid::Board;
use gol_core::StatsSnapshot;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Non-blocking cancellation check, polled once per generation
pub trait CancellationSource {
    fn is_cancelled(&self) -> bool;
}

/// Never cancels; the run relies on the generation cap alone
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancellationSource for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl CancellationSource for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<T: CancellationSource + ?Sized> CancellationSource for Arc<T> {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

/// Adapts a closure into a cancellation source
pub struct CancelFn<F>(pub F);

impl<F: Fn() -> bool> CancellationSource for CancelFn<F> {
    fn is_cancelled(&self) -> bool {
        (self.0)()
    }
}

/// Receives board frames and population snapshots as the run progresses
pub trait SimulationObserver {
    /// Called every `display_frequency` generations when rendering is enabled
    fn on_frame(&mut self, _generation: u64, _board: &Board) {}

    /// Called for every population snapshot
    fn on_stats(&mut self, _snapshot: &StatsSnapshot) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SimulationObserver for NoopObserver {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_atomic_flag_cancels() {
        let flag = Arc::new(AtomicBool::new(false));
        assert!(!flag.is_cancelled());
        flag.store(true, Ordering::SeqCst);
        assert!(flag.is_cancelled());
    }

    #[test]
    fn test_closure_source() {
        let polls = Cell::new(0);
        let source = CancelFn(|| {
            polls.set(polls.get() + 1);
            polls.get() >= 2
        });
        assert!(!source.is_cancelled());
        assert!(source.is_cancelled());
        assert!(!NeverCancel.is_cancelled());
    }
}
