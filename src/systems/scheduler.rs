//! Frame scheduling
//!
//! The per-frame callback re-requests itself through this scheduler rather
//! than directly, so teardown is deterministic: cancel the token and no
//! further frames are scheduled.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use winit::window::Window;

/// Cancellation handle shared with the scheduler.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    /// Stop all future frame scheduling.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Drives the per-frame redraw loop.
pub struct FrameScheduler {
    token: CancelToken,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            token: CancelToken::new(),
        }
    }

    /// A token that cancels this scheduler from teardown paths.
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Whether the next frame should still run.
    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Request the next frame unless cancelled. Returns whether a frame was
    /// scheduled.
    pub fn schedule(&self, window: &Window) -> bool {
        if self.token.is_cancelled() {
            return false;
        }
        window.request_redraw();
        true
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheduler_starts_active() {
        let scheduler = FrameScheduler::new();
        assert!(scheduler.is_active());
    }

    #[test]
    fn test_cancel_through_cloned_token() {
        let scheduler = FrameScheduler::new();
        let token = scheduler.token();

        token.cancel();

        assert!(!scheduler.is_active());
        assert!(scheduler.token().is_cancelled());
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let token = CancelToken::new();
        token.cancel();
        token.cancel();
        assert!(token.is_cancelled());
    }
}
