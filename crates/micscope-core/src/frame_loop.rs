//! Self-rescheduling frame loop with explicit cancellation.
//!
//! The browser's `requestAnimationFrame` is abstracted behind [`FrameHost`]
//! so the scheduling rules can be exercised without a window: at most one
//! callback is pending at any time, and a halted loop stays halted.

use crate::error::Result;

/// Per-frame callback facility of the host (`requestAnimationFrame` /
/// `cancelAnimationFrame` on the web).
pub trait FrameHost {
    type Handle: Copy + std::fmt::Debug;

    fn request_frame(&self) -> Result<Self::Handle>;
    fn cancel_frame(&self, handle: Self::Handle);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Cancelled,
    /// Stopped after a frame failed; never rescheduled.
    Halted,
}

pub struct FrameLoop<H: FrameHost> {
    host: H,
    pending: Option<H::Handle>,
    state: LoopState,
}

impl<H: FrameHost> FrameLoop<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            pending: None,
            state: LoopState::Cancelled,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn pending(&self) -> Option<H::Handle> {
        self.pending
    }

    /// Request the next frame, replacing any callback already pending.
    /// Does nothing once the loop has halted.
    pub fn schedule(&mut self) -> Result<()> {
        if self.state == LoopState::Halted {
            return Ok(());
        }
        if let Some(handle) = self.pending.take() {
            self.host.cancel_frame(handle);
        }
        let handle = self.host.request_frame()?;
        self.pending = Some(handle);
        self.state = LoopState::Running;
        Ok(())
    }

    /// Mark the pending callback as consumed. Call first thing inside the
    /// callback, since the host has already dropped that request.
    pub fn frame_started(&mut self) {
        self.pending = None;
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.host.cancel_frame(handle);
        }
        if self.state == LoopState::Running {
            self.state = LoopState::Cancelled;
        }
    }

    pub fn halt(&mut self) {
        self.cancel();
        self.state = LoopState::Halted;
    }

    /// Resize protocol: drop the pending frame, let `apply` resize the
    /// surface, then reschedule. A halted loop is resized but not restarted.
    pub fn restart_with<F>(&mut self, apply: F) -> Result<()>
    where
        F: FnOnce(),
    {
        let was_halted = self.state == LoopState::Halted;
        self.cancel();
        apply();
        if was_halted {
            return Ok(());
        }
        self.schedule()
    }
}
