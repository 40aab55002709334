// Host-side tests for frame scheduling and the resize restart protocol.

use micscope_core::*;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

#[derive(Default)]
struct HostLog {
    next_id: u32,
    pending: BTreeSet<u32>,
    refuse: bool,
}

#[derive(Clone, Default)]
struct FakeHost(Rc<RefCell<HostLog>>);

impl FakeHost {
    fn pending_count(&self) -> usize {
        self.0.borrow().pending.len()
    }

    /// Fire the oldest pending callback the way the browser would.
    fn fire(&self) -> Option<u32> {
        let mut log = self.0.borrow_mut();
        let id = *log.pending.iter().next()?;
        log.pending.remove(&id);
        Some(id)
    }
}

impl FrameHost for FakeHost {
    type Handle = u32;

    fn request_frame(&self) -> Result<u32> {
        let mut log = self.0.borrow_mut();
        if log.refuse {
            return Err(ScopeError::Host("requestAnimationFrame failed".into()));
        }
        log.next_id += 1;
        let id = log.next_id;
        log.pending.insert(id);
        Ok(id)
    }

    fn cancel_frame(&self, handle: u32) {
        self.0.borrow_mut().pending.remove(&handle);
    }
}

#[test]
fn new_loop_has_nothing_pending() {
    let host = FakeHost::default();
    let lp = FrameLoop::new(host.clone());
    assert_eq!(lp.state(), LoopState::Cancelled);
    assert_eq!(lp.pending(), None);
    assert_eq!(host.pending_count(), 0);
}

#[test]
fn scheduling_twice_keeps_one_callback() {
    let host = FakeHost::default();
    let mut lp = FrameLoop::new(host.clone());
    lp.schedule().unwrap();
    lp.schedule().unwrap();
    assert_eq!(host.pending_count(), 1);
    assert_eq!(lp.state(), LoopState::Running);
}

#[test]
fn self_rescheduling_frames_keep_one_callback() {
    let host = FakeHost::default();
    let mut lp = FrameLoop::new(host.clone());
    lp.schedule().unwrap();
    for _ in 0..10 {
        let fired = host.fire().unwrap();
        assert_eq!(lp.pending(), Some(fired));
        lp.frame_started();
        lp.schedule().unwrap();
        assert_eq!(host.pending_count(), 1);
    }
}

#[test]
fn rapid_resizes_leave_exactly_one_pending_frame() {
    let host = FakeHost::default();
    let mut lp = FrameLoop::new(host.clone());
    lp.schedule().unwrap();

    let mut resized = 0;
    for _ in 0..25 {
        lp.restart_with(|| resized += 1).unwrap();
        assert_eq!(host.pending_count(), 1);
    }
    assert_eq!(resized, 25);
    assert_eq!(lp.state(), LoopState::Running);
}

#[test]
fn resize_between_fire_and_reschedule_does_not_duplicate() {
    let host = FakeHost::default();
    let mut lp = FrameLoop::new(host.clone());
    lp.schedule().unwrap();
    host.fire();
    lp.frame_started();
    lp.restart_with(|| {}).unwrap();
    lp.schedule().unwrap();
    assert_eq!(host.pending_count(), 1);
}

#[test]
fn cancel_drops_the_pending_callback() {
    let host = FakeHost::default();
    let mut lp = FrameLoop::new(host.clone());
    lp.schedule().unwrap();
    lp.cancel();
    assert_eq!(host.pending_count(), 0);
    assert_eq!(lp.state(), LoopState::Cancelled);
}

#[test]
fn halted_loop_is_never_rescheduled() {
    let host = FakeHost::default();
    let mut lp = FrameLoop::new(host.clone());
    lp.schedule().unwrap();
    lp.halt();
    assert_eq!(host.pending_count(), 0);

    let mut resized = false;
    lp.restart_with(|| resized = true).unwrap();
    lp.schedule().unwrap();
    assert!(resized);
    assert_eq!(host.pending_count(), 0);
    assert_eq!(lp.state(), LoopState::Halted);
}

#[test]
fn host_refusal_is_reported() {
    let host = FakeHost::default();
    host.0.borrow_mut().refuse = true;
    let mut lp = FrameLoop::new(host.clone());
    assert!(matches!(lp.schedule(), Err(ScopeError::Host(_))));
    assert_eq!(lp.pending(), None);
}
