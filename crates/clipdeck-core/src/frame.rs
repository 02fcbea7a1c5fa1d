//! Frame scheduling primitives.
//!
//! Provides a token type for one-shot frame requests and a manually driven
//! clock, so animation logic can be stepped with synthetic ticks instead of
//! a real display surface.

use crate::traits::FrameScheduler;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

/// Handle for a single pending frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameToken(u64);

impl FrameToken {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
struct ClockState {
    next_id: u64,
    pending: BTreeSet<FrameToken>,
    frames_delivered: u64,
}

/// Frame scheduler that only advances when told to.
///
/// Clones share the same queue, so the host loop and every surface that
/// requests frames observe one set of pending requests.
#[derive(Debug, Clone, Default)]
pub struct ManualFrameClock {
    state: Rc<RefCell<ClockState>>,
}

impl ManualFrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every pending request; these are the callbacks due this frame.
    ///
    /// Requests made while handling the returned tokens land in the next
    /// frame, matching how animation-frame callbacks re-arm themselves.
    pub fn drain_due(&self) -> Vec<FrameToken> {
        let mut state = self.state.borrow_mut();
        let due: Vec<FrameToken> = std::mem::take(&mut state.pending).into_iter().collect();
        if !due.is_empty() {
            state.frames_delivered += 1;
        }
        due
    }

    pub fn pending_count(&self) -> usize {
        self.state.borrow().pending.len()
    }

    pub fn is_pending(&self, token: FrameToken) -> bool {
        self.state.borrow().pending.contains(&token)
    }

    /// Number of frames that delivered at least one callback.
    pub fn frames_delivered(&self) -> u64 {
        self.state.borrow().frames_delivered
    }
}

impl FrameScheduler for ManualFrameClock {
    fn request_frame(&self) -> FrameToken {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let token = FrameToken(state.next_id);
        state.pending.insert(token);
        token
    }

    fn cancel_frame(&self, token: FrameToken) {
        self.state.borrow_mut().pending.remove(&token);
    }
}
