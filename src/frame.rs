// ── Frame scheduling ──────────────────────────────────────────────────────────
//
// Engine reconfiguration is deferred to the next animation frame.  The view
// holds at most one pending frame and cancels it before requesting another,
// so a burst of touch moves costs one reconfigure per frame.

/// Handle for a requested frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(u64);

/// A cancelable next-frame callback source.
///
/// The host calls back into `EditorView::on_frame` with the id once the
/// frame fires; cancelled ids must never be delivered.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameId;
    fn cancel_frame(&mut self, id: FrameId);
}

/// Single-threaded queue the host drains once per frame.
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    queued: Vec<FrameId>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every frame due now, in request order.
    pub fn drain(&mut self) -> Vec<FrameId> {
        std::mem::take(&mut self.queued)
    }

    pub fn pending(&self) -> usize {
        self.queued.len()
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameId {
        let id = FrameId(self.next_id);
        self.next_id += 1;
        self.queued.push(id);
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.queued.retain(|&queued| queued != id);
    }
}
