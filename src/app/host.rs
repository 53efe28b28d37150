use std::collections::{BTreeSet, HashSet};

use crate::backdrop::env::{
    FrameScheduler, FrameToken, MotionPreference, ResizeEvents, Subscription,
};

/// The terminal side of the backdrop capabilities.
///
/// Frames requested here fire on the next `TickFrame`, so the frame rate is
/// whatever the frame task ticks at.
#[derive(Debug, Default)]
pub struct TerminalHost {
    reduced_motion: bool,
    next_id: u64,
    resize_listeners: HashSet<u64>,
    motion_listeners: HashSet<u64>,
    pending_frames: BTreeSet<u64>,
}

impl TerminalHost {
    #[must_use]
    pub fn new(reduced_motion: bool) -> Self {
        Self {
            reduced_motion,
            ..Self::default()
        }
    }

    /// Returns true when the preference actually changed.
    pub fn set_reduced_motion(&mut self, reduced_motion: bool) -> bool {
        let changed = self.reduced_motion != reduced_motion;
        self.reduced_motion = reduced_motion;
        changed
    }

    #[must_use]
    pub fn resize_listening(&self) -> bool {
        !self.resize_listeners.is_empty()
    }

    #[must_use]
    pub fn motion_listening(&self) -> bool {
        !self.motion_listeners.is_empty()
    }

    #[must_use]
    pub fn pending_frames(&self) -> usize {
        self.pending_frames.len()
    }

    /// Hands out every pending frame, oldest first.
    pub fn fire_frames(&mut self) -> Vec<FrameToken> {
        std::mem::take(&mut self.pending_frames)
            .into_iter()
            .map(FrameToken::new)
            .collect()
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl ResizeEvents for TerminalHost {
    fn subscribe_resize(&mut self) -> Subscription {
        let id = self.next_id();
        self.resize_listeners.insert(id);
        Subscription::new(id)
    }

    fn unsubscribe_resize(&mut self, subscription: Subscription) {
        self.resize_listeners.remove(&subscription.id());
    }
}

impl MotionPreference for TerminalHost {
    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn subscribe_motion(&mut self) -> Subscription {
        let id = self.next_id();
        self.motion_listeners.insert(id);
        Subscription::new(id)
    }

    fn unsubscribe_motion(&mut self, subscription: Subscription) {
        self.motion_listeners.remove(&subscription.id());
    }
}

impl FrameScheduler for TerminalHost {
    fn request_frame(&mut self) -> FrameToken {
        let id = self.next_id();
        self.pending_frames.insert(id);
        FrameToken::new(id)
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.pending_frames.remove(&token.id());
    }
}
