use std::collections::BTreeMap;

use crate::tracker::entity::{SessionId, TrackedEntity};
use crate::tracker::motion_state::MotionState;

/// Why a frame event was emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameTrigger {
    /// The sender closed the frame with `fseq`.
    Sequence,
    /// The dead list hit its bound before any `fseq` arrived.
    Overflow,
}

/// One completed frame for a single profile.
///
/// Both collections are owned copies taken at emission time; the tracker
/// keeps mutating its own state afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameEvent<E> {
    /// Frame sequence number carried by `fseq`, if any.
    pub frame_seq: Option<i32>,
    pub trigger: FrameTrigger,
    pub active: BTreeMap<SessionId, E>,
    pub dead: Vec<E>,
}

impl<E: TrackedEntity> FrameEvent<E> {
    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.dead.is_empty()
    }

    /// Sessions that appeared in this frame.
    pub fn pressed(&self) -> impl Iterator<Item = &E> {
        self.with_state(MotionState::Pressed)
    }

    pub fn moved(&self) -> impl Iterator<Item = &E> {
        self.with_state(MotionState::Moved)
    }

    fn with_state(&self, state: MotionState) -> impl Iterator<Item = &E> {
        self.active.values().filter(move |e| e.state() == state)
    }
}
