//! Generic alive/set/fseq state machine shared by every TUIO profile.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::{trace, warn};

use crate::error::MessageError;
use crate::protocol::OscArg;
use crate::tracker::entity::{SessionId, TrackedEntity, type_error};
use crate::tracker::frame_event::{FrameEvent, FrameTrigger};
use crate::tracker::motion_state::MotionState;

/// Configuration for a `SessionTracker`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Dead entries allowed to pile up without an `fseq` before a frame is
    /// forced out. Zero disables the bound.
    pub max_pending_dead: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_pending_dead: 1024,
        }
    }
}

/// Per-profile session table.
///
/// Owns the active sessions and the sessions that died since the last
/// emitted frame. Every handler either applies its message completely or
/// returns an error and leaves both collections untouched.
#[derive(Debug, Clone)]
pub struct SessionTracker<E: TrackedEntity> {
    active: BTreeMap<SessionId, E>,
    dead: Vec<E>,
    config: TrackerConfig,
}

impl<E: TrackedEntity> Default for SessionTracker<E> {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

impl<E: TrackedEntity> SessionTracker<E> {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            active: BTreeMap::new(),
            dead: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn active(&self) -> &BTreeMap<SessionId, E> {
        &self.active
    }

    /// Sessions removed since the last emitted frame.
    pub fn pending_dead(&self) -> &[E] {
        &self.dead
    }

    pub fn get(&self, session_id: SessionId) -> Option<&E> {
        self.active.get(&session_id)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// `source name@host`: shape check only.
    pub fn handle_source(&self, args: &[OscArg]) -> Result<(), MessageError> {
        if args.len() != 2 {
            return Err(MessageError::ArgumentCount {
                command: "source",
                expected: "2",
                got: args.len(),
            });
        }
        if args[1].as_bytes().is_none() {
            return Err(type_error("source", 1, "string", &args[1]));
        }
        Ok(())
    }

    /// `alive s0 s1 ...`: replace the active set.
    ///
    /// Known sessions carry over as `Stationary`, new ones start `Pressed`,
    /// and sessions missing from the list move to the dead list as
    /// `Released`. Returns a forced frame when the dead list outgrows
    /// `max_pending_dead`.
    pub fn handle_alive(&mut self, args: &[OscArg]) -> Result<Option<FrameEvent<E>>, MessageError> {
        let ids = args
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, arg)| arg.as_int().ok_or_else(|| type_error("alive", i, "int", arg)))
            .collect::<Result<Vec<SessionId>, _>>()?;

        let mut previous = std::mem::take(&mut self.active);
        let mut current = BTreeMap::new();

        for id in ids {
            if current.contains_key(&id) {
                continue;
            }
            let entity = match previous.remove(&id) {
                Some(mut known) => {
                    // a following set upgrades this to Moved if needed
                    known.set_state(MotionState::Stationary);
                    known
                }
                None => E::new(id),
            };
            current.insert(id, entity);
        }

        self.dead.reserve(previous.len());
        for (_, mut gone) in previous {
            gone.set_state(MotionState::Released);
            self.dead.push(gone);
        }
        self.active = current;

        trace!(
            kind = E::KIND,
            active = self.active.len(),
            dead = self.dead.len(),
            "alive applied"
        );

        let max = self.config.max_pending_dead;
        if max > 0 && self.dead.len() > max {
            warn!(
                kind = E::KIND,
                pending = self.dead.len(),
                max,
                "dead list over bound without fseq, forcing frame"
            );
            return Ok(Some(self.emit(None, FrameTrigger::Overflow)));
        }
        Ok(None)
    }

    /// `set s ...`: update one active session.
    pub fn handle_set(&mut self, args: &[OscArg]) -> Result<(), MessageError> {
        let (id, update) = E::parse_set(args)?;
        let entity = self
            .active
            .get_mut(&id)
            .ok_or(MessageError::UnknownSession(id))?;
        entity.apply(&update);
        Ok(())
    }

    /// `fseq f`: close the frame and hand out its snapshot.
    pub fn handle_frame(&mut self, args: &[OscArg]) -> FrameEvent<E> {
        let frame_seq = args.get(1).and_then(OscArg::as_int);
        self.emit(frame_seq, FrameTrigger::Sequence)
    }

    fn emit(&mut self, frame_seq: Option<i32>, trigger: FrameTrigger) -> FrameEvent<E> {
        FrameEvent {
            frame_seq,
            trigger,
            active: self.active.clone(),
            dead: std::mem::take(&mut self.dead),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::Cursor;
    use nalgebra::Point2;

    fn alive(ids: &[i32]) -> Vec<OscArg> {
        std::iter::once(OscArg::from("alive"))
            .chain(ids.iter().map(|&id| OscArg::Int(id)))
            .collect()
    }

    fn set(id: i32, x: f32, y: f32) -> Vec<OscArg> {
        vec![
            OscArg::from("set"),
            OscArg::Int(id),
            OscArg::Float(x),
            OscArg::Float(y),
            OscArg::Float(0.0),
            OscArg::Float(0.0),
            OscArg::Float(0.0),
        ]
    }

    fn fseq() -> Vec<OscArg> {
        vec![OscArg::from("fseq"), OscArg::Int(1)]
    }

    #[test]
    fn test_source_validation() {
        let tracker = SessionTracker::<Cursor>::default();
        assert!(tracker
            .handle_source(&[OscArg::from("source"), OscArg::from("app@host")])
            .is_ok());
        assert!(tracker.handle_source(&[OscArg::from("source")]).is_err());
        assert!(matches!(
            tracker.handle_source(&[OscArg::from("source"), OscArg::Int(1)]),
            Err(MessageError::ArgumentType { position: 1, .. })
        ));
    }

    #[test]
    fn test_alive_diff() {
        let mut tracker = SessionTracker::<Cursor>::default();
        tracker.handle_alive(&alive(&[1, 2])).unwrap();
        assert_eq!(tracker.get(1).unwrap().state(), MotionState::Pressed);

        tracker.handle_alive(&alive(&[2, 3])).unwrap();
        assert_eq!(tracker.active().keys().copied().collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(tracker.get(2).unwrap().state(), MotionState::Stationary);
        assert_eq!(tracker.get(3).unwrap().state(), MotionState::Pressed);

        let dead = tracker.pending_dead();
        assert_eq!(dead.len(), 1);
        assert_eq!(dead[0].session_id(), 1);
        assert_eq!(dead[0].state(), MotionState::Released);
    }

    #[test]
    fn test_malformed_alive_leaves_state() {
        let mut tracker = SessionTracker::<Cursor>::default();
        tracker.handle_alive(&alive(&[1, 2])).unwrap();

        let mut bad = alive(&[1]);
        bad.push(OscArg::Float(2.0));
        assert!(tracker.handle_alive(&bad).is_err());
        assert_eq!(tracker.len(), 2);
        assert!(tracker.pending_dead().is_empty());
    }

    #[test]
    fn test_duplicate_ids_collapse() {
        let mut tracker = SessionTracker::<Cursor>::default();
        tracker.handle_alive(&alive(&[4])).unwrap();
        tracker.handle_set(&set(4, 0.5, 0.5)).unwrap();
        tracker.handle_alive(&alive(&[4, 4])).unwrap();

        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.get(4).unwrap().position(), Point2::new(0.5, 0.5));
        assert!(tracker.pending_dead().is_empty());
    }

    #[test]
    fn test_set_unknown_session() {
        let mut tracker = SessionTracker::<Cursor>::default();
        tracker.handle_alive(&alive(&[1])).unwrap();
        assert_eq!(
            tracker.handle_set(&set(99, 0.1, 0.1)),
            Err(MessageError::UnknownSession(99))
        );
        assert_eq!(tracker.get(1).unwrap().position(), Point2::origin());
    }

    #[test]
    fn test_frame_clears_dead_keeps_active() {
        let mut tracker = SessionTracker::<Cursor>::default();
        tracker.handle_alive(&alive(&[1, 2])).unwrap();
        tracker.handle_alive(&alive(&[2])).unwrap();

        let event = tracker.handle_frame(&fseq());
        assert_eq!(event.frame_seq, Some(1));
        assert_eq!(event.trigger, FrameTrigger::Sequence);
        assert_eq!(event.dead.len(), 1);
        assert!(tracker.pending_dead().is_empty());
        assert_eq!(tracker.len(), 1);

        let empty = tracker.handle_frame(&[OscArg::from("fseq")]);
        assert_eq!(empty.frame_seq, None);
        assert!(empty.dead.is_empty());
    }

    #[test]
    fn test_overflow_forces_frame() {
        let mut tracker = SessionTracker::<Cursor>::new(TrackerConfig {
            max_pending_dead: 2,
        });
        tracker.handle_alive(&alive(&[1, 2, 3])).unwrap();
        assert!(tracker.handle_alive(&alive(&[3])).unwrap().is_none());

        let forced = tracker.handle_alive(&alive(&[])).unwrap().unwrap();
        assert_eq!(forced.trigger, FrameTrigger::Overflow);
        assert_eq!(forced.dead.len(), 3);
        assert!(forced.active.is_empty());
        assert!(tracker.pending_dead().is_empty());
    }

    #[test]
    fn test_unbounded_when_zero() {
        let mut tracker = SessionTracker::<Cursor>::new(TrackerConfig {
            max_pending_dead: 0,
        });
        for id in 0..50 {
            tracker.handle_alive(&alive(&[id])).unwrap();
        }
        assert_eq!(tracker.pending_dead().len(), 49);
    }
}
