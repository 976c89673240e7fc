//! Touch cursor (`/tuio/2Dcur`).

use nalgebra::{Point2, Vector2};

use crate::error::MessageError;
use crate::protocol::OscArg;
use crate::tracker::entity::{SessionId, SetArgs, TrackedEntity, track_motion};
use crate::tracker::motion_state::MotionState;

/// A tracked touch point.
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor {
    session_id: SessionId,
    position: Point2<f32>,
    velocity: Vector2<f32>,
    acceleration: f32,
    state: MotionState,
}

/// Validated payload of `/tuio/2Dcur set s x y X Y m`.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorUpdate {
    pub position: Point2<f32>,
    pub velocity: Vector2<f32>,
    pub acceleration: f32,
}

impl Cursor {
    pub fn position(&self) -> Point2<f32> {
        self.position
    }

    pub fn velocity(&self) -> Vector2<f32> {
        self.velocity
    }

    pub fn acceleration(&self) -> f32 {
        self.acceleration
    }

    pub fn set_position(&mut self, position: Point2<f32>) {
        track_motion(&mut self.state, self.position.x, position.x);
        track_motion(&mut self.state, self.position.y, position.y);
        self.position = position;
    }

    pub fn set_velocity(&mut self, velocity: Vector2<f32>) {
        self.velocity = velocity;
    }

    pub fn set_acceleration(&mut self, acceleration: f32) {
        self.acceleration = acceleration;
    }
}

impl TrackedEntity for Cursor {
    type Update = CursorUpdate;

    const KIND: &'static str = "cursor";

    fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            position: Point2::origin(),
            velocity: Vector2::zeros(),
            acceleration: 0.0,
            state: MotionState::Pressed,
        }
    }

    fn session_id(&self) -> SessionId {
        self.session_id
    }

    fn state(&self) -> MotionState {
        self.state
    }

    fn set_state(&mut self, state: MotionState) {
        self.state = state;
    }

    fn parse_set(args: &[OscArg]) -> Result<(SessionId, CursorUpdate), MessageError> {
        let set = SetArgs::new(args, &[7], "7")?;
        let id = set.int(1)?;
        let update = CursorUpdate {
            position: Point2::new(set.float(2)?, set.float(3)?),
            velocity: Vector2::new(set.float(4)?, set.float(5)?),
            acceleration: set.float(6)?,
        };
        Ok((id, update))
    }

    fn apply(&mut self, update: &CursorUpdate) {
        self.set_position(update.position);
        self.set_velocity(update.velocity);
        self.set_acceleration(update.acceleration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_args(id: i32, x: f32, y: f32) -> Vec<OscArg> {
        vec![
            OscArg::from("set"),
            OscArg::Int(id),
            OscArg::Float(x),
            OscArg::Float(y),
            OscArg::Float(0.1),
            OscArg::Float(0.2),
            OscArg::Float(0.3),
        ]
    }

    #[test]
    fn test_parse_set() {
        let (id, update) = Cursor::parse_set(&set_args(5, 0.25, 0.75)).unwrap();
        assert_eq!(id, 5);
        assert_eq!(update.position, Point2::new(0.25, 0.75));
        assert_eq!(update.velocity, Vector2::new(0.1, 0.2));
        assert_eq!(update.acceleration, 0.3);
    }

    #[test]
    fn test_parse_set_rejects_bad_tail() {
        let mut args = set_args(5, 0.25, 0.75);
        args[6] = OscArg::Int(1);
        assert!(matches!(
            Cursor::parse_set(&args),
            Err(MessageError::ArgumentType { position: 6, .. })
        ));

        args.pop();
        assert!(matches!(
            Cursor::parse_set(&args),
            Err(MessageError::ArgumentCount { got: 6, .. })
        ));
    }

    #[test]
    fn test_velocity_does_not_mark_moved() {
        let mut cursor = Cursor::new(1);
        cursor.set_state(MotionState::Stationary);
        cursor.set_velocity(Vector2::new(1.0, 1.0));
        cursor.set_acceleration(2.0);
        assert_eq!(cursor.state(), MotionState::Stationary);

        cursor.set_position(Point2::new(0.5, 0.0));
        assert_eq!(cursor.state(), MotionState::Moved);
    }
}
