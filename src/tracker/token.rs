//! Tagged token (`/tuio/2Dobj`), e.g. a fiducial marker.

use nalgebra::{Point2, Vector2};

use crate::error::MessageError;
use crate::protocol::OscArg;
use crate::tracker::entity::{SessionId, SetArgs, TrackedEntity, normalize_angle, track_motion};
use crate::tracker::motion_state::MotionState;

/// A tracked rigid object with a symbol (class) id and orientation.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    session_id: SessionId,
    class_id: i32,
    position: Point2<f32>,
    /// Radians in (-π, π]
    angle: f32,
    velocity: Vector2<f32>,
    angular_velocity: f32,
    acceleration: f32,
    angular_acceleration: f32,
    state: MotionState,
}

/// Validated payload of `/tuio/2Dobj set s i x y a X Y A m r`.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenUpdate {
    pub class_id: i32,
    pub position: Point2<f32>,
    pub angle: f32,
    pub velocity: Vector2<f32>,
    pub angular_velocity: f32,
    pub acceleration: f32,
    pub angular_acceleration: f32,
}

impl Token {
    pub fn class_id(&self) -> i32 {
        self.class_id
    }

    pub fn position(&self) -> Point2<f32> {
        self.position
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn velocity(&self) -> Vector2<f32> {
        self.velocity
    }

    pub fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    pub fn acceleration(&self) -> f32 {
        self.acceleration
    }

    pub fn angular_acceleration(&self) -> f32 {
        self.angular_acceleration
    }

    pub fn set_class_id(&mut self, class_id: i32) {
        self.class_id = class_id;
    }

    pub fn set_position(&mut self, position: Point2<f32>) {
        track_motion(&mut self.state, self.position.x, position.x);
        track_motion(&mut self.state, self.position.y, position.y);
        self.position = position;
    }

    pub fn set_angle(&mut self, angle: f32) {
        let angle = normalize_angle(angle);
        track_motion(&mut self.state, self.angle, angle);
        self.angle = angle;
    }

    pub fn set_velocity(&mut self, velocity: Vector2<f32>) {
        self.velocity = velocity;
    }

    pub fn set_angular_velocity(&mut self, angular_velocity: f32) {
        self.angular_velocity = angular_velocity;
    }

    pub fn set_acceleration(&mut self, acceleration: f32) {
        self.acceleration = acceleration;
    }

    pub fn set_angular_acceleration(&mut self, angular_acceleration: f32) {
        self.angular_acceleration = angular_acceleration;
    }
}

impl TrackedEntity for Token {
    type Update = TokenUpdate;

    const KIND: &'static str = "token";

    fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            class_id: 0,
            position: Point2::origin(),
            angle: 0.0,
            velocity: Vector2::zeros(),
            angular_velocity: 0.0,
            acceleration: 0.0,
            angular_acceleration: 0.0,
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

    fn parse_set(args: &[OscArg]) -> Result<(SessionId, TokenUpdate), MessageError> {
        let set = SetArgs::new(args, &[11], "11")?;
        let id = set.int(1)?;
        let update = TokenUpdate {
            class_id: set.int(2)?,
            position: Point2::new(set.float(3)?, set.float(4)?),
            angle: set.float(5)?,
            velocity: Vector2::new(set.float(6)?, set.float(7)?),
            angular_velocity: set.float(8)?,
            acceleration: set.float(9)?,
            angular_acceleration: set.float(10)?,
        };
        Ok((id, update))
    }

    fn apply(&mut self, update: &TokenUpdate) {
        self.set_class_id(update.class_id);
        self.set_position(update.position);
        self.set_angle(update.angle);
        self.set_velocity(update.velocity);
        self.set_angular_velocity(update.angular_velocity);
        self.set_acceleration(update.acceleration);
        self.set_angular_acceleration(update.angular_acceleration);
    }
}
