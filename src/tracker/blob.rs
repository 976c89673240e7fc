//! Untagged shape (`/tuio/2Dblb`).

use nalgebra::{Point2, Vector2};

use crate::error::MessageError;
use crate::protocol::OscArg;
use crate::tracker::entity::{SessionId, SetArgs, TrackedEntity, normalize_angle, track_motion};
use crate::tracker::motion_state::MotionState;

/// An amorphous tracked region, described by its oriented bounding ellipse.
#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    session_id: SessionId,
    position: Point2<f32>,
    angle: f32,
    width: f32,
    height: f32,
    area: f32,
    velocity: Vector2<f32>,
    angular_velocity: f32,
    acceleration: f32,
    angular_acceleration: f32,
    state: MotionState,
}

/// Validated payload of a `/tuio/2Dblb set` message.
///
/// Two layouts are accepted: `s x y a w h X Y A m r` and the TUIO 1.1 layout
/// `s x y a w h f X Y A m r` which also carries the area.
#[derive(Debug, Clone, PartialEq)]
pub struct BlobUpdate {
    pub position: Point2<f32>,
    pub angle: f32,
    pub width: f32,
    pub height: f32,
    pub area: Option<f32>,
    pub velocity: Vector2<f32>,
    pub angular_velocity: f32,
    pub acceleration: f32,
    pub angular_acceleration: f32,
}

impl Blob {
    pub fn position(&self) -> Point2<f32> {
        self.position
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn area(&self) -> f32 {
        self.area
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

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn set_area(&mut self, area: f32) {
        self.area = area;
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

impl TrackedEntity for Blob {
    type Update = BlobUpdate;

    const KIND: &'static str = "blob";

    fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            position: Point2::origin(),
            angle: 0.0,
            width: 0.0,
            height: 0.0,
            area: 0.0,
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

    fn parse_set(args: &[OscArg]) -> Result<(SessionId, BlobUpdate), MessageError> {
        let set = SetArgs::new(args, &[12, 13], "12 or 13")?;
        let id = set.int(1)?;

        // Velocities start one slot later when the area is present.
        let (area, v) = if set.len() == 13 {
            (Some(set.float(7)?), 8)
        } else {
            (None, 7)
        };

        let update = BlobUpdate {
            position: Point2::new(set.float(2)?, set.float(3)?),
            angle: set.float(4)?,
            width: set.float(5)?,
            height: set.float(6)?,
            area,
            velocity: Vector2::new(set.float(v)?, set.float(v + 1)?),
            angular_velocity: set.float(v + 2)?,
            acceleration: set.float(v + 3)?,
            angular_acceleration: set.float(v + 4)?,
        };
        Ok((id, update))
    }

    fn apply(&mut self, update: &BlobUpdate) {
        self.set_position(update.position);
        self.set_angle(update.angle);
        self.set_size(update.width, update.height);
        if let Some(area) = update.area {
            self.set_area(area);
        }
        self.set_velocity(update.velocity);
        self.set_angular_velocity(update.angular_velocity);
        self.set_acceleration(update.acceleration);
        self.set_angular_acceleration(update.angular_acceleration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floats(values: &[f32]) -> Vec<OscArg> {
        let mut args = vec![OscArg::from("set"), OscArg::Int(3)];
        args.extend(values.iter().map(|&v| OscArg::Float(v)));
        args
    }

    #[test]
    fn test_parse_short_layout() {
        let args = floats(&[0.1, 0.2, 0.3, 0.4, 0.5, 1.0, 2.0, 3.0, 4.0, 5.0]);
        let (id, update) = Blob::parse_set(&args).unwrap();
        assert_eq!(id, 3);
        assert_eq!(update.width, 0.4);
        assert_eq!(update.height, 0.5);
        assert_eq!(update.area, None);
        assert_eq!(update.velocity, Vector2::new(1.0, 2.0));
        assert_eq!(update.angular_acceleration, 5.0);
    }

    #[test]
    fn test_parse_area_layout() {
        let args = floats(&[0.1, 0.2, 0.3, 0.4, 0.5, 0.02, 1.0, 2.0, 3.0, 4.0, 5.0]);
        let (_, update) = Blob::parse_set(&args).unwrap();
        assert_eq!(update.area, Some(0.02));
        assert_eq!(update.velocity, Vector2::new(1.0, 2.0));
        assert_eq!(update.angular_acceleration, 5.0);

        let mut blob = Blob::new(3);
        blob.apply(&update);
        assert_eq!(blob.area(), 0.02);
        assert_eq!(blob.width(), 0.4);
    }

    #[test]
    fn test_parse_rejects_short_list() {
        let args = floats(&[0.1, 0.2, 0.3, 0.4, 0.5]);
        assert!(matches!(
            Blob::parse_set(&args),
            Err(MessageError::ArgumentCount { got: 7, .. })
        ));
    }
}
