//! Builder for constructing TUIO messages, mostly for senders and tests.

use crate::integration::Profile;
use crate::protocol::{OscArg, OscMessage};
use crate::tracker::SessionId;

/// Fluent builder for an `OscMessage`.
#[derive(Debug, Clone, Default)]
pub struct MessageBuilder {
    address: String,
    args: Vec<OscArg>,
}

impl MessageBuilder {
    /// Start a message on `address`.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            args: Vec::new(),
        }
    }

    /// Start a `profile` message whose first argument is `command`.
    pub fn command(profile: Profile, command: &str) -> Self {
        Self::new(profile.address()).string(command)
    }

    pub fn int(mut self, value: i32) -> Self {
        self.args.push(OscArg::Int(value));
        self
    }

    pub fn float(mut self, value: f32) -> Self {
        self.args.push(OscArg::Float(value));
        self
    }

    pub fn floats(mut self, values: &[f32]) -> Self {
        self.args.extend(values.iter().map(|&v| OscArg::Float(v)));
        self
    }

    pub fn string(mut self, value: &str) -> Self {
        self.args.push(OscArg::from(value));
        self
    }

    pub fn blob(mut self, value: &[u8]) -> Self {
        self.args.push(OscArg::Blob(value.to_vec()));
        self
    }

    /// Build the final `OscMessage`.
    pub fn build(self) -> OscMessage {
        OscMessage::new(self.address, self.args)
    }

    /// `source` message naming the sending application.
    pub fn source(profile: Profile, name: &str) -> OscMessage {
        Self::command(profile, "source").string(name).build()
    }

    /// `alive` message for `ids`.
    pub fn alive(profile: Profile, ids: &[SessionId]) -> OscMessage {
        ids.iter()
            .fold(Self::command(profile, "alive"), |b, &id| b.int(id))
            .build()
    }

    /// `fseq` message closing frame `seq`.
    pub fn fseq(profile: Profile, seq: i32) -> OscMessage {
        Self::command(profile, "fseq").int(seq).build()
    }

    /// Cursor `set`: `s x y X Y m`.
    pub fn cursor_set(id: SessionId, x: f32, y: f32, vx: f32, vy: f32, accel: f32) -> OscMessage {
        Self::command(Profile::Cursor2D, "set")
            .int(id)
            .floats(&[x, y, vx, vy, accel])
            .build()
    }

    /// Token `set`: `s i x y a X Y A m r`, with `motion` as `[X, Y, A, m, r]`.
    pub fn token_set(
        id: SessionId,
        class_id: i32,
        x: f32,
        y: f32,
        angle: f32,
        motion: [f32; 5],
    ) -> OscMessage {
        Self::command(Profile::Object2D, "set")
            .int(id)
            .int(class_id)
            .floats(&[x, y, angle])
            .floats(&motion)
            .build()
    }

    /// Blob `set` without area: `s x y a w h X Y A m r`, with `motion` as `[X, Y, A, m, r]`.
    pub fn blob_set(
        id: SessionId,
        x: f32,
        y: f32,
        angle: f32,
        width: f32,
        height: f32,
        motion: [f32; 5],
    ) -> OscMessage {
        Self::command(Profile::Blob2D, "set")
            .int(id)
            .floats(&[x, y, angle, width, height])
            .floats(&motion)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_builder() {
        let msg = MessageBuilder::new("/tuio/2Dcur")
            .string("set")
            .int(1)
            .float(0.5)
            .build();

        assert_eq!(msg.address, "/tuio/2Dcur");
        assert_eq!(
            msg.args,
            vec![OscArg::from("set"), OscArg::Int(1), OscArg::Float(0.5)]
        );
    }

    #[test]
    fn test_shorthands() {
        let alive = MessageBuilder::alive(Profile::Blob2D, &[1, 2]);
        assert_eq!(alive.address, "/tuio/2Dblb");
        assert_eq!(alive.args.len(), 3);

        assert_eq!(MessageBuilder::cursor_set(1, 0.0, 0.0, 0.0, 0.0, 0.0).args.len(), 7);
        assert_eq!(MessageBuilder::token_set(1, 2, 0.0, 0.0, 0.0, [0.0; 5]).args.len(), 11);
        assert_eq!(
            MessageBuilder::blob_set(1, 0.0, 0.0, 0.0, 0.1, 0.1, [0.0; 5]).args.len(),
            12
        );
    }
}
