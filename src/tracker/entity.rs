//! Shared behaviour of the tracked entity types.

use std::f32::consts::{PI, TAU};
use std::fmt;

use crate::error::MessageError;
use crate::protocol::OscArg;
use crate::tracker::motion_state::MotionState;

/// Sender-assigned session identifier.
pub type SessionId = i32;

/// A per-profile entity the generic `SessionTracker` can manage.
///
/// Implementors describe how a `set` message is validated (`parse_set`) and
/// how the validated payload is written (`apply`). Keeping the two apart is
/// what makes a `set` atomic: nothing is written until every argument parsed.
pub trait TrackedEntity: Clone + fmt::Debug {
    /// Validated payload of one `set` message.
    type Update: fmt::Debug;

    /// Short name used in log output.
    const KIND: &'static str;

    /// Fresh entity for a session announced by `alive`, in state `Pressed`.
    fn new(session_id: SessionId) -> Self;

    fn session_id(&self) -> SessionId;

    fn state(&self) -> MotionState;

    fn set_state(&mut self, state: MotionState);

    /// Validate a full `set` argument list (`args[0]` is the `"set"` tag).
    fn parse_set(args: &[OscArg]) -> Result<(SessionId, Self::Update), MessageError>;

    fn apply(&mut self, update: &Self::Update);
}

/// Wrap an angle into (-π, π].
///
/// Values already in range come back bit-for-bit unchanged.
pub fn normalize_angle(angle: f32) -> f32 {
    if angle > -PI && angle <= PI {
        return angle;
    }
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI { wrapped - TAU } else { wrapped }
}

/// Relative float comparison, offset by 2.0 so values near zero compare sanely.
pub fn fuzzy_eq(a: f32, b: f32) -> bool {
    let (a, b) = (a + 2.0, b + 2.0);
    (a - b).abs() * 100_000.0 <= a.abs().min(b.abs())
}

/// Promote `Stationary` to `Moved` when a spatial field really changed.
pub(crate) fn track_motion(state: &mut MotionState, old: f32, new: f32) {
    if *state == MotionState::Stationary && !fuzzy_eq(old, new) {
        *state = MotionState::Moved;
    }
}

/// Typed, position-checked access to a `set` argument list.
pub(crate) struct SetArgs<'a> {
    args: &'a [OscArg],
}

impl<'a> SetArgs<'a> {
    /// Accepts the list only if its length is one of `lengths`.
    pub fn new(
        args: &'a [OscArg],
        lengths: &[usize],
        expected: &'static str,
    ) -> Result<Self, MessageError> {
        if !lengths.contains(&args.len()) {
            return Err(MessageError::ArgumentCount {
                command: "set",
                expected,
                got: args.len(),
            });
        }
        Ok(Self { args })
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn int(&self, position: usize) -> Result<i32, MessageError> {
        let arg = &self.args[position];
        arg.as_int().ok_or_else(|| type_error("set", position, "int", arg))
    }

    /// Float at `position`; NaN and infinities are rejected.
    pub fn float(&self, position: usize) -> Result<f32, MessageError> {
        let arg = &self.args[position];
        let value = arg
            .as_float()
            .ok_or_else(|| type_error("set", position, "float", arg))?;
        if !value.is_finite() {
            return Err(MessageError::NonFinite {
                command: "set",
                position,
            });
        }
        Ok(value)
    }
}

pub(crate) fn type_error(
    command: &'static str,
    position: usize,
    expected: &'static str,
    got: &OscArg,
) -> MessageError {
    MessageError::ArgumentType {
        command,
        position,
        expected,
        got: got.type_name(),
    }
}
