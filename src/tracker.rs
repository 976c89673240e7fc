mod blob;
mod cursor;
mod entity;
mod frame_event;
mod motion_state;
mod session_tracker;
mod token;

pub use blob::{Blob, BlobUpdate};
pub use cursor::{Cursor, CursorUpdate};
pub use entity::{SessionId, TrackedEntity, fuzzy_eq, normalize_angle};
pub use frame_event::{FrameEvent, FrameTrigger};
pub use motion_state::MotionState;
pub use session_tracker::{SessionTracker, TrackerConfig};
pub use token::{Token, TokenUpdate};
