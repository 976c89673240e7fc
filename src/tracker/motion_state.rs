/// Motion state of a tracked session within the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MotionState {
    /// First frame the session is alive
    #[default]
    Pressed,
    /// Alive, no spatial change seen yet this frame
    Stationary,
    /// Position or orientation changed this frame
    Moved,
    /// No longer alive; only ever seen in a frame's dead list
    Released,
}
