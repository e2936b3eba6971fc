use std::time::Instant;

/// Status of a full-screen ad slot.
///
/// The slot rests in one of four states; disposal of the native ad object is
/// an action taken on the `Showing → Empty` edge, not a resting state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    /// No ad instance; initial state and terminal state of every failure.
    Empty,

    /// A load request is in flight with the SDK.
    Loading {
        /// When the load was requested.
        requested_at: Instant,
    },

    /// A loaded instance is held and may be shown.
    Ready,

    /// A show command was issued; readiness is already consumed, the display
    /// outcome is not yet known.
    Showing,
}

impl SlotStatus {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            SlotStatus::Empty => "empty",
            SlotStatus::Loading { .. } => "loading",
            SlotStatus::Ready => "ready",
            SlotStatus::Showing => "showing",
        }
    }
}
