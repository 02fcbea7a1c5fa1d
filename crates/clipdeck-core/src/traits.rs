use crate::frame::FrameToken;

/// Items with a stable identity that survives re-fetching and reordering.
pub trait Identified {
    type Id: Clone + PartialEq + std::fmt::Debug;

    fn id(&self) -> &Self::Id;
}

/// Source of per-frame callbacks (an animation-frame queue).
///
/// Requests are one-shot: a scheduler delivers a token once, after which
/// the requester must ask again to receive another frame.
pub trait FrameScheduler {
    fn request_frame(&self) -> FrameToken;

    fn cancel_frame(&self, token: FrameToken);
}
