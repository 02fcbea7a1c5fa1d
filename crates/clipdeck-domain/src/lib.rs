pub mod clip;
pub mod folder;
pub mod intent;
pub mod pointer;
pub mod source;
pub mod view;

pub use clip::{ClipId, ClipItem, ClipType};
pub use folder::{ContainerId, FolderId};
pub use intent::ViewIntent;
pub use pointer::PointerEvent;
pub use source::{ClipSource, InMemoryClipSource};
pub use view::ClipListView;
