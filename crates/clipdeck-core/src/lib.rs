//! UI-agnostic interaction engine for a horizontally scrolling clip list.
//!
//! Covers click-versus-drag detection with a shared hover target, windowed
//! rendering with incremental pagination, and smoothed wheel scrolling that
//! also serves selection-driven reveals.

pub mod animator;
pub mod config;
pub mod drag;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod hover;
pub mod hub;
pub mod result;
pub mod scroll_planner;
pub mod selection;
pub mod sequence;
pub mod traits;
pub mod virtual_window;

pub use animator::{DeltaMode, FrameOutcome, ScrollAnimator, ScrollState};
pub use config::{DragConfig, EngineConfig, ScrollConfig, SelectionConfig, WindowConfig};
pub use drag::{DragEvent, DragSession, DragStatus, PointerDragController};
pub use error::EngineError;
pub use frame::{FrameToken, ManualFrameClock};
pub use geometry::Point;
pub use hover::{HoverTarget, HoverTargetRegistry};
pub use hub::{EventHub, Subscription};
pub use result::EngineResult;
pub use scroll_planner::{SelectionScrollPlanner, Viewport};
pub use selection::SelectionState;
pub use sequence::ItemSequence;
pub use traits::{FrameScheduler, Identified};
pub use virtual_window::{VirtualizedWindow, VisibleWindow, WindowEvent};
