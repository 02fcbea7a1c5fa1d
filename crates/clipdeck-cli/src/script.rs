//! Replay scripts: a JSON array of input steps.

use clipdeck_core::DeltaMode;
use clipdeck_domain::{ClipId, ContainerId};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Press on a clip.
    Down { clip: ClipId, x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    /// Pointer entered a folder drop zone; a missing or null folder is the
    /// all-items bucket.
    Enter {
        #[serde(default)]
        folder: ContainerId,
    },
    Leave,
    /// Escape pressed mid-drag.
    Cancel,
    Wheel {
        delta: f64,
        #[serde(default)]
        mode: DeltaMode,
    },
    /// Deliver `count` frames, or run until the animation settles.
    Frames { count: Option<usize> },
    Select { clip: ClipId },
    Next,
    Prev,
    Resize { extent: f64 },
    /// Search every container; an empty query returns to the container.
    Search { query: String },
    /// Toggle a clip's pin.
    Pin { clip: ClipId },
}

pub fn parse(content: &str) -> anyhow::Result<Vec<Step>> {
    serde_json::from_str(content).map_err(|e| anyhow::anyhow!("Invalid script: {}", e))
}
