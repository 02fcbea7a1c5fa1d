use crate::clip::ClipId;
use crate::folder::ContainerId;
use clipdeck_core::{DragEvent, HoverTarget, Point, WindowEvent};
use serde::Serialize;

/// Everything a list view asks of its host, in emission order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum ViewIntent {
    DragStart {
        subject: ClipId,
    },
    DragMove {
        point: Point,
    },
    Drop {
        subject: ClipId,
        target: ContainerId,
    },
    DragCancelled {
        subject: ClipId,
    },
    HoverTargetChanged {
        target: HoverTarget<ContainerId>,
    },
    VisibleRangeChanged {
        start: usize,
        end: usize,
    },
    RequestMore,
}

impl From<DragEvent<ClipId, ContainerId>> for ViewIntent {
    fn from(event: DragEvent<ClipId, ContainerId>) -> Self {
        match event {
            DragEvent::DragStart { subject } => ViewIntent::DragStart { subject },
            DragEvent::DragMove { point } => ViewIntent::DragMove { point },
            DragEvent::Drop { subject, target } => ViewIntent::Drop { subject, target },
            DragEvent::DragCancelled { subject } => ViewIntent::DragCancelled { subject },
            DragEvent::HoverTargetChanged { target } => ViewIntent::HoverTargetChanged { target },
        }
    }
}

impl From<WindowEvent> for ViewIntent {
    fn from(event: WindowEvent) -> Self {
        match event {
            WindowEvent::VisibleRangeChanged { start, end } => {
                ViewIntent::VisibleRangeChanged { start, end }
            }
            WindowEvent::RequestMore => ViewIntent::RequestMore,
        }
    }
}
