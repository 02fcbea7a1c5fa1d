//! Pointer-driven drag lifecycle.
//!
//! Turns raw pointer down/move/up into a drag without native drag-and-drop.
//! A press only becomes a drag once the pointer travels past a threshold;
//! anything shorter is an ordinary click.
//!
//! ```text
//! Idle --begin--> Pending --move > threshold--> Active --release--> Idle
//!                    \--release-----------------------------------/
//! ```

use crate::config::DragConfig;
use crate::geometry::Point;
use crate::hover::{HoverTarget, HoverTargetRegistry};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DragStatus {
    Idle,
    Pending,
    Active,
}

/// State of the single in-flight drag, if any.
///
/// Coordinates and subject only exist outside `Idle`, so they cannot be
/// read from a session that never started.
#[derive(Debug, Clone, PartialEq)]
pub enum DragSession<S> {
    Idle,
    Pending {
        subject: S,
        origin: Point,
        current: Point,
    },
    Active {
        subject: S,
        origin: Point,
        current: Point,
    },
}

impl<S> DragSession<S> {
    pub fn status(&self) -> DragStatus {
        match self {
            DragSession::Idle => DragStatus::Idle,
            DragSession::Pending { .. } => DragStatus::Pending,
            DragSession::Active { .. } => DragStatus::Active,
        }
    }

    pub fn subject(&self) -> Option<&S> {
        match self {
            DragSession::Idle => None,
            DragSession::Pending { subject, .. } | DragSession::Active { subject, .. } => {
                Some(subject)
            }
        }
    }

    pub fn origin(&self) -> Option<Point> {
        match self {
            DragSession::Idle => None,
            DragSession::Pending { origin, .. } | DragSession::Active { origin, .. } => {
                Some(*origin)
            }
        }
    }

    pub fn current(&self) -> Option<Point> {
        match self {
            DragSession::Idle => None,
            DragSession::Pending { current, .. } | DragSession::Active { current, .. } => {
                Some(*current)
            }
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, DragSession::Idle)
    }

    pub fn is_active(&self) -> bool {
        matches!(self, DragSession::Active { .. })
    }
}

/// Intents produced by the controller, in emission order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DragEvent<S, Z> {
    DragStart { subject: S },
    DragMove { point: Point },
    Drop { subject: S, target: Z },
    DragCancelled { subject: S },
    HoverTargetChanged { target: HoverTarget<Z> },
}

/// Owns the drag session for one list view.
#[derive(Debug)]
pub struct PointerDragController<S, Z> {
    session: DragSession<S>,
    hover: HoverTargetRegistry<Z>,
    threshold: f64,
}

impl<S, Z> PointerDragController<S, Z>
where
    S: Clone + std::fmt::Debug,
    Z: Clone + PartialEq + std::fmt::Debug,
{
    pub fn new(config: &DragConfig) -> Self {
        Self::with_registry(config, HoverTargetRegistry::new())
    }

    /// Build a controller reading hover state from an existing registry.
    pub fn with_registry(config: &DragConfig, hover: HoverTargetRegistry<Z>) -> Self {
        Self {
            session: DragSession::Idle,
            hover,
            threshold: config.threshold_px,
        }
    }

    pub fn session(&self) -> &DragSession<S> {
        &self.session
    }

    pub fn status(&self) -> DragStatus {
        self.session.status()
    }

    pub fn hover_registry(&self) -> &HoverTargetRegistry<Z> {
        &self.hover
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Start tracking a press on `subject`. Returns false if a session is
    /// already in flight; the existing session is left untouched.
    pub fn begin(&mut self, subject: S, point: Point) -> bool {
        if !self.session.is_idle() {
            tracing::warn!(
                "Ignoring drag begin on {:?}: {:?} already in flight",
                subject,
                self.session.subject()
            );
            return false;
        }
        // Nothing may have registered while idle; drop any stray write.
        self.hover.clear_hover();
        tracing::debug!("Drag pending on {:?} at ({}, {})", subject, point.x, point.y);
        self.session = DragSession::Pending {
            subject,
            origin: point,
            current: point,
        };
        true
    }

    pub fn on_move(&mut self, point: Point) -> Vec<DragEvent<S, Z>> {
        match &mut self.session {
            DragSession::Idle => Vec::new(),
            DragSession::Pending {
                subject,
                origin,
                current,
            } => {
                *current = point;
                let distance = origin.distance_to(point);
                if distance <= self.threshold {
                    return Vec::new();
                }
                let subject = subject.clone();
                let origin = *origin;
                tracing::debug!("Drag activated on {:?} after {:.1}px", subject, distance);
                self.session = DragSession::Active {
                    subject: subject.clone(),
                    origin,
                    current: point,
                };
                vec![
                    DragEvent::DragStart { subject },
                    DragEvent::DragMove { point },
                ]
            }
            DragSession::Active { current, .. } => {
                *current = point;
                vec![DragEvent::DragMove { point }]
            }
        }
    }

    /// Pointer entered a drop zone. Ignored unless a drag is active, since
    /// the pointer crosses drop zones constantly during normal use.
    pub fn on_target_enter(&mut self, zone: Z) -> Vec<DragEvent<S, Z>> {
        if !self.session.is_active() {
            return Vec::new();
        }
        self.set_hover(HoverTarget::Zone(zone))
    }

    pub fn on_target_leave(&mut self) -> Vec<DragEvent<S, Z>> {
        if !self.session.is_active() {
            return Vec::new();
        }
        self.set_hover(HoverTarget::None)
    }

    pub fn on_release(&mut self, point: Point) -> Vec<DragEvent<S, Z>> {
        match std::mem::replace(&mut self.session, DragSession::Idle) {
            DragSession::Idle => Vec::new(),
            DragSession::Pending { subject, .. } => {
                tracing::debug!("Released {:?} before threshold; treating as click", subject);
                Vec::new()
            }
            DragSession::Active { subject, .. } => {
                let mut events = Vec::with_capacity(2);
                match self.hover.get_hover() {
                    HoverTarget::Zone(target) => {
                        tracing::debug!(
                            "Dropped {:?} on {:?} at ({}, {})",
                            subject,
                            target,
                            point.x,
                            point.y
                        );
                        events.push(DragEvent::Drop { subject, target });
                    }
                    HoverTarget::None => {
                        tracing::debug!("Released {:?} outside any drop zone", subject);
                        events.push(DragEvent::DragCancelled { subject });
                    }
                }
                events.extend(self.set_hover(HoverTarget::None));
                events
            }
        }
    }

    /// Abort whatever is in flight without committing a move.
    pub fn cancel(&mut self) -> Vec<DragEvent<S, Z>> {
        match std::mem::replace(&mut self.session, DragSession::Idle) {
            DragSession::Active { subject, .. } => {
                tracing::debug!("Drag on {:?} cancelled", subject);
                let mut events = vec![DragEvent::DragCancelled { subject }];
                events.extend(self.set_hover(HoverTarget::None));
                events
            }
            DragSession::Pending { .. } | DragSession::Idle => Vec::new(),
        }
    }

    fn set_hover(&mut self, target: HoverTarget<Z>) -> Vec<DragEvent<S, Z>> {
        if self.hover.set_hover(target.clone()) {
            vec![DragEvent::HoverTargetChanged { target }]
        } else {
            Vec::new()
        }
    }
}
