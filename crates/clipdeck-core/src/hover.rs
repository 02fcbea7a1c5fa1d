//! Shared "currently hovered drop zone" cell.
//!
//! Drop-zone widgets write to it as the pointer enters and leaves them; the
//! drag controller reads it at release time. Every handle is a clone of the
//! same cell, so a listener created long before a write still observes it.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// What the pointer is over during a drag.
///
/// `Zone` carries the zone identifier verbatim, so a zone whose id is itself
/// an `Option` (e.g. `Zone(None)` for an "all items" bucket) is never
/// confused with hovering nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "zone", rename_all = "snake_case")]
pub enum HoverTarget<Z> {
    #[default]
    None,
    Zone(Z),
}

impl<Z> HoverTarget<Z> {
    pub fn is_zone(&self) -> bool {
        matches!(self, HoverTarget::Zone(_))
    }

    pub fn zone(&self) -> Option<&Z> {
        match self {
            HoverTarget::Zone(zone) => Some(zone),
            HoverTarget::None => None,
        }
    }

    pub fn into_zone(self) -> Option<Z> {
        match self {
            HoverTarget::Zone(zone) => Some(zone),
            HoverTarget::None => None,
        }
    }
}

/// Cloneable handle to the shared hover cell. Last write wins.
#[derive(Debug)]
pub struct HoverTargetRegistry<Z> {
    cell: Rc<RefCell<HoverTarget<Z>>>,
}

impl<Z> Clone for HoverTargetRegistry<Z> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<Z> Default for HoverTargetRegistry<Z> {
    fn default() -> Self {
        Self {
            cell: Rc::new(RefCell::new(HoverTarget::None)),
        }
    }
}

impl<Z: Clone + PartialEq> HoverTargetRegistry<Z> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `target`, returning whether the stored value changed.
    pub fn set_hover(&self, target: HoverTarget<Z>) -> bool {
        let mut current = self.cell.borrow_mut();
        if *current == target {
            return false;
        }
        *current = target;
        true
    }

    pub fn get_hover(&self) -> HoverTarget<Z> {
        self.cell.borrow().clone()
    }

    pub fn clear_hover(&self) -> bool {
        self.set_hover(HoverTarget::None)
    }

    /// Whether two handles refer to the same cell.
    pub fn shares_cell_with(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }
}
