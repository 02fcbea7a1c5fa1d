//! Identity-keyed single selection.
//!
//! Selection follows an item's id rather than its index, so it survives
//! page appends and move-to-front. The index is resolved against the
//! sequence whenever it is needed.

use crate::sequence::ItemSequence;
use crate::traits::Identified;

#[derive(Clone, Debug)]
pub struct SelectionState<K> {
    selected: Option<K>,
}

impl<K> Default for SelectionState<K> {
    fn default() -> Self {
        Self { selected: None }
    }
}

impl<K: Clone + PartialEq> SelectionState<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<&K> {
        self.selected.as_ref()
    }

    pub fn set(&mut self, id: Option<K>) {
        self.selected = id;
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn is_selected(&self, id: &K) -> bool {
        self.selected.as_ref() == Some(id)
    }

    pub fn has_selection(&self) -> bool {
        self.selected.is_some()
    }

    pub fn resolve_index<T>(&self, items: &ItemSequence<T>) -> Option<usize>
    where
        T: Identified<Id = K>,
        K: std::fmt::Debug,
    {
        self.selected.as_ref().and_then(|id| items.position(id))
    }

    /// Select the item after the current one (rightwards). With nothing
    /// selected, selects the first item. Stays put at the end.
    pub fn select_next<T>(&mut self, items: &ItemSequence<T>) -> Option<usize>
    where
        T: Identified<Id = K>,
        K: std::fmt::Debug,
    {
        if items.is_empty() {
            return None;
        }
        let index = match self.resolve_index(items) {
            Some(idx) => (idx + 1).min(items.len() - 1),
            None => 0,
        };
        self.select_index(items, index)
    }

    /// Select the item before the current one (leftwards). With nothing
    /// selected, selects the first item. Stays put at the start.
    pub fn select_prev<T>(&mut self, items: &ItemSequence<T>) -> Option<usize>
    where
        T: Identified<Id = K>,
        K: std::fmt::Debug,
    {
        if items.is_empty() {
            return None;
        }
        let index = match self.resolve_index(items) {
            Some(idx) => idx.saturating_sub(1),
            None => 0,
        };
        self.select_index(items, index)
    }

    /// Fix up the selection after `removed_at` was taken out of the
    /// sequence: the item that slid into its slot is selected, or the new
    /// last item, or nothing if the sequence is now empty.
    pub fn reconcile_removal<T>(&mut self, items: &ItemSequence<T>, removed_at: usize)
    where
        T: Identified<Id = K>,
        K: std::fmt::Debug,
    {
        if self.resolve_index(items).is_some() {
            return;
        }
        if items.is_empty() {
            self.selected = None;
            return;
        }
        let index = removed_at.min(items.len() - 1);
        self.select_index(items, index);
    }

    fn select_index<T>(&mut self, items: &ItemSequence<T>, index: usize) -> Option<usize>
    where
        T: Identified<Id = K>,
        K: std::fmt::Debug,
    {
        let item = items.get(index)?;
        self.selected = Some(item.id().clone());
        Some(index)
    }
}
