//! Loaded items, in display order.
//!
//! Grows a page at a time, shrinks only on explicit removal, and is only
//! reordered to bring one item to the front or a group ahead of the rest.

use crate::traits::Identified;

#[derive(Debug, Clone)]
pub struct ItemSequence<T> {
    items: Vec<T>,
}

impl<T> Default for ItemSequence<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Identified> ItemSequence<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Items in `[start, end)`, clamped to what is loaded.
    pub fn slice(&self, start: usize, end: usize) -> &[T] {
        let end = end.min(self.items.len());
        let start = start.min(end);
        &self.items[start..end]
    }

    pub fn position(&self, id: &T::Id) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.position(id).is_some()
    }

    /// Append a fetched page, returning how many items were new.
    ///
    /// Items already present are skipped: a clip captured between two page
    /// fetches shifts the backend's offsets and re-delivers a boundary item.
    pub fn append_page(&mut self, page: Vec<T>) -> usize {
        let mut appended = 0;
        for item in page {
            if self.contains(item.id()) {
                tracing::debug!("Skipping duplicate item {:?} in page", item.id());
                continue;
            }
            self.items.push(item);
            appended += 1;
        }
        appended
    }

    pub fn remove(&mut self, id: &T::Id) -> Option<T> {
        let index = self.position(id)?;
        Some(self.items.remove(index))
    }

    /// Edit an item in place. Its id must not change.
    pub fn update<F: FnOnce(&mut T)>(&mut self, id: &T::Id, f: F) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        f(&mut self.items[index]);
        true
    }

    /// Move an item to index 0, keeping everything else in order.
    pub fn move_to_front(&mut self, id: &T::Id) -> bool {
        match self.position(id) {
            Some(0) => true,
            Some(index) => {
                self.items[..=index].rotate_right(1);
                true
            }
            None => false,
        }
    }

    /// Stable reorder putting every item matching `pred` ahead of the rest.
    pub fn float_to_front<F: Fn(&T) -> bool>(&mut self, pred: F) {
        self.items.sort_by_key(|item| !pred(item));
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn ids(&self) -> impl Iterator<Item = &T::Id> {
        self.items.iter().map(|item| item.id())
    }
}
