#![forbid(unsafe_code)]

//! The caller-owned, authoritative item order.
//!
//! The engine never stores the sequence. Each call reads a fresh snapshot
//! through [`ItemSequence`] and reports every resolved swap through
//! [`ItemSequence::move_item`], which the caller applies before the next call.

/// Ordered items the engine reads IDs from and reorders.
pub trait ItemSequence<Id> {
    /// Number of items.
    fn len(&self) -> usize;

    /// ID of the item at `index`.
    fn id_at(&self, index: usize) -> Option<Id>;

    /// Move the element at `from` to `to`: remove, then insert at `to`.
    fn move_item(&mut self, from: usize, to: usize);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All IDs in order.
    fn ids(&self) -> Vec<Id> {
        (0..self.len()).filter_map(|i| self.id_at(i)).collect()
    }
}

/// Remove-then-insert move on a vector. Out-of-range indices are ignored.
pub fn move_element<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from == to || from >= items.len() || to >= items.len() {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

impl<Id: Clone> ItemSequence<Id> for Vec<Id> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn id_at(&self, index: usize) -> Option<Id> {
        self.get(index).cloned()
    }

    fn move_item(&mut self, from: usize, to: usize) {
        move_element(self, from, to);
    }
}

/// Adapts a vector of arbitrary items with a key function.
///
/// ```
/// use dragsort::sequence::{ItemSequence, KeyedSequence};
///
/// struct Card { id: u32, title: &'static str }
///
/// let mut cards = vec![Card { id: 7, title: "a" }, Card { id: 9, title: "b" }];
/// let mut seq = KeyedSequence::new(&mut cards, |c: &Card| c.id);
/// assert_eq!(seq.ids(), vec![7, 9]);
/// seq.move_item(0, 1);
/// assert_eq!(cards[0].title, "b");
/// ```
pub struct KeyedSequence<'a, T, F> {
    items: &'a mut Vec<T>,
    key: F,
}

impl<'a, T, F> KeyedSequence<'a, T, F> {
    pub fn new(items: &'a mut Vec<T>, key: F) -> Self {
        Self { items, key }
    }
}

impl<T, Id, F> ItemSequence<Id> for KeyedSequence<'_, T, F>
where
    F: Fn(&T) -> Id,
{
    fn len(&self) -> usize {
        self.items.len()
    }

    fn id_at(&self, index: usize) -> Option<Id> {
        self.items.get(index).map(&self.key)
    }

    fn move_item(&mut self, from: usize, to: usize) {
        move_element(self.items, from, to);
    }
}
