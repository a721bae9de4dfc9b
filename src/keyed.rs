use serde::{Deserialize, Serialize};

pub type ItemId = u32;

/// Anything that carries a stable identifier.
pub trait Keyed {
    fn id(&self) -> ItemId;
}

/// Insertion-ordered collection holding at most one entry per id, optionally
/// bounded by a capacity. Both the fantasy roster and the cart/wishlist sit on
/// top of this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyedList<T> {
    entries: Vec<T>,
    capacity: Option<usize>,
}

impl<T> Default for KeyedList<T> {
    fn default() -> Self {
        Self::unbounded()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertError<T> {
    Full(T),
    Duplicate(T),
}

impl<T> KeyedList<T> {
    pub fn unbounded() -> Self {
        Self {
            entries: Vec::new(),
            capacity: None,
        }
    }

    pub fn bounded(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity: Some(capacity),
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.capacity.is_some_and(|cap| self.entries.len() >= cap)
    }

    pub fn remaining(&self) -> Option<usize> {
        self.capacity
            .map(|cap| cap.saturating_sub(self.entries.len()))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T: Keyed> KeyedList<T> {
    pub fn contains(&self, id: ItemId) -> bool {
        self.position(id).is_some()
    }

    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id() == id)
    }

    pub fn get(&self, id: ItemId) -> Option<&T> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut T> {
        self.entries.iter_mut().find(|entry| entry.id() == id)
    }

    /// Appends `entry`, handing it back when the list is full or the id is taken.
    pub fn insert(&mut self, entry: T) -> Result<(), InsertError<T>> {
        if self.contains(entry.id()) {
            return Err(InsertError::Duplicate(entry));
        }
        if self.is_full() {
            return Err(InsertError::Full(entry));
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn remove(&mut self, id: ItemId) -> Option<T> {
        let pos = self.position(id)?;
        Some(self.entries.remove(pos))
    }

    /// Removes the entry if present, otherwise inserts it. Returns `true` when the
    /// entry is present afterwards. A full list leaves state unchanged and
    /// returns `false`.
    pub fn toggle(&mut self, entry: T) -> bool {
        if self.remove(entry.id()).is_some() {
            return false;
        }
        self.insert(entry).is_ok()
    }
}

impl<'a, T> IntoIterator for &'a KeyedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
