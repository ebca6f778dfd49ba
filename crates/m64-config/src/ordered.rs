//! Insertion-ordered collection of uniquely named sections.
//!
//! Both stores need the same two views of their sections: file order for
//! saving, and name lookup in O(1).  The `Vec` owns the sections; the map
//! holds positions into it and is rebuilt around removals.

use std::collections::HashMap;

/// Something stored under a unique name.
pub(crate) trait Keyed {
    fn key(&self) -> &str;
}

#[derive(Debug, Clone)]
pub(crate) struct OrderedSections<S> {
    items: Vec<S>,
    index: HashMap<String, usize>,
}

impl<S> Default for OrderedSections<S> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<S: Keyed> OrderedSections<S> {
    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, S> {
        self.items.iter()
    }

    pub(crate) fn get(&self, key: &str) -> Option<&S> {
        self.index.get(key).map(|&i| &self.items[i])
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut S> {
        let i = *self.index.get(key)?;
        Some(&mut self.items[i])
    }

    /// Stores `item`.  An item with the same key is replaced in place and
    /// returned; otherwise `item` goes to the end.
    pub(crate) fn insert(&mut self, item: S) -> Option<S> {
        match self.index.get(item.key()) {
            Some(&i) => Some(std::mem::replace(&mut self.items[i], item)),
            None => {
                self.index.insert(item.key().to_owned(), self.items.len());
                self.items.push(item);
                None
            }
        }
    }

    /// Returns the item under `key`, appending `make()` first if absent.
    pub(crate) fn get_or_insert_with(&mut self, key: &str, make: impl FnOnce() -> S) -> &mut S {
        let i = match self.index.get(key) {
            Some(&i) => i,
            None => {
                self.index.insert(key.to_owned(), self.items.len());
                self.items.push(make());
                self.items.len() - 1
            }
        };
        &mut self.items[i]
    }

    pub(crate) fn remove(&mut self, key: &str) -> Option<S> {
        let i = self.index.remove(key)?;
        let removed = self.items.remove(i);
        for pos in self.index.values_mut() {
            if *pos > i {
                *pos -= 1;
            }
        }
        Some(removed)
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
        self.index.clear();
    }
}
