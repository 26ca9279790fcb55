use std::collections::HashMap;

/// Id-keyed row map that remembers insertion order.
///
/// Lookups go through the map; iteration follows insertion order so list
/// endpoints are deterministic.
#[derive(Debug, Clone)]
pub struct Table<T> {
    rows: HashMap<String, T>,
    order: Vec<String>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self { rows: HashMap::new(), order: Vec::new() }
    }
}

impl<T> Table<T> {
    pub fn len(&self) -> usize { self.rows.len() }

    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    pub fn contains(&self, id: &str) -> bool { self.rows.contains_key(id) }

    pub fn get(&self, id: &str) -> Option<&T> { self.rows.get(id) }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> { self.rows.get_mut(id) }

    /// Insert or replace; a replaced row keeps its original position.
    pub fn insert(&mut self, id: String, row: T) {
        if self.rows.insert(id.clone(), row).is_none() {
            self.order.push(id);
        }
    }

    /// Remove a row; returns it if it existed.
    pub fn remove(&mut self, id: &str) -> Option<T> {
        let row = self.rows.remove(id)?;
        self.order.retain(|k| k != id);
        Some(row)
    }

    /// Remove every row matching `pred`; returns how many were removed.
    pub fn remove_where<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let before = self.rows.len();
        self.rows.retain(|_, row| !pred(row));
        let rows = &self.rows;
        self.order.retain(|k| rows.contains_key(k));
        before - self.rows.len()
    }

    /// Rows in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.order.iter().filter_map(|k| self.rows.get(k))
    }
}

impl<T: Clone> Table<T> {
    pub fn list(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}
