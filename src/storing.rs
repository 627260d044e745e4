use crate::computing::Vector;
use crate::error_handling::*;

pub const DEFAULT_CAPACITY: usize = 10;

/// Insertion-ordered registry of vectors, unique by name and bounded by `capacity`.
pub struct VectorTable {
    entries: Vec<Vector>,
    capacity: usize,
}

impl VectorTable {
    pub fn new(capacity: usize) -> Self {
        Self{entries: Vec::with_capacity(capacity), capacity}
    }

    pub fn find(&self, name: char) -> Option<&Vector> {
        self.entries.iter().find(|vector| vector.name == name)
    }

    /// Returns the entry for `name`, appending a zero vector if it is new.
    pub fn create_or_get(&mut self, name: char) -> Result<&mut Vector> {
        match self.entries.iter().position(|vector| vector.name == name) {
            Some(index) => Ok(&mut self.entries[index]),
            None => {
                if self.entries.len() >= self.capacity {
                    tracing::warn!(%name, capacity = self.capacity, "vector table is full");
                    return Err(CalcError::capacity_exceeded);
                }
                tracing::debug!(%name, "creating vector");
                self.entries.push(Vector::zero(name));
                let last = self.entries.len() - 1;
                Ok(&mut self.entries[last])
            },
        }
    }

    pub fn list(&self) -> &[Vector] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for VectorTable {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
