use std::fmt;

use crate::constants::ARRAY_INITIAL_CAPACITY;
use crate::value::Value;
use crate::Result;

/// Growable sequence of owned values.
///
/// Capacity starts at 8 and grows by half of itself whenever a push finds
/// the array full. Every index below `len()` holds a value; gaps are filled
/// with explicit nulls by [`ElementArray::reserve`].
pub struct ElementArray {
    items: Vec<Value>,
}

impl Default for ElementArray {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementArray {
    pub fn new() -> Self {
        Self {
            items: Vec::with_capacity(ARRAY_INITIAL_CAPACITY),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Append `value`. On allocation failure the array is unchanged and
    /// `value` is released.
    pub fn push(&mut self, value: Value) -> Result<()> {
        if self.items.len() == self.items.capacity() {
            let capacity = self.items.capacity();
            let additional = if capacity == 0 {
                ARRAY_INITIAL_CAPACITY
            } else {
                (capacity >> 1).max(1)
            };
            self.items.try_reserve_exact(additional)?;
        }
        self.items.push(value);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    /// Replace the element at `index`, releasing the previous one.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`. Use [`ElementArray::reserve`] first to
    /// make room for sparse writes.
    pub fn set(&mut self, index: usize, value: Value) {
        assert!(
            index < self.items.len(),
            "index {index} out of range for array of length {}",
            self.items.len()
        );
        self.items[index] = value;
    }

    /// Pad with values from `fill` until the array holds at least `len`
    /// elements. Never shrinks.
    pub fn reserve(&mut self, len: usize, mut fill: impl FnMut() -> Value) -> Result<()> {
        while self.items.len() < len {
            self.push(fill())?;
        }
        Ok(())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }
}

impl<'a> IntoIterator for &'a ElementArray {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Debug for ElementArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}
