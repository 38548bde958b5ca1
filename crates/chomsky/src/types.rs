//! Utility types.

use std::{collections::VecDeque, hash::Hash};

type BuildHasher = std::hash::BuildHasherDefault<rustc_hash::FxHasher>;

pub type Map<K, V> = indexmap::IndexMap<K, V, BuildHasher>;
pub type Set<T> = indexmap::IndexSet<T, BuildHasher>;

/// A FIFO worklist that accepts every value at most once over its lifetime.
#[derive(Debug)]
pub struct Worklist<T> {
    queue: VecDeque<T>,
    seen: Set<T>,
}
impl<T> Default for Worklist<T> {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
            seen: Set::default(),
        }
    }
}

impl<T> Worklist<T>
where
    T: Clone + Eq + Hash,
{
    /// Enqueue `value` unless it has been enqueued before.
    ///
    /// Returns `true` if the value was newly enqueued.
    pub fn push(&mut self, value: T) -> bool {
        if self.seen.insert(value.clone()) {
            self.queue.push_back(value);
            true
        } else {
            false
        }
    }

    pub fn pop(&mut self) -> Option<T> {
        self.queue.pop_front()
    }

}

impl<T> FromIterator<T> for Worklist<T>
where
    T: Clone + Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut worklist = Self::default();
        for value in iter {
            worklist.push(value);
        }
        worklist
    }
}
