use std::collections::VecDeque;

/// Ordered FIFO sequence with tail-only insertion and oldest-first eviction.
///
/// Capacity is not enforced on push; owners call [`Queue::trim`] after
/// mutating so that the retention window is applied once per update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Queue<T> {
    items: VecDeque<T>,
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Builds a queue holding `items` in their original order.
    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            items: VecDeque::from(items),
        }
    }

    pub fn push(
        &mut self,
        item: T,
    ) {
        self.items.push_back(item);
    }

    /// Removes and returns the oldest item.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    /// Returns the oldest item without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Keeps only the `n` most recent items. No-op if the queue holds `n`
    /// items or fewer.
    pub fn trim(
        &mut self,
        n: usize,
    ) {
        let len = self.items.len();
        if n >= len {
            return;
        }
        self.items.drain(..len - n);
    }

    /// Replaces the whole content with `items`.
    pub fn replace(
        &mut self,
        items: Vec<T>,
    ) {
        self.items = VecDeque::from(items);
    }
}

impl<T: Clone> Queue<T> {
    /// Copies the content into a fresh vector, oldest first. Later mutations
    /// of the queue are not visible through the returned snapshot.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}
