use std::sync::{Arc, Mutex};
use std::collections::VecDeque;

/// Smallest capacity a queue may be configured with
pub const MIN_CAPACITY: usize = 1;
/// Capacity used when none is given
pub const DEFAULT_CAPACITY: usize = 50;

/// core queue structure: holds buffer, capacity and running flag, no locking
pub struct Queue<T>{
    items: VecDeque<T>,
    max_size: usize,
    running: bool,
}

impl <T> Queue <T> {
    /// Create a new, empty queue with the given capacity (clamped to >= 1)
    pub(crate) fn new(max_size: usize) -> Self {
        let max_size = max_size.max(MIN_CAPACITY);
        Self{
            items: VecDeque::with_capacity(max_size),
            max_size,
            running: true,
        }
    }

    /// Enqueue an item; the caller is responsible for capacity/running checks
    pub(crate) fn enqueue(&mut self, item: T) {
        self.items.push_back(item);
        // --post operation assertion
        assert!(self.items.len() > 0, "Queue must have at least one item after enqueue");
    }

    /// Dequeue an item
    pub(crate) fn dequeue(&mut self) -> Option<T> {
        let len_before = self.items.len();
        let result = self.items.pop_front();
        // -- post op assertion: queue size decreases if dequeue succeeded
        match result {
            Some(_) => assert_eq!(self.items.len(), len_before - 1, "Queue length should decrease by 1"),
            None => assert_eq!(self.items.len(), len_before, "Queue length unchanged when empty"),
        }
        result
    }

    /// Look at the front item without removing it
    pub(crate) fn peek(&self) -> Option<&T> {
        self.items.front()
    }

    /// Get the current queue length
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Check if at or above capacity (over-full is possible after a shrink)
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.max_size
    }

    /// Current capacity limit
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Update the capacity limit (clamped to >= 1); never drops items
    pub(crate) fn set_max_size(&mut self, max_size: usize) {
        let len_before = self.items.len();
        self.max_size = max_size.max(MIN_CAPACITY);
        // -- post op assertion: resizing must not discard buffered items
        assert_eq!(self.items.len(), len_before, "Resize must not change queue length");
    }

    /// Whether the queue still accepts new items
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop accepting new items; buffered items remain for draining
    pub(crate) fn close(&mut self) {
        self.running = false;
    }

    /// Move the whole state out, leaving this queue empty and closed
    pub(crate) fn take_state(&mut self) -> (VecDeque<T>, usize, bool) {
        let items = std::mem::take(&mut self.items);
        let max_size = self.max_size;
        let running = self.running;
        self.running = false;
        (items, max_size, running)
    }

    /// Replace the whole state with one taken from another queue
    pub(crate) fn put_state(&mut self, state: (VecDeque<T>, usize, bool)) {
        let (items, max_size, running) = state;
        self.items = items;
        self.max_size = max_size;
        self.running = running;
    }

}

/// Thread-safe wrapper around the queue
pub type SafeQueue<T> = Arc<Mutex<Queue<T>>>;
