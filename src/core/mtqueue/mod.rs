use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};
use crate::core::queue::{Queue, DEFAULT_CAPACITY};

/// Bounded MPMC queue: one mutex guards buffer, capacity and running flag,
/// one condvar is the shared wake signal for producers and consumers.
///
/// Producers wait for "space available or closed", consumers wait for
/// "item available or closed". Every state-changing operation broadcasts and
/// every waiter re-checks its own predicate in a loop, so a shared condvar
/// is safe against spurious wakeups.
pub struct MtQueue<T> {
    state: Mutex<Queue<T>>,
    waiters: Condvar,
}

impl<T> MtQueue<T> {
    /// Create a queue with the default capacity of 50
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a queue with the given capacity; zero is clamped to 1
    pub fn with_capacity(max_size: usize) -> Self {
        Self {
            state: Mutex::new(Queue::new(max_size)),
            waiters: Condvar::new(),
        }
    }

    /// Enqueue an item, blocking while the queue is full.
    ///
    /// Returns `true` once the item is stored. Returns `false` without
    /// storing the item if the queue is closed, or closes while waiting.
    pub fn push(&self, item: T) -> bool {
        let mut queue = self.state.lock().unwrap();
        while queue.is_running() && queue.is_full() {
            queue = self.waiters.wait(queue).unwrap();
        }
        if !queue.is_running() {
            return false;
        }
        queue.enqueue(item);
        drop(queue);
        self.waiters.notify_all();
        true
    }

    /// Enqueue every item from an iterator, one at a time with `push`
    /// semantics, blocking whenever the queue is full.
    ///
    /// If the queue closes partway through, items already inserted stay in
    /// the queue (no rollback), the call returns `false` and the remaining
    /// items are never inserted. This partial effect is the contract.
    pub fn push_all<I>(&self, items: I) -> bool
    where
        I: IntoIterator<Item = T>,
    {
        for item in items {
            if !self.push(item) {
                return false;
            }
        }
        true
    }

    /// Dequeue the front item, blocking while the queue is empty and open.
    ///
    /// Returns `None` only when the queue is closed and fully drained.
    pub fn pop(&self) -> Option<T> {
        let mut queue = self.state.lock().unwrap();
        while queue.is_empty() && queue.is_running() {
            queue = self.waiters.wait(queue).unwrap();
        }
        let item = queue.dequeue();
        drop(queue);
        if item.is_some() {
            // a slot was freed, wake blocked producers
            self.waiters.notify_all();
        }
        item
    }

    /// Dequeue up to `n` items, blocking until `n` are collected or the
    /// queue closes.
    ///
    /// On closure: returns the partial batch if at least one item was
    /// collected, `None` if the queue was already drained. `n == 0`
    /// collects nothing and returns `None`.
    pub fn pop_batch(&self, n: usize) -> Option<Vec<T>> {
        let mut batch = Vec::with_capacity(n);
        let mut queue = self.state.lock().unwrap();
        while batch.len() < n {
            while queue.is_empty() && queue.is_running() {
                queue = self.waiters.wait(queue).unwrap();
            }
            match queue.dequeue() {
                Some(item) => {
                    batch.push(item);
                    // slot freed mid-batch, keep blocked producers moving
                    self.waiters.notify_all();
                }
                None => break, // closed and drained
            }
        }
        drop(queue);
        if batch.is_empty() { None } else { Some(batch) }
    }

    /// Dequeue the front item without blocking; `None` if currently empty
    pub fn try_pop(&self) -> Option<T> {
        let mut queue = self.state.lock().unwrap();
        let item = queue.dequeue();
        drop(queue);
        if item.is_some() {
            self.waiters.notify_all();
        }
        item
    }

    /// Dequeue up to `n` immediately-available items without blocking
    pub fn try_pop_batch(&self, n: usize) -> Vec<T> {
        let mut queue = self.state.lock().unwrap();
        let mut batch = Vec::with_capacity(n.min(queue.len()));
        while batch.len() < n {
            match queue.dequeue() {
                Some(item) => batch.push(item),
                None => break,
            }
        }
        drop(queue);
        if !batch.is_empty() {
            self.waiters.notify_all();
        }
        batch
    }

    /// Dequeue the front item, waiting at most `timeout`.
    ///
    /// Returns `None` on timeout or when closed and drained.
    pub fn pop_for(&self, timeout: Duration) -> Option<T> {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.pop_until(deadline),
            None => self.pop(),
        }
    }

    /// Dequeue the front item, waiting until `deadline` at the latest.
    ///
    /// Returns `None` on timeout or when closed and drained.
    pub fn pop_until(&self, deadline: Instant) -> Option<T> {
        let mut queue = self.state.lock().unwrap();
        while queue.is_empty() && queue.is_running() {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            let (guard, wait) = self.waiters.wait_timeout(queue, deadline - now).unwrap();
            queue = guard;
            if wait.timed_out() {
                break;
            }
        }
        let item = queue.dequeue();
        drop(queue);
        if item.is_some() {
            self.waiters.notify_all();
        }
        item
    }

    /// Get a copy of the front item, blocking while the queue is empty and
    /// open; `None` when closed and drained.
    ///
    /// Weak read: by the time the caller looks at the value, a concurrent
    /// `pop` may already have removed it from the buffer.
    pub fn front(&self) -> Option<T>
    where
        T: Clone,
    {
        let mut queue = self.state.lock().unwrap();
        while queue.is_empty() && queue.is_running() {
            queue = self.waiters.wait(queue).unwrap();
        }
        queue.peek().cloned()
    }

    /// Snapshot: is the buffer empty right now
    pub fn empty(&self) -> bool {
        self.state.lock().unwrap().is_empty()
    }

    /// Snapshot: is the buffer at (or above) capacity right now
    pub fn full(&self) -> bool {
        self.state.lock().unwrap().is_full()
    }

    /// Snapshot: current number of buffered items
    pub fn size(&self) -> usize {
        self.state.lock().unwrap().len()
    }

    /// Snapshot: does the queue still accept new items
    pub fn is_running(&self) -> bool {
        self.state.lock().unwrap().is_running()
    }

    /// Snapshot: current capacity limit
    pub fn get_max_size(&self) -> usize {
        self.state.lock().unwrap().max_size()
    }

    /// Update the capacity limit; zero is clamped to 1.
    ///
    /// Raising it wakes producers blocked on a full queue. Lowering it below
    /// the buffered count never drops items; the queue is transiently
    /// over-full and producers block until consumers drain it back under the
    /// new limit.
    pub fn set_max_size(&self, max_size: usize) {
        let mut queue = self.state.lock().unwrap();
        queue.set_max_size(max_size);
        drop(queue);
        self.waiters.notify_all();
    }

    /// Close the queue and wake every blocked caller. Idempotent.
    ///
    /// Pending and future `push` calls return `false`; the `pop` family
    /// keeps draining buffered items until empty, then returns `None`.
    pub fn close(&self) {
        let mut queue = self.state.lock().unwrap();
        queue.close();
        drop(queue);
        self.waiters.notify_all();
    }

    /// Take over another queue's buffered items, capacity and running state,
    /// leaving the source valid, empty and closed.
    ///
    /// Items already buffered in `self` are replaced, so this is meant for a
    /// freshly created destination. Both queues' waiters are woken. Locks
    /// are taken in address order so two concurrent transfers between the
    /// same pair of queues cannot deadlock. Transferring from itself is a
    /// no-op.
    pub fn transfer_from(&self, source: &Self) {
        if std::ptr::eq(self, source) {
            return;
        }
        let (mut dest, mut src) = if (self as *const Self) < (source as *const Self) {
            let dest = self.state.lock().unwrap();
            let src = source.state.lock().unwrap();
            (dest, src)
        } else {
            let src = source.state.lock().unwrap();
            let dest = self.state.lock().unwrap();
            (dest, src)
        };
        let state = src.take_state();
        dest.put_state(state);
        drop(src);
        drop(dest);
        self.waiters.notify_all();
        source.waiters.notify_all();
    }
}

impl<T> Default for MtQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for MtQueue<T> {
    /// Force-close on teardown so no thread can wait on reclaimed state
    fn drop(&mut self) {
        self.close();
    }
}

/// Thread-safe shared handle
pub type SafeMtQueue<T> = Arc<MtQueue<T>>;
