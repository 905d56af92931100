pub use crate::core::{
    queue::{Queue, SafeQueue},
    mtqueue::{MtQueue, SafeMtQueue},
    log::{LogEntry, Logger, OpKind, Outcome, SafeLogger},
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Unified Queue System Builder: a bounded queue plus an operation log
pub struct LoggedQueue<T> {
    name: String,
    queue: SafeMtQueue<T>,
    logger: SafeLogger<T>,
}

impl<T: Clone + Send + 'static> LoggedQueue<T> {
    /// Create a new logged queue with the default capacity
    pub fn new(name: String) -> Self {
        Self {
            queue: Arc::new(MtQueue::new()),
            logger: Arc::new(Mutex::new(Logger::new(name.clone()))),
            name,
        }
    }

    /// Create a new logged queue with the given capacity
    pub fn with_capacity(name: String, max_size: usize) -> Self {
        Self {
            queue: Arc::new(MtQueue::with_capacity(max_size)),
            logger: Arc::new(Mutex::new(Logger::new(name.clone()))),
            name,
        }
    }

    /// Push with logging; blocks while full, `false` once closed
    pub fn push(&self, item: T) -> bool {
        let pushed = self.queue.push(item.clone());
        let outcome = if pushed { Outcome::Accepted } else { Outcome::Rejected };
        self.log(OpKind::Push, Some(item), outcome);
        pushed
    }

    /// Push a whole batch with logging; partial effect on closure
    pub fn push_all(&self, items: Vec<T>) -> bool {
        let pushed = self.queue.push_all(items);
        let outcome = if pushed { Outcome::Accepted } else { Outcome::Rejected };
        self.log(OpKind::PushBatch, None, outcome);
        pushed
    }

    /// Pop with logging; blocks while empty, `None` once closed and drained
    pub fn pop(&self) -> Option<T> {
        let item = self.queue.pop();
        let outcome = if item.is_some() { Outcome::Delivered } else { Outcome::Drained };
        self.log(OpKind::Pop, item.clone(), outcome);
        item
    }

    /// Pop up to `n` items with logging
    pub fn pop_batch(&self, n: usize) -> Option<Vec<T>> {
        let batch = self.queue.pop_batch(n);
        let outcome = if batch.is_some() { Outcome::Delivered } else { Outcome::Drained };
        self.log(OpKind::PopBatch, None, outcome);
        batch
    }

    /// Non-blocking pop with logging
    pub fn try_pop(&self) -> Option<T> {
        let item = self.queue.try_pop();
        let outcome = if item.is_some() { Outcome::Delivered } else { Outcome::Drained };
        self.log(OpKind::TryPop, item.clone(), outcome);
        item
    }

    /// Bounded-wait pop with logging
    pub fn pop_for(&self, timeout: Duration) -> Option<T> {
        let item = self.queue.pop_for(timeout);
        let outcome = match &item {
            Some(_) => Outcome::Delivered,
            None if self.queue.is_running() => Outcome::TimedOut,
            None => Outcome::Drained,
        };
        self.log(OpKind::PopFor, item.clone(), outcome);
        item
    }

    /// Peek at the front item with logging
    pub fn front(&self) -> Option<T> {
        let item = self.queue.front();
        let outcome = if item.is_some() { Outcome::Delivered } else { Outcome::Drained };
        self.log(OpKind::Front, item.clone(), outcome);
        item
    }

    /// Close the queue and record it
    pub fn close(&self) {
        self.queue.close();
        self.log(OpKind::Close, None, Outcome::Applied);
    }

    /// Change the capacity limit and record it
    pub fn set_max_size(&self, max_size: usize) {
        self.queue.set_max_size(max_size);
        self.log(OpKind::Resize, None, Outcome::Applied);
    }

    /// Get current queue state
    pub fn queue_state(&self) -> (usize, bool) {
        (self.queue.size(), self.queue.is_running())
    }

    /// Expose logs
    pub fn logs(&self) -> Vec<LogEntry<T>> {
        let logger = self.logger.lock().unwrap();
        logger.entries.clone()
    }

    /// Entries that ended with the given outcome
    pub fn logs_with_outcome(&self, outcome: &Outcome) -> Vec<LogEntry<T>> {
        let logger = self.logger.lock().unwrap();
        logger.entries_with_outcome(outcome)
    }

    /// Entries for the given operation kind
    pub fn logs_for_op(&self, op: &OpKind) -> Vec<LogEntry<T>> {
        let logger = self.logger.lock().unwrap();
        logger.entries_for_op(op)
    }

    /// The underlying queue handle, for callers that do not need logging
    pub fn queue(&self) -> &SafeMtQueue<T> {
        &self.queue
    }

    /// Queue name
    pub fn name(&self) -> &str {
        &self.name
    }

    fn log(&self, op: OpKind, item: Option<T>, outcome: Outcome) {
        let depth = self.queue.size();
        let max_size = self.queue.get_max_size();
        let mut logger = self.logger.lock().unwrap();
        logger.log(op, item, outcome, depth, max_size);
    }
}
