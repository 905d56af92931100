use std::fmt::{Display, Formatter};
use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicU64, Ordering};
use serde::{Serialize, Deserialize};
use std::io::Write;

static LOG_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Operation recorded in the log
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum OpKind {
    Push,
    PushBatch,
    Pop,
    PopBatch,
    TryPop,
    PopFor,
    Front,
    Close,
    Resize,
}

/// How a queue operation ended
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    Accepted,   // item(s) stored
    Rejected,   // queue closed, nothing stored
    Delivered,  // item(s) handed to the caller
    Drained,    // nothing available to deliver
    TimedOut,   // bounded wait expired
    Applied,    // control operation took effect
}

/// Log entry recording a queue operation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogEntry<T> {
    pub local_log_id: u64,
    pub queue_name: String,
    pub op: OpKind,
    pub item: Option<T>,      // The item pushed/popped, when there is one
    pub outcome: Outcome,     // How the operation ended
    pub depth: usize,         // Buffered count right after the operation
    pub max_size: usize,      // Capacity limit at the time
}

impl <T: std::fmt::Debug> Display for LogEntry<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogEntry {{ local_log_id: {}, queue_name: {}, op: {:?}, item: {:?}, outcome: {:?}, depth: {}, max_size: {} }}",
            self.local_log_id,
            self.queue_name,
            self.op,
            self.item,
            self.outcome,
            self.depth,
            self.max_size,
        )
    }
}


#[derive(Clone, Debug)]
/// Logger storing all entries for one queue
pub struct Logger<T> {
    pub(crate) entries: Vec<LogEntry<T>>,
    queue_name: String,
}

impl<T: Clone> Logger<T> {
    pub fn new(queue_name: String) -> Self {
        Self { entries: Vec::new(), queue_name }
    }

    /// Log an operation
    pub fn log(&mut self, op: OpKind, item: Option<T>, outcome: Outcome, depth: usize, max_size: usize) {
        // --- Negative-space assertion: outcome must match operation ---
        match op {
            OpKind::Push | OpKind::PushBatch => assert!(
                matches!(outcome, Outcome::Accepted | Outcome::Rejected),
                "Push must end Accepted or Rejected"
            ),
            OpKind::Pop | OpKind::PopBatch | OpKind::TryPop | OpKind::PopFor | OpKind::Front => assert!(
                matches!(outcome, Outcome::Delivered | Outcome::Drained | Outcome::TimedOut),
                "Pop must end Delivered, Drained or TimedOut"
            ),
            OpKind::Close | OpKind::Resize => assert!(
                matches!(outcome, Outcome::Applied),
                "Control operations must end Applied"
            ),
        }

        // --- Negative-space assertion: depth never exceeds a sane bound ---
        assert!(
            max_size >= 1,
            "Capacity must stay at or above the minimum of 1"
        );

        let local_log_id = LOG_ID_COUNTER.fetch_add(1, Ordering::SeqCst);

        // --- Log entry insertion ---
        let before = self.entries.len();
        self.entries.push(LogEntry {
            local_log_id,
            queue_name: self.queue_name.clone(),
            op,
            item,
            outcome,
            depth,
            max_size,
        });

        // --- Negative-space assertion: log length increased exactly by 1 ---
        assert_eq!(
            self.entries.len(),
            before + 1,
            "Logger must increase by exactly one entry"
        );
    }

    /// All entries that ended with the given outcome
    pub fn entries_with_outcome(&self, outcome: &Outcome) -> Vec<LogEntry<T>> {
        self.entries
            .iter()
            .filter(|entry| entry.outcome == *outcome)
            .cloned()
            .collect()
    }

    /// All entries for the given operation kind
    pub fn entries_for_op(&self, op: &OpKind) -> Vec<LogEntry<T>> {
        self.entries
            .iter()
            .filter(|entry| entry.op == *op)
            .cloned()
            .collect()
    }
}


pub fn append_logs<T: Serialize>(log: &Vec<LogEntry<T>>, path: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)?;

    for entry in log {
        let json = serde_json::to_string(entry).expect("Serialization failed");
        writeln!(file, "{}", json)?; // one JSON object per line
    }
    Ok(())
}
/// Thread-safe wrapper
pub type SafeLogger<T> = Arc<Mutex<Logger<T>>>;
