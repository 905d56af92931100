use BoundedQueueMini::core::mtqueue::MtQueue;
use BoundedQueueMini::core::buildcore::LoggedQueue;
use BoundedQueueMini::core::log::{append_logs, OpKind, Outcome};
use BoundedQueueMini::VERSION;
use std::time::{Duration, Instant};

#[test]
fn test_fifo_order() {
    let queue = MtQueue::with_capacity(10);
    for i in 1..=5 {
        assert!(queue.push(i));
    }
    for i in 1..=5 {
        assert_eq!(queue.pop(), Some(i));
    }
    assert!(queue.empty());
}

#[test]
fn test_default_capacity() {
    let queue = MtQueue::<i32>::new();
    assert_eq!(queue.get_max_size(), 50);
    assert!(queue.is_running());
}

#[test]
fn test_zero_capacity_clamped() {
    let queue = MtQueue::<i32>::with_capacity(0);
    assert_eq!(queue.get_max_size(), 1);

    queue.set_max_size(0);
    assert_eq!(queue.get_max_size(), 1);

    queue.set_max_size(7);
    assert_eq!(queue.get_max_size(), 7);
}

#[test]
fn test_scenario_capacity_two() {
    let queue = MtQueue::with_capacity(2);
    assert!(queue.push(1));
    assert!(queue.push(2));
    assert!(queue.full());

    assert_eq!(queue.try_pop(), Some(1));
    assert!(queue.push(3)); // slot freed, must not block
    assert_eq!(queue.pop(), Some(2));
    assert_eq!(queue.pop(), Some(3));
    assert!(queue.empty());

    queue.close();
    assert_eq!(queue.pop(), None);
}

#[test]
fn test_push_after_close_rejected() {
    let queue = MtQueue::with_capacity(4);
    queue.close();
    assert!(!queue.push(1));
    assert_eq!(queue.size(), 0);

    // Repeated close has no further effect
    queue.close();
    assert!(!queue.is_running());
}

#[test]
fn test_drain_after_close() {
    let queue = MtQueue::with_capacity(4);
    assert!(queue.push("a"));
    assert!(queue.push("b"));
    assert!(queue.push("c"));
    queue.close();

    assert!(!queue.push("d"));
    assert_eq!(queue.pop(), Some("a"));
    assert_eq!(queue.pop(), Some("b"));
    assert_eq!(queue.pop(), Some("c"));
    assert_eq!(queue.pop(), None);
    assert_eq!(queue.pop(), None);
}

#[test]
fn test_try_pop_empty_immediate() {
    let queue = MtQueue::<u8>::with_capacity(4);
    assert_eq!(queue.try_pop(), None);
    assert!(queue.try_pop_batch(4).is_empty());
}

#[test]
fn test_try_pop_batch_partial() {
    let queue = MtQueue::with_capacity(10);
    assert!(queue.push(1));
    assert!(queue.push(2));
    assert_eq!(queue.try_pop_batch(5), vec![1, 2]);
    assert!(queue.empty());
}

#[test]
fn test_batch_round_trip() {
    let queue = MtQueue::with_capacity(10);
    let items: Vec<i32> = (0..5).collect();
    assert!(queue.push_all(items.clone()));
    assert_eq!(queue.pop_batch(5), Some(items));
}

#[test]
fn test_pop_batch_zero_requests_nothing() {
    let queue = MtQueue::with_capacity(4);
    assert!(queue.push(1));
    assert_eq!(queue.pop_batch(0), None);
    assert_eq!(queue.size(), 1);
}

#[test]
fn test_push_all_after_close() {
    let queue = MtQueue::with_capacity(4);
    queue.close();
    assert!(!queue.push_all(vec![1, 2, 3]));
    assert_eq!(queue.size(), 0);
}

#[test]
fn test_front_copies_without_removing() {
    let queue = MtQueue::with_capacity(4);
    assert!(queue.push("front".to_string()));
    assert_eq!(queue.front(), Some("front".to_string()));
    assert_eq!(queue.size(), 1);
    assert_eq!(queue.pop(), Some("front".to_string()));
}

#[test]
fn test_front_on_closed_empty_queue() {
    let queue = MtQueue::<String>::with_capacity(4);
    queue.close();
    assert_eq!(queue.front(), None);
}

#[test]
fn test_pop_for_times_out_on_empty_queue() {
    let queue = MtQueue::<i32>::with_capacity(4);
    let start = Instant::now();
    assert_eq!(queue.pop_for(Duration::from_millis(50)), None);
    assert!(start.elapsed() >= Duration::from_millis(40));
    assert!(queue.is_running());
}

#[test]
fn test_pop_until_past_deadline_returns_immediately() {
    let queue = MtQueue::<i32>::with_capacity(4);
    assert_eq!(queue.pop_until(Instant::now()), None);

    // An item already buffered is still returned past the deadline
    assert!(queue.push(9));
    assert_eq!(queue.pop_until(Instant::now()), Some(9));
}

#[test]
fn test_resize_below_len_keeps_items() {
    let queue = MtQueue::with_capacity(5);
    for i in 0..5 {
        assert!(queue.push(i));
    }
    queue.set_max_size(2);
    assert_eq!(queue.get_max_size(), 2);
    assert_eq!(queue.size(), 5); // transiently over-full, nothing dropped
    assert!(queue.full());

    for i in 0..5 {
        assert_eq!(queue.pop(), Some(i));
    }
}

#[test]
fn test_transfer_from_moves_state() {
    let source = MtQueue::with_capacity(8);
    for i in 1..=3 {
        assert!(source.push(i));
    }
    let dest = MtQueue::with_capacity(2);
    dest.transfer_from(&source);

    // Source is left valid, empty and closed
    assert_eq!(source.size(), 0);
    assert!(!source.is_running());
    assert_eq!(source.pop(), None);
    assert!(!source.push(99));

    // Destination took over items, capacity and running state
    assert!(dest.is_running());
    assert_eq!(dest.get_max_size(), 8);
    assert_eq!(dest.pop(), Some(1));
    assert_eq!(dest.pop(), Some(2));
    assert_eq!(dest.pop(), Some(3));
}

#[test]
fn test_transfer_from_self_is_noop() {
    let queue = MtQueue::with_capacity(4);
    assert!(queue.push(5));
    queue.transfer_from(&queue);
    assert!(queue.is_running());
    assert_eq!(queue.pop(), Some(5));
}

#[test]
fn test_version_is_semver() {
    let parts: Vec<&str> = VERSION.split('.').collect();
    assert_eq!(parts.len(), 3);
    for part in parts {
        part.parse::<u64>().expect("version component must be numeric");
    }
}

#[test]
fn test_logged_queue_records_operations() {
    let queue = LoggedQueue::with_capacity("T0".to_string(), 2);
    assert!(queue.push("x".to_string()));
    assert!(queue.push("y".to_string()));
    assert_eq!(queue.try_pop(), Some("x".to_string()));
    queue.close();
    assert!(!queue.push("z".to_string()));

    let logs = queue.logs();
    assert_eq!(logs.len(), 5);
    assert_eq!(logs[0].op, OpKind::Push);
    assert_eq!(logs[0].outcome, Outcome::Accepted);
    assert_eq!(logs[0].depth, 1);
    assert_eq!(logs[2].op, OpKind::TryPop);
    assert_eq!(logs[2].outcome, Outcome::Delivered);
    assert_eq!(logs[3].op, OpKind::Close);
    assert_eq!(logs[3].outcome, Outcome::Applied);
    assert_eq!(logs[4].outcome, Outcome::Rejected);

    assert_eq!(queue.logs_with_outcome(&Outcome::Rejected).len(), 1);
    assert_eq!(queue.logs_for_op(&OpKind::Push).len(), 3);

    let (len, running) = queue.queue_state();
    assert_eq!(len, 1);
    assert!(!running);
}

#[test]
fn test_append_logs_writes_ndjson() {
    let queue = LoggedQueue::with_capacity("T1".to_string(), 4);
    assert!(queue.push(1));
    assert_eq!(queue.pop(), Some(1));

    let path = std::env::temp_dir().join("boundedqueuemini_queuetests.ndjson");
    let _ = std::fs::remove_file(&path);
    append_logs(&queue.logs(), path.to_str().unwrap()).expect("Failed to append logs");

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    for line in lines {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert!(value.get("local_log_id").is_some());
        assert!(value.get("outcome").is_some());
    }
    let _ = std::fs::remove_file(&path);
}
