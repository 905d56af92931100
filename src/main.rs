use BoundedQueueMini::core::log::append_logs;
use BoundedQueueMini::core::buildcore::LoggedQueue;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() {
    // One shared bounded queue, small on purpose so producers feel backpressure
    let queue = Arc::new(LoggedQueue::<String>::with_capacity("Q0".to_string(), 8));

    let mut handles = vec![];

    // Spawn producer threads
    for p in 0..4 {
        let queue_clone = queue.clone();
        handles.push(thread::spawn(move || {
            for i in 1..=5 {
                let item = format!("P{}-Item {}", p, i);
                queue_clone.push(item);
                thread::sleep(Duration::from_millis(10));
            }
        }));
    }

    // Spawn consumer threads using bounded waits
    for _ in 0..3 {
        let queue_clone = queue.clone();
        handles.push(thread::spawn(move || {
            loop {
                match queue_clone.pop_for(Duration::from_millis(100)) {
                    Some(_) => thread::sleep(Duration::from_millis(15)),
                    None => {
                        // Timed out or drained; stop once the queue is closed
                        let (len, running) = queue_clone.queue_state();
                        if !running && len == 0 {
                            break;
                        }
                    }
                }
            }
        }));
    }

    // Widen the queue mid-run, then shut down
    thread::sleep(Duration::from_millis(50));
    queue.set_max_size(16);
    thread::sleep(Duration::from_millis(100));
    queue.close();

    // Wait for all threads to complete
    for handle in handles {
        handle.join().unwrap();
    }

    // Append the operation log as NDJSON
    append_logs(&queue.logs(), "output.ndjson").expect("Failed to append logs");
}
