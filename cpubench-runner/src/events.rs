//! Per-test completion events and the broadcast bus.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Mutex;

use cpubench_core::{BenchmarkResult, Category, SuiteEntry};
use serde::Serialize;

/// Event lifecycle phase. Only completion is broadcast today; the enum
/// keeps the wire shape open for start/progress phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventPhase {
    /// The suite entry finished (with a real or fallback result).
    Completed,
}

/// One completed suite entry, as seen by progress displays.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkEvent {
    /// Display name of the benchmark.
    pub test_name: String,
    /// Single or multi-core, derived from the entry's category.
    pub mode: Category,
    /// Always `Completed`.
    pub phase: EventPhase,
    /// Wall-clock duration, rounded to whole milliseconds.
    pub duration_ms: u64,
    /// Raw throughput of the result; 0 for fallback results.
    pub score: f64,
}

impl BenchmarkEvent {
    /// Completion event for `entry` with the result it produced.
    pub fn completed(entry: &SuiteEntry, result: &BenchmarkResult) -> BenchmarkEvent {
        BenchmarkEvent {
            test_name: entry.name.to_string(),
            mode: entry.category,
            phase: EventPhase::Completed,
            duration_ms: result.execution_time_ms.round() as u64,
            score: result.ops_per_second,
        }
    }
}

/// Single-producer, multi-subscriber event fan-out.
///
/// Each subscriber owns an unbounded channel, so publishing never blocks
/// on a slow consumer. Subscribers that join mid-run only see events
/// published after they subscribed; nothing is replayed. Disconnected
/// subscribers are pruned on the next publish.
#[derive(Debug, Default)]
pub struct EventBus {
    senders: Mutex<Vec<Sender<BenchmarkEvent>>>,
}

impl EventBus {
    /// Empty bus with no subscribers.
    pub fn new() -> EventBus {
        EventBus::default()
    }

    /// Register a new subscriber and return its receiving end.
    pub fn subscribe(&self) -> Receiver<BenchmarkEvent> {
        let (tx, rx) = mpsc::channel();
        self.lock_senders().push(tx);
        rx
    }

    /// Deliver `event` to every live subscriber, dropping dead ones.
    pub fn publish(&self, event: &BenchmarkEvent) {
        self.lock_senders()
            .retain(|sender| sender.send(event.clone()).is_ok());
    }

    /// Number of currently registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.lock_senders().len()
    }

    fn lock_senders(&self) -> std::sync::MutexGuard<'_, Vec<Sender<BenchmarkEvent>>> {
        // A poisoned lock only means a panic mid-publish; the sender list
        // is still structurally sound, so keep going with it.
        self.senders
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(name: &str) -> BenchmarkEvent {
        BenchmarkEvent {
            test_name: name.to_string(),
            mode: Category::Single,
            phase: EventPhase::Completed,
            duration_ms: 5,
            score: 123.0,
        }
    }

    #[test]
    fn every_subscriber_sees_every_event() {
        let bus = EventBus::new();
        let a = bus.subscribe();
        let b = bus.subscribe();
        bus.publish(&event("one"));
        bus.publish(&event("two"));
        for rx in [a, b] {
            let names: Vec<String> = rx.try_iter().map(|e| e.test_name).collect();
            assert_eq!(names, vec!["one", "two"]);
        }
    }

    #[test]
    fn late_subscribers_miss_earlier_events() {
        let bus = EventBus::new();
        bus.publish(&event("early"));
        let rx = bus.subscribe();
        bus.publish(&event("late"));
        let names: Vec<String> = rx.try_iter().map(|e| e.test_name).collect();
        assert_eq!(names, vec!["late"]);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let bus = EventBus::new();
        let rx = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);
        drop(rx);
        bus.publish(&event("after-drop"));
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn event_fields_serialize_in_camel_case() {
        let value = serde_json::to_value(event("x")).unwrap();
        assert!(value.get("testName").is_some());
        assert!(value.get("durationMs").is_some());
        assert_eq!(value["mode"], "SINGLE");
        assert_eq!(value["phase"], "COMPLETED");
    }
}
