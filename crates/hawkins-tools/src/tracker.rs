use crate::registry::ToolRegistry;
use hawkins_core::{ToolInvocation, ToolObserver};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackerState {
    Empty,
    Active,
}

/// Point-in-time copy of a tracker's counters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UsageStats {
    pub total_calls: u64,
    pub counts: IndexMap<String, u64>,
    pub most_used: Option<String>,
    pub sequence: Vec<String>,
}

impl UsageStats {
    /// The call sequence joined with arrows, e.g. `a -> b -> a`.
    pub fn sequence_line(&self) -> String {
        self.sequence.join(" -> ")
    }

    pub fn count(&self, tool_name: &str) -> u64 {
        self.counts.get(tool_name).copied().unwrap_or(0)
    }
}

impl fmt::Display for UsageStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total tool calls: {}", self.total_calls)?;
        writeln!(f, "Tool usage counts:")?;
        for (name, count) in &self.counts {
            writeln!(f, "  {}: {}", name, count)?;
        }
        writeln!(
            f,
            "Most used tool: {}",
            self.most_used.as_deref().unwrap_or("none")
        )?;
        writeln!(f)?;
        writeln!(f, "Tool sequence:")?;
        write!(f, "{}", self.sequence_line())
    }
}

struct UsageState {
    counts: IndexMap<String, u64>,
    sequence: Vec<String>,
}

/// Counts tool invocations per registered tool and keeps their order.
///
/// The set of known tools is fixed at construction. Events for any other name
/// are dropped, so the counts always sum to the sequence length.
pub struct UsageTracker {
    state: Mutex<UsageState>,
}

impl UsageTracker {
    pub fn new(registry: &ToolRegistry) -> Self {
        Self::with_tool_names(registry.names())
    }

    pub fn with_tool_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let counts = names.into_iter().map(|n| (n.into(), 0)).collect();
        Self {
            state: Mutex::new(UsageState {
                counts,
                sequence: Vec::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, UsageState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records one start of `tool_name`. Returns `false` for unknown tools.
    pub fn record(&self, tool_name: &str) -> bool {
        let mut state = self.lock();
        match state.counts.get_mut(tool_name) {
            Some(count) => {
                *count += 1;
                state.sequence.push(tool_name.to_string());
                debug!(tool = tool_name, calls = state.sequence.len(), "Recorded tool start");
                true
            }
            None => {
                warn!(tool = tool_name, "Ignoring start event for unregistered tool");
                false
            }
        }
    }

    pub fn statistics(&self) -> UsageStats {
        let state = self.lock();

        let mut most_used: Option<(&str, u64)> = None;
        for (name, &count) in &state.counts {
            if count > 0 && most_used.map_or(true, |(_, best)| count > best) {
                most_used = Some((name.as_str(), count));
            }
        }

        UsageStats {
            total_calls: state.counts.values().sum(),
            counts: state.counts.clone(),
            most_used: most_used.map(|(name, _)| name.to_string()),
            sequence: state.sequence.clone(),
        }
    }

    pub fn state(&self) -> TrackerState {
        if self.lock().sequence.is_empty() {
            TrackerState::Empty
        } else {
            TrackerState::Active
        }
    }

    pub fn total_calls(&self) -> u64 {
        self.lock().sequence.len() as u64
    }

    pub fn tool_names(&self) -> Vec<String> {
        self.lock().counts.keys().cloned().collect()
    }
}

impl ToolObserver for UsageTracker {
    fn on_tool_start(&self, event: &ToolInvocation) {
        self.record(&event.tool_name);
    }
}

impl fmt::Debug for UsageTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("UsageTracker")
            .field("counts", &state.counts)
            .field("calls", &state.sequence.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    const TOOLS: [&str; 4] = [
        "consult_demogorgon",
        "check_hawkins_records",
        "cast_interdimensional_spell",
        "gather_party_wisdom",
    ];

    fn abc() -> UsageTracker {
        UsageTracker::with_tool_names(["a", "b", "c"])
    }

    #[test]
    fn test_fresh_tracker() {
        let tracker = UsageTracker::with_tool_names(TOOLS);
        let stats = tracker.statistics();

        assert_eq!(tracker.state(), TrackerState::Empty);
        assert_eq!(stats.total_calls, 0);
        assert!(stats.most_used.is_none());
        assert!(stats.sequence.is_empty());
        assert_eq!(stats.counts.len(), 4);
        assert!(stats.counts.values().all(|&c| c == 0));
        assert_eq!(tracker.tool_names(), TOOLS.to_vec());
    }

    #[test]
    fn test_no_registered_tools() {
        let tracker = UsageTracker::new(&ToolRegistry::new());
        assert!(!tracker.record("a"));

        let stats = tracker.statistics();
        assert!(stats.counts.is_empty());
        assert!(stats.most_used.is_none());
        assert_eq!(stats.total_calls, 0);
    }

    #[test]
    fn test_statistics_after_events() {
        let tracker = abc();
        for name in ["a", "b", "a", "c", "a"] {
            assert!(tracker.record(name));
        }

        let stats = tracker.statistics();
        assert_eq!(stats.total_calls, 5);
        assert_eq!(stats.count("a"), 3);
        assert_eq!(stats.count("b"), 1);
        assert_eq!(stats.count("c"), 1);
        assert_eq!(stats.most_used.as_deref(), Some("a"));
        assert_eq!(stats.sequence, vec!["a", "b", "a", "c", "a"]);
        assert_eq!(tracker.state(), TrackerState::Active);
    }

    #[test]
    fn test_unknown_tool_is_ignored() {
        let tracker = abc();
        tracker.record("a");
        let before = tracker.statistics();

        assert!(!tracker.record("z"));
        tracker.on_tool_start(&ToolInvocation::new("z", json!({"query": "portal"})));

        assert_eq!(tracker.statistics(), before);
        assert!(!tracker.statistics().counts.contains_key("z"));
    }

    #[test]
    fn test_tie_goes_to_first_registered() {
        let tracker = UsageTracker::with_tool_names(["b", "a"]);
        for name in ["a", "b", "a", "b"] {
            tracker.record(name);
        }
        assert_eq!(tracker.statistics().most_used.as_deref(), Some("b"));

        let tracker = UsageTracker::with_tool_names(["a", "b"]);
        for name in ["b", "a", "b", "a"] {
            tracker.record(name);
        }
        assert_eq!(tracker.statistics().most_used.as_deref(), Some("a"));
    }

    #[test]
    fn test_statistics_is_a_copy() {
        let tracker = abc();
        tracker.record("b");
        let snapshot = tracker.statistics();

        tracker.record("c");
        assert_eq!(snapshot.total_calls, 1);
        assert_eq!(snapshot.sequence, vec!["b"]);
        assert_eq!(tracker.statistics().total_calls, 2);
    }

    #[test]
    fn test_observer_records_invocations() {
        let tracker = abc();
        let observer: &dyn ToolObserver = &tracker;
        observer.on_tool_start(&ToolInvocation::new("c", json!("text")));
        assert_eq!(tracker.statistics().sequence, vec!["c"]);
    }

    #[test]
    fn test_concurrent_records() {
        let tracker = UsageTracker::with_tool_names(TOOLS);
        let per_thread = 250;

        std::thread::scope(|scope| {
            for (i, name) in TOOLS.iter().enumerate() {
                let tracker = &tracker;
                scope.spawn(move || {
                    for _ in 0..per_thread * (i + 1) {
                        tracker.record(name);
                    }
                });
                scope.spawn(move || {
                    for _ in 0..per_thread {
                        let stats = tracker.statistics();
                        assert_eq!(stats.total_calls, stats.sequence.len() as u64);
                    }
                });
            }
        });

        let stats = tracker.statistics();
        assert_eq!(stats.total_calls, (per_thread * (1 + 2 + 3 + 4)) as u64);
        for (i, name) in TOOLS.iter().enumerate() {
            assert_eq!(stats.count(name), (per_thread * (i + 1)) as u64);
        }
        assert_eq!(stats.most_used.as_deref(), Some("gather_party_wisdom"));
    }

    #[test]
    fn test_display_summary() {
        let tracker = abc();
        tracker.record("a");
        tracker.record("b");

        let rendered = tracker.statistics().to_string();
        assert!(rendered.starts_with("Total tool calls: 2\n"));
        assert!(rendered.contains("  a: 1\n  b: 1\n  c: 0\n"));
        assert!(rendered.contains("Most used tool: a\n"));
        assert!(rendered.ends_with("Tool sequence:\na -> b"));

        let empty = abc().statistics().to_string();
        assert!(empty.contains("Most used tool: none"));
    }

    #[test]
    fn test_stats_json() {
        let tracker = abc();
        tracker.record("c");
        let json = serde_json::to_value(tracker.statistics()).unwrap();
        assert_eq!(json["total_calls"], 1);
        assert_eq!(json["counts"], json!({"a": 0, "b": 0, "c": 1}));
        assert_eq!(json["most_used"], "c");
        assert_eq!(json["sequence"], json!(["c"]));
    }

    proptest! {
        #[test]
        fn prop_counts_sum_to_sequence(events in prop::collection::vec(0usize..4, 0..64)) {
            let tracker = UsageTracker::with_tool_names(TOOLS);
            for &i in &events {
                prop_assert!(tracker.record(TOOLS[i]));
            }

            let stats = tracker.statistics();
            prop_assert_eq!(stats.total_calls, events.len() as u64);
            prop_assert_eq!(stats.counts.values().sum::<u64>(), events.len() as u64);
            prop_assert_eq!(stats.sequence.len(), events.len());
            prop_assert_eq!(stats.most_used.is_none(), events.is_empty());
        }

        #[test]
        fn prop_unknown_names_never_count(
            events in prop::collection::vec(prop_oneof![Just("a"), Just("b"), Just("z"), Just("")], 0..32)
        ) {
            let tracker = UsageTracker::with_tool_names(["a", "b"]);
            let accepted = events.iter().filter(|&&e| tracker.record(e)).count();
            let known = events.iter().filter(|&&e| e == "a" || e == "b").count();

            prop_assert_eq!(accepted, known);
            prop_assert_eq!(tracker.statistics().total_calls, known as u64);
        }
    }
}
