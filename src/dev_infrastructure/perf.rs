//! Operation counters for the structures in this crate
//!
//! Every tree and hash map reports the work it does (rotations, key
//! comparisons, fixup steps, descent depth, recolors) into a tracker owned by
//! the current thread. A measurement brackets a phase with
//! [`start_operation`] and [`end_operation`]; the latter returns an
//! [`OperationStats`] snapshot including wall-clock time.
//!
//! The tracker is thread-local, so structures used on different threads never
//! mix their counts. The benchmark harness runs on one thread and therefore
//! sees a single process-wide view.
//!
//! ```rust
//! use arbora::dev_infrastructure::perf;
//! use arbora::RedBlackTree;
//!
//! perf::start_operation("rb insert");
//! let mut tree = RedBlackTree::new();
//! for k in 1..=7 {
//!     tree.insert(k).unwrap();
//! }
//! let stats = perf::end_operation();
//! assert!(stats.rotations > 0);
//! assert!(stats.insertion_fixups > 0);
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::debug::OperationTimer;

/// The counters the tracker maintains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Counter {
    /// Single rotations performed
    Rotations,
    /// Key comparisons and probe comparisons
    KeyComparisons,
    /// Insertion rebalancing steps dispatched
    InsertionFixups,
    /// Deletion rebalancing steps dispatched
    DeletionFixups,
    /// Levels descended or probe positions advanced
    SearchDepth,
    /// Nodes or slots examined
    NodesVisited,
    /// Node color writes that changed a color
    ColorChanges,
}

impl Counter {
    /// All counters in report order
    pub const ALL: [Counter; 7] = [
        Counter::Rotations,
        Counter::KeyComparisons,
        Counter::InsertionFixups,
        Counter::DeletionFixups,
        Counter::SearchDepth,
        Counter::NodesVisited,
        Counter::ColorChanges,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    /// Human-readable label used in reports
    pub fn label(self) -> &'static str {
        match self {
            Counter::Rotations => "Rotations",
            Counter::KeyComparisons => "Key Comparisons",
            Counter::InsertionFixups => "Insertion Fixups",
            Counter::DeletionFixups => "Deletion Fixups",
            Counter::SearchDepth => "Search Depth",
            Counter::NodesVisited => "Nodes Visited",
            Counter::ColorChanges => "Color Changes",
        }
    }
}

/// Snapshot of one measured operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationStats {
    /// Label passed to [`start_operation`]
    pub operation_name: String,
    /// Wall-clock time of the operation in milliseconds
    pub execution_time_ms: f64,
    /// Single rotations
    pub rotations: u64,
    /// Key comparisons
    pub key_comparisons: u64,
    /// Insertion fixup steps
    pub insertion_fixups: u64,
    /// Deletion fixup steps
    pub deletion_fixups: u64,
    /// Accumulated descent depth
    pub search_depth: u64,
    /// Nodes or slots examined
    pub nodes_visited: u64,
    /// Color changes
    pub color_changes: u64,
}

impl OperationStats {
    /// Value of a single counter
    pub fn get(&self, counter: Counter) -> u64 {
        match counter {
            Counter::Rotations => self.rotations,
            Counter::KeyComparisons => self.key_comparisons,
            Counter::InsertionFixups => self.insertion_fixups,
            Counter::DeletionFixups => self.deletion_fixups,
            Counter::SearchDepth => self.search_depth,
            Counter::NodesVisited => self.nodes_visited,
            Counter::ColorChanges => self.color_changes,
        }
    }

    /// Print the report block to stdout
    pub fn print(&self) {
        println!("{}", self);
    }
}

impl fmt::Display for OperationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Performance Stats for {} ===", self.operation_name)?;
        writeln!(f, "Execution Time: {} ms", self.execution_time_ms)?;
        for counter in Counter::ALL {
            writeln!(f, "{}: {}", counter.label(), self.get(counter))?;
        }
        write!(f, "=====================================")
    }
}

/// Counter storage for one thread
#[derive(Debug, Default)]
struct PerformanceTracker {
    counters: [Cell<u64>; 7],
    operation_name: RefCell<String>,
    timer: RefCell<Option<OperationTimer>>,
    last_elapsed_ms: Cell<f64>,
}

impl PerformanceTracker {
    fn reset(&self) {
        for counter in &self.counters {
            counter.set(0);
        }
        self.last_elapsed_ms.set(0.0);
    }

    fn snapshot(&self) -> OperationStats {
        let value = |c: Counter| self.counters[c.index()].get();
        OperationStats {
            operation_name: self.operation_name.borrow().clone(),
            execution_time_ms: self.last_elapsed_ms.get(),
            rotations: value(Counter::Rotations),
            key_comparisons: value(Counter::KeyComparisons),
            insertion_fixups: value(Counter::InsertionFixups),
            deletion_fixups: value(Counter::DeletionFixups),
            search_depth: value(Counter::SearchDepth),
            nodes_visited: value(Counter::NodesVisited),
            color_changes: value(Counter::ColorChanges),
        }
    }
}

thread_local! {
    static TRACKER: PerformanceTracker = PerformanceTracker::default();
}

/// Reset every counter and start timing a new operation
pub fn start_operation(name: &str) {
    TRACKER.with(|t| {
        t.reset();
        *t.operation_name.borrow_mut() = name.to_string();
        *t.timer.borrow_mut() = Some(OperationTimer::named(name));
    });
}

/// Stop the timer and return the stats of the current operation
///
/// Calling this without a matching [`start_operation`] returns the current
/// counters with a zero execution time.
pub fn end_operation() -> OperationStats {
    TRACKER.with(|t| {
        if let Some(timer) = t.timer.borrow_mut().take() {
            t.last_elapsed_ms.set(timer.elapsed_millis_f64());
        }
        t.snapshot()
    })
}

/// Current counter values without stopping the timer
pub fn snapshot() -> OperationStats {
    TRACKER.with(|t| t.snapshot())
}

/// Zero every counter and forget the operation name
pub fn reset() {
    TRACKER.with(|t| {
        t.reset();
        t.operation_name.borrow_mut().clear();
        *t.timer.borrow_mut() = None;
    });
}

/// Add `amount` to a counter
#[inline]
pub fn add(counter: Counter, amount: u64) {
    TRACKER.with(|t| {
        let cell = &t.counters[counter.index()];
        cell.set(cell.get().saturating_add(amount));
    });
}

/// Add one to a counter
#[inline]
pub fn record(counter: Counter) {
    add(counter, 1);
}

/// Record one rotation
#[inline]
pub fn record_rotation() {
    record(Counter::Rotations);
}

/// Record one key comparison
#[inline]
pub fn record_comparison() {
    record(Counter::KeyComparisons);
}

/// Record one insertion fixup step
#[inline]
pub fn record_insertion_fixup() {
    record(Counter::InsertionFixups);
}

/// Record one deletion fixup step
#[inline]
pub fn record_deletion_fixup() {
    record(Counter::DeletionFixups);
}

/// Record one node or slot visit along with the depth step that reached it
#[inline]
pub fn record_visit() {
    record(Counter::NodesVisited);
    record(Counter::SearchDepth);
}

/// Record one color change
#[inline]
pub fn record_color_change() {
    record(Counter::ColorChanges);
}
