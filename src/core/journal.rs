//! Dispatch journal: an immutable record of what the driver routed.
//!
//! The journal is plain data, independent of any program's types. The
//! driver stamps and appends one record per iteration when journaling is
//! enabled; pure transitions never touch it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How one event was routed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// A waiter claimed the event.
    Claimed {
        /// Position of the claiming waiter in the list at dispatch time.
        waiter: usize,
    },
    /// No waiter claimed it; the event's own transition ran.
    Defaulted,
}

/// Record of a single driver iteration.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use waterwheel::{DispatchRecord, Outcome};
///
/// let record = DispatchRecord {
///     event: "Response".to_string(),
///     outcome: Outcome::Claimed { waiter: 0 },
///     effects: 2,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(record.outcome, Outcome::Claimed { waiter: 0 });
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DispatchRecord {
    /// The dispatched event's label.
    pub event: String,
    /// The routing decision.
    pub outcome: Outcome,
    /// Number of effects the transition produced.
    pub effects: usize,
    /// When the dispatch happened.
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of dispatches.
///
/// Immutable: `record` returns a new journal with the entry added.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use waterwheel::{DispatchRecord, Journal, Outcome};
///
/// let journal = Journal::new();
/// let journal = journal.record(DispatchRecord {
///     event: "Tick".to_string(),
///     outcome: Outcome::Defaulted,
///     effects: 0,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(journal.len(), 1);
/// assert_eq!(journal.records()[0].event, "Tick");
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Journal {
    records: Vec<DispatchRecord>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append a record, returning a new journal. The original is unchanged.
    pub fn record(&self, record: DispatchRecord) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }

    /// All records, in dispatch order.
    pub fn records(&self) -> &[DispatchRecord] {
        &self.records
    }

    /// Number of dispatches recorded.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if nothing has been dispatched.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The most recent record.
    pub fn last(&self) -> Option<&DispatchRecord> {
        self.records.last()
    }

    /// Elapsed time between the first and last recorded dispatch.
    ///
    /// `None` while the journal is empty.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.records.first(), self.records.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }
}
