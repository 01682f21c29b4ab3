//! Deterministic timer queue.
//!
//! Timers carry no callbacks. The runtime maps a fired [`TimerId`] back to
//! the action it armed, which keeps the queue a plain data structure that
//! tests can drive with a manual clock.

use page_core::EpochMillis;

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// One firing produced by [`TimerQueue::advance_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFire {
    /// The timer that fired.
    pub id: TimerId,
    /// The deadline it fired for. For repeating timers that were due several
    /// periods ago, one fire is produced per elapsed period.
    pub deadline: EpochMillis,
}

#[derive(Debug)]
struct TimerEntry {
    id: TimerId,
    deadline: EpochMillis,
    period: Option<i64>,
    seq: u64,
}

/// Queue of one-shot and repeating timers, advanced explicitly.
///
/// Due entries fire in deadline order; entries due at the same instant fire
/// in insertion order. Repeating entries re-arm themselves one period after
/// the deadline they fired for.
#[derive(Debug, Default)]
pub struct TimerQueue {
    entries: Vec<TimerEntry>,
    next_id: u64,
    next_seq: u64,
}

impl TimerQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms a timer that fires once at `deadline`.
    pub fn schedule_once(&mut self, deadline: EpochMillis) -> TimerId {
        self.insert(deadline, None)
    }

    /// Arms a timer that first fires at `first_deadline` and then every
    /// `period_ms` thereafter. Periods must be positive.
    pub fn schedule_repeating(&mut self, first_deadline: EpochMillis, period_ms: i64) -> TimerId {
        debug_assert!(period_ms > 0);
        self.insert(first_deadline, Some(period_ms))
    }

    fn insert(&mut self, deadline: EpochMillis, period: Option<i64>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(TimerEntry {
            id,
            deadline,
            period,
            seq,
        });
        id
    }

    /// Disarms a timer. Returns false when the id is unknown or already
    /// fired.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// The earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<EpochMillis> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    /// Returns true when no timers are armed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of armed timers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Fires every entry due at or before `now`, in (deadline, insertion)
    /// order. One-shot entries are removed; repeating entries re-arm and may
    /// fire several times if several periods elapsed.
    pub fn advance_to(&mut self, now: EpochMillis) -> Vec<TimerFire> {
        let mut fires = Vec::new();

        loop {
            // Earliest due entry this pass, ties broken by insertion order.
            let due = self
                .entries
                .iter()
                .enumerate()
                .filter(|(_, e)| e.deadline <= now)
                .min_by_key(|(_, e)| (e.deadline, e.seq))
                .map(|(idx, _)| idx);

            let Some(idx) = due else {
                break;
            };

            let deadline = self.entries[idx].deadline;
            let id = self.entries[idx].id;
            fires.push(TimerFire { id, deadline });

            match self.entries[idx].period {
                Some(period) => {
                    let entry = &mut self.entries[idx];
                    entry.deadline = deadline.plus(period);
                    entry.seq = self.next_seq;
                    self.next_seq += 1;
                }
                None => {
                    self.entries.remove(idx);
                }
            }
        }

        fires
    }
}
