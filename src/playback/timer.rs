use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Handle to a scheduled timer, used to cancel it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Deadline-ordered queue of one-shot timers on the host clock.
///
/// Timers due at the same instant fire in scheduling order.
#[derive(Debug)]
pub struct TimerQueue<T> {
    queue: BTreeMap<(Duration, u64), T>,
    due_by_handle: HashMap<u64, Duration>,
    next_seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            queue: BTreeMap::new(),
            due_by_handle: HashMap::new(),
            next_seq: 0,
        }
    }
}

impl<T> TimerQueue<T> {
    /// Schedule `task` to fire at `due`.
    pub fn schedule(&mut self, due: Duration, task: T) -> TimerHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.insert((due, seq), task);
        self.due_by_handle.insert(seq, due);
        TimerHandle(seq)
    }

    /// Cancel a pending timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let Some(due) = self.due_by_handle.remove(&handle.0) else {
            return false;
        };
        self.queue.remove(&(due, handle.0)).is_some()
    }

    /// Earliest pending deadline.
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    /// Remove and return the earliest timer due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<(Duration, T)> {
        let (&(due, seq), _) = self.queue.iter().next()?;
        if due > now {
            return None;
        }
        self.due_by_handle.remove(&seq);
        self.queue.remove(&(due, seq)).map(|task| (due, task))
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Return `true` when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/timer.rs"]
mod tests;
