//! Active-time scheduler and wall-clock adapter
//!
//! The scheduler keeps its own millisecond timeline that only moves while it
//! is running. Suspending it freezes both the timeline and every pending
//! task, so anything measured against [`Scheduler::now`] (countdown ticks,
//! projectile flight) never sees paused time.
//!
//! Tasks do not own callbacks. A fired task hands its `kind` back to the
//! caller, which runs the matching handler against its own state.

use serde::{Deserialize, Serialize};

/// Handle for cancelling a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Repeat {
    Once,
    Every(u64),
}

#[derive(Debug, Clone)]
struct Task<K> {
    id: TaskId,
    kind: K,
    due: u64,
    repeat: Repeat,
}

/// A task that came due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired<K> {
    pub id: TaskId,
    pub kind: K,
    /// Scheduler time the task was due at
    pub at: u64,
}

/// Cancellable periodic and one-shot tasks on an active-time axis
#[derive(Debug, Clone)]
pub struct Scheduler<K> {
    now: u64,
    tasks: Vec<Task<K>>,
    next_id: u64,
    suspended: bool,
}

impl<K: Copy> Default for Scheduler<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy> Scheduler<K> {
    pub fn new() -> Self {
        Self {
            now: 0,
            tasks: Vec::new(),
            next_id: 1,
            suspended: false,
        }
    }

    /// Current active time (ms)
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Number of live tasks
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    fn push(&mut self, kind: K, due: u64, repeat: Repeat) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(Task { id, kind, due, repeat });
        id
    }

    /// Fire `kind` every `period_ms`, first at `now + period_ms`
    pub fn every(&mut self, period_ms: u64, kind: K) -> TaskId {
        let period = period_ms.max(1);
        self.push(kind, self.now + period, Repeat::Every(period))
    }

    /// Fire `kind` once after `delay_ms`
    pub fn once(&mut self, delay_ms: u64, kind: K) -> TaskId {
        self.push(kind, self.now + delay_ms, Repeat::Once)
    }

    /// Cancel a task; returns false if it already finished or never existed
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Drop every pending task
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Freeze time and all tasks
    pub fn suspend(&mut self) {
        self.suspended = true;
    }

    /// Continue from exactly where [`Scheduler::suspend`] left off
    pub fn resume(&mut self) {
        self.suspended = false;
    }

    /// Pop the earliest task due at or before `until`, moving time to its due
    /// point. Periodic tasks are re-armed one period later. Returns `None`
    /// while suspended.
    pub fn pop_due(&mut self, until: u64) -> Option<Fired<K>> {
        if self.suspended {
            return None;
        }
        let idx = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.id))
            .map(|(i, _)| i)?;

        let (id, kind, due, repeat) = {
            let t = &self.tasks[idx];
            (t.id, t.kind, t.due, t.repeat)
        };
        self.now = self.now.max(due);
        match repeat {
            Repeat::Every(period) => self.tasks[idx].due += period,
            Repeat::Once => {
                self.tasks.swap_remove(idx);
            }
        }
        Some(Fired { id, kind, at: due })
    }

    /// Move time forward to `until` once everything due has been popped
    pub fn settle(&mut self, until: u64) {
        if !self.suspended {
            self.now = self.now.max(until);
        }
    }
}

/// Converts host wall-clock readings into clamped simulation deltas
///
/// The first reading, a reading that goes backwards, or a repeated reading
/// yields 0. Steps larger than `max_delta_ms` (a suspended laptop, a stalled
/// tab) are cut down to `max_delta_ms`.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<u64>,
    max_delta_ms: u64,
}

impl FrameClock {
    pub fn new(max_delta_ms: u64) -> Self {
        Self {
            last: None,
            max_delta_ms,
        }
    }

    /// Record a wall-clock reading and return the usable delta
    pub fn observe(&mut self, now_ms: u64) -> u64 {
        let delta = match self.last {
            None => 0,
            Some(prev) if now_ms < prev => {
                log::warn!("Clock went backwards ({} -> {}), ignoring step", prev, now_ms);
                0
            }
            Some(prev) => {
                let raw = now_ms - prev;
                if raw > self.max_delta_ms {
                    log::warn!("Frame step of {}ms clamped to {}ms", raw, self.max_delta_ms);
                    self.max_delta_ms
                } else {
                    raw
                }
            }
        };
        self.last = Some(now_ms);
        delta
    }

    /// Forget the last reading so the next one yields 0
    pub fn rebase(&mut self) {
        self.last = None;
    }

    /// Take `now_ms` as the reference reading if none is held
    pub fn anchor(&mut self, now_ms: u64) {
        self.last.get_or_insert(now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Job {
        Fast,
        Slow,
        Once,
    }

    fn drain(s: &mut Scheduler<Job>, until: u64) -> Vec<(u64, Job)> {
        let mut out = Vec::new();
        while let Some(f) = s.pop_due(until) {
            out.push((f.at, f.kind));
        }
        s.settle(until);
        out
    }

    #[test]
    fn test_periodic_fires_in_due_order() {
        let mut s = Scheduler::new();
        s.every(10, Job::Fast);
        s.every(25, Job::Slow);
        let fired = drain(&mut s, 50);
        assert_eq!(
            fired,
            vec![
                (10, Job::Fast),
                (20, Job::Fast),
                (25, Job::Slow),
                (30, Job::Fast),
                (40, Job::Fast),
                (50, Job::Fast),
                (50, Job::Slow),
            ]
        );
        assert_eq!(s.now(), 50);
    }

    #[test]
    fn test_once_fires_once() {
        let mut s = Scheduler::new();
        s.once(5, Job::Once);
        assert_eq!(drain(&mut s, 100), vec![(5, Job::Once)]);
        assert!(drain(&mut s, 200).is_empty());
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn test_cancel() {
        let mut s = Scheduler::new();
        let id = s.every(10, Job::Fast);
        assert!(s.cancel(id));
        assert!(!s.cancel(id));
        assert!(drain(&mut s, 100).is_empty());
    }

    #[test]
    fn test_suspend_freezes_time_and_tasks() {
        let mut s = Scheduler::new();
        s.every(1000, Job::Slow);
        assert!(drain(&mut s, 700).is_empty());

        s.suspend();
        assert!(s.pop_due(5000).is_none());
        s.settle(5000);
        assert_eq!(s.now(), 700);

        s.resume();
        // 300ms of active time remain in the current period
        assert!(drain(&mut s, 999).is_empty());
        assert_eq!(drain(&mut s, 1000), vec![(1000, Job::Slow)]);
    }

    #[test]
    fn test_zero_period_does_not_spin() {
        let mut s = Scheduler::new();
        s.every(0, Job::Fast);
        assert_eq!(drain(&mut s, 3).len(), 3);
    }

    #[test]
    fn test_frame_clock_clamps_anomalies() {
        let mut clock = FrameClock::new(250);
        assert_eq!(clock.observe(1_000), 0);
        assert_eq!(clock.observe(1_016), 16);
        assert_eq!(clock.observe(1_016), 0);
        // backwards
        assert_eq!(clock.observe(900), 0);
        assert_eq!(clock.observe(916), 16);
        // suspended process
        assert_eq!(clock.observe(60_000), 250);
    }

    #[test]
    fn test_frame_clock_rebase_and_anchor() {
        let mut clock = FrameClock::new(250);
        clock.observe(1_000);
        clock.rebase();
        assert_eq!(clock.observe(50_000), 0);
        assert_eq!(clock.observe(50_016), 16);

        // anchor only fills an empty reading
        clock.anchor(10);
        assert_eq!(clock.observe(50_032), 16);
        clock.rebase();
        clock.anchor(60_000);
        assert_eq!(clock.observe(60_016), 16);
    }
}
