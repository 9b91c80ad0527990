//! A single-threaded queue of deferred, low-priority work.
//!
//! Layouts push tasks here instead of doing them immediately.  The host
//! drains the queue from its event loop when it has nothing else to do
//! (see [`LayoutStrategy::on_idle`](crate::traits::LayoutStrategy::on_idle)),
//! and every mutating layout call drains it first, so a task always runs
//! after the event that scheduled it and before the next mutation.

use crate::geometry::Axis;
use std::collections::VecDeque;

/// Work that can be deferred to the next idle tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleTask {
    /// Fold live divider-drag sizes on `axis` back into proportional
    /// weights.
    Renormalize(Axis),
}

/// FIFO of pending [`IdleTask`]s.  Scheduling a task that is already
/// pending is a no-op.
#[derive(Debug, Clone, Default)]
pub struct IdleQueue {
    pending: VecDeque<IdleTask>,
}

impl IdleQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, task: IdleTask) {
        if !self.pending.contains(&task) {
            self.pending.push_back(task);
        }
    }

    /// Take every pending task, oldest first.
    pub fn drain(&mut self) -> Vec<IdleTask> {
        self.pending.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_tasks_are_coalesced() {
        let mut q = IdleQueue::new();
        q.schedule(IdleTask::Renormalize(Axis::Horizontal));
        q.schedule(IdleTask::Renormalize(Axis::Vertical));
        q.schedule(IdleTask::Renormalize(Axis::Horizontal));
        assert_eq!(
            q.drain(),
            vec![
                IdleTask::Renormalize(Axis::Horizontal),
                IdleTask::Renormalize(Axis::Vertical)
            ]
        );
        assert!(q.is_empty());
    }
}
