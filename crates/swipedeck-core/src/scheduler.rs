//! Repeating, self-cancelling polling tasks.
//!
//! Scheduling a task never runs it. The first run happens on the first
//! [`run_due`] after scheduling, whatever the time, and later runs follow
//! every `interval`. The stop predicate is evaluated after each run. Once the
//! predicate holds the task is released. Actions and predicates receive the
//! context that owns the scheduler, so [`run_due`] temporarily takes due tasks
//! out of the scheduler while they execute.

use std::fmt;
use std::time::Duration;

use crate::collections::map::HashSet;

/// Handle to a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

type Action<Ctx> = Box<dyn FnMut(&mut Ctx)>;
type StopPredicate<Ctx> = Box<dyn Fn(&Ctx) -> bool>;

struct ScheduledTask<Ctx> {
    id: TaskId,
    interval_nanos: u64,
    /// `None` until the first run; a fresh task is due immediately.
    due_nanos: Option<u64>,
    action: Action<Ctx>,
    stop: StopPredicate<Ctx>,
}

impl<Ctx> ScheduledTask<Ctx> {
    fn is_due(&self, now_nanos: u64) -> bool {
        self.due_nanos.map_or(true, |due| due <= now_nanos)
    }
}

/// Tasks taken out of a [`Scheduler`] for execution.
pub struct DueTasks<Ctx> {
    tasks: Vec<ScheduledTask<Ctx>>,
}

impl<Ctx> DueTasks<Ctx> {
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

pub struct Scheduler<Ctx> {
    tasks: Vec<ScheduledTask<Ctx>>,
    /// Tasks currently taken out by [`Scheduler::take_due`].
    running: HashSet<TaskId>,
    /// Running tasks cancelled before they were handed back.
    cancelled: HashSet<TaskId>,
    next_id: u64,
}

impl<Ctx> Default for Scheduler<Ctx> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ctx> fmt::Debug for Scheduler<Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("pending", &self.tasks.len())
            .field("running", &self.running.len())
            .finish()
    }
}

impl<Ctx> Scheduler<Ctx> {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            running: HashSet::default(),
            cancelled: HashSet::default(),
            next_id: 1,
        }
    }

    /// Schedules `action` to run on the next [`run_due`] call, not now, and
    /// then every `interval` until `stop` returns true after a run.
    pub fn schedule_repeating(
        &mut self,
        interval: Duration,
        action: impl FnMut(&mut Ctx) + 'static,
        stop: impl Fn(&Ctx) -> bool + 'static,
    ) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        let interval_nanos = (interval.as_nanos() as u64).max(1);
        self.tasks.push(ScheduledTask {
            id,
            interval_nanos,
            due_nanos: None,
            action: Box::new(action),
            stop: Box::new(stop),
        });
        log::trace!("scheduled task {:?} every {:?}", id, interval);
        id
    }

    /// Releases a task. Returns whether it was still scheduled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        if self.running.contains(&id) {
            return self.cancelled.insert(id);
        }
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        before != self.tasks.len()
    }

    pub fn cancel_all(&mut self) {
        if !self.tasks.is_empty() {
            log::trace!("cancelling {} scheduled task(s)", self.tasks.len());
        }
        self.tasks.clear();
        self.cancelled.extend(self.running.iter().copied());
    }

    pub fn is_scheduled(&self, id: TaskId) -> bool {
        if self.running.contains(&id) {
            return !self.cancelled.contains(&id);
        }
        self.tasks.iter().any(|task| task.id == id)
    }

    /// Number of live tasks, including ones currently executing.
    pub fn len(&self) -> usize {
        self.tasks.len() + self.running.len() - self.cancelled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Earliest time at which a task becomes due. `Some(0)` when a task has
    /// never run.
    pub fn next_due_nanos(&self) -> Option<u64> {
        self.tasks
            .iter()
            .map(|task| task.due_nanos.unwrap_or(0))
            .min()
    }

    /// Removes and returns the tasks due at `now_nanos`.
    pub fn take_due(&mut self, now_nanos: u64) -> DueTasks<Ctx> {
        let mut due = Vec::new();
        let mut index = 0;
        while index < self.tasks.len() {
            if self.tasks[index].is_due(now_nanos) {
                let task = self.tasks.remove(index);
                self.running.insert(task.id);
                due.push(task);
            } else {
                index += 1;
            }
        }
        DueTasks { tasks: due }
    }

    fn hand_back(&mut self, mut task: ScheduledTask<Ctx>, finished: bool, now_nanos: u64) {
        self.running.remove(&task.id);
        if self.cancelled.remove(&task.id) || finished {
            return;
        }
        task.due_nanos = Some(now_nanos.saturating_add(task.interval_nanos));
        self.tasks.push(task);
    }
}

/// Runs every task of the scheduler reached through `scheduler` that is due
/// at `now_nanos`. Returns the number of actions executed.
///
/// Overdue tasks run once per call; their next run is one interval after
/// `now_nanos`.
pub fn run_due<Ctx>(
    ctx: &mut Ctx,
    now_nanos: u64,
    scheduler: fn(&mut Ctx) -> &mut Scheduler<Ctx>,
) -> usize {
    let due = scheduler(ctx).take_due(now_nanos);
    let mut ran = 0;
    for mut task in due.tasks {
        if scheduler(ctx).cancelled.contains(&task.id) {
            scheduler(ctx).hand_back(task, true, now_nanos);
            continue;
        }
        (task.action)(ctx);
        ran += 1;
        let finished = (task.stop)(ctx);
        if finished {
            log::trace!("task {:?} reached its stop condition", task.id);
        }
        scheduler(ctx).hand_back(task, finished, now_nanos);
    }
    ran
}

#[cfg(test)]
#[path = "tests/scheduler_tests.rs"]
mod tests;
