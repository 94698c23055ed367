//! Focus queue ordering.
//!
//! Produces the deterministic order in which pending tasks are presented
//! one at a time during focus mode.

use crate::core::intent::Priority;

/// A task-like record that can be placed in the focus queue.
///
/// Implemented by the stored task type; kept as a trait so the ordering can
/// be tested and reused without dragging in the storage layer.
pub trait Focusable {
    /// Task priority.
    fn priority(&self) -> Priority;
    /// Deadline in ms since the epoch, if any.
    fn deadline(&self) -> Option<i64>;
    /// Creation time in ms since the epoch.
    fn created_at(&self) -> i64;
}

/// Order tasks for the focus queue, returning a new vector.
///
/// Keys in precedence order: priority descending, deadline ascending with
/// absent deadlines last, creation time descending. The sort is stable, so
/// records with fully equal keys keep their input order. Callers filter out
/// done tasks (and apply any project scope) before calling.
#[must_use]
pub fn sort_for_focus<T: Focusable + Clone>(tasks: &[T]) -> Vec<T> {
    let mut queue = tasks.to_vec();
    queue.sort_by(|a, b| {
        b.priority()
            .weight()
            .cmp(&a.priority().weight())
            .then_with(|| {
                let a_deadline = a.deadline().unwrap_or(i64::MAX);
                let b_deadline = b.deadline().unwrap_or(i64::MAX);
                a_deadline.cmp(&b_deadline)
            })
            .then_with(|| b.created_at().cmp(&a.created_at()))
    });
    queue
}
