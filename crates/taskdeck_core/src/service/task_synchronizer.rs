//! In-memory task list synchronized with the persistence collaborator.
//!
//! # Responsibility
//! - Own the ordered task list shown by the view layer.
//! - Route create/update/delete/complete through the repository and merge
//!   the authoritative results back by id.
//! - Re-apply the active sort criteria after every list change.
//! - Notify subscribed views of list and busy-flag changes.
//!
//! # Invariants
//! - `tasks` is never exposed without having just passed through the active
//!   sort criteria.
//! - Ids in `tasks` are unique.
//! - A failed repository call leaves `tasks` untouched and clears the busy
//!   flag before the error is returned.
//! - Operations take `&mut self` and run to completion; one synchronizer never
//!   has two mutations in flight.

use crate::model::task::{Task, TaskDraft, TaskId, TaskPatch};
use crate::repo::task_repo::{RepoResult, TaskRepository};
use crate::sort::strategy::{sort_owned, SortCriteria, SortDirection, SortProperty};
use log::{debug, error, info};
use std::collections::HashSet;
use std::time::Instant;

/// Read-only view of synchronizer state handed to observers.
#[derive(Debug, Clone, Copy)]
pub struct TaskListView<'a> {
    pub tasks: &'a [Task],
    pub loading: bool,
    pub criteria: SortCriteria,
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&TaskListView<'_>)>;

/// Single owner of the displayed task list.
pub struct TaskSynchronizer<R: TaskRepository> {
    repo: R,
    tasks: Vec<Task>,
    criteria: SortCriteria,
    loading: bool,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl<R: TaskRepository> TaskSynchronizer<R> {
    /// Creates an empty, unsorted synchronizer. Call `load` to fetch tasks.
    pub fn new(repo: R) -> Self {
        Self::with_criteria(repo, SortCriteria::default())
    }

    /// Creates an empty synchronizer with initial sort criteria.
    pub fn with_criteria(repo: R, criteria: SortCriteria) -> Self {
        Self {
            repo,
            tasks: Vec::new(),
            criteria,
            loading: false,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Returns the persistence collaborator.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Returns the current list, already in display order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns how many tasks are held.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns whether the list holds no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns whether a repository call is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns the active sort criteria.
    pub fn criteria(&self) -> SortCriteria {
        self.criteria
    }

    /// Returns the active sort key.
    pub fn sort_property(&self) -> SortProperty {
        self.criteria.property
    }

    /// Returns the active sort direction.
    pub fn sort_direction(&self) -> SortDirection {
        self.criteria.direction
    }

    /// Counts open tasks whose deadline is before `now_epoch_ms`.
    pub fn overdue_count(&self, now_epoch_ms: i64) -> usize {
        self.tasks
            .iter()
            .filter(|task| task.is_overdue(now_epoch_ms))
            .count()
    }

    /// Registers a view callback invoked after every state change.
    pub fn subscribe(
        &mut self,
        observer: impl FnMut(&TaskListView<'_>) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes a view callback. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(registered, _)| *registered != id);
        self.observers.len() != before
    }

    /// Replaces the list with the repository's full task set, sorted.
    ///
    /// On failure the current list is kept.
    pub fn load(&mut self) -> RepoResult<()> {
        let loaded = self.run("task_load", |repo| repo.list_tasks())?;
        debug!(
            "event=task_load module=service status=applied count={}",
            loaded.len()
        );
        self.commit(loaded);
        Ok(())
    }

    /// Stores new sort criteria and, when they changed, reloads from the
    /// repository so the new order is applied to fresh data.
    ///
    /// When the reload fails the current list is re-sorted locally under
    /// the new criteria and the load error is returned.
    pub fn set_sort_criteria(&mut self, criteria: SortCriteria) -> RepoResult<()> {
        if criteria == self.criteria {
            return Ok(());
        }

        info!(
            "event=sort_change module=service property={:?} direction={:?}",
            criteria.property, criteria.direction
        );
        self.criteria = criteria;

        if let Err(err) = self.load() {
            let current = std::mem::take(&mut self.tasks);
            self.commit(current);
            return Err(err);
        }
        Ok(())
    }

    /// Externally supplied bulk replacement; sorted before it becomes visible.
    ///
    /// Later duplicates of an id are dropped.
    pub fn replace_tasks(&mut self, tasks: Vec<Task>) {
        let mut seen = HashSet::with_capacity(tasks.len());
        let deduplicated = tasks
            .into_iter()
            .filter(|task| seen.insert(task.id))
            .collect::<Vec<_>>();
        self.commit(deduplicated);
    }

    /// Persists a draft and inserts the created record.
    pub fn create(&mut self, draft: &TaskDraft) -> RepoResult<Task> {
        let created = self.run("task_create", |repo| repo.create_task(draft))?;
        let mut next = std::mem::take(&mut self.tasks);
        merge_by_id(&mut next, created.clone(), true);
        self.commit(next);
        Ok(created)
    }

    /// Sends the full record and merges the authoritative result by id.
    pub fn update(&mut self, task: &Task) -> RepoResult<Task> {
        let patch = TaskPatch::replace_with(task);
        let updated = self.run("task_update", |repo| repo.update_task(task.id, &patch))?;
        self.merge(updated.clone());
        Ok(updated)
    }

    /// Deletes a task and drops it from the list. Returns the deleted record.
    pub fn remove(&mut self, id: TaskId) -> RepoResult<Task> {
        let deleted = self.run("task_delete", |repo| repo.delete_task(id))?;
        let mut next = std::mem::take(&mut self.tasks);
        next.retain(|task| task.id != deleted.id);
        self.commit(next);
        Ok(deleted)
    }

    /// Marks a task completed and merges the authoritative result by id.
    pub fn complete(&mut self, id: TaskId) -> RepoResult<Task> {
        let completed = self.run("task_complete", |repo| repo.complete_task(id))?;
        self.merge(completed.clone());
        Ok(completed)
    }

    fn merge(&mut self, task: Task) {
        let mut next = std::mem::take(&mut self.tasks);
        merge_by_id(&mut next, task, false);
        self.commit(next);
    }

    /// Wraps one repository round-trip with the busy flag and logging.
    fn run<T>(
        &mut self,
        event: &'static str,
        call: impl FnOnce(&R) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let started_at = Instant::now();
        self.set_loading(true);
        let result = call(&self.repo);
        self.set_loading(false);

        match &result {
            Ok(_) => info!(
                "event={event} module=service status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event={event} module=service status=error duration_ms={} error_kind={:?} error={}",
                started_at.elapsed().as_millis(),
                err.kind(),
                err
            ),
        }
        result
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        self.notify();
    }

    /// Sorts `tasks` under the active criteria, stores and publishes them.
    fn commit(&mut self, tasks: Vec<Task>) {
        self.tasks = sort_owned(tasks, self.criteria);
        self.notify();
    }

    fn notify(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let view = TaskListView {
            tasks: &self.tasks,
            loading: self.loading,
            criteria: self.criteria,
        };
        for (_, observer) in &mut self.observers {
            observer(&view);
        }
    }
}

/// Replaces the entry with the same id, or appends when `append_missing`.
fn merge_by_id(tasks: &mut Vec<Task>, task: Task, append_missing: bool) {
    match tasks.iter_mut().find(|existing| existing.id == task.id) {
        Some(existing) => *existing = task,
        None if append_missing => tasks.push(task),
        None => {}
    }
}
