//! Comparator-based sort strategies over task lists.
//!
//! # Responsibility
//! - Order tasks by one key (`name`, `due_date`, `completion`) and direction.
//! - Dispatch a `SortCriteria` to the matching strategy.
//!
//! # Invariants
//! - Inputs are never mutated; every call returns a new vector.
//! - Sorting is stable: equal keys keep their input order.
//! - `SortDirection::None` returns an order-preserving copy.
//! - Tasks without a due date sort after dated tasks in both directions.
//! - Strategies never fail.

use crate::model::task::Task;
use crate::sort::collation::with_collator;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Key used to order the task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortProperty {
    #[default]
    None,
    Name,
    DueDate,
    Completion,
}

/// Direction applied to the sort key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    None,
    Asc,
    Desc,
}

impl SortDirection {
    fn orient(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Desc => ordering.reverse(),
            Self::None | Self::Asc => ordering,
        }
    }
}

/// Active `(property, direction)` pair governing display order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortCriteria {
    pub property: SortProperty,
    pub direction: SortDirection,
}

impl SortCriteria {
    pub const fn new(property: SortProperty, direction: SortDirection) -> Self {
        Self {
            property,
            direction,
        }
    }

    /// Returns whether applying these criteria keeps input order.
    pub fn is_unsorted(self) -> bool {
        self.property == SortProperty::None || self.direction == SortDirection::None
    }
}

/// Orders tasks by title using locale collation.
pub fn sort_by_name(tasks: &[Task], direction: SortDirection) -> Vec<Task> {
    sort_owned_by_name(tasks.to_vec(), direction)
}

/// Orders tasks by deadline; undated tasks always go last.
pub fn sort_by_due_date(tasks: &[Task], direction: SortDirection) -> Vec<Task> {
    sort_owned_by_due_date(tasks.to_vec(), direction)
}

/// Orders tasks by completion; `Asc` puts completed tasks first.
pub fn sort_by_completion(tasks: &[Task], direction: SortDirection) -> Vec<Task> {
    sort_owned_by_completion(tasks.to_vec(), direction)
}

/// Applies `criteria` to a copy of `tasks`.
pub fn apply_sort(tasks: &[Task], criteria: SortCriteria) -> Vec<Task> {
    sort_owned(tasks.to_vec(), criteria)
}

/// Applies `criteria` to an owned list, reusing its allocation.
pub(crate) fn sort_owned(tasks: Vec<Task>, criteria: SortCriteria) -> Vec<Task> {
    match criteria.property {
        SortProperty::None => tasks,
        SortProperty::Name => sort_owned_by_name(tasks, criteria.direction),
        SortProperty::DueDate => sort_owned_by_due_date(tasks, criteria.direction),
        SortProperty::Completion => sort_owned_by_completion(tasks, criteria.direction),
    }
}

fn sort_owned_by_name(mut tasks: Vec<Task>, direction: SortDirection) -> Vec<Task> {
    if direction == SortDirection::None {
        return tasks;
    }

    with_collator(|compare| {
        tasks.sort_by(|left, right| direction.orient(compare(&left.title, &right.title)));
    });
    tasks
}

fn sort_owned_by_due_date(mut tasks: Vec<Task>, direction: SortDirection) -> Vec<Task> {
    if direction == SortDirection::None {
        return tasks;
    }

    tasks.sort_by(|left, right| match (left.due_date, right.due_date) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(left_due), Some(right_due)) => direction.orient(left_due.cmp(&right_due)),
    });
    tasks
}

fn sort_owned_by_completion(mut tasks: Vec<Task>, direction: SortDirection) -> Vec<Task> {
    if direction == SortDirection::None {
        return tasks;
    }

    tasks.sort_by(|left, right| direction.orient(right.completed.cmp(&left.completed)));
    tasks
}

#[cfg(test)]
mod tests {
    use super::{sort_by_due_date, SortCriteria, SortDirection, SortProperty};
    use crate::model::task::Task;
    use uuid::Uuid;

    fn dated(title: &str, due_date: Option<i64>) -> Task {
        Task {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: None,
            completed: false,
            due_date,
        }
    }

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|task| task.title.as_str()).collect()
    }

    #[test]
    fn undated_tasks_stay_last_and_keep_input_order() {
        let input = vec![
            dated("u1", None),
            dated("late", Some(300)),
            dated("u2", None),
            dated("early", Some(100)),
        ];

        let asc = sort_by_due_date(&input, SortDirection::Asc);
        assert_eq!(titles(&asc), ["early", "late", "u1", "u2"]);

        let desc = sort_by_due_date(&input, SortDirection::Desc);
        assert_eq!(titles(&desc), ["late", "early", "u1", "u2"]);
    }

    #[test]
    fn unsorted_criteria_detection() {
        assert!(SortCriteria::default().is_unsorted());
        assert!(SortCriteria::new(SortProperty::Name, SortDirection::None).is_unsorted());
        assert!(SortCriteria::new(SortProperty::None, SortDirection::Asc).is_unsorted());
        assert!(!SortCriteria::new(SortProperty::Name, SortDirection::Desc).is_unsorted());
    }
}
