use proptest::prelude::*;
use std::cmp::Ordering;
use taskdeck_core::{
    apply_sort, locale_compare, sort_by_completion, sort_by_due_date, sort_by_name, SortCriteria,
    SortDirection, SortProperty, Task, TaskId,
};
use uuid::Uuid;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

fn task(title: &str, completed: bool, due_date: Option<i64>) -> Task {
    Task {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: None,
        completed,
        due_date,
    }
}

fn titles(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|task| task.title.as_str()).collect()
}

fn ids<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Vec<TaskId> {
    tasks.into_iter().map(|task| task.id).collect()
}

fn task_strategy() -> impl Strategy<Value = Task> {
    (
        "[a-cA-Cé][a-cA-Cé ]{0,5}",
        any::<bool>(),
        proptest::option::of(0_i64..50),
    )
        .prop_map(|(title, completed, due_date)| Task {
            id: Uuid::new_v4(),
            title,
            description: None,
            completed,
            due_date,
        })
}

fn direction_strategy() -> impl Strategy<Value = SortDirection> {
    prop_oneof![
        Just(SortDirection::None),
        Just(SortDirection::Asc),
        Just(SortDirection::Desc),
    ]
}

fn property_strategy() -> impl Strategy<Value = SortProperty> {
    prop_oneof![
        Just(SortProperty::None),
        Just(SortProperty::Name),
        Just(SortProperty::DueDate),
        Just(SortProperty::Completion),
    ]
}

#[test]
fn due_date_scenario_orders_by_deadline() {
    let now = 1_760_000_000_000;
    let input = vec![
        task("C", false, Some(now + 2 * DAY_MS)),
        task("A", false, Some(now + DAY_MS)),
    ];

    assert_eq!(titles(&sort_by_due_date(&input, SortDirection::Asc)), ["A", "C"]);
    assert_eq!(titles(&sort_by_due_date(&input, SortDirection::Desc)), ["C", "A"]);
    assert_eq!(titles(&input), ["C", "A"]);
}

#[test]
fn name_sort_uses_locale_collation() {
    let input = vec![
        task("banana", false, None),
        task("Éclair", false, None),
        task("apple", false, None),
        task("Apple", false, None),
        task("eclair", false, None),
    ];

    let asc = sort_by_name(&input, SortDirection::Asc);
    assert_eq!(titles(&asc), ["apple", "Apple", "banana", "eclair", "Éclair"]);

    let desc = sort_by_name(&input, SortDirection::Desc);
    assert_eq!(titles(&desc), ["Éclair", "eclair", "banana", "Apple", "apple"]);

    let cities = vec![
        task("Zürich", false, None),
        task("Łódź", false, None),
        task("Madrid", false, None),
        task("Lima", false, None),
    ];
    let asc = sort_by_name(&cities, SortDirection::Asc);
    assert_eq!(titles(&asc), ["Lima", "Łódź", "Madrid", "Zürich"]);
}

#[test]
fn completion_ascending_puts_completed_first() {
    let input = vec![
        task("open-1", false, None),
        task("done-1", true, None),
        task("open-2", false, None),
        task("done-2", true, None),
    ];

    let asc = sort_by_completion(&input, SortDirection::Asc);
    assert_eq!(titles(&asc), ["done-1", "done-2", "open-1", "open-2"]);

    let desc = sort_by_completion(&input, SortDirection::Desc);
    assert_eq!(titles(&desc), ["open-1", "open-2", "done-1", "done-2"]);
}

#[test]
fn equal_titles_keep_input_order() {
    let input = vec![
        task("same", false, None),
        task("other", false, None),
        task("same", true, None),
    ];

    let asc = sort_by_name(&input, SortDirection::Asc);
    assert_eq!(ids([&input[1], &input[0], &input[2]]), ids(&asc));

    let desc = sort_by_name(&input, SortDirection::Desc);
    assert_eq!(ids([&input[0], &input[2], &input[1]]), ids(&desc));
}

#[test]
fn empty_input_yields_empty_output() {
    for direction in [SortDirection::None, SortDirection::Asc, SortDirection::Desc] {
        assert!(sort_by_name(&[], direction).is_empty());
        assert!(sort_by_due_date(&[], direction).is_empty());
        assert!(sort_by_completion(&[], direction).is_empty());
    }
}

#[test]
fn sorted_output_is_an_independent_copy() {
    let input = vec![task("b", false, None), task("a", false, None)];
    let mut output = sort_by_name(&input, SortDirection::None);
    output[0].title = "changed".to_string();
    output.pop();

    assert_eq!(titles(&input), ["b", "a"]);
}

proptest! {
    #[test]
    fn direction_none_preserves_input_order(tasks in prop::collection::vec(task_strategy(), 0..24)) {
        prop_assert_eq!(&sort_by_name(&tasks, SortDirection::None), &tasks);
        prop_assert_eq!(&sort_by_due_date(&tasks, SortDirection::None), &tasks);
        prop_assert_eq!(&sort_by_completion(&tasks, SortDirection::None), &tasks);
        prop_assert_eq!(
            &apply_sort(&tasks, SortCriteria::new(SortProperty::None, SortDirection::Desc)),
            &tasks
        );
    }

    #[test]
    fn name_sort_is_monotonic(tasks in prop::collection::vec(task_strategy(), 0..24)) {
        let asc = sort_by_name(&tasks, SortDirection::Asc);
        for pair in asc.windows(2) {
            prop_assert_ne!(locale_compare(&pair[0].title, &pair[1].title), Ordering::Greater);
        }

        let desc = sort_by_name(&tasks, SortDirection::Desc);
        for pair in desc.windows(2) {
            prop_assert_ne!(locale_compare(&pair[0].title, &pair[1].title), Ordering::Less);
        }
    }

    #[test]
    fn undated_tasks_follow_dated_tasks(
        tasks in prop::collection::vec(task_strategy(), 0..24),
        direction in direction_strategy(),
    ) {
        prop_assume!(direction != SortDirection::None);
        let sorted = sort_by_due_date(&tasks, direction);
        let first_undated = sorted
            .iter()
            .position(|task| task.due_date.is_none())
            .unwrap_or(sorted.len());
        prop_assert!(sorted[first_undated..].iter().all(|task| task.due_date.is_none()));

        let undated_in_input = ids(tasks.iter().filter(|task| task.due_date.is_none()));
        prop_assert_eq!(ids(&sorted[first_undated..]), undated_in_input);
    }

    #[test]
    fn completion_sort_is_a_stable_partition(tasks in prop::collection::vec(task_strategy(), 0..24)) {
        let done = ids(tasks.iter().filter(|task| task.completed));
        let open = ids(tasks.iter().filter(|task| !task.completed));

        let asc = ids(&sort_by_completion(&tasks, SortDirection::Asc));
        prop_assert_eq!(asc, [done.clone(), open.clone()].concat());

        let desc = ids(&sort_by_completion(&tasks, SortDirection::Desc));
        prop_assert_eq!(desc, [open, done].concat());
    }

    #[test]
    fn sorting_is_idempotent_permutation(
        tasks in prop::collection::vec(task_strategy(), 0..24),
        property in property_strategy(),
        direction in direction_strategy(),
    ) {
        let criteria = SortCriteria::new(property, direction);
        let once = apply_sort(&tasks, criteria);
        let twice = apply_sort(&tasks, criteria);
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(&apply_sort(&once, criteria), &once);

        let mut sorted_ids = ids(&once);
        let mut input_ids = ids(&tasks);
        sorted_ids.sort();
        input_ids.sort();
        prop_assert_eq!(sorted_ids, input_ids);
    }
}
