//! Property-based tests for the display ordering.
//!
//! Uses proptest to verify, for arbitrary collections and keys:
//! 1. The output is a permutation of the input (nothing lost or invented).
//! 2. Pinned tasks always form a prefix of the output.
//! 3. Ordering is idempotent.
//! 4. Within each pin-partition the active key's comparator holds.
//! 5. The `None` key preserves input order within each partition.

use proptest::prelude::*;
use taskdeck::tasks::{SortKey, order_tasks};
use taskdeck_proto::task::{Task, TaskId};
use uuid::Uuid;

/// Strategy for generating arbitrary tasks with deterministic ids.
fn arb_task() -> impl Strategy<Value = Task> {
    (
        any::<u128>(),
        "[a-zA-Z ]{0,16}",
        any::<bool>(),
        any::<bool>(),
        0u64..1_000_000_000_000,
    )
        .prop_map(|(id, title, status, pinned, created_at)| Task {
            id: TaskId::from_uuid(Uuid::from_u128(id)),
            title,
            description: String::new(),
            status,
            pinned,
            created_at,
        })
}

fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec(arb_task(), 0..16)
}

fn arb_key() -> impl Strategy<Value = SortKey> {
    prop_oneof![
        Just(SortKey::None),
        Just(SortKey::Title),
        Just(SortKey::Status),
        Just(SortKey::Date),
    ]
}

/// Ids of a slice, sorted, for permutation comparison.
fn sorted_ids(tasks: &[Task]) -> Vec<TaskId> {
    let mut ids: Vec<TaskId> = tasks.iter().map(|t| t.id.clone()).collect();
    ids.sort_by_key(|id| *id.as_uuid());
    ids
}

/// Checks the active key's comparator within one pin-partition.
fn partition_is_sorted(tasks: &[Task], key: SortKey) -> bool {
    tasks.windows(2).all(|w| match key {
        SortKey::None => true,
        SortKey::Title => {
            let (a, b) = (w[0].title.to_lowercase(), w[1].title.to_lowercase());
            a < b || (a == b && w[0].title <= w[1].title)
        }
        SortKey::Status => w[0].status <= w[1].status,
        SortKey::Date => w[0].created_at >= w[1].created_at,
    })
}

proptest! {
    #[test]
    fn output_is_a_permutation_of_the_input(tasks in arb_tasks(), key in arb_key()) {
        let out = order_tasks(&tasks, key);
        prop_assert_eq!(out.len(), tasks.len());
        prop_assert_eq!(sorted_ids(&out), sorted_ids(&tasks));
    }

    #[test]
    fn pinned_tasks_form_a_prefix(tasks in arb_tasks(), key in arb_key()) {
        let out = order_tasks(&tasks, key);
        let first_unpinned = out.iter().position(|t| !t.pinned).unwrap_or(out.len());
        prop_assert!(out[first_unpinned..].iter().all(|t| !t.pinned));
        prop_assert!(out[..first_unpinned].iter().all(|t| t.pinned));
    }

    #[test]
    fn ordering_is_idempotent(tasks in arb_tasks(), key in arb_key()) {
        let once = order_tasks(&tasks, key);
        let twice = order_tasks(&once, key);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn each_partition_respects_the_key(tasks in arb_tasks(), key in arb_key()) {
        let out = order_tasks(&tasks, key);
        let boundary = out.iter().position(|t| !t.pinned).unwrap_or(out.len());
        prop_assert!(partition_is_sorted(&out[..boundary], key));
        prop_assert!(partition_is_sorted(&out[boundary..], key));
    }

    #[test]
    fn none_key_preserves_input_order_per_partition(tasks in arb_tasks()) {
        let out = order_tasks(&tasks, SortKey::None);

        let pinned_in: Vec<_> = tasks.iter().filter(|t| t.pinned).cloned().collect();
        let unpinned_in: Vec<_> = tasks.iter().filter(|t| !t.pinned).cloned().collect();
        let boundary = pinned_in.len();

        prop_assert_eq!(&out[..boundary], &pinned_in[..]);
        prop_assert_eq!(&out[boundary..], &unpinned_in[..]);
    }

    #[test]
    fn input_is_never_mutated(tasks in arb_tasks(), key in arb_key()) {
        let before = tasks.clone();
        let _ = order_tasks(&tasks, key);
        prop_assert_eq!(tasks, before);
    }
}
