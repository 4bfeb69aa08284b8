//! Display ordering for the task collection.
//!
//! Pure: [`order_tasks`] never mutates its input and always returns a
//! new sequence. Pinned tasks precede unpinned ones regardless of the
//! active key; within each partition the sort is stable, so tasks that
//! compare equal keep their relative input order.

use taskdeck_proto::task::Task;

/// The attribute used to order each pin-partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// No reordering beyond the pin partition itself.
    #[default]
    None,
    /// Title, case-insensitive, ascending.
    Title,
    /// Incomplete before complete.
    Status,
    /// Creation time descending (newest first).
    Date,
}

impl SortKey {
    /// The next key in the cycle (for the `s` key binding).
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::None => Self::Title,
            Self::Title => Self::Status,
            Self::Status => Self::Date,
            Self::Date => Self::None,
        }
    }

    /// Short label for the status bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Title => "title",
            Self::Status => "status",
            Self::Date => "date",
        }
    }
}

/// Derives the visible ordering: stable-partition into pinned/unpinned,
/// sort each partition by `key`, concatenate pinned-first.
#[must_use]
pub fn order_tasks(tasks: &[Task], key: SortKey) -> Vec<Task> {
    let (mut pinned, mut unpinned): (Vec<Task>, Vec<Task>) =
        tasks.iter().cloned().partition(|t| t.pinned);
    sort_partition(&mut pinned, key);
    sort_partition(&mut unpinned, key);
    pinned.append(&mut unpinned);
    pinned
}

/// Sorts one pin-partition in place with a stable sort.
fn sort_partition(tasks: &mut [Task], key: SortKey) {
    match key {
        SortKey::None => {}
        SortKey::Title => tasks.sort_by(|a, b| {
            a.title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                // Total order even for case-only differences.
                .then_with(|| a.title.cmp(&b.title))
        }),
        SortKey::Status => tasks.sort_by_key(|t| t.status),
        SortKey::Date => tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
}
