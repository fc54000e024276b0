//! Value types describing task list queries, and their in-memory evaluation.
//!
//! Storage adapters that can push filtering down to a database translate a
//! [`TaskQuery`] themselves; the rest evaluate it with [`TaskQuery::apply`].

use super::{ParseSortError, Priority, ProjectId, Task, TaskDomainError, TaskStatus, UserId};
use chrono::{DateTime, Utc};
use icu_collator::{Collator, CollatorBorrowed, CollatorPreferences, options::CollatorOptions};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::LazyLock;

/// Number of tasks per page when the caller does not choose one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Conjunctive task filter. Unset criteria match every task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    search: Option<String>,
    project_id: Option<ProjectId>,
    status: Option<TaskStatus>,
    priority: Option<Priority>,
    assignee_id: Option<UserId>,
}

impl TaskFilter {
    /// Creates a filter that matches every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to tasks whose title or description contains `text`,
    /// ignoring case. Surrounding whitespace is part of the needle; only an
    /// empty string leaves the filter unrestricted.
    #[must_use]
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        let needle = text.into();
        self.search = (!needle.is_empty()).then(|| needle.to_lowercase());
        self
    }

    /// Restricts to tasks owned by `project_id`.
    #[must_use]
    pub const fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Restricts to tasks in `status`.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to tasks with `priority`.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Restricts to tasks assigned to `assignee_id`.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: UserId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Returns the lowercased search needle, if any.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Returns the project criterion.
    #[must_use]
    pub const fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    /// Returns the status criterion.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the priority criterion.
    #[must_use]
    pub const fn priority(&self) -> Option<Priority> {
        self.priority
    }

    /// Returns the assignee criterion.
    #[must_use]
    pub const fn assignee_id(&self) -> Option<UserId> {
        self.assignee_id
    }

    /// Returns `true` when `task` satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        let text_matches = self.search.as_deref().is_none_or(|needle| {
            task.title().to_lowercase().contains(needle)
                || task.description().to_lowercase().contains(needle)
        });
        text_matches
            && self.project_id.is_none_or(|id| task.project_id() == id)
            && self.status.is_none_or(|status| task.status() == status)
            && self.priority.is_none_or(|priority| task.priority() == priority)
            && self
                .assignee_id
                .is_none_or(|id| task.assignee_id() == Some(id))
    }
}

/// Field a task list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Chronological by due date; unscheduled tasks count as latest.
    #[default]
    DueDate,
    /// By severity rank.
    Priority,
    /// Alphabetical by title under the Unicode root collation.
    Title,
}

impl TryFrom<&str> for SortKey {
    type Error = ParseSortError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().replace('_', "").to_ascii_lowercase();
        match normalized.as_str() {
            "duedate" => Ok(Self::DueDate),
            "priority" => Ok(Self::Priority),
            "title" => Ok(Self::Title),
            _ => Err(ParseSortError(value.to_owned())),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl TryFrom<&str> for SortDirection {
    type Error = ParseSortError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            _ => Err(ParseSortError(value.to_owned())),
        }
    }
}

/// Ordering applied to a task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskSort {
    /// Field to order by.
    pub key: SortKey,
    /// Direction to order in.
    pub direction: SortDirection,
}

impl TaskSort {
    /// Creates a sort specification.
    #[must_use]
    pub const fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Compares two tasks under this ordering.
    #[must_use]
    pub fn compare(&self, left: &Task, right: &Task) -> Ordering {
        let ascending = match self.key {
            SortKey::DueDate => compare_due_dates(left.due_date(), right.due_date()),
            SortKey::Priority => left.priority().rank().cmp(&right.priority().rank()),
            SortKey::Title => compare_titles(left.title(), right.title()),
        };
        match self.direction {
            SortDirection::Asc => ascending,
            SortDirection::Desc => ascending.reverse(),
        }
    }
}

fn compare_due_dates(left: Option<DateTime<Utc>>, right: Option<DateTime<Utc>>) -> Ordering {
    match (left, right) {
        (Some(left_due), Some(right_due)) => left_due.cmp(&right_due),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Unicode root collation at tertiary strength, matching the `und-x-icu`
/// collation of the `tasks.title` column.
static TITLE_COLLATOR: LazyLock<Option<CollatorBorrowed<'static>>> = LazyLock::new(|| {
    Collator::try_new(CollatorPreferences::default(), CollatorOptions::default()).ok()
});

/// Collates titles, then falls back to code point order so that distinct
/// titles never compare equal.
fn compare_titles(left: &str, right: &str) -> Ordering {
    let collated = TITLE_COLLATOR.as_ref().map_or_else(
        || left.to_lowercase().cmp(&right.to_lowercase()),
        |collator| collator.compare(left, right),
    );
    collated.then_with(|| left.cmp(right))
}

/// One-indexed page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Creates a validated page selection.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidPageNumber`] when `page` is zero and
    /// [`TaskDomainError::InvalidPageSize`] when `page_size` is zero.
    pub const fn new(page: u32, page_size: u32) -> Result<Self, TaskDomainError> {
        if page == 0 {
            return Err(TaskDomainError::InvalidPageNumber(page));
        }
        if page_size == 0 {
            return Err(TaskDomainError::InvalidPageSize(page_size));
        }
        Ok(Self { page, page_size })
    }

    /// Returns the first page with the default page size.
    #[must_use]
    pub const fn first() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Returns the one-indexed page number.
    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn page_size(self) -> u32 {
        self.page_size
    }

    /// Returns how many matching tasks precede this page.
    #[must_use]
    pub const fn offset(self) -> u64 {
        (self.page as u64 - 1).saturating_mul(self.page_size as u64)
    }

    /// Returns how many pages `total` matches fill.
    #[must_use]
    pub const fn total_pages(self, total: u64) -> u64 {
        total.div_ceil(self.page_size as u64)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// Complete task list request: filter, ordering, and page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    /// Criteria a task must satisfy.
    pub filter: TaskFilter,
    /// Ordering of the matches.
    pub sort: TaskSort,
    /// Page of the ordered matches to return.
    pub page: PageRequest,
}

impl TaskQuery {
    /// Creates a query.
    #[must_use]
    pub const fn new(filter: TaskFilter, sort: TaskSort, page: PageRequest) -> Self {
        Self { filter, sort, page }
    }

    /// Filters, stably sorts, and pages `tasks`, returning the page together
    /// with the total number of matches.
    #[must_use]
    pub fn apply(&self, tasks: impl IntoIterator<Item = Task>) -> (Vec<Task>, u64) {
        let mut matches: Vec<Task> = tasks
            .into_iter()
            .filter(|task| self.filter.matches(task))
            .collect();
        matches.sort_by(|left, right| self.sort.compare(left, right));

        let total = u64::try_from(matches.len()).unwrap_or(u64::MAX);
        let skip = usize::try_from(self.page.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(self.page.page_size()).unwrap_or(usize::MAX);
        let page = matches.into_iter().skip(skip).take(take).collect();
        (page, total)
    }
}
