use crate::domain::{paginate, PriorityFilter, StatusFilter, Task, TaskPage, TaskQuery};

pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// View state for the task list: active filter criteria plus the
/// pagination cursor. Changing any criterion resets the cursor to the
/// first page, so a narrowed filtered set can never be read through a
/// stale page index.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskListState {
    query: TaskQuery,
    current_page: usize,
    items_per_page: usize,
}

impl Default for TaskListState {
    fn default() -> Self {
        Self {
            query: TaskQuery::default(),
            current_page: 1,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

impl TaskListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &TaskQuery {
        &self.query
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.query.status = status;
        self.current_page = 1;
    }

    pub fn set_priority_filter(&mut self, priority: PriorityFilter) {
        self.query.priority = priority;
        self.current_page = 1;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
        self.current_page = 1;
    }

    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.items_per_page = items_per_page.max(1);
        self.current_page = 1;
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    /// Derive the currently visible page from the full collection.
    /// Pure with respect to `tasks`; the collection is never mutated.
    pub fn visible_page(&self, tasks: &[Task]) -> TaskPage {
        let filtered = self.query.filter(tasks);
        paginate(&filtered, self.current_page, self.items_per_page)
    }
}
