use serde::{Deserialize, Serialize};

use super::task::{Priority, Status, Task};

/// Status criterion for the task list. `All` passes everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl StatusFilter {
    pub fn matches(&self, status: Status) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => status == Status::Pending,
            StatusFilter::Completed => status == Status::Completed,
        }
    }
}

/// Priority criterion for the task list. `All` passes everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityFilter {
    #[default]
    All,
    High,
    Medium,
    Low,
}

impl PriorityFilter {
    pub fn matches(&self, priority: Priority) -> bool {
        match self {
            PriorityFilter::All => true,
            PriorityFilter::High => priority == Priority::High,
            PriorityFilter::Medium => priority == Priority::Medium,
            PriorityFilter::Low => priority == Priority::Low,
        }
    }
}

/// Active filter criteria. Filters apply in a fixed order: status,
/// then priority, then text search; a task must pass all three.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskQuery {
    pub status: StatusFilter,
    pub priority: PriorityFilter,
    pub search: String,
}

impl TaskQuery {
    pub fn matches(&self, task: &Task) -> bool {
        if !self.status.matches(task.status) {
            return false;
        }
        if !self.priority.matches(task.priority) {
            return false;
        }
        if !self.search.is_empty() {
            let query = self.search.to_lowercase();
            let in_title = task.title.to_lowercase().contains(&query);
            let in_description = task
                .description
                .as_ref()
                .map(|d| d.to_lowercase().contains(&query))
                .unwrap_or(false);
            return in_title || in_description;
        }
        true
    }

    /// Derive the filtered subset, preserving the input order.
    pub fn filter(&self, tasks: &[Task]) -> Vec<Task> {
        tasks
            .iter()
            .filter(|task| self.matches(task))
            .cloned()
            .collect()
    }
}

/// One bounded-size slice of the filtered set.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskPage {
    pub items: Vec<Task>,
    pub current_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Slice `filtered` into the 1-based page `current_page` of size
/// `items_per_page`. An empty filtered set has zero pages; a page past
/// the end yields an empty slice.
pub fn paginate(filtered: &[Task], current_page: usize, items_per_page: usize) -> TaskPage {
    let total_items = filtered.len();
    let total_pages = if items_per_page == 0 {
        0
    } else {
        total_items.div_ceil(items_per_page)
    };

    let start = current_page.saturating_sub(1).saturating_mul(items_per_page);
    let end = start.saturating_add(items_per_page).min(total_items);
    let items = if start < total_items {
        filtered[start..end].to_vec()
    } else {
        Vec::new()
    };

    TaskPage {
        items,
        current_page,
        total_items,
        total_pages,
    }
}

/// Counts derived from the full collection, independent of any filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// High-priority tasks that are still pending.
    pub high_priority: usize,
}

impl TaskStats {
    pub fn collect(tasks: &[Task]) -> Self {
        let mut stats = TaskStats {
            total: tasks.len(),
            ..Default::default()
        };
        for task in tasks {
            match task.status {
                Status::Completed => stats.completed += 1,
                Status::Pending => stats.pending += 1,
            }
            if task.priority == Priority::High && task.status == Status::Pending {
                stats.high_priority += 1;
            }
        }
        stats
    }
}
