//! Task command handlers
//!
//! Each command calls the tasks API through [`AppState`] and prints the
//! result to stdout. Failures have already been shown as notifications by
//! the client and are only propagated here.

use std::fmt::Write as _;

use crate::error::AppResult;
use crate::external::tasks::{NewTask, Task, TaskList, TaskQuery, TaskUpdate};
use crate::state::AppState;

/// Handler for list, show, create, update, delete and complete
pub struct TaskCommandHandler {
    state: AppState,
}

impl TaskCommandHandler {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn list(&self, query: TaskQuery) -> AppResult<()> {
        let list = self.state.tasks.get_tasks(&query).await?;
        print!("{}", format_task_list(&list, &query));
        Ok(())
    }

    pub async fn show(&self, id: i32) -> AppResult<()> {
        let task = self.state.tasks.get_task(id).await?;
        print!("{}", format_task_details(&task));
        Ok(())
    }

    pub async fn create(&self, task: NewTask) -> AppResult<()> {
        let task = self.state.tasks.create_task(&task).await?;
        println!("{}", format_task_line(&task));
        Ok(())
    }

    pub async fn update(&self, id: i32, update: TaskUpdate) -> AppResult<()> {
        let task = self.state.tasks.update_task(id, &update).await?;
        println!("{}", format_task_line(&task));
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.state.tasks.delete_task(id).await?;
        println!("Deleted task {}", id);
        Ok(())
    }

    pub async fn complete(&self, id: i32) -> AppResult<()> {
        let task = self.state.tasks.complete_task(id).await?;
        println!("{}", format_task_line(&task));
        Ok(())
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// `#7 [x] Write report`
pub fn format_task_line(task: &Task) -> String {
    format!(
        "#{} [{}] {}",
        task.id,
        if task.is_completed { 'x' } else { ' ' },
        task.title
    )
}

/// One line per task followed by a range summary
pub fn format_task_list(list: &TaskList, query: &TaskQuery) -> String {
    let mut out = String::new();

    if list.tasks.is_empty() {
        let _ = writeln!(out, "No tasks found ({} total)", list.total);
        return out;
    }

    for task in &list.tasks {
        let _ = writeln!(out, "{}", format_task_line(task));
    }

    let first = u64::from(query.skip) + 1;
    let last = u64::from(query.skip) + list.tasks.len() as u64;
    let _ = writeln!(out, "Showing {}-{} of {} tasks", first, last, list.total);
    out
}

/// Every field of a task, one per line
pub fn format_task_details(task: &Task) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", format_task_line(task));
    if let Some(ref description) = task.description {
        let _ = writeln!(out, "  {}", description);
    }
    if let Some(created_at) = task.created_at {
        let _ = writeln!(out, "  created: {}", created_at.strftime("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(updated_at) = task.updated_at {
        let _ = writeln!(out, "  updated: {}", updated_at.strftime("%Y-%m-%d %H:%M:%S"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    fn task(id: i32, title: &str, done: bool) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: None,
            is_completed: done,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_task_line() {
        assert_eq!(format_task_line(&task(7, "Write report", true)), "#7 [x] Write report");
        assert_eq!(format_task_line(&task(8, "Review", false)), "#8 [ ] Review");
    }

    #[test]
    fn test_task_list_with_paging_summary() {
        let list = TaskList {
            tasks: vec![task(12, "B", false), task(11, "A", true)],
            total: 42,
        };
        let query = TaskQuery {
            skip: 10,
            limit: 2,
            completed: None,
        };

        assert_eq!(
            format_task_list(&list, &query),
            "#12 [ ] B\n#11 [x] A\nShowing 11-12 of 42 tasks\n"
        );
    }

    #[test]
    fn test_empty_task_list() {
        let list = TaskList {
            tasks: Vec::new(),
            total: 0,
        };
        assert_eq!(
            format_task_list(&list, &TaskQuery::default()),
            "No tasks found (0 total)\n"
        );
    }

    #[test]
    fn test_task_details() {
        let mut task = task(3, "Plan", false);
        task.description = Some("Sprint 14".to_string());
        task.created_at = Some(date(2024, 5, 2).at(8, 30, 0, 500_000_000));

        assert_eq!(
            format_task_details(&task),
            "#3 [ ] Plan\n  Sprint 14\n  created: 2024-05-02 08:30:00\n"
        );
    }
}
