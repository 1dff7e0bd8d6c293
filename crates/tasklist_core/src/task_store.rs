use crate::error::AppError;
use crate::model::Task;
use crate::storage::json_store;
use std::path::Path;

/// Replacement values for [`TaskStore::update`]. `None` and empty strings both leave the
/// field as it is.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TaskUpdate {
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(usize),
    NotFound,
}

/// Ordered, in-memory task list. A task's position is its index; indices shift on delete.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn add<D: Into<String>>(
        &mut self,
        description: D,
        due_date: Option<String>,
        priority: Option<String>,
    ) -> &Task {
        let index = self.tasks.len();
        self.tasks.push(Task::new(description, due_date, priority));
        tracing::debug!(index, "task added");
        &self.tasks[index]
    }

    /// One rendered line per task, numbered from 1.
    pub fn view(&self) -> impl Iterator<Item = String> + '_ {
        self.tasks.iter().enumerate().map(|(index, task)| {
            let due_date = task.due_date.as_deref().unwrap_or("No due date");
            format!(
                "{}. [{}] {} (Due: {}, Priority: {})",
                index + 1,
                task.status_marker(),
                task.description,
                due_date,
                task.priority
            )
        })
    }

    pub fn update(&mut self, index: isize, changes: TaskUpdate) -> Result<&Task, AppError> {
        let position = self.position(index)?;
        let task = &mut self.tasks[position];

        if let Some(description) = non_empty(changes.description) {
            task.description = description;
        }
        if let Some(due_date) = non_empty(changes.due_date) {
            task.due_date = Some(due_date);
        }
        if let Some(priority) = non_empty(changes.priority) {
            task.priority = priority;
        }

        tracing::debug!(index = position, "task updated");
        Ok(&*task)
    }

    pub fn complete(&mut self, index: isize) -> Result<&Task, AppError> {
        let position = self.position(index)?;
        let task = &mut self.tasks[position];
        task.completed = true;

        tracing::debug!(index = position, "task completed");
        Ok(&*task)
    }

    pub fn delete(&mut self, index: isize) -> Result<Task, AppError> {
        let position = self.position(index)?;
        let removed = self.tasks.remove(position);

        tracing::debug!(index = position, remaining = self.tasks.len(), "task deleted");
        Ok(removed)
    }

    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        json_store::write_tasks(path, &self.tasks)?;
        tracing::info!(path = %path.display(), count = self.tasks.len(), "tasks saved");
        Ok(())
    }

    /// Replaces the whole list with the file's contents. A missing file leaves the store
    /// untouched, as does any error.
    pub fn load(&mut self, path: &Path) -> Result<LoadOutcome, AppError> {
        match json_store::read_tasks(path)? {
            Some(tasks) => {
                let count = tasks.len();
                self.tasks = tasks;
                tracing::info!(path = %path.display(), count, "tasks loaded");
                Ok(LoadOutcome::Loaded(count))
            }
            None => {
                tracing::info!(path = %path.display(), "no task file");
                Ok(LoadOutcome::NotFound)
            }
        }
    }

    fn position(&self, index: isize) -> Result<usize, AppError> {
        usize::try_from(index)
            .ok()
            .filter(|position| *position < self.tasks.len())
            .ok_or(AppError::InvalidIndex {
                index,
                len: self.tasks.len(),
            })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}
