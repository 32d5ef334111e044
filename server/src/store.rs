use std::sync::{PoisonError, RwLock};

use thiserror::Error;
use todo_board_shared::{CreateTaskRequest, Task, TaskId, UpdateTaskRequest};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Task is required")]
    EmptyTask,

    #[error("Todo not found")]
    NotFound(TaskId),
}

/// Process-local task collection, kept in insertion order.
#[derive(Debug, Default)]
pub struct TodoStore {
    todos: RwLock<Vec<Task>>,
}

impl TodoStore {
    pub fn list(&self) -> Vec<Task> {
        self.todos
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn create(&self, request: CreateTaskRequest) -> Result<Task, StoreError> {
        if request.task.trim().is_empty() {
            return Err(StoreError::EmptyTask);
        }

        let todo = Task {
            id: TaskId::generate(),
            task: request.task,
            goal: request.goal,
            break_hours: request.break_hours,
            completed: false,
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        self.todos
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(todo.clone());
        Ok(todo)
    }

    pub fn update(&self, id: &TaskId, request: UpdateTaskRequest) -> Result<Task, StoreError> {
        if request
            .task
            .as_deref()
            .is_some_and(|task| task.trim().is_empty())
        {
            return Err(StoreError::EmptyTask);
        }

        let mut todos = self.todos.write().unwrap_or_else(PoisonError::into_inner);
        let todo = todos
            .iter_mut()
            .find(|todo| &todo.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        if let Some(completed) = request.completed {
            todo.completed = completed;
        }
        if let Some(task) = request.task {
            todo.task = task;
        }
        if let Some(goal) = request.goal {
            todo.goal = goal;
        }
        if let Some(break_hours) = request.break_hours {
            todo.break_hours = break_hours;
        }

        Ok(todo.clone())
    }

    /// Returns whether a task was removed. Deleting an unknown id is not an error.
    pub fn delete(&self, id: &TaskId) -> bool {
        let mut todos = self.todos.write().unwrap_or_else(PoisonError::into_inner);
        let before = todos.len();
        todos.retain(|todo| &todo.id != id);
        todos.len() != before
    }
}
