use std::sync::{Arc, Mutex};

use reqwest::StatusCode;
use todo_board_shared::{CreateTaskRequest, Task, TaskId, UpdateTaskRequest};

use crate::api::TaskService;
use crate::error::ApiError;
use crate::notify::Notifier;

pub fn task(id: &str, text: &str) -> Task {
    Task {
        id: TaskId::new(id),
        task: text.into(),
        goal: String::new(),
        break_hours: String::new(),
        completed: false,
        created_at: "2024-01-01T09:00:00Z".into(),
    }
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub messages: Vec<String>,
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

#[derive(Debug, Default)]
struct StubState {
    tasks: Vec<Task>,
    failure: Option<ApiError>,
    calls: usize,
    created: usize,
}

/// In-memory stand-in for the remote collection. Every call is counted;
/// while a failure is set, every call returns it.
#[derive(Debug, Clone, Default)]
pub struct StubService {
    state: Arc<Mutex<StubState>>,
}

impl StubService {
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let service = Self::default();
        service.state.lock().unwrap().tasks = tasks;
        service
    }

    pub fn fail_with(&self, err: ApiError) {
        self.state.lock().unwrap().failure = Some(err);
    }

    pub fn calls(&self) -> usize {
        self.state.lock().unwrap().calls
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.state.lock().unwrap().tasks.clone()
    }

    fn begin(&self) -> Result<std::sync::MutexGuard<'_, StubState>, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        match state.failure.clone() {
            Some(err) => Err(err),
            None => Ok(state),
        }
    }
}

impl TaskService for StubService {
    async fn list(&self) -> Result<Vec<Task>, ApiError> {
        Ok(self.begin()?.tasks.clone())
    }

    async fn create(&self, request: CreateTaskRequest) -> Result<Task, ApiError> {
        let mut state = self.begin()?;
        if request.task.trim().is_empty() {
            return Err(ApiError::Rejected(StatusCode::BAD_REQUEST));
        }

        state.created += 1;
        let created = Task {
            id: TaskId::new(format!("created-{}", state.created)),
            task: request.task,
            goal: request.goal,
            break_hours: request.break_hours,
            completed: false,
            created_at: "2024-01-02T10:30:00Z".into(),
        };
        state.tasks.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: TaskId, request: UpdateTaskRequest) -> Result<Task, ApiError> {
        let mut state = self.begin()?;
        let task = state
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(ApiError::Rejected(StatusCode::NOT_FOUND))?;
        if let Some(completed) = request.completed {
            task.completed = completed;
        }
        Ok(task.clone())
    }

    async fn delete(&self, id: TaskId) -> Result<(), ApiError> {
        let mut state = self.begin()?;
        state.tasks.retain(|task| task.id != id);
        Ok(())
    }
}
