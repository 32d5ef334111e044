//! The task board view-model: a local mirror of the remote collection, the
//! draft bound to the form, and the `submitting` gate on the create button.
//!
//! Every operation is split in two. A `begin_*` method inspects local state
//! and returns the [`Request`] to issue (or nothing); once the request has
//! been sent, [`TaskBoard::apply`] folds the resulting [`Outcome`] back in.
//! The terminal loop spawns requests and applies outcomes as they arrive,
//! while the async helpers (`load`, `create`, ...) run both halves in
//! sequence.

use log::{debug, error};
use todo_board_shared::{CreateTaskRequest, Task, TaskId, UpdateTaskRequest};

use crate::api::TaskService;
use crate::error::{ApiError, DraftError};
use crate::notify::Notifier;

pub const CREATE_REJECTED_ALERT: &str = "Failed to create todo";
pub const CREATE_TRANSPORT_ALERT: &str = "Error creating todo. Make sure the backend is running!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Task,
    Goal,
    BreakHours,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Draft {
    pub task: String,
    pub goal: String,
    pub break_hours: String,
}

impl Draft {
    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Task => &self.task,
            DraftField::Goal => &self.goal,
            DraftField::BreakHours => &self.break_hours,
        }
    }

    pub fn field_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::Task => &mut self.task,
            DraftField::Goal => &mut self.goal,
            DraftField::BreakHours => &mut self.break_hours,
        }
    }

    pub fn validate(&self) -> Result<CreateTaskRequest, DraftError> {
        if self.task.trim().is_empty() {
            return Err(DraftError::EmptyTask);
        }

        Ok(CreateTaskRequest {
            task: self.task.clone(),
            goal: self.goal.clone(),
            break_hours: self.break_hours.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    List,
    Create(CreateTaskRequest),
    Update(TaskId, UpdateTaskRequest),
    Delete(TaskId),
}

impl Request {
    pub async fn send<S: TaskService>(self, service: &S) -> Outcome {
        match self {
            Request::List => Outcome::Loaded(service.list().await),
            Request::Create(request) => Outcome::Created(service.create(request).await),
            Request::Update(id, request) => {
                let result = service.update(id.clone(), request).await;
                Outcome::Toggled(id, result)
            }
            Request::Delete(id) => {
                let result = service.delete(id.clone()).await;
                Outcome::Deleted(id, result)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Loaded(Result<Vec<Task>, ApiError>),
    Created(Result<Task, ApiError>),
    Toggled(TaskId, Result<Task, ApiError>),
    Deleted(TaskId, Result<(), ApiError>),
}

#[derive(Debug)]
pub struct TaskBoard<N> {
    tasks: Vec<Task>,
    draft: Draft,
    submitting: bool,
    notifier: N,
}

impl<N: Notifier> TaskBoard<N> {
    pub fn new(notifier: N) -> Self {
        Self {
            tasks: Vec::new(),
            draft: Draft::default(),
            submitting: false,
            notifier,
        }
    }

    /// Builds the board and loads the collection once.
    pub async fn mount<S: TaskService>(notifier: N, service: &S) -> Self {
        let mut board = Self::new(notifier);
        board.load(service).await;
        board
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Validates the draft and raises the `submitting` gate. Returns `None`
    /// when a create is already in flight or the task text is blank.
    pub fn begin_create(&mut self) -> Option<Request> {
        if self.submitting {
            debug!("create ignored while another is in flight");
            return None;
        }

        match self.draft.validate() {
            Ok(request) => {
                self.submitting = true;
                Some(Request::Create(request))
            }
            Err(err) => {
                self.notifier.notify(&err.to_string());
                None
            }
        }
    }

    pub fn begin_toggle(&self, id: &TaskId) -> Option<Request> {
        let Some(task) = self.task(id) else {
            debug!("toggle ignored for unknown todo {id}");
            return None;
        };

        Some(Request::Update(
            id.clone(),
            UpdateTaskRequest::completion(!task.completed),
        ))
    }

    pub fn begin_delete(&self, id: &TaskId) -> Request {
        Request::Delete(id.clone())
    }

    pub fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Loaded(Ok(tasks)) => self.tasks = tasks,
            Outcome::Loaded(Err(err)) => error!("Error fetching todos: {err}"),
            Outcome::Created(result) => self.finish_create(result),
            Outcome::Toggled(id, Ok(updated)) => {
                self.tasks = self
                    .tasks
                    .iter()
                    .map(|task| {
                        if task.id == id {
                            updated.clone()
                        } else {
                            task.clone()
                        }
                    })
                    .collect();
            }
            Outcome::Toggled(id, Err(err)) => error!("Error updating todo {id}: {err}"),
            Outcome::Deleted(id, Ok(())) => {
                self.tasks = self
                    .tasks
                    .iter()
                    .filter(|task| task.id != id)
                    .cloned()
                    .collect();
            }
            Outcome::Deleted(id, Err(err)) => error!("Error deleting todo {id}: {err}"),
        }
    }

    fn finish_create(&mut self, result: Result<Task, ApiError>) {
        self.submitting = false;

        match result {
            Ok(task) => {
                self.tasks = self
                    .tasks
                    .iter()
                    .cloned()
                    .chain(std::iter::once(task))
                    .collect();
                self.draft = Draft::default();
            }
            Err(err @ ApiError::Rejected(_)) => {
                error!("Error creating todo: {err}");
                self.notifier.notify(CREATE_REJECTED_ALERT);
            }
            Err(err @ ApiError::Transport(_)) => {
                error!("Error creating todo: {err}");
                self.notifier.notify(CREATE_TRANSPORT_ALERT);
            }
        }
    }

    pub async fn load<S: TaskService>(&mut self, service: &S) {
        self.round_trip(Some(Request::List), service).await;
    }

    pub async fn create<S: TaskService>(&mut self, service: &S) {
        let request = self.begin_create();
        self.round_trip(request, service).await;
    }

    pub async fn toggle_complete<S: TaskService>(&mut self, id: &TaskId, service: &S) {
        let request = self.begin_toggle(id);
        self.round_trip(request, service).await;
    }

    pub async fn delete<S: TaskService>(&mut self, id: &TaskId, service: &S) {
        let request = self.begin_delete(id);
        self.round_trip(Some(request), service).await;
    }

    async fn round_trip<S: TaskService>(&mut self, request: Option<Request>, service: &S) {
        if let Some(request) = request {
            let outcome = request.send(service).await;
            self.apply(outcome);
        }
    }
}
