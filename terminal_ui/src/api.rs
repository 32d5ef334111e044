use std::future::Future;

use reqwest::{Client, RequestBuilder, Response};
use todo_board_shared::{CreateTaskRequest, Task, TaskId, UpdateTaskRequest};
use url::Url;

use crate::error::ApiError;

/// The remote task collection, as seen by the board.
pub trait TaskService: Send + Sync {
    fn list(&self) -> impl Future<Output = Result<Vec<Task>, ApiError>> + Send;

    fn create(
        &self,
        request: CreateTaskRequest,
    ) -> impl Future<Output = Result<Task, ApiError>> + Send;

    fn update(
        &self,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> impl Future<Output = Result<Task, ApiError>> + Send;

    fn delete(&self, id: TaskId) -> impl Future<Output = Result<(), ApiError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpTaskService {
    client: Client,
    base: Url,
}

impl HttpTaskService {
    pub fn new(base: Url) -> Self {
        Self {
            client: Client::new(),
            base,
        }
    }

    fn endpoint(&self, id: Option<&TaskId>) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ApiError::Transport(format!("{} cannot be a base URL", self.base)))?;
            segments.pop_if_empty().push("todos");
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        Ok(url)
    }
}

async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Rejected(status));
    }
    Ok(response)
}

impl TaskService for HttpTaskService {
    async fn list(&self) -> Result<Vec<Task>, ApiError> {
        let url = self.endpoint(None)?;
        let tasks = send(self.client.get(url)).await?.json().await?;
        Ok(tasks)
    }

    async fn create(&self, request: CreateTaskRequest) -> Result<Task, ApiError> {
        let url = self.endpoint(None)?;
        let task = send(self.client.post(url).json(&request)).await?.json().await?;
        Ok(task)
    }

    async fn update(&self, id: TaskId, request: UpdateTaskRequest) -> Result<Task, ApiError> {
        let url = self.endpoint(Some(&id))?;
        let task = send(self.client.put(url).json(&request)).await?.json().await?;
        Ok(task)
    }

    async fn delete(&self, id: TaskId) -> Result<(), ApiError> {
        let url = self.endpoint(Some(&id))?;
        send(self.client.delete(url)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn service(base: &str) -> HttpTaskService {
        let config = Config::from_vars(Some(base.into()), None).unwrap();
        HttpTaskService::new(config.api_url)
    }

    #[test]
    fn collection_endpoint_sits_under_base_path() {
        let service = service("http://localhost:5000/api");
        assert_eq!(
            service.endpoint(None).unwrap().as_str(),
            "http://localhost:5000/api/todos"
        );
    }

    #[test]
    fn item_endpoint_escapes_the_id() {
        let service = service("http://localhost:5000/api/");
        let id = TaskId::new("a b/c");
        assert_eq!(
            service.endpoint(Some(&id)).unwrap().as_str(),
            "http://localhost:5000/api/todos/a%20b%2Fc"
        );
    }

    #[test]
    fn root_base_works() {
        let service = service("http://localhost:5000");
        let id = TaskId::new("42");
        assert_eq!(
            service.endpoint(Some(&id)).unwrap().as_str(),
            "http://localhost:5000/todos/42"
        );
    }

    #[tokio::test]
    async fn unreachable_service_is_a_transport_failure() {
        let service = service("http://127.0.0.1:1/api");
        let err = service.list().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
