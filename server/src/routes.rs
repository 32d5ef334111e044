use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{delete, get, post, put, web, HttpResponse, Responder, ResponseError};
use log::{debug, info};
use todo_board_shared::{
    CreateTaskRequest, ErrorBody, HealthStatus, MessageBody, TaskId, UpdateTaskRequest,
};

use crate::store::{StoreError, TodoStore};

impl ResponseError for StoreError {
    fn status_code(&self) -> StatusCode {
        match self {
            StoreError::EmptyTask => StatusCode::BAD_REQUEST,
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ErrorBody {
            error: err.to_string(),
        });
        InternalError::from_response(err, response).into()
    });

    cfg.app_data(json_config).service(
        web::scope("/api")
            .service(list_todos)
            .service(create_todo)
            .service(update_todo)
            .service(delete_todo)
            .service(health),
    );
}

#[get("/todos")]
async fn list_todos(store: web::Data<TodoStore>) -> impl Responder {
    HttpResponse::Ok().json(store.list())
}

#[post("/todos")]
async fn create_todo(
    store: web::Data<TodoStore>,
    body: web::Json<CreateTaskRequest>,
) -> Result<HttpResponse, StoreError> {
    let todo = store.create(body.into_inner())?;
    info!("created todo {}", todo.id);
    Ok(HttpResponse::Created().json(todo))
}

#[put("/todos/{id}")]
async fn update_todo(
    store: web::Data<TodoStore>,
    path: web::Path<String>,
    body: web::Json<UpdateTaskRequest>,
) -> Result<HttpResponse, StoreError> {
    let id = TaskId::new(path.into_inner());
    let todo = store.update(&id, body.into_inner())?;
    info!("updated todo {} (completed: {})", todo.id, todo.completed);
    Ok(HttpResponse::Ok().json(todo))
}

#[delete("/todos/{id}")]
async fn delete_todo(store: web::Data<TodoStore>, path: web::Path<String>) -> impl Responder {
    let id = TaskId::new(path.into_inner());
    if store.delete(&id) {
        info!("deleted todo {id}");
    } else {
        debug!("delete of unknown todo {id}");
    }

    HttpResponse::Ok().json(MessageBody {
        message: "Todo deleted".to_string(),
    })
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthStatus {
        status: "healthy".to_string(),
    })
}
