// rest/routes/tasks.rs — Task CRUD routes.
//
// Every response uses the `{success, data|error}` envelope. Store validation
// errors map to 400, unknown ids to 404; persistence never surfaces here.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::store::{StoreError, TaskInput};
use crate::AppContext;

type RestError = (StatusCode, Json<Value>);

fn error_body(status: StatusCode, message: &str) -> RestError {
    (status, Json(json!({ "success": false, "error": message })))
}

fn store_error(err: StoreError) -> RestError {
    let status = if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::BAD_REQUEST
    };
    error_body(status, &err.to_string())
}

pub async fn list_tasks(State(ctx): State<Arc<AppContext>>) -> Json<Value> {
    let tasks = ctx.store.list().await;
    Json(json!({ "success": true, "data": tasks }))
}

pub async fn get_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, RestError> {
    match ctx.store.get(&id).await {
        Some(task) => Ok(Json(json!({ "success": true, "data": task }))),
        None => Err(error_body(
            StatusCode::NOT_FOUND,
            &format!("task {id} not found"),
        )),
    }
}

pub async fn create_task(
    State(ctx): State<Arc<AppContext>>,
    body: Result<Json<TaskInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), RestError> {
    let Json(input) = body.map_err(|_| error_body(StatusCode::BAD_REQUEST, "invalid json body"))?;
    match ctx.store.create(input).await {
        Ok(task) => Ok((
            StatusCode::CREATED,
            Json(json!({ "success": true, "data": task })),
        )),
        Err(err) => Err(store_error(err)),
    }
}

pub async fn update_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    body: Result<Json<TaskInput>, JsonRejection>,
) -> Result<Json<Value>, RestError> {
    let Json(input) = body.map_err(|_| error_body(StatusCode::BAD_REQUEST, "invalid json body"))?;
    match ctx.store.update(&id, input).await {
        Ok(task) => Ok(Json(json!({ "success": true, "data": task }))),
        Err(err) => Err(store_error(err)),
    }
}

pub async fn delete_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, RestError> {
    if ctx.store.delete(&id).await {
        Ok(Json(json!({ "success": true })))
    } else {
        Err(error_body(
            StatusCode::NOT_FOUND,
            &format!("task {id} not found"),
        ))
    }
}
