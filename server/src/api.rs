//! REST handlers for `/api/todos`.
//!
//! # Design
//! Path ids arrive as raw strings and are read like a leading-integer parse:
//! optional leading whitespace and `+`, then the digit run, ignoring any tail
//! (`3abc` and `2.0` resolve to 3 and 2). A token with no leading digits is
//! reported the same way as an id that matches nothing:
//! `404 "<token> is not found."`.
//! Bodies are taken as `serde_json::Value` and validated here, which keeps
//! every failure (including malformed JSON) in the uniform `{error}` shape.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::AppError;
use crate::store::{Todo, TodoPatch};
use crate::AppState;

pub const TODOS: &str = "/api/todos";
pub const TODO_ITEM: &str = "/api/todos/{id}";

/// Body of a successful delete: the id token exactly as it appeared in the path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deleted {
    pub id: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(TODOS, get(list_todos).post(create_todo))
        .route(
            TODO_ITEM,
            get(get_todo).put(update_todo).delete(delete_todo),
        )
}

fn parse_id(token: &str) -> Result<u64, AppError> {
    let rest = token.trim_start();
    let rest = rest.strip_prefix('+').unwrap_or(rest);
    let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    rest[..end]
        .parse::<u64>()
        .map_err(|_| AppError::not_found(token))
}

/// Pull a non-empty string `title` out of a create payload.
fn required_title(body: &Value) -> Result<String, AppError> {
    match body.get("title") {
        Some(Value::String(title)) if !title.is_empty() => Ok(title.clone()),
        _ => Err(AppError::InvalidArgument("title is required".to_string())),
    }
}

/// Build a patch from an update payload. Only `title` and `completed` are
/// mutable; `id` and unknown keys are ignored.
fn parse_patch(body: &Value) -> Result<TodoPatch, AppError> {
    let object = body.as_object().ok_or_else(|| {
        AppError::InvalidArgument("request body must be a JSON object".to_string())
    })?;

    let title = match object.get("title") {
        None => None,
        Some(Value::String(title)) if !title.is_empty() => Some(title.clone()),
        Some(_) => {
            return Err(AppError::InvalidArgument(
                "title must be a non-empty string".to_string(),
            ))
        }
    };
    let completed = match object.get("completed") {
        None => None,
        Some(Value::Bool(completed)) => Some(*completed),
        Some(_) => {
            return Err(AppError::InvalidArgument(
                "completed must be a boolean".to_string(),
            ))
        }
    };

    Ok(TodoPatch { title, completed })
}

async fn list_todos(State(state): State<AppState>) -> Json<Vec<Todo>> {
    let store = state.db.read().await;
    debug!(count = store.list().len(), "listing todos");
    Json(store.list().to_vec())
}

async fn get_todo(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Todo>, AppError> {
    let Path(token) = path?;
    let id = parse_id(&token)?;
    let store = state.db.read().await;
    store
        .get(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::not_found(&token))
}

async fn create_todo(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), AppError> {
    let Json(body) = payload?;
    let title = required_title(&body)?;
    let todo = state.db.write().await.create(title);
    info!(id = todo.id, title = %todo.title, completed = todo.completed, "added new todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Todo>, AppError> {
    let Path(token) = path?;
    let id = parse_id(&token)?;
    let mut store = state.db.write().await;
    if store.get(id).is_none() {
        return Err(AppError::not_found(&token));
    }

    let Json(body) = payload?;
    let patch = parse_patch(&body)?;
    let todo = store
        .update(id, patch)
        .ok_or_else(|| AppError::not_found(&token))?;
    info!(id = todo.id, title = %todo.title, completed = todo.completed, "updated todo");
    Ok(Json(todo))
}

async fn delete_todo(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Deleted>, AppError> {
    let Path(token) = path?;
    let id = parse_id(&token)?;
    state
        .db
        .write()
        .await
        .delete(id)
        .ok_or_else(|| AppError::not_found(&token))?;
    info!(id = %token, "deleted todo");
    Ok(Json(Deleted { id: token }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_id_accepts_padded_integers() {
        assert_eq!(parse_id(" 3 ").unwrap(), 3);
    }

    #[test]
    fn parse_id_reads_the_leading_digits() {
        assert_eq!(parse_id("3abc").unwrap(), 3);
        assert_eq!(parse_id("2.0").unwrap(), 2);
        assert_eq!(parse_id("+4").unwrap(), 4);
    }

    #[test]
    fn parse_id_without_leading_digits_is_not_found() {
        for token in ["", "-1", "a3", ".5"] {
            assert!(
                matches!(parse_id(token), Err(AppError::NotFound(_))),
                "{token:?}"
            );
        }
    }

    #[test]
    fn parse_id_rejects_garbage_as_not_found() {
        let err = parse_id("abc").unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "abc is not found."));
    }

    #[test]
    fn required_title_rejects_missing_empty_and_non_string() {
        for body in [json!({}), json!({"title": ""}), json!({"title": 5}), json!([])] {
            let err = required_title(&body).unwrap_err();
            assert_eq!(err.to_string(), "title is required");
        }
    }

    #[test]
    fn required_title_ignores_other_fields() {
        let title = required_title(&json!({"title": "新規", "completed": true, "id": 1})).unwrap();
        assert_eq!(title, "新規");
    }

    #[test]
    fn parse_patch_drops_id_and_unknown_keys() {
        let patch = parse_patch(&json!({"id": 42, "completed": true, "color": "red"})).unwrap();
        assert_eq!(
            patch,
            TodoPatch {
                title: None,
                completed: Some(true),
            }
        );
    }

    #[test]
    fn parse_patch_rejects_wrong_types() {
        assert!(parse_patch(&json!({"completed": "yes"})).is_err());
        assert!(parse_patch(&json!({"title": 1})).is_err());
        assert!(parse_patch(&json!({"title": ""})).is_err());
        assert!(parse_patch(&json!("not an object")).is_err());
    }

    #[test]
    fn parse_patch_accepts_empty_object() {
        assert_eq!(parse_patch(&json!({})).unwrap(), TodoPatch::default());
    }
}
