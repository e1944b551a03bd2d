//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only the endpoint URL. Each CRUD operation is split into
//! a `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`; the caller runs the round-trip in between.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodo, Deleted, ErrorBody, Todo, UpdateTodo};

/// Path of the todo collection, relative to the server root.
pub const TODOS_PATH: &str = "/api/todos";

#[derive(Debug, Clone)]
pub struct TodoClient {
    endpoint: String,
}

impl TodoClient {
    /// `base_url` is the server root, e.g. `http://localhost:8080`.
    pub fn new(base_url: &str) -> Self {
        Self {
            endpoint: format!("{}{TODOS_PATH}", base_url.trim_end_matches('/')),
        }
    }

    fn item_url(&self, id: u64) -> String {
        format!("{}/{id}", self.endpoint)
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        HttpRequest::bare(HttpMethod::Get, self.endpoint.clone())
    }

    pub fn build_get_todo(&self, id: u64) -> HttpRequest {
        HttpRequest::bare(HttpMethod::Get, self.item_url(id))
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest::json(HttpMethod::Post, self.endpoint.clone(), body))
    }

    pub fn build_update_todo(&self, id: u64, input: &UpdateTodo) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest::json(HttpMethod::Put, self.item_url(id), body))
    }

    pub fn build_delete_todo(&self, id: u64) -> HttpRequest {
        HttpRequest::bare(HttpMethod::Delete, self.item_url(id))
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        decode(&response, 200)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        decode(&response, 200)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        decode(&response, 201)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        decode(&response, 200)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<Deleted, ApiError> {
        decode(&response, 200)
    }
}

fn decode<T: DeserializeOwned>(response: &HttpResponse, expected: u16) -> Result<T, ApiError> {
    check_status(response, expected)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    let message = serde_json::from_str::<ErrorBody>(&response.body)
        .map(|b| b.error)
        .unwrap_or_else(|_| response.body.clone());
    if response.status == 404 {
        return Err(ApiError::NotFound(message));
    }
    Err(ApiError::HttpError {
        status: response.status,
        message,
    })
}
