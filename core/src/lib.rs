//! Client core for the todo service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and keeps a rendered
//! `TodoView` in step with what the server reports.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only the endpoint URL.
//! - `TodoSync` pairs a client with a view and exposes the list's four user
//!   actions (load, create, update, delete) as `begin_*` / `finish_*` steps.
//! - Wire types are defined independently from the server crate; the
//!   integration test catches schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod sync;
pub mod types;
pub mod view;

pub use client::TodoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use sync::{LoadTicket, TodoForm, TodoSync};
pub use types::{CreateTodo, Deleted, Todo, UpdateTodo};
pub use view::{Row, TodoView};
