//! Todo service: an in-memory store behind a small REST API, plus a few
//! read-only pages rendered from fixed data.
//!
//! # Design
//! - The store is an explicit `TodoStore` shared as `Arc<RwLock<_>>` through
//!   axum state, so each `app()` gets its own independent data set.
//! - All API failures go through `AppError`, which renders `{"error": message}`.

pub mod api;
pub mod config;
pub mod error;
pub mod pages;
pub mod store;

use std::sync::Arc;

use axum::Router;
use tokio::{net::TcpListener, sync::RwLock};

pub use api::Deleted;
pub use config::{DisplayConfig, ServerConfig, SiteData, UserProfile};
pub use error::AppError;
pub use store::{Todo, TodoPatch, TodoStore};

pub type Db = Arc<RwLock<TodoStore>>;

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub site: Arc<SiteData>,
}

/// Router over the seeded store and default page data.
pub fn app() -> Router {
    app_with(TodoStore::seeded(), SiteData::default())
}

pub fn app_with(store: TodoStore, site: SiteData) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(store)),
        site: Arc::new(site),
    };
    Router::new()
        .merge(api::routes())
        .merge(pages::routes())
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}
