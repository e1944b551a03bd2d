//! Keeps a `TodoView` in step with the server.
//!
//! # Design
//! Each user action is a `begin_*` / `finish_*` pair around one round-trip,
//! the same host-does-IO split as `TodoClient`. Actions are independent:
//! nothing orders two in-flight requests except loads, which carry a
//! generation number so that a slow, superseded load cannot overwrite the
//! view after a newer one has been issued.
//!
//! Failures are logged and returned; the view is left as it was.

use tracing::{debug, error, warn};

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{CreateTodo, UpdateTodo};
use crate::view::{row_key, TodoView};

/// The page's input fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoForm {
    pub title: String,
    pub completed: bool,
    /// Target of update and delete, as typed.
    pub item_id: String,
}

impl TodoForm {
    /// The id that update and delete act on, or `None` when the field is
    /// blank or not a number.
    pub fn target_id(&self) -> Option<u64> {
        let raw = self.item_id.trim();
        if raw.is_empty() {
            return None;
        }
        match raw.parse::<u64>() {
            Ok(id) => Some(id),
            Err(_) => {
                warn!(item_id = raw, "ignoring non-numeric item id");
                None
            }
        }
    }

    fn update_payload(&self) -> UpdateTodo {
        UpdateTodo {
            title: (!self.title.trim().is_empty()).then(|| self.title.clone()),
            completed: Some(self.completed),
        }
    }
}

/// An issued list request and the generation it belongs to.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    pub generation: u64,
    pub request: HttpRequest,
}

#[derive(Debug, Clone)]
pub struct TodoSync {
    client: TodoClient,
    view: TodoView,
    load_generation: u64,
}

impl TodoSync {
    pub fn new(client: TodoClient) -> Self {
        Self {
            client,
            view: TodoView::new(),
            load_generation: 0,
        }
    }

    pub fn view(&self) -> &TodoView {
        &self.view
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_generation += 1;
        LoadTicket {
            generation: self.load_generation,
            request: self.client.build_list_todos(),
        }
    }

    /// Replace the view with the listed items, unless a newer load has been
    /// issued since `generation`.
    pub fn finish_load(&mut self, generation: u64, response: HttpResponse) -> Result<(), ApiError> {
        if generation < self.load_generation {
            debug!(generation, latest = self.load_generation, "dropping stale load");
            return Ok(());
        }
        let todos = self
            .client
            .parse_list_todos(response)
            .inspect_err(|e| error!(error = %e, "load failed"))?;
        debug!(count = todos.len(), "loaded todos");
        self.view.replace_all(&todos);
        Ok(())
    }

    /// Post the form's title as-is.
    pub fn begin_create(&self, form: &TodoForm) -> Result<HttpRequest, ApiError> {
        let input = CreateTodo {
            title: form.title.clone(),
        };
        self.client
            .build_create_todo(&input)
            .inspect_err(|e| error!(error = %e, "create failed"))
    }

    pub fn finish_create(&mut self, response: HttpResponse) -> Result<(), ApiError> {
        let todo = self
            .client
            .parse_create_todo(response)
            .inspect_err(|e| error!(error = %e, "create failed"))?;
        debug!(id = todo.id, "created todo");
        self.view.append(&todo);
        Ok(())
    }

    /// `None` when the form has no target id.
    pub fn begin_update(&self, form: &TodoForm) -> Result<Option<HttpRequest>, ApiError> {
        let Some(id) = form.target_id() else {
            return Ok(None);
        };
        self.client
            .build_update_todo(id, &form.update_payload())
            .map(Some)
            .inspect_err(|e| error!(error = %e, "update failed"))
    }

    pub fn finish_update(&mut self, response: HttpResponse) -> Result<(), ApiError> {
        let todo = self
            .client
            .parse_update_todo(response)
            .inspect_err(|e| error!(error = %e, "update failed"))?;
        if !self.view.overwrite(&todo) {
            warn!(id = todo.id, "updated todo has no row in the view");
        }
        Ok(())
    }

    /// `None` when the form has no target id.
    pub fn begin_delete(&self, form: &TodoForm) -> Option<HttpRequest> {
        form.target_id().map(|id| self.client.build_delete_todo(id))
    }

    pub fn finish_delete(&mut self, response: HttpResponse) -> Result<(), ApiError> {
        let deleted = self
            .client
            .parse_delete_todo(response)
            .inspect_err(|e| error!(error = %e, "delete failed"))?;
        if !self.view.remove(&row_key(deleted.id.trim())) {
            warn!(id = %deleted.id, "deleted todo has no row in the view");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;

    const SEEDED: &str = r#"[{"id":1,"title":"ネーム","completed":true},{"id":2,"title":"下書き","completed":false},{"id":3,"title":"清書","completed":false}]"#;

    fn loaded() -> TodoSync {
        let mut sync = TodoSync::new(TodoClient::new("http://localhost:8080"));
        let ticket = sync.begin_load();
        sync.finish_load(ticket.generation, HttpResponse::new(200, SEEDED)).unwrap();
        sync
    }

    fn texts(sync: &TodoSync) -> Vec<String> {
        sync.view().rows().iter().map(|r| r.text.clone()).collect()
    }

    #[test]
    fn load_renders_every_item() {
        let sync = loaded();
        assert_eq!(
            texts(&sync),
            vec!["1, ネーム, true", "2, 下書き, false", "3, 清書, false"]
        );
    }

    #[test]
    fn stale_load_is_dropped() {
        let mut sync = TodoSync::new(TodoClient::new("http://localhost:8080"));
        let first = sync.begin_load();
        let second = sync.begin_load();

        sync.finish_load(second.generation, HttpResponse::new(200, SEEDED)).unwrap();
        sync.finish_load(first.generation, HttpResponse::new(200, "[]")).unwrap();
        assert_eq!(sync.view().rows().len(), 3);
    }

    #[test]
    fn failed_load_leaves_view_unchanged() {
        let mut sync = loaded();
        let ticket = sync.begin_load();
        let err = sync
            .finish_load(ticket.generation, HttpResponse::new(200, "<html>"))
            .unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
        assert_eq!(sync.view().rows().len(), 3);
    }

    #[test]
    fn create_appends_and_keeps_form() {
        let mut sync = loaded();
        let form = TodoForm {
            title: "新規".to_string(),
            ..TodoForm::default()
        };
        let req = sync.begin_create(&form).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.body.as_deref(), Some(r#"{"title":"新規"}"#));

        sync.finish_create(HttpResponse::new(
            201,
            r#"{"id":4,"title":"新規","completed":false}"#,
        ))
        .unwrap();
        assert_eq!(texts(&sync).last().map(String::as_str), Some("4, 新規, false"));
        assert_eq!(form.title, "新規");
    }

    #[test]
    fn create_failure_leaves_view_unchanged() {
        let mut sync = loaded();
        let err = sync
            .finish_create(HttpResponse::new(400, r#"{"error":"title is required"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 400, .. }));
        assert_eq!(sync.view().rows().len(), 3);
    }

    #[test]
    fn update_without_target_is_noop() {
        let sync = loaded();
        let form = TodoForm {
            title: "x".to_string(),
            completed: true,
            item_id: "  ".to_string(),
        };
        assert!(sync.begin_update(&form).unwrap().is_none());
        assert!(sync.begin_delete(&form).is_none());
    }

    #[test]
    fn update_omits_blank_title() {
        let sync = loaded();
        let form = TodoForm {
            title: String::new(),
            completed: true,
            item_id: "2".to_string(),
        };
        let req = sync.begin_update(&form).unwrap().unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert!(req.url.ends_with("/api/todos/2"));
        assert_eq!(req.body.as_deref(), Some(r#"{"completed":true}"#));
    }

    #[test]
    fn update_omits_whitespace_only_title() {
        let sync = loaded();
        let form = TodoForm {
            title: "   ".to_string(),
            completed: false,
            item_id: "1".to_string(),
        };
        let req = sync.begin_update(&form).unwrap().unwrap();
        assert_eq!(req.body.as_deref(), Some(r#"{"completed":false}"#));
    }

    #[test]
    fn update_overwrites_existing_row() {
        let mut sync = loaded();
        sync.finish_update(HttpResponse::new(
            200,
            r#"{"id":2,"title":"下書き","completed":true}"#,
        ))
        .unwrap();
        assert_eq!(texts(&sync)[1], "2, 下書き, true");
    }

    #[test]
    fn update_not_found_is_reported() {
        let mut sync = loaded();
        let err = sync
            .finish_update(HttpResponse::new(404, r#"{"error":"9 is not found."}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(sync.view().rows().len(), 3);
    }

    #[test]
    fn delete_removes_row_for_echoed_id() {
        let mut sync = loaded();
        let form = TodoForm {
            item_id: "3".to_string(),
            ..TodoForm::default()
        };
        let req = sync.begin_delete(&form).unwrap();
        assert_eq!(req.method, HttpMethod::Delete);

        sync.finish_delete(HttpResponse::new(200, r#"{"id":"3"}"#)).unwrap();
        assert_eq!(texts(&sync), vec!["1, ネーム, true", "2, 下書き, false"]);
    }

    #[test]
    fn non_numeric_target_is_noop() {
        let form = TodoForm {
            item_id: "abc".to_string(),
            ..TodoForm::default()
        };
        assert_eq!(form.target_id(), None);
    }
}
