//! Rendered list of todos, keyed by item id.
//!
//! `TodoView` stands in for the page's list container: one row per item, in
//! the order rows were added, each addressable by its `item_<id>` key.

use std::fmt;

use crate::types::Todo;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub key: String,
    pub text: String,
}

impl Row {
    pub fn from_todo(todo: &Todo) -> Self {
        Self {
            key: row_key(todo.id),
            text: row_text(todo),
        }
    }
}

pub fn row_key(id: impl fmt::Display) -> String {
    format!("item_{id}")
}

pub fn row_text(todo: &Todo) -> String {
    format!("{}, {}, {}", todo.id, todo.title, todo.completed)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoView {
    rows: Vec<Row>,
}

impl TodoView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn find(&self, key: &str) -> Option<&Row> {
        self.rows.iter().find(|r| r.key == key)
    }

    /// Drop every row and render `todos` in order.
    pub fn replace_all(&mut self, todos: &[Todo]) {
        self.rows = todos.iter().map(Row::from_todo).collect();
    }

    pub fn append(&mut self, todo: &Todo) {
        self.rows.push(Row::from_todo(todo));
    }

    /// Rewrite the row for `todo.id`. Returns false if there is no such row.
    pub fn overwrite(&mut self, todo: &Todo) -> bool {
        let key = row_key(todo.id);
        match self.rows.iter_mut().find(|r| r.key == key) {
            Some(row) => {
                row.text = row_text(todo);
                true
            }
            None => false,
        }
    }

    /// Remove the first row with `key`. Returns false if there is no such row.
    pub fn remove(&mut self, key: &str) -> bool {
        match self.rows.iter().position(|r| r.key == key) {
            Some(index) => {
                self.rows.remove(index);
                true
            }
            None => false,
        }
    }
}

impl fmt::Display for TodoView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{}", row.text)?;
        }
        Ok(())
    }
}
