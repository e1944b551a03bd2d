//! In-memory todo store.
//!
//! # Design
//! `TodoStore` owns the ordered item sequence and the id counter. Ids come
//! from `next_id`, which only ever grows, so an id is never handed out twice
//! even after deletes or when the sequence is empty. The server shares one
//! store behind `Arc<RwLock<_>>`; the store itself knows nothing about HTTP.

use serde::{Deserialize, Serialize};

/// A single todo item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub title: String,
    pub completed: bool,
}

/// Validated set of field overwrites for an existing item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

/// Ids shown on the "important" page.
pub const IMPORTANT_IDS: [u64; 2] = [1, 2];

#[derive(Debug)]
pub struct TodoStore {
    items: Vec<Todo>,
    next_id: u64,
    important_ids: Vec<u64>,
}

impl TodoStore {
    pub fn new(items: Vec<Todo>) -> Self {
        let next_id = items.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        Self {
            items,
            next_id,
            important_ids: IMPORTANT_IDS.to_vec(),
        }
    }

    /// The startup data set.
    pub fn seeded() -> Self {
        Self::new(vec![
            Todo {
                id: 1,
                title: "ネーム".to_string(),
                completed: true,
            },
            Todo {
                id: 2,
                title: "下書き".to_string(),
                completed: false,
            },
            Todo {
                id: 3,
                title: "清書".to_string(),
                completed: false,
            },
        ])
    }

    pub fn list(&self) -> &[Todo] {
        &self.items
    }

    pub fn get(&self, id: u64) -> Option<&Todo> {
        self.items.iter().find(|t| t.id == id)
    }

    /// Append a new item. `completed` always starts out false.
    pub fn create(&mut self, title: String) -> Todo {
        let todo = Todo {
            id: self.next_id,
            title,
            completed: false,
        };
        self.next_id += 1;
        self.items.push(todo.clone());
        todo
    }

    pub fn update(&mut self, id: u64, patch: TodoPatch) -> Option<Todo> {
        let todo = self.items.iter_mut().find(|t| t.id == id)?;
        if let Some(title) = patch.title {
            todo.title = title;
        }
        if let Some(completed) = patch.completed {
            todo.completed = completed;
        }
        Some(todo.clone())
    }

    pub fn delete(&mut self, id: u64) -> Option<Todo> {
        let index = self.items.iter().position(|t| t.id == id)?;
        Some(self.items.remove(index))
    }

    /// Items flagged as important, in store order.
    pub fn important(&self) -> Vec<Todo> {
        self.items
            .iter()
            .filter(|t| self.important_ids.contains(&t.id))
            .cloned()
            .collect()
    }
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::seeded()
    }
}
