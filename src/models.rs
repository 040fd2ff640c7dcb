//! Wire Models
//!
//! Data structures matching the backend REST API.

use serde::{Deserialize, Serialize};

/// Authenticated user, as returned by the auth endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub username: String,
    pub token: String,
}

/// Sticky note card (matches backend)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub todos: Vec<Todo>,
    #[serde(rename = "userId", default)]
    pub user_id: String,
}

/// Checklist entry owned by one note (matches backend)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub completed: bool,
}

// ========================
// Request Payload Structs
// ========================

#[derive(Serialize)]
pub struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub struct NewNote<'a> {
    pub title: &'a str,
    /// Always empty; todos are created one by one afterwards.
    pub todos: Vec<Todo>,
    #[serde(rename = "userId")]
    pub user_id: &'a str,
}

impl<'a> NewNote<'a> {
    pub fn new(title: &'a str, user_id: &'a str) -> Self {
        Self {
            title,
            todos: Vec::new(),
            user_id,
        }
    }
}

#[derive(Serialize)]
pub struct NewTodo<'a> {
    pub title: &'a str,
    pub completed: bool,
}

#[derive(Serialize)]
pub struct TodoPatch {
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_note_uses_backend_field_names() {
        let payload = serde_json::to_value(NewNote::new("Groceries", "1")).unwrap();
        assert_eq!(
            payload,
            serde_json::json!({ "title": "Groceries", "todos": [], "userId": "1" })
        );
    }

    #[test]
    fn note_tolerates_missing_todos() {
        let note: Note = serde_json::from_str(r#"{"id":7,"title":"Empty","userId":"1"}"#).unwrap();
        assert_eq!(note.id, 7);
        assert!(note.todos.is_empty());
    }
}
