//! Note Board State Sync
//!
//! The in-memory note collection and its confirm-then-apply operations.
//! Every operation takes the current sequence and hands back the next one;
//! nothing is applied locally until the backend has acknowledged the
//! mutation, and ids always come from the backend. Failed mutations are
//! logged and leave the sequence untouched (loading instead falls back to
//! an empty board).

use crate::api::NotesApi;
use crate::models::{NewNote, NewTodo, Note, Todo};

/// Fetch the user's notes, replacing the whole sequence. Any failure
/// resets the board to empty rather than keeping stale cards around.
pub async fn load(api: &impl NotesApi, user_id: &str) -> Vec<Note> {
    match api.fetch_notes(user_id).await {
        Ok(notes) => notes,
        Err(err) => {
            log::error!("failed to load notes: {err}");
            Vec::new()
        }
    }
}

/// Create a note and append the server's version of it. Blank titles are
/// a silent no-op with no request issued.
pub async fn add_note(
    api: &impl NotesApi,
    notes: &[Note],
    title: &str,
    user_id: &str,
) -> Vec<Note> {
    if title.trim().is_empty() {
        return notes.to_vec();
    }
    match api.create_note(&NewNote::new(title, user_id)).await {
        Ok(created) => with_note(notes, created),
        Err(err) => {
            log::error!("failed to add note: {err}");
            notes.to_vec()
        }
    }
}

pub async fn delete_note(api: &impl NotesApi, notes: &[Note], note_id: i64) -> Vec<Note> {
    match api.delete_note(note_id).await {
        Ok(()) => without_note(notes, note_id),
        Err(err) => {
            log::error!("failed to delete note {note_id}: {err}");
            notes.to_vec()
        }
    }
}

/// Create a todo on a note and append the server's version of it.
pub async fn add_todo(
    api: &impl NotesApi,
    notes: &[Note],
    note_id: i64,
    title: &str,
) -> Vec<Note> {
    if title.trim().is_empty() {
        return notes.to_vec();
    }
    let todo = NewTodo {
        title,
        completed: false,
    };
    match api.create_todo(note_id, &todo).await {
        Ok(created) => with_todo(notes, note_id, created),
        Err(err) => {
            log::error!("failed to add todo to note {note_id}: {err}");
            notes.to_vec()
        }
    }
}

/// Flip a todo's completion. The local flip happens only once the call
/// succeeds, and is applied regardless of the response body.
pub async fn toggle_todo(
    api: &impl NotesApi,
    notes: &[Note],
    note_id: i64,
    todo_id: i64,
    completed: bool,
) -> Vec<Note> {
    match api.set_todo_completed(note_id, todo_id, !completed).await {
        Ok(()) => with_todo_flipped(notes, note_id, todo_id),
        Err(err) => {
            log::error!("failed to toggle todo {todo_id}: {err}");
            notes.to_vec()
        }
    }
}

pub async fn delete_todo(
    api: &impl NotesApi,
    notes: &[Note],
    note_id: i64,
    todo_id: i64,
) -> Vec<Note> {
    match api.delete_todo(note_id, todo_id).await {
        Ok(()) => without_todo(notes, note_id, todo_id),
        Err(err) => {
            log::error!("failed to delete todo {todo_id}: {err}");
            notes.to_vec()
        }
    }
}

// ========================
// Pure Merge Helpers
// ========================

fn with_note(notes: &[Note], created: Note) -> Vec<Note> {
    let mut next = notes.to_vec();
    next.push(created);
    next
}

fn without_note(notes: &[Note], note_id: i64) -> Vec<Note> {
    notes.iter().filter(|n| n.id != note_id).cloned().collect()
}

fn with_todo(notes: &[Note], note_id: i64, created: Todo) -> Vec<Note> {
    map_note(notes, note_id, |note| note.todos.push(created.clone()))
}

fn with_todo_flipped(notes: &[Note], note_id: i64, todo_id: i64) -> Vec<Note> {
    map_note(notes, note_id, |note| {
        if let Some(todo) = note.todos.iter_mut().find(|t| t.id == todo_id) {
            todo.completed = !todo.completed;
        }
    })
}

fn without_todo(notes: &[Note], note_id: i64, todo_id: i64) -> Vec<Note> {
    map_note(notes, note_id, |note| {
        note.todos.retain(|t| t.id != todo_id);
    })
}

fn map_note(notes: &[Note], note_id: i64, mutate: impl Fn(&mut Note)) -> Vec<Note> {
    notes
        .iter()
        .map(|note| {
            let mut note = note.clone();
            if note.id == note_id {
                mutate(&mut note);
            }
            note
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use std::cell::{Cell, RefCell};

    /// Backend stub: echoes input faithfully, issues ids, records calls,
    /// and can be primed to reject the next request.
    #[derive(Default)]
    struct MockApi {
        calls: RefCell<Vec<String>>,
        server_notes: RefCell<Vec<Note>>,
        next_id: Cell<i64>,
        fail_next: RefCell<Option<ApiError>>,
    }

    impl MockApi {
        fn with_notes(notes: Vec<Note>) -> Self {
            Self {
                server_notes: RefCell::new(notes),
                next_id: Cell::new(100),
                ..Default::default()
            }
        }

        fn fail_next(&self, err: ApiError) {
            *self.fail_next.borrow_mut() = Some(err);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn record(&self, call: &str) -> Result<(), ApiError> {
            self.calls.borrow_mut().push(call.to_string());
            match self.fail_next.borrow_mut().take() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }

        fn issue_id(&self) -> i64 {
            let id = self.next_id.get() + 1;
            self.next_id.set(id);
            id
        }
    }

    impl NotesApi for MockApi {
        async fn fetch_notes(&self, user_id: &str) -> Result<Vec<Note>, ApiError> {
            self.record(&format!("GET notes/{user_id}"))?;
            Ok(self.server_notes.borrow().clone())
        }

        async fn create_note(&self, note: &NewNote<'_>) -> Result<Note, ApiError> {
            self.record(&format!("POST note {}", note.title))?;
            let created = Note {
                id: self.issue_id(),
                title: note.title.to_string(),
                todos: Vec::new(),
                user_id: note.user_id.to_string(),
            };
            self.server_notes.borrow_mut().push(created.clone());
            Ok(created)
        }

        async fn delete_note(&self, note_id: i64) -> Result<(), ApiError> {
            self.record(&format!("DELETE note {note_id}"))?;
            self.server_notes.borrow_mut().retain(|n| n.id != note_id);
            Ok(())
        }

        async fn create_todo(&self, note_id: i64, todo: &NewTodo<'_>) -> Result<Todo, ApiError> {
            self.record(&format!("POST todo {} on {note_id}", todo.title))?;
            let created = Todo {
                id: self.issue_id(),
                title: todo.title.to_string(),
                completed: todo.completed,
            };
            if let Some(note) = self
                .server_notes
                .borrow_mut()
                .iter_mut()
                .find(|n| n.id == note_id)
            {
                note.todos.push(created.clone());
            }
            Ok(created)
        }

        async fn set_todo_completed(
            &self,
            note_id: i64,
            todo_id: i64,
            completed: bool,
        ) -> Result<(), ApiError> {
            self.record(&format!("PUT todo {todo_id} on {note_id} -> {completed}"))?;
            Ok(())
        }

        async fn delete_todo(&self, note_id: i64, todo_id: i64) -> Result<(), ApiError> {
            self.record(&format!("DELETE todo {todo_id} on {note_id}"))?;
            Ok(())
        }
    }

    fn note(id: i64, title: &str, todos: Vec<Todo>) -> Note {
        Note {
            id,
            title: title.into(),
            todos,
            user_id: "1".into(),
        }
    }

    fn todo(id: i64, title: &str, completed: bool) -> Todo {
        Todo {
            id,
            title: title.into(),
            completed,
        }
    }

    #[tokio::test]
    async fn blank_titles_are_no_ops_without_requests() {
        let api = MockApi::default();
        let notes = vec![note(1, "Groceries", vec![])];

        let after = add_note(&api, &notes, "", "1").await;
        assert_eq!(after, notes);
        let after = add_note(&api, &notes, "   ", "1").await;
        assert_eq!(after, notes);
        let after = add_todo(&api, &notes, 1, "  ").await;
        assert_eq!(after, notes);

        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn add_note_appends_the_server_issued_note() {
        let api = MockApi::with_notes(vec![]);
        let after = add_note(&api, &[], "Groceries", "1").await;

        assert_eq!(after.len(), 1);
        assert_eq!(after[0].id, 101);
        assert_eq!(after[0].title, "Groceries");
        assert!(after[0].todos.is_empty());
    }

    #[tokio::test]
    async fn add_note_failure_leaves_state_unchanged() {
        let api = MockApi::default();
        api.fail_next(ApiError::Http {
            status: 500,
            message: None,
        });
        let notes = vec![note(1, "Groceries", vec![])];
        let after = add_note(&api, &notes, "Chores", "1").await;
        assert_eq!(after, notes);
    }

    #[tokio::test]
    async fn delete_note_removes_exactly_the_matching_note() {
        let api = MockApi::default();
        let notes = vec![
            note(1, "A", vec![todo(10, "x", false)]),
            note(2, "B", vec![]),
            note(3, "C", vec![]),
        ];
        let after = delete_note(&api, &notes, 2).await;
        assert_eq!(after, vec![notes[0].clone(), notes[2].clone()]);
    }

    #[tokio::test]
    async fn delete_note_failure_keeps_the_stale_note_visible() {
        let api = MockApi::default();
        api.fail_next(ApiError::Network("offline".into()));
        let notes = vec![note(1, "A", vec![])];
        let after = delete_note(&api, &notes, 1).await;
        assert_eq!(after, notes);
    }

    #[tokio::test]
    async fn add_todo_appends_to_the_matching_note_only() {
        let api = MockApi::with_notes(vec![]);
        let notes = vec![note(1, "A", vec![]), note(2, "B", vec![])];
        let after = add_todo(&api, &notes, 2, "Milk").await;

        assert!(after[0].todos.is_empty());
        assert_eq!(after[1].todos.len(), 1);
        assert_eq!(after[1].todos[0].title, "Milk");
        assert!(!after[1].todos[0].completed);
    }

    #[tokio::test]
    async fn toggle_flips_only_after_the_call_succeeds() {
        let api = MockApi::default();
        let notes = vec![note(1, "A", vec![todo(5, "Milk", false)])];

        let after = toggle_todo(&api, &notes, 1, 5, false).await;
        assert!(after[0].todos[0].completed);
        assert_eq!(api.calls(), vec!["PUT todo 5 on 1 -> true"]);

        api.fail_next(ApiError::Http {
            status: 500,
            message: None,
        });
        let unchanged = toggle_todo(&api, &after, 1, 5, true).await;
        assert!(unchanged[0].todos[0].completed, "no speculative flip");
    }

    #[tokio::test]
    async fn delete_todo_removes_only_the_matching_entry() {
        let api = MockApi::default();
        let notes = vec![note(
            1,
            "A",
            vec![todo(5, "Milk", false), todo(6, "Eggs", true)],
        )];
        let after = delete_todo(&api, &notes, 1, 5).await;
        assert_eq!(after[0].todos, vec![todo(6, "Eggs", true)]);
    }

    #[tokio::test]
    async fn load_failure_resets_the_board_to_empty() {
        let api = MockApi::with_notes(vec![note(1, "A", vec![])]);
        api.fail_next(ApiError::Http {
            status: 503,
            message: Some("down".into()),
        });
        let after = load(&api, "1").await;
        assert!(after.is_empty());
    }

    #[tokio::test]
    async fn load_replaces_the_sequence_with_the_server_order() {
        let api = MockApi::with_notes(vec![note(2, "B", vec![]), note(1, "A", vec![])]);
        let after = load(&api, "1").await;
        assert_eq!(after.iter().map(|n| n.id).collect::<Vec<_>>(), vec![2, 1]);
    }

    /// The whole first-session flow: load an empty board, create a note,
    /// add a todo, toggle it. Local state mirrors the backend throughout.
    #[tokio::test]
    async fn first_session_scenario() {
        let api = MockApi::with_notes(vec![]);

        let notes = load(&api, "1").await;
        assert!(notes.is_empty());

        let notes = add_note(&api, &notes, "Groceries", "1").await;
        assert_eq!(notes.len(), 1);
        let note_id = notes[0].id;

        let notes = add_todo(&api, &notes, note_id, "Milk").await;
        let todo_id = notes[0].todos[0].id;
        assert_eq!(notes[0].todos[0].title, "Milk");
        assert!(!notes[0].todos[0].completed);

        let notes = toggle_todo(&api, &notes, note_id, todo_id, false).await;
        assert!(notes[0].todos[0].completed);

        // A reload mirrors what the stub backend accumulated.
        let reloaded = load(&api, "1").await;
        assert_eq!(reloaded[0].title, "Groceries");
        assert_eq!(reloaded[0].todos[0].title, "Milk");
    }
}
