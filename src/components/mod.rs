//! UI Components
//!
//! Reusable Leptos components.

mod login_form;
mod note_dialog;
mod sticky_note;
mod top_bar;

pub use login_form::LoginForm;
pub use note_dialog::NoteDialog;
pub use sticky_note::StickyNoteCard;
pub use top_bar::TopBar;
