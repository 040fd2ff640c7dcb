//! Sticky Note Card Component
//!
//! One note card: title, inline add-todo form, and the todo checklist.
//! Color and tilt are derived from the note id so a card keeps its look
//! across re-renders.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::board;
use crate::context::use_app_context;
use crate::models::Note;

const CARD_COLORS: &[&str] = &[
    "#fff8dc", // Cornsilk
    "#f0fff0", // Honeydew
    "#fff0f5", // LavenderBlush
    "#f0f8ff", // AliceBlue
    "#f5f5dc", // Beige
    "#fffaf0", // FloralWhite
];

pub fn card_color(note_id: i64) -> &'static str {
    CARD_COLORS[note_id.rem_euclid(CARD_COLORS.len() as i64) as usize]
}

pub fn card_rotation(note_id: i64) -> String {
    format!("rotate({}deg)", note_id.rem_euclid(5) - 2)
}

#[component]
pub fn StickyNoteCard(note: Note) -> impl IntoView {
    let ctx = use_app_context();
    let note_id = note.id;
    let (new_todo, set_new_todo) = signal(String::new());

    let delete_note = move |_| {
        let api = ctx.api();
        let notes = ctx.notes;
        spawn_local(async move {
            let next = board::delete_note(&api, &notes.get_untracked(), note_id).await;
            notes.set(next);
        });
    };

    let add_todo = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let title = new_todo.get();
        if title.trim().is_empty() {
            return;
        }
        let api = ctx.api();
        let notes = ctx.notes;
        spawn_local(async move {
            let next = board::add_todo(&api, &notes.get_untracked(), note_id, &title).await;
            notes.set(next);
        });
        set_new_todo.set(String::new());
    };

    let style = format!(
        "background-color: {}; transform: {};",
        card_color(note_id),
        card_rotation(note_id)
    );

    view! {
        <div class="sticky-note" style=style>
            <button class="note-delete-btn" on:click=delete_note>
                "×"
            </button>
            <h3 class="note-title">{note.title.clone()}</h3>

            <form class="todo-form" on:submit=add_todo>
                <input
                    type="text"
                    placeholder="Add a new todo"
                    prop:value=move || new_todo.get()
                    on:input=move |ev| {
                        let target = ev.target().unwrap();
                        let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                        set_new_todo.set(input.value());
                    }
                />
            </form>

            <ul class="todo-list">
                {note.todos.iter().map(|todo| {
                    let todo_id = todo.id;
                    let completed = todo.completed;
                    let title = todo.title.clone();

                    let toggle = move |_| {
                        let api = ctx.api();
                        let notes = ctx.notes;
                        spawn_local(async move {
                            let next = board::toggle_todo(
                                &api,
                                &notes.get_untracked(),
                                note_id,
                                todo_id,
                                completed,
                            )
                            .await;
                            notes.set(next);
                        });
                    };

                    let remove = move |_| {
                        let api = ctx.api();
                        let notes = ctx.notes;
                        spawn_local(async move {
                            let next = board::delete_todo(
                                &api,
                                &notes.get_untracked(),
                                note_id,
                                todo_id,
                            )
                            .await;
                            notes.set(next);
                        });
                    };

                    view! {
                        <li class=if completed { "todo done" } else { "todo" }>
                            <input
                                type="checkbox"
                                prop:checked=completed
                                on:change=toggle
                            />
                            <span class="todo-title">{title}</span>
                            <button class="todo-delete-btn" on:click=remove>
                                "🗑"
                            </button>
                        </li>
                    }
                }).collect_view()}
            </ul>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_color_is_deterministic_and_total() {
        assert_eq!(card_color(0), card_color(6));
        for id in 0..12 {
            assert!(CARD_COLORS.contains(&card_color(id)));
        }
        // Negative ids must not panic either.
        let _ = card_color(-3);
    }

    #[test]
    fn card_rotation_stays_within_the_tilt_range() {
        for id in -5..10 {
            let rotation = card_rotation(id);
            let degrees: i64 = rotation
                .trim_start_matches("rotate(")
                .trim_end_matches("deg)")
                .parse()
                .unwrap();
            assert!((-2..=2).contains(&degrees), "{rotation}");
        }
    }
}
