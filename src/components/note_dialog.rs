//! Note Creation Dialog
//!
//! Modal with a single title field. The field is reset and the dialog
//! closed as soon as the create is dispatched, whatever the outcome.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::board;
use crate::context::use_app_context;

#[component]
pub fn NoteDialog(open: ReadSignal<bool>, set_open: WriteSignal<bool>) -> impl IntoView {
    let ctx = use_app_context();
    let (title, set_title) = signal(String::new());

    let create = move |_| {
        let api = ctx.api();
        let notes = ctx.notes;
        let user_id = ctx.user_id();
        let text = title.get();

        spawn_local(async move {
            let next = board::add_note(&api, &notes.get_untracked(), &text, &user_id).await;
            notes.set(next);
        });

        set_title.set(String::new());
        set_open.set(false);
    };

    view! {
        <Show when=move || open.get()>
            <div class="dialog-backdrop">
                <div class="dialog">
                    <h3>"Create New Note"</h3>
                    <input
                        type="text"
                        placeholder="Note Title"
                        prop:value=move || title.get()
                        on:input=move |ev| {
                            let target = ev.target().unwrap();
                            let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                            set_title.set(input.value());
                        }
                    />
                    <div class="dialog-actions">
                        <button type="button" on:click=move |_| set_open.set(false)>
                            "Cancel"
                        </button>
                        <button type="button" class="primary" on:click=create>
                            "Create"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
