//! Sticky Notes App
//!
//! Root component: wires storage, session, and API client together,
//! restores a persisted session, and gates the board behind login.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{api_base_url, redirect_to_login, ApiClient};
use crate::board;
use crate::components::{LoginForm, NoteDialog, StickyNoteCard, TopBar};
use crate::context::AppContext;
use crate::session::{BrowserStorage, CredentialCell, KeyValueStore, SessionStore};

#[component]
pub fn App() -> impl IntoView {
    let credential = CredentialCell::default();
    let storage: Rc<dyn KeyValueStore> = Rc::new(BrowserStorage);
    let session = SessionStore::new(storage, credential.clone());
    session.restore();

    // A 401 anywhere tears the session down and sends the user back to
    // the login entry point; the failed call still reports its error.
    let api = ApiClient::new(api_base_url(), credential, {
        let session = session.clone();
        Rc::new(move || {
            session.clear();
            redirect_to_login();
        })
    });

    let ctx = AppContext::new(session.clone(), api);
    provide_context(ctx);

    let identity = session.identity();
    let notes = ctx.notes;

    // Load the board whenever a session becomes active.
    Effect::new(move |_| {
        let user_id = identity.with(|id| id.as_ref().map(|id| id.id.clone()));
        match user_id {
            Some(user_id) => {
                let api = ctx.api();
                spawn_local(async move {
                    let loaded = board::load(&api, &user_id).await;
                    notes.set(loaded);
                });
            }
            None => notes.set(Vec::new()),
        }
    });

    let (dialog_open, set_dialog_open) = signal(false);

    view! {
        <Show
            when=move || identity.with(|id| id.is_some())
            fallback=|| view! { <LoginForm /> }
        >
            <div class="board-screen">
                <TopBar set_dialog_open=set_dialog_open />
                <main class="note-grid">
                    <For
                        each=move || notes.get()
                        key=|note| (note.id, note.todos.clone())
                        children=move |note| view! { <StickyNoteCard note=note /> }
                    />
                </main>
                <NoteDialog open=dialog_open set_open=set_dialog_open />
            </div>
        </Show>
    }
}
