//! Top Bar Component
//!
//! Greeting, the add-note entry point, and logout.

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn TopBar(set_dialog_open: WriteSignal<bool>) -> impl IntoView {
    let ctx = use_app_context();
    let identity = ctx.session().identity();

    let username = move || {
        identity.with(|id| id.as_ref().map(|id| id.username.clone()).unwrap_or_default())
    };

    view! {
        <header class="top-bar">
            <span class="top-bar-title">
                "Welcome, " {username} "'s Sticky Notes"
            </span>
            <button class="add-note-btn" on:click=move |_| set_dialog_open.set(true)>
                "+ Add Note"
            </button>
            <button class="logout-btn" on:click=move |_| ctx.session().clear()>
                "Logout"
            </button>
        </header>
    }
}
