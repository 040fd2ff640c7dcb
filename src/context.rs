//! Application Context
//!
//! Shared handles provided via the Leptos Context API. The context is
//! `Copy` (handles live in the reactive arena) so event handlers inside
//! `Show`/`For` children can capture it freely.

use leptos::prelude::*;

use crate::api::ApiClient;
use crate::models::Note;
use crate::session::SessionStore;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    session: StoredValue<SessionStore, LocalStorage>,
    api: StoredValue<ApiClient, LocalStorage>,
    /// The note board; components replace the whole sequence on merge.
    pub notes: RwSignal<Vec<Note>>,
}

impl AppContext {
    pub fn new(session: SessionStore, api: ApiClient) -> Self {
        Self {
            session: StoredValue::new_local(session),
            api: StoredValue::new_local(api),
            notes: RwSignal::new(Vec::new()),
        }
    }

    pub fn session(&self) -> SessionStore {
        self.session.get_value()
    }

    pub fn api(&self) -> ApiClient {
        self.api.get_value()
    }

    /// Current user id, empty while unauthenticated.
    pub fn user_id(&self) -> String {
        self.session.with_value(|session| {
            session
                .identity()
                .with_untracked(|id| id.as_ref().map(|id| id.id.clone()))
                .unwrap_or_default()
        })
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
