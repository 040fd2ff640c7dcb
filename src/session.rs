//! Session Store
//!
//! Holds the authenticated identity, persists it in browser-local storage,
//! and feeds the bearer credential to the API client through a shared cell.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_storage::Storage as _;
use leptos::prelude::*;

use crate::models::Identity;

const TOKEN_KEY: &str = "token";
const USER_KEY: &str = "user";

/// Origin-scoped string store. Injected so tests can swap in a fake.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `KeyValueStore` over the browser's localStorage.
pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        gloo_storage::LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let _ = gloo_storage::LocalStorage::raw().set_item(key, value);
    }

    fn remove(&self, key: &str) {
        let _ = gloo_storage::LocalStorage::raw().remove_item(key);
    }
}

/// Shared credential slot read by the API client on every request.
pub type CredentialCell = Rc<RefCell<Option<String>>>;

/// Session state: reactive identity plus its persisted copy.
#[derive(Clone)]
pub struct SessionStore {
    storage: Rc<dyn KeyValueStore>,
    credential: CredentialCell,
    identity: RwSignal<Option<Identity>>,
}

impl SessionStore {
    pub fn new(storage: Rc<dyn KeyValueStore>, credential: CredentialCell) -> Self {
        Self {
            storage,
            credential,
            identity: RwSignal::new(None),
        }
    }

    pub fn identity(&self) -> RwSignal<Option<Identity>> {
        self.identity
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.with_untracked(|id| id.is_some())
    }

    /// Re-adopt a persisted session on startup.
    ///
    /// No validation round-trip is made; a stale credential is discovered
    /// by the first API call coming back 401.
    pub fn restore(&self) {
        let token = self.storage.get(TOKEN_KEY);
        let user = self.storage.get(USER_KEY);
        if let (Some(token), Some(user)) = (token, user) {
            if let Ok(identity) = serde_json::from_str::<Identity>(&user) {
                *self.credential.borrow_mut() = Some(token);
                self.identity.set(Some(identity));
            }
        }
    }

    /// Adopt a freshly obtained identity, replacing any prior session.
    pub fn establish(&self, identity: Identity) {
        self.storage.set(TOKEN_KEY, &identity.token);
        if let Ok(serialized) = serde_json::to_string(&identity) {
            self.storage.set(USER_KEY, &serialized);
        }
        *self.credential.borrow_mut() = Some(identity.token.clone());
        self.identity.set(Some(identity));
    }

    /// Drop the session: explicit logout or a 401 from any endpoint.
    pub fn clear(&self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USER_KEY);
        *self.credential.borrow_mut() = None;
        self.identity.set(None);
    }
}
