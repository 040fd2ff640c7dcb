//! API Client
//!
//! Thin JSON wrapper over the backend REST API. Attaches the bearer
//! credential from the shared cell, maps failures to [`ApiError`], and
//! reacts to 401 by tearing the session down before surfacing the error.

use std::rc::Rc;

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::models::{Credentials, Identity, NewNote, NewTodo, Note, Todo, TodoPatch};
use crate::session::CredentialCell;

/// Backend base URL, overridable at build time.
pub fn api_base_url() -> String {
    option_env!("API_BASE_URL")
        .unwrap_or("http://localhost:8080")
        .trim_end_matches('/')
        .to_string()
}

/// Send the browser back to the login entry point.
pub fn redirect_to_login() {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href("/");
    }
}

/// Backend operations the note board needs, split out so tests can run
/// against a canned implementation.
#[allow(async_fn_in_trait)]
pub trait NotesApi {
    async fn fetch_notes(&self, user_id: &str) -> Result<Vec<Note>, ApiError>;
    async fn create_note(&self, note: &NewNote<'_>) -> Result<Note, ApiError>;
    async fn delete_note(&self, note_id: i64) -> Result<(), ApiError>;
    async fn create_todo(&self, note_id: i64, todo: &NewTodo<'_>) -> Result<Todo, ApiError>;
    async fn set_todo_completed(
        &self,
        note_id: i64,
        todo_id: i64,
        completed: bool,
    ) -> Result<(), ApiError>;
    async fn delete_todo(&self, note_id: i64, todo_id: i64) -> Result<(), ApiError>;
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    credential: CredentialCell,
    on_unauthorized: Rc<dyn Fn()>,
}

impl ApiClient {
    pub fn new(base_url: String, credential: CredentialCell, on_unauthorized: Rc<dyn Fn()>) -> Self {
        Self {
            base_url,
            credential,
            on_unauthorized,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.credential.borrow().as_deref() {
            Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
            None => builder,
        }
    }

    /// Turn a non-success status into an error, running the session
    /// teardown hook first when the backend rejected the credential.
    fn classify(&self, status: u16, message: Option<String>) -> ApiError {
        if status == 401 {
            (self.on_unauthorized)();
        }
        ApiError::Http { status, message }
    }

    async fn dispatch(&self, request: Request) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if response.ok() {
            return Ok(response);
        }
        let status = response.status();
        let message = response.text().await.ok().filter(|text| !text.is_empty());
        Err(self.classify(status, message))
    }

    async fn decode<T: DeserializeOwned>(&self, response: Response) -> Result<T, ApiError> {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self
            .authorize(Request::get(&self.url(path)))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let response = self.dispatch(request).await?;
        self.decode(response).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self
            .authorize(Request::post(&self.url(path)))
            .json(body)
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let response = self.dispatch(request).await?;
        self.decode(response).await
    }

    /// PUT returning only an ack; the response body is deliberately not
    /// decoded because its single caller ignores it.
    pub async fn put<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let request = self
            .authorize(Request::put(&self.url(path)))
            .json(body)
            .map_err(|e| ApiError::Network(e.to_string()))?;
        self.dispatch(request).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let request = self
            .authorize(Request::delete(&self.url(path)))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        self.dispatch(request).await?;
        Ok(())
    }

    // ========================
    // Auth Endpoints
    // ========================

    pub async fn login(&self, credentials: &Credentials<'_>) -> Result<Identity, ApiError> {
        self.post("/api/auth/login", credentials).await
    }

    pub async fn register(&self, credentials: &Credentials<'_>) -> Result<Identity, ApiError> {
        self.post("/api/auth/register", credentials).await
    }
}

impl NotesApi for ApiClient {
    async fn fetch_notes(&self, user_id: &str) -> Result<Vec<Note>, ApiError> {
        self.get(&format!("/api/notes/user/{user_id}")).await
    }

    async fn create_note(&self, note: &NewNote<'_>) -> Result<Note, ApiError> {
        self.post("/api/notes", note).await
    }

    async fn delete_note(&self, note_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/api/notes/{note_id}")).await
    }

    async fn create_todo(&self, note_id: i64, todo: &NewTodo<'_>) -> Result<Todo, ApiError> {
        self.post(&format!("/api/notes/{note_id}/todos"), todo).await
    }

    async fn set_todo_completed(
        &self,
        note_id: i64,
        todo_id: i64,
        completed: bool,
    ) -> Result<(), ApiError> {
        self.put(
            &format!("/api/notes/{note_id}/todos/{todo_id}"),
            &TodoPatch { completed },
        )
        .await
    }

    async fn delete_todo(&self, note_id: i64, todo_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/api/notes/{note_id}/todos/{todo_id}"))
            .await
    }
}
