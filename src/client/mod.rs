//! Client-side data access: an HTTP client for the two collection
//! endpoints, a local snapshot cache mirroring them, and the [`store`]
//! facade that keeps in-memory state in sync with both.

pub mod api;
pub mod cache;
pub mod store;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-2xx response; `message` comes from the `{"error": ...}` body
    /// when the server sent one.
    #[error("server error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("title must not be empty")]
    EmptyTitle,

    #[error("name must not be empty")]
    EmptyName,

    #[error("category {0} still has tasks assigned to it")]
    CategoryInUse(String),

    #[error("cache write failed: {0}")]
    Cache(#[from] std::io::Error),

    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}
