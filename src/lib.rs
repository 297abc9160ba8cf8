//! Client library for the Selectel object storage API (Swift compatible).
//!
//! The [`StorageClient`] exposes write/read/copy/delete/list/stat against
//! one configured container and transparently manages the short-lived
//! bearer token the API hands out: it authenticates on first use and
//! re-authenticates synchronously whenever the cached token expires.
//!
//! ```no_run
//! use selectel_storage::{Config, StorageClient};
//!
//! # async fn demo() -> selectel_storage::Result<()> {
//! let config = Config::new("account", "user", "password", "container")?;
//! let mut client = StorageClient::new(config)?;
//!
//! client.write("reports/2024.csv", "id;total\n").await?;
//! let contents = client.read("reports/2024.csv").await?;
//! # let _ = contents;
//! # Ok(())
//! # }
//! ```
//!
//! [`StorageAdapter`] layers the generic filesystem-adapter contract
//! (rename, directory listing, existence checks) on top of the client.

pub mod adapter;
pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod utils;

pub use adapter::{StorageAdapter, Visibility};
pub use api::{ApiRequest, ApiResponse, Error, HttpTransport, Result, StorageClient, Transport};
pub use auth::AuthToken;
pub use config::Config;
pub use models::FileRecord;
