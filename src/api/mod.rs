//! HTTP access layer: the storage client, its transport seam and the error
//! taxonomy shared by the whole crate.

pub mod client;
pub mod error;
pub mod transport;

pub use client::StorageClient;
pub use error::{Error, Result};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
