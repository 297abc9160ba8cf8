//! Object storage client for the Selectel Swift-compatible API.
//!
//! Every public operation first obtains a valid auth token (refreshing
//! synchronously when the cached one is absent or expired), then issues the
//! operation-specific request and checks the status the operation expects.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};

use bytes::Bytes;
use reqwest::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use tracing::debug;

use crate::auth::AuthToken;
use crate::config::Config;
use crate::models::{FileRecord, ListingEntry};
use crate::utils::path::normalize;

use super::error::{Error, Result};
use super::transport::{ApiRequest, ApiResponse, HttpTransport, Transport};

/// Request header carrying the bearer token.
const AUTH_TOKEN_HEADER: HeaderName = HeaderName::from_static("x-auth-token");

/// Request header naming the source object of a server-side copy.
const COPY_FROM_HEADER: HeaderName = HeaderName::from_static("x-copy-from");

/// Auth endpoint path, versioned independently of the storage endpoints.
const AUTH_COMMAND: &str = "v3/auth/tokens";

/// Cached authentication state.
///
/// Holds at most one token and is only consulted at the moment a token is
/// needed; an expired token is treated exactly like an absent one.
enum TokenCache {
    Absent,
    Valid(AuthToken),
}

/// The storage façade: write, read, copy, delete, list and stat objects
/// inside one configured container.
///
/// Operations take `&mut self` because the token refresh is a
/// check-then-write sequence that must not interleave. Shared use requires
/// an external lock around the whole client, e.g. `tokio::sync::Mutex`.
pub struct StorageClient<T: Transport = HttpTransport> {
    config: Config,
    transport: T,
    token: TokenCache,
}

impl StorageClient<HttpTransport> {
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self::with_transport(config, HttpTransport::new()?))
    }
}

impl<T: Transport> StorageClient<T> {
    pub fn with_transport(config: Config, transport: T) -> Self {
        Self {
            config,
            transport,
            token: TokenCache::Absent,
        }
    }

    /// Upload a whole object in one request. The API answers 201 on success.
    pub async fn write(&mut self, path: &str, contents: impl Into<Bytes>) -> Result<()> {
        let path = normalize(path);
        let request = self.api_request(Method::PUT, &path).body(contents.into());
        let response = self.request_authorized(request).await?;

        Self::expect_status(&response, StatusCode::CREATED)
    }

    /// Upload an object from a reader.
    ///
    /// The reader is drained but stays owned by the caller. A reader that
    /// fails mid-read aborts the operation before any request is sent.
    pub async fn write_stream<R: Read>(&mut self, path: &str, reader: &mut R) -> Result<()> {
        let mut contents = Vec::new();
        reader
            .read_to_end(&mut contents)
            .map_err(|e| Error::InvalidArgument(format!("unreadable input stream: {e}")))?;

        self.write(path, contents).await
    }

    /// Download an object's bytes. Expects 200.
    pub async fn read(&mut self, path: &str) -> Result<Bytes> {
        let path = normalize(path);
        let request = self.api_request(Method::GET, &path);
        let response = self.request_authorized(request).await?;

        Self::expect_status(&response, StatusCode::OK)?;
        Ok(response.body)
    }

    /// Download an object into an unnamed temp file and hand it back rewound
    /// to the start. The caller owns the file; dropping it releases the
    /// backing storage.
    pub async fn read_stream(&mut self, path: &str) -> Result<File> {
        let path = normalize(path);
        let request = self.api_request(Method::GET, &path);
        let response = self.request_authorized(request).await?;

        Self::expect_status(&response, StatusCode::OK)?;

        let mut file = tempfile::tempfile()
            .map_err(|e| Error::transport("failed to open temp buffer", e))?;
        file.write_all(&response.body)
            .map_err(|e| Error::transport("failed to fill temp buffer", e))?;
        file.seek(SeekFrom::Start(0))
            .map_err(|e| Error::transport("failed to rewind temp buffer", e))?;

        Ok(file)
    }

    /// Server-side copy of `from` onto `to` inside the container.
    pub async fn copy(&mut self, from: &str, to: &str) -> Result<()> {
        let from = normalize(from);
        let to = normalize(to);

        let copy_source = format!("{}/{}", self.config.container(), from);
        let request = self.api_request(Method::PUT, &to).header(
            COPY_FROM_HEADER,
            HeaderValue::from_str(&copy_source)
                .map_err(|e| Error::InvalidArgument(format!("invalid copy source: {e}")))?,
        );
        let response = self.request_authorized(request).await?;

        Self::expect_status(&response, StatusCode::CREATED)
    }

    /// Delete several objects in one bulk request.
    pub async fn delete<S: AsRef<str>>(&mut self, paths: &[S]) -> Result<()> {
        let container = self.config.container();
        let body = paths
            .iter()
            .map(|p| format!("{}/{}", container, normalize(p.as_ref())))
            .collect::<Vec<_>>()
            .join("\n");

        let command = format!("v1/SEL_{}", self.config.account_id());
        let request = self
            .api_request(Method::POST, &command)
            .header(CONTENT_TYPE, HeaderValue::from_static("text/plain"))
            .query("bulk-delete", "true")
            .body(Bytes::from(body));
        let response = self.request_authorized(request).await?;

        Self::expect_status(&response, StatusCode::OK)
    }

    /// Describe whatever the given path refers to.
    ///
    /// Zero prefix matches mean the path does not exist. Exactly one match
    /// is the object itself. Several matches produce a synthesized `Dir`
    /// record, since the backend has no directory objects. Note the match
    /// is purely prefix-based: siblings like `file1` and `file10` make the
    /// prefix `file1` look like a directory.
    pub async fn stat(&mut self, path: &str) -> Result<Option<FileRecord>> {
        let mut matched = self.list_matched(path).await?;

        Ok(match matched.len() {
            0 => None,
            1 => Some(matched.remove(0)),
            _ => Some(FileRecord::Dir {
                path: normalize(path),
            }),
        })
    }

    /// List every object whose path starts with `prefix`, in API order.
    ///
    /// A single round-trip; the API does not paginate this call and neither
    /// do we.
    pub async fn list_matched(&mut self, prefix: &str) -> Result<Vec<FileRecord>> {
        let prefix = normalize(prefix);
        let request = self
            .api_request(Method::GET, "")
            .query("format", "json")
            .query("prefix", &prefix);
        let response = self.request_authorized(request).await?;

        Self::expect_status(&response, StatusCode::OK)?;

        if response.body.is_empty() {
            return Err(Error::transport_msg("cannot decode empty listing response"));
        }
        let entries: Vec<ListingEntry> = serde_json::from_slice(&response.body)
            .map_err(|e| Error::transport("json parsing error in listing response", e))?;

        Ok(entries.into_iter().map(FileRecord::from).collect())
    }

    /// Send a request with a valid `X-Auth-Token` attached, authenticating
    /// first when necessary.
    async fn request_authorized(&mut self, request: ApiRequest) -> Result<ApiResponse> {
        let token = self.auth_header().await?;
        let request = request.header(
            AUTH_TOKEN_HEADER,
            HeaderValue::from_str(&token)
                .map_err(|e| Error::Auth(format!("token is not a valid header value: {e}")))?,
        );

        self.transport.send(request).await
    }

    /// Header value of a currently valid token, running the auth round-trip
    /// when the cache is absent or the cached token has expired.
    async fn auth_header(&mut self) -> Result<String> {
        if let TokenCache::Valid(ref token) = self.token {
            if token.is_valid() {
                return Ok(token.to_header().to_string());
            }
        }

        debug!("no valid auth token cached, authenticating");
        let payload = serde_json::json!({
            "auth": {
                "identity": {
                    "methods": ["password"],
                    "password": {
                        "user": {
                            "id": self.config.user_id(),
                            "password": self.config.user_password(),
                        }
                    }
                }
            }
        });
        let body = serde_json::to_vec(&payload)
            .map_err(|e| Error::Auth(format!("failed to encode auth payload: {e}")))?;

        let request = self
            .api_request(Method::POST, AUTH_COMMAND)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(Bytes::from(body));
        let response = self.transport.send(request).await?;

        let token = AuthToken::from_response(&response)?;
        let header = token.to_header().to_string();
        self.token = TokenCache::Valid(token);

        Ok(header)
    }

    fn api_request(&self, method: Method, command: &str) -> ApiRequest {
        ApiRequest::new(method, self.command_url(command))
    }

    /// Endpoint for a command: explicitly versioned commands (`v3/...`) go
    /// against the host root, anything else is an object path inside the
    /// configured container.
    fn command_url(&self, command: &str) -> String {
        if Self::is_versioned(command) {
            return format!("{}/{}", self.config.api_host(), command);
        }

        let full = format!(
            "v1/SEL_{}/{}/{}",
            self.config.account_id(),
            self.config.container(),
            command.trim_start_matches('/'),
        );
        format!("{}/{}", self.config.api_host(), full.trim_end_matches('/'))
    }

    fn is_versioned(command: &str) -> bool {
        let mut chars = command.chars();
        chars.next() == Some('v') && chars.next().is_some_and(|c| c.is_ascii_digit())
    }

    fn expect_status(response: &ApiResponse, expected: StatusCode) -> Result<()> {
        if response.status == expected {
            Ok(())
        } else {
            Err(Error::UnexpectedResponse {
                expected: expected.as_u16(),
                got: response.status.as_u16(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;

    /// Transport for tests that never reach the wire.
    struct DeadTransport;

    #[async_trait]
    impl Transport for DeadTransport {
        async fn send(&self, _request: ApiRequest) -> Result<ApiResponse> {
            unreachable!("url construction tests never send")
        }
    }

    fn client() -> StorageClient<DeadTransport> {
        let config =
            Config::with_api_host("https://storage.example.com", "123", "user", "secret", "files")
                .unwrap();
        StorageClient::with_transport(config, DeadTransport)
    }

    #[test]
    fn test_command_url_for_object_path() {
        assert_eq!(
            client().command_url("path/to/file.txt"),
            "https://storage.example.com/v1/SEL_123/files/path/to/file.txt"
        );
    }

    #[test]
    fn test_command_url_for_container_root() {
        assert_eq!(
            client().command_url(""),
            "https://storage.example.com/v1/SEL_123/files"
        );
    }

    #[test]
    fn test_command_url_for_versioned_command() {
        assert_eq!(
            client().command_url("v3/auth/tokens"),
            "https://storage.example.com/v3/auth/tokens"
        );
        assert_eq!(
            client().command_url("v1/SEL_123"),
            "https://storage.example.com/v1/SEL_123"
        );
    }

    #[test]
    fn test_is_versioned() {
        assert!(StorageClient::<DeadTransport>::is_versioned("v1/SEL_1"));
        assert!(StorageClient::<DeadTransport>::is_versioned("v12/x"));
        assert!(!StorageClient::<DeadTransport>::is_versioned("vault/x"));
        assert!(!StorageClient::<DeadTransport>::is_versioned("path/v1"));
        assert!(!StorageClient::<DeadTransport>::is_versioned(""));
    }
}
