use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for storage operations.
///
/// Every public operation either succeeds or surfaces exactly one of these
/// kinds. The client performs no retries and no silent recovery; a failed
/// step in a multi-request operation (say the delete half of a rename)
/// leaves the earlier steps in place.
#[derive(Error, Debug)]
pub enum Error {
    /// The HTTP exchange itself failed: connection, timeout, protocol error,
    /// or a response body that could not be decoded where one was required.
    #[error("transport failure: {context}")]
    Transport {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The authentication response could not be turned into a token:
    /// non-2xx status, empty body or a body that was not JSON.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The request went through, but the API answered with a status outside
    /// the operation's expected set.
    #[error("unexpected response status: expected {expected}, got {got}")]
    UnexpectedResponse { expected: u16, got: u16 },

    /// The caller supplied a malformed input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    pub(crate) fn transport(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Error::Transport {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }

    pub(crate) fn transport_msg(context: impl Into<String>) -> Self {
        Error::Transport {
            context: context.into(),
            source: None,
        }
    }
}
