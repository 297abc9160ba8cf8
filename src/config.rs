//! Access settings for the storage API.
//!
//! Holds the account credentials and addressing for one container. All
//! fields are fixed at construction and validated up front; the client
//! never mutates them.

use url::Url;

use crate::api::{Error, Result};

/// Default public endpoint of the Selectel storage API.
const DEFAULT_API_HOST: &str = "https://api.selcdn.ru";

/// Environment variables read by [`Config::from_env`].
const ENV_ACCOUNT_ID: &str = "SELECTEL_ACCOUNT_ID";
const ENV_USER_ID: &str = "SELECTEL_USER_ID";
const ENV_USER_PASSWORD: &str = "SELECTEL_USER_PASSWORD";
const ENV_CONTAINER: &str = "SELECTEL_CONTAINER";
const ENV_API_HOST: &str = "SELECTEL_API_HOST";

#[derive(Debug, Clone)]
pub struct Config {
    api_host: String,
    account_id: String,
    user_id: String,
    user_password: String,
    container: String,
}

impl Config {
    /// Build a config against the default API host.
    pub fn new(
        account_id: impl Into<String>,
        user_id: impl Into<String>,
        user_password: impl Into<String>,
        container: impl Into<String>,
    ) -> Result<Self> {
        Self::with_api_host(DEFAULT_API_HOST, account_id, user_id, user_password, container)
    }

    /// Build a config against a custom API host.
    ///
    /// The host must be an absolute http(s) URI; trailing slashes and spaces
    /// are trimmed. Empty fields fail with [`Error::InvalidArgument`].
    pub fn with_api_host(
        api_host: &str,
        account_id: impl Into<String>,
        user_id: impl Into<String>,
        user_password: impl Into<String>,
        container: impl Into<String>,
    ) -> Result<Self> {
        let api_host = api_host.trim_end_matches(['/', ' ']).to_string();

        let parsed = Url::parse(&api_host)
            .map_err(|_| Error::InvalidArgument("api host must be an absolute uri".to_string()))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(Error::InvalidArgument(
                "api host must use the http or https scheme".to_string(),
            ));
        }

        let config = Self {
            api_host,
            account_id: account_id.into(),
            user_id: user_id.into(),
            user_password: user_password.into(),
            container: container.into(),
        };

        for (name, value) in [
            ("account id", &config.account_id),
            ("user id", &config.user_id),
            ("user password", &config.user_password),
            ("container", &config.container),
        ] {
            if value.is_empty() {
                return Err(Error::InvalidArgument(format!("{name} must not be empty")));
            }
        }

        Ok(config)
    }

    /// Build a config from `SELECTEL_*` environment variables.
    ///
    /// `SELECTEL_API_HOST` is optional and falls back to the default host.
    pub fn from_env() -> Result<Self> {
        let require = |name: &str| {
            std::env::var(name)
                .map_err(|_| Error::InvalidArgument(format!("{name} must be set in environment")))
        };

        let api_host =
            std::env::var(ENV_API_HOST).unwrap_or_else(|_| DEFAULT_API_HOST.to_string());

        Self::with_api_host(
            &api_host,
            require(ENV_ACCOUNT_ID)?,
            require(ENV_USER_ID)?,
            require(ENV_USER_PASSWORD)?,
            require(ENV_CONTAINER)?,
        )
    }

    pub fn api_host(&self) -> &str {
        &self.api_host
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn user_password(&self) -> &str {
        &self.user_password
    }

    pub fn container(&self) -> &str {
        &self.container
    }
}
