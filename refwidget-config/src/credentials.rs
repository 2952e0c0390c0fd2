//! Credential resolution from environment variables, `.env` files, and the
//! configuration file.
//!
//! Environment values win over file values. Missing credentials are not an
//! error here: they resolve to empty secrets, which the referral API rejects
//! with an HTTP failure that the screen reports like any other.

use serde::{Deserialize, Serialize};

use crate::constants::env;
use crate::secret::Secret;

/// Credentials as they may appear in `refwidget.toml`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub account_sid: Option<Secret>,
    #[serde(default)]
    pub api_key: Option<Secret>,
    /// Bearer token issued for the tenant. Loaded for completeness; the
    /// upsert call authenticates with Basic auth and never sends it.
    #[serde(default)]
    pub jwt: Option<Secret>,
}

/// Resolved credentials used to build the `Authorization` header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub account_sid: Secret,
    pub api_key: Secret,
    pub jwt: Option<Secret>,
}

impl Credentials {
    pub fn new(account_sid: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            account_sid: Secret::new(account_sid),
            api_key: Secret::new(api_key),
            jwt: None,
        }
    }

    /// Resolve credentials through an arbitrary variable lookup.
    pub fn from_lookup<F>(file: &CredentialsConfig, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let account_sid = resolve(&lookup, env::ACCOUNT_SID, file.account_sid.as_ref());
        let api_key = resolve(&lookup, env::API_KEY, file.api_key.as_ref());
        let jwt = lookup(env::JWT)
            .filter(|value| !value.is_empty())
            .map(Secret::from)
            .or_else(|| file.jwt.clone());

        if account_sid.is_empty() {
            tracing::warn!(variable = env::ACCOUNT_SID, "account SID is not set");
        }
        if api_key.is_empty() {
            tracing::warn!(variable = env::API_KEY, "API key is not set");
        }

        Self {
            account_sid,
            api_key,
            jwt,
        }
    }
}

fn resolve<F>(lookup: &F, variable: &str, fallback: Option<&Secret>) -> Secret
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup(variable)
        && !value.is_empty()
    {
        return Secret::from(value);
    }

    fallback.cloned().unwrap_or_default()
}

/// Load environment variables from a `.env` file in the current directory.
///
/// A missing file is fine; an unreadable one is logged and ignored.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!("Loaded environment variables from: {}", path.display());
        }
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!("Failed to load .env file: {}", e);
        }
    }
}
