//! Client configuration.

use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_API_ROOT: &str = "https://jsonplaceholder.typicode.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the service lives and how long a single call may take.
///
/// Every field has a default, so a partial TOML table is enough.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Service root. Users live under `/users`, comments under `/posts`.
    pub api_root: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_root: DEFAULT_API_ROOT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    pub fn new(api_root: &str) -> Self {
        Self {
            api_root: api_root.to_string(),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn root(&self) -> &str {
        self.api_root.trim_end_matches('/')
    }

    /// Base URL of the user collection.
    pub fn users_url(&self) -> String {
        format!("{}/users", self.root())
    }

    /// Base URL of the post collection, a sibling of the users collection.
    pub fn posts_url(&self) -> String {
        format!("{}/posts", self.root())
    }
}
