use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;


pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";
pub const DEFAULT_NAME_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    // Origin of the exchange server. Check endpoints are resolved against it.
    pub server_url: String,
    // A name check that takes longer than this is reported as failed.
    #[serde(with = "humantime_serde")]
    pub name_check_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            server_url: DEFAULT_SERVER_URL.to_owned(),
            name_check_timeout: DEFAULT_NAME_CHECK_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn with_server_url(mut self, server_url: impl Into<String>) -> Self {
        self.server_url = server_url.into();
        self
    }

    pub fn server_url(&self) -> Result<Url, url::ParseError> { Url::parse(&self.server_url) }
}
