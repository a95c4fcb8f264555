use std::time::Duration;

use async_trait::async_trait;
use secret_santa::name_check::{NameCheckError, NameCheckResponse, NameCheckTransport};
use url::Url;


pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self { HttpTransport { client: reqwest::Client::new() } }
}

fn transport_error(err: reqwest::Error) -> NameCheckError { NameCheckError::Transport(err.to_string()) }

#[async_trait(?Send)]
impl NameCheckTransport for HttpTransport {
    async fn fetch_availability(&self, url: &Url) -> Result<NameCheckResponse, NameCheckError> {
        let response = self.client.get(url.clone()).send().await.map_err(transport_error)?;
        let response = response.error_for_status().map_err(transport_error)?;
        response.json::<NameCheckResponse>().await.map_err(transport_error)
    }

    async fn sleep(&self, duration: Duration) { async_std::task::sleep(duration).await }
}
