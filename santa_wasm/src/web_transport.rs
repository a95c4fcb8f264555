use std::time::Duration;

use async_trait::async_trait;
use secret_santa::name_check::{NameCheckError, NameCheckResponse, NameCheckTransport};
use url::Url;
use wasm_bindgen_futures::JsFuture;

use crate::web_document::web_window;


// `reqwest` compiles to browser fetch on wasm targets.
pub struct FetchTransport {
    client: reqwest::Client,
}

impl FetchTransport {
    pub fn new() -> Self { FetchTransport { client: reqwest::Client::new() } }
}

// Cancels a pending `setTimeout`. Harmless if the timer has already fired.
struct TimerGuard {
    handle: i32,
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        if let Ok(window) = web_window() {
            window.clear_timeout_with_handle(self.handle);
        }
    }
}

fn transport_error(err: reqwest::Error) -> NameCheckError { NameCheckError::Transport(err.to_string()) }

#[async_trait(?Send)]
impl NameCheckTransport for FetchTransport {
    async fn fetch_availability(&self, url: &Url) -> Result<NameCheckResponse, NameCheckError> {
        let response = self.client.get(url.clone()).send().await.map_err(transport_error)?;
        let response = response.error_for_status().map_err(transport_error)?;
        response.json::<NameCheckResponse>().await.map_err(transport_error)
    }

    async fn sleep(&self, duration: Duration) {
        let millis = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
        let mut timer = None;
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            let scheduled = web_window().and_then(|window| {
                window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
            });
            match scheduled {
                Ok(handle) => timer = Some(TimerGuard { handle }),
                Err(_) => log::error!("Cannot schedule name check timeout"),
            }
        });
        // Dropped together with this future, which also happens when the fetch wins the race.
        let _timer = timer;
        // The promise is only ever resolved, never rejected.
        let _ = JsFuture::from(promise).await;
    }
}
