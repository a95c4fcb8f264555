// Test utilities shared by the integration tests and the web client tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future;
use url::Url;

use crate::name_check::{NameCheckError, NameCheckResponse, NameCheckTransport};


pub fn sample_names() -> Vec<&'static str> { vec!["Alice", "Bob", "Charlie", "Dave"] }

pub fn sample_server_url() -> Url { Url::parse("http://santa.test").unwrap() }

#[derive(Clone, Debug)]
pub enum MockReply {
    Respond(NameCheckResponse),
    Fail(String),
    // Never answers. Combined with an immediate timer this simulates a hung server.
    Hang,
}

// Replies are consumed in order. Every requested URL is recorded.
pub struct MockTransport {
    replies: RefCell<VecDeque<MockReply>>,
    requests: RefCell<Vec<Url>>,
    hung: Cell<bool>,
    sleeps: Cell<usize>,
}

impl MockTransport {
    pub fn new(replies: impl IntoIterator<Item = MockReply>) -> Self {
        MockTransport {
            replies: RefCell::new(replies.into_iter().collect()),
            requests: RefCell::new(vec![]),
            hung: Cell::new(false),
            sleeps: Cell::new(0),
        }
    }

    pub fn available(name_available: bool) -> Self {
        Self::new([MockReply::Respond(NameCheckResponse { name_available })])
    }

    pub fn requests(&self) -> Vec<Url> { self.requests.borrow().clone() }
    pub fn num_sleeps(&self) -> usize { self.sleeps.get() }
}

#[async_trait(?Send)]
impl NameCheckTransport for MockTransport {
    async fn fetch_availability(&self, url: &Url) -> Result<NameCheckResponse, NameCheckError> {
        self.requests.borrow_mut().push(url.clone());
        self.hung.set(false);
        let reply = self.replies.borrow_mut().pop_front();
        match reply {
            Some(MockReply::Respond(response)) => Ok(response),
            Some(MockReply::Fail(message)) => Err(NameCheckError::Transport(message)),
            Some(MockReply::Hang) | None => {
                self.hung.set(true);
                future::pending().await
            }
        }
    }

    // Fires immediately if the request hangs and never otherwise, so that tests don't depend on
    // wall time. Relies on the timer being polled after the request.
    async fn sleep(&self, _duration: Duration) {
        self.sleeps.set(self.sleeps.get() + 1);
        if !self.hung.get() {
            future::pending::<()>().await;
        }
    }
}
