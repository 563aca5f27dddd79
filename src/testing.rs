use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use crate::error::{Result, ScrapeError};
use crate::http::{HttpResponse, Transport};

#[derive(Default)]
pub struct ScriptedTransport {
    scripts: RefCell<HashMap<String, VecDeque<Option<HttpResponse>>>>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a 200 response. The last queued response for a URL repeats forever.
    pub fn respond(self, url: &str, body: &str) -> Self {
        self.respond_with(url, 200, body)
    }

    pub fn respond_with(self, url: &str, status: u16, body: &str) -> Self {
        self.push(url, Some(HttpResponse { status, body: body.to_string() }));
        self
    }

    /// Queue a network failure.
    pub fn fail(self, url: &str) -> Self {
        self.push(url, None);
        self
    }

    fn push(&self, url: &str, entry: Option<HttpResponse>) {
        self.scripts
            .borrow_mut()
            .entry(url.to_string())
            .or_default()
            .push_back(entry);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, url: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.as_str() == url).count()
    }
}

impl Transport for ScriptedTransport {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        self.calls.borrow_mut().push(url.to_string());

        let mut scripts = self.scripts.borrow_mut();
        let queue = scripts
            .get_mut(url)
            .ok_or_else(|| ScrapeError::transport(url, "no scripted response"))?;
        let entry = if queue.len() > 1 { queue.pop_front() } else { queue.front().cloned() };

        match entry.flatten() {
            Some(resp) => Ok(resp),
            None => Err(ScrapeError::transport(url, "connection refused")),
        }
    }
}
