use std::cell::{Cell, RefCell};

use serde_json::Value;

use super::Transport;
use crate::{Error, Result};

/// Transport that records every POST instead of sending it; used in tests.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    posts: RefCell<Vec<(String, Value)>>,
    failing: Cell<bool>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent posts fail (they are still recorded).
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    pub fn posts(&self) -> Vec<(String, Value)> {
        self.posts.borrow().clone()
    }

    pub fn posts_to(&self, path: &str) -> Vec<Value> {
        self.posts
            .borrow()
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, body)| body.clone())
            .collect()
    }
}

impl Transport for RecordingTransport {
    fn post_json(&self, path: &str, body: &Value) -> Result<()> {
        self.posts
            .borrow_mut()
            .push((path.to_string(), body.clone()));
        if self.failing.get() {
            return Err(Error::Transport(format!("POST {path} refused")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn records_posts_and_scripted_failures() {
        let fake = RecordingTransport::new();
        fake.post_json("/a", &json!({"n": 1})).unwrap();
        fake.set_failing(true);
        assert!(fake.post_json("/b", &json!({"n": 2})).is_err());
        assert_eq!(fake.posts().len(), 2);
        assert_eq!(fake.posts_to("/b"), vec![json!({"n": 2})]);
    }
}
