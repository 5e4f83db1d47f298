use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};

/// Caller-side state for one interaction context: a single-slot in-progress
/// flag plus a map from post identifier to the last generated comment.
/// Supports "regenerate" without re-supplying the post.
#[derive(Debug, Default)]
pub struct Session {
    in_flight: bool,
    comments: HashMap<String, String>,
}

/// Stable identifier for a post within one session.
pub fn post_id(content: &str) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the single generation slot. Returns false while another
    /// generation is still running.
    pub fn try_begin(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    /// Release the slot, success or failure.
    pub fn finish(&mut self) {
        self.in_flight = false;
    }

    pub fn cached(&self, id: &str) -> Option<&str> {
        self.comments.get(id).map(String::as_str)
    }

    pub fn store(&mut self, id: impl Into<String>, comment: impl Into<String>) {
        self.comments.insert(id.into(), comment.into());
    }

    /// Drop a cached comment so the next request regenerates it.
    pub fn invalidate(&mut self, id: &str) {
        self.comments.remove(id);
    }
}
