use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use verifier_engine::EditorSource;
use verifier_logging::verifier_warn;

/// Editor backed by a document on disk, read afresh on every poll.
///
/// Text is reassembled line by line, the way rendered editor lines are
/// joined, so line endings are normalised to `\n`.
pub struct DocumentEditor {
    path: PathBuf,
    mounted_at: Instant,
}

impl DocumentEditor {
    pub fn new(path: PathBuf, mount_delay: Duration) -> Self {
        Self {
            path,
            mounted_at: Instant::now() + mount_delay,
        }
    }
}

impl EditorSource for DocumentEditor {
    fn extract_text(&self) -> Option<String> {
        if Instant::now() < self.mounted_at {
            return None;
        }
        match fs::read_to_string(&self.path) {
            Ok(text) => Some(text.lines().collect::<Vec<_>>().join("\n")),
            Err(err) => {
                verifier_warn!("Cannot read document {:?}: {}", self.path, err);
                None
            }
        }
    }
}
