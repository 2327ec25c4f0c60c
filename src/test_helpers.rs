//! Test helpers for building in-memory template directories

#![cfg(test)]

use std::path::PathBuf;
use std::sync::Arc;

use crate::traits::MockFileSystem;

/// Builder for a directory of template files on a [`MockFileSystem`]
pub struct TemplateDirBuilder {
    root: PathBuf,
    files: Vec<(String, String)>, // (relative path, content)
}

impl TemplateDirBuilder {
    /// Start a directory rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: Vec::new(),
        }
    }

    /// Add a file relative to the root
    pub fn file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.push((path.into(), content.into()));
        self
    }

    /// Write everything into a fresh mock filesystem
    pub fn build(self) -> Arc<MockFileSystem> {
        let fs = MockFileSystem::new();
        for (path, content) in &self.files {
            fs.add_file(self.root.join(path), content);
        }
        Arc::new(fs)
    }
}
