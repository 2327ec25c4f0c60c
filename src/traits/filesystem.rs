use std::io;
use std::path::{Path, PathBuf};
#[cfg(test)]
use std::{collections::HashMap, sync::RwLock};

/// Trait for the filesystem reads template loading needs, so engines can be
/// tested against an in-memory tree
pub trait FileSystem: Send + Sync {
    /// Read file contents as string
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Check if path is a file
    fn is_file(&self, path: &Path) -> bool;

    /// Walk directory recursively, the root included at depth 0
    fn walk_dir(&self, path: &Path, max_depth: usize) -> io::Result<Vec<PathBuf>>;
}

/// Real filesystem implementation using std::fs
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    /// Symlinked directories are descended into; a link back to an ancestor
    /// is skipped rather than failing the walk
    fn walk_dir(&self, path: &Path, max_depth: usize) -> io::Result<Vec<PathBuf>> {
        use walkdir::WalkDir;

        let mut paths = Vec::new();
        for entry in WalkDir::new(path).follow_links(true).max_depth(max_depth) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.loop_ancestor().is_some() => continue,
                Err(err) => return Err(err.into()),
            };
            paths.push(entry.path().to_path_buf());
        }

        Ok(paths)
    }
}

/// Mock filesystem implementation for testing (in-memory)
#[cfg(test)]
#[derive(Default)]
pub struct MockFileSystem {
    files: RwLock<HashMap<PathBuf, String>>,
    directories: RwLock<HashMap<PathBuf, ()>>,
}

#[cfg(test)]
impl MockFileSystem {
    /// Create new empty mock filesystem
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, registering every parent directory
    pub fn add_file(&self, path: impl AsRef<Path>, contents: &str) {
        let path = path.as_ref();

        let mut current = path;
        while let Some(parent) = current.parent() {
            self.directories
                .write()
                .unwrap()
                .insert(parent.to_path_buf(), ());
            current = parent;
        }

        self.files
            .write()
            .unwrap()
            .insert(path.to_path_buf(), contents.to_string());
    }
}

#[cfg(test)]
impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files.read().unwrap().get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("File not found in mock filesystem: {:?}", path),
            )
        })
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.directories.read().unwrap().contains_key(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.read().unwrap().contains_key(path)
    }

    fn walk_dir(&self, path: &Path, max_depth: usize) -> io::Result<Vec<PathBuf>> {
        let files = self.files.read().unwrap();
        let directories = self.directories.read().unwrap();

        let mut entries = Vec::new();

        if directories.contains_key(path) {
            entries.push(path.to_path_buf());
        }

        // max_depth=1: root + immediate children
        for candidate in files.keys().chain(directories.keys()) {
            if candidate == path {
                continue;
            }
            let Ok(relative) = candidate.strip_prefix(path) else {
                continue;
            };
            if relative.components().count() <= max_depth {
                entries.push(candidate.clone());
            }
        }

        Ok(entries)
    }
}
