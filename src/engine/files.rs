//! Reading template sources from files and glob patterns

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::error::{Error, Result};
use crate::traits::FileSystem;

/// `*` and `?` never match a path separator, like a shell glob
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// The template name a file is registered under
pub(crate) fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Read every file, returning `(template name, source)` pairs in order
pub(crate) fn read_sources<P: AsRef<Path>>(
    fs: &dyn FileSystem,
    filenames: &[P],
) -> Result<Vec<(String, String)>> {
    if filenames.is_empty() {
        return Err(Error::NoFiles);
    }

    filenames
        .iter()
        .map(|filename| {
            let path = filename.as_ref();
            tracing::trace!(path = %path.display(), "reading template file");

            let source = fs.read_to_string(path).map_err(|source| Error::Read {
                path: path.to_path_buf(),
                source,
            })?;
            Ok((base_name(path), source))
        })
        .collect()
}

/// Expand `pattern` into the sorted list of matching files
pub(crate) fn glob(fs: &dyn FileSystem, pattern: &str) -> Result<Vec<PathBuf>> {
    let matcher = Pattern::new(pattern).map_err(|source| Error::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;
    let no_matches = || Error::NoMatches {
        pattern: pattern.to_string(),
    };

    // Walk from the longest wildcard-free prefix, as deep as the rest of the pattern
    let mut base = PathBuf::new();
    let mut depth = 0;
    for component in Path::new(pattern).components() {
        if depth == 0 && !has_meta(&component.as_os_str().to_string_lossy()) {
            base.push(component);
        } else {
            depth += 1;
        }
    }

    if depth == 0 {
        return if fs.is_file(&base) {
            Ok(vec![base])
        } else {
            Err(no_matches())
        };
    }

    let relative = base.as_os_str().is_empty();
    let root = if relative { Path::new(".") } else { base.as_path() };
    if !fs.is_dir(root) {
        return Err(no_matches());
    }

    let entries = fs.walk_dir(root, depth).map_err(|source| Error::Read {
        path: root.to_path_buf(),
        source,
    })?;

    let mut matches: Vec<PathBuf> = entries
        .into_iter()
        .filter(|entry| fs.is_file(entry))
        .map(|entry| {
            if relative {
                entry
                    .strip_prefix(".")
                    .map(Path::to_path_buf)
                    .unwrap_or(entry)
            } else {
                entry
            }
        })
        .filter(|candidate| matcher.matches_path_with(candidate, MATCH_OPTIONS))
        .collect();

    if matches.is_empty() {
        return Err(no_matches());
    }
    matches.sort();

    tracing::debug!(pattern, matches = matches.len(), "expanded template glob");
    Ok(matches)
}

fn has_meta(component: &str) -> bool {
    component.contains(['*', '?', '['])
}
