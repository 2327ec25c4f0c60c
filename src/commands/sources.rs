use anyhow::{Result, bail};
use std::path::{Path, PathBuf};
use template_interface::Template;

/// Where the command loads templates from
pub enum Sources {
    Glob(String),
    Files(Vec<PathBuf>),
}

impl Sources {
    /// Exactly one of a glob pattern or a non-empty file list
    pub fn new(glob: Option<String>, files: Vec<PathBuf>) -> Result<Self> {
        match (glob, files.is_empty()) {
            (Some(_), false) => bail!("Pass either --glob or template files, not both"),
            (Some(pattern), true) => Ok(Sources::Glob(pattern)),
            (None, false) => Ok(Sources::Files(files)),
            (None, true) => bail!("No templates given; pass template files or --glob"),
        }
    }

    /// Parse the sources into `root`'s namespace
    pub fn load(&self, root: &dyn Template) -> Result<Box<dyn Template>> {
        let loaded = match self {
            Sources::Glob(pattern) => root.parse_glob(pattern)?,
            Sources::Files(files) => {
                let paths: Vec<&Path> = files.iter().map(PathBuf::as_path).collect();
                root.parse_files(&paths)?
            }
        };
        Ok(loaded)
    }

    /// The template to execute when none is named: the first file, or the
    /// first template by name for a glob
    pub fn default_entry(&self, root: &dyn Template) -> Option<String> {
        match self {
            Sources::Files(files) => files
                .first()
                .and_then(|path| path.file_name())
                .map(|name| name.to_string_lossy().into_owned()),
            Sources::Glob(_) => root
                .templates()
                .first()
                .map(|template| template.name().to_string()),
        }
    }
}
