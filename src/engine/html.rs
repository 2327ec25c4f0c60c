//! HTML engine: interpolated values are HTML-escaped.
//!
//! Built on the text engine with an escaping registry. Once any template of a
//! namespace has executed, the namespace is frozen: further parsing and
//! cloning are refused so every execution sees the same escaped set.

use std::fmt;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

use super::files;
use super::namespace::Escape;
use super::{text, FuncMap, ParseTree};
use crate::error::{Error, Result};
use crate::traits::{FileSystem, RealFileSystem};

/// An HTML template; handles share a namespace the same way text templates do
#[derive(Clone)]
pub struct Template {
    text: text::Template,
    executed: Arc<AtomicBool>,
}

/// Parse the named files into a new template named after the first file
pub fn parse_files<P: AsRef<Path>>(filenames: &[P]) -> Result<Template> {
    let first = filenames.first().ok_or(Error::NoFiles)?;
    Template::new(files::base_name(first.as_ref())).parse_files(filenames)
}

/// Parse the files matching `pattern` into a new template named after the first match
pub fn parse_glob(pattern: &str) -> Result<Template> {
    let filenames = files::glob(&RealFileSystem, pattern)?;
    parse_files(&filenames)
}

impl Template {
    /// Allocate a new, empty HTML template with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_filesystem(name, Arc::new(RealFileSystem))
    }

    pub fn with_filesystem(name: impl Into<String>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            text: text::Template::with_escape(name, Escape::Html, fs),
            executed: Arc::new(AtomicBool::new(false)),
        }
    }

    fn wrap(&self, text: text::Template) -> Self {
        Self {
            text,
            executed: Arc::clone(&self.executed),
        }
    }

    fn check_can_change(&self, op: &'static str) -> Result<()> {
        if self.has_executed() {
            return Err(Error::AfterExecute {
                op,
                name: self.text.name().to_string(),
            });
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        self.text.name()
    }

    /// Whether any template of this namespace has executed
    pub fn has_executed(&self) -> bool {
        self.executed.load(Ordering::Acquire)
    }

    pub fn new_template(&self, name: impl Into<String>) -> Self {
        self.wrap(self.text.new_template(name))
    }

    #[must_use]
    pub fn delims(&self, left: &str, right: &str) -> Self {
        self.wrap(self.text.delims(left, right))
    }

    #[must_use]
    pub fn funcs(&self, funcs: &FuncMap) -> Self {
        self.wrap(self.text.funcs(funcs))
    }

    pub fn lookup(&self, name: &str) -> Option<Self> {
        self.text.lookup(name).map(|text| self.wrap(text))
    }

    pub fn templates(&self) -> Vec<Self> {
        self.text
            .templates()
            .into_iter()
            .map(|text| self.wrap(text))
            .collect()
    }

    pub fn parse(&self, text: &str) -> Result<Self> {
        self.check_can_change("Parse")?;
        self.text.parse(text).map(|text| self.wrap(text))
    }

    pub fn add_parse_tree(&self, name: &str, tree: &ParseTree) -> Result<Self> {
        self.check_can_change("AddParseTree")?;
        self.text
            .add_parse_tree(name, tree)
            .map(|text| self.wrap(text))
    }

    pub fn parse_files<P: AsRef<Path>>(&self, filenames: &[P]) -> Result<Self> {
        self.check_can_change("ParseFiles")?;
        self.text.parse_files(filenames).map(|text| self.wrap(text))
    }

    pub fn parse_glob(&self, pattern: &str) -> Result<Self> {
        self.check_can_change("ParseGlob")?;
        self.text.parse_glob(pattern).map(|text| self.wrap(text))
    }

    /// An independent copy; refused once the namespace has executed
    pub fn duplicate(&self) -> Result<Self> {
        self.check_can_change("Clone")?;
        Ok(Self {
            text: self.text.duplicate()?,
            executed: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn execute<T: Serialize>(&self, out: &mut dyn Write, data: &T) -> Result<()> {
        self.executed.store(true, Ordering::Release);
        self.text.execute(out, data)
    }

    pub fn execute_template<T: Serialize>(
        &self,
        out: &mut dyn Write,
        name: &str,
        data: &T,
    ) -> Result<()> {
        self.executed.store(true, Ordering::Release);
        self.text.execute_template(out, name, data)
    }

    pub fn shares_namespace(&self, other: &Template) -> bool {
        self.text.shares_namespace(&other.text)
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("name", &self.name())
            .field("delims", self.text.delims_in_use())
            .field("executed", &self.has_executed())
            .finish()
    }
}
