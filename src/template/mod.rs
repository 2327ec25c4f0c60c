//! The `Template` trait and its text and HTML adapters.
//!
//! Code written against `Box<dyn Template>` never needs to know which engine
//! is underneath; only the constructor call picks one.

use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::engine::{FuncMap, ParseTree};
use crate::error::{Error, Result};

/// Implements [`Template`] for an adapter struct holding its engine in `inner`.
///
/// Every template the engine hands back is re-wrapped with `Self::boxed`, so
/// both adapters stay identical apart from the engine they wrap.
macro_rules! impl_template {
    ($adapter:ident, $kind:expr) => {
        impl $crate::template::Template for $adapter {
            fn add_parse_tree(
                &self,
                name: &str,
                tree: &$crate::engine::ParseTree,
            ) -> $crate::error::Result<Box<dyn $crate::template::Template>> {
                self.inner.add_parse_tree(name, tree).map(Self::boxed)
            }

            fn try_clone(&self) -> $crate::error::Result<Box<dyn $crate::template::Template>> {
                self.inner.duplicate().map(Self::boxed)
            }

            fn delims(&self, left: &str, right: &str) -> Box<dyn $crate::template::Template> {
                Self::boxed(self.inner.delims(left, right))
            }

            fn execute(
                &self,
                out: &mut dyn ::std::io::Write,
                data: &::serde_json::Value,
            ) -> $crate::error::Result<()> {
                self.inner.execute(out, data)
            }

            fn execute_template(
                &self,
                out: &mut dyn ::std::io::Write,
                name: &str,
                data: &::serde_json::Value,
            ) -> $crate::error::Result<()> {
                self.inner.execute_template(out, name, data)
            }

            fn funcs(
                &self,
                funcs: &$crate::engine::FuncMap,
            ) -> Box<dyn $crate::template::Template> {
                Self::boxed(self.inner.funcs(funcs))
            }

            fn lookup(&self, name: &str) -> Option<Box<dyn $crate::template::Template>> {
                self.inner.lookup(name).map(Self::boxed)
            }

            fn name(&self) -> &str {
                self.inner.name()
            }

            fn new_template(&self, name: &str) -> Box<dyn $crate::template::Template> {
                Self::boxed(self.inner.new_template(name))
            }

            fn parse(&self, text: &str) -> $crate::error::Result<Box<dyn $crate::template::Template>> {
                self.inner.parse(text).map(Self::boxed)
            }

            fn parse_files(
                &self,
                filenames: &[&::std::path::Path],
            ) -> $crate::error::Result<Box<dyn $crate::template::Template>> {
                self.inner.parse_files(filenames).map(Self::boxed)
            }

            fn parse_glob(
                &self,
                pattern: &str,
            ) -> $crate::error::Result<Box<dyn $crate::template::Template>> {
                self.inner.parse_glob(pattern).map(Self::boxed)
            }

            fn templates(&self) -> Vec<Box<dyn $crate::template::Template>> {
                self.inner.templates().into_iter().map(Self::boxed).collect()
            }

            fn kind(&self) -> $crate::template::Kind {
                $kind
            }
        }
    };
}

pub mod html;
pub mod text;

pub use html::HtmlTemplate;
pub use text::TextTemplate;

/// Operations shared by text and HTML templates.
///
/// Every method that yields a template returns it boxed in the same variant
/// as the receiver.
pub trait Template: fmt::Debug + Send + Sync {
    /// Attach a precompiled body under `name` and return the template for `name`
    fn add_parse_tree(&self, name: &str, tree: &ParseTree) -> Result<Box<dyn Template>>;

    /// Independent copy of this template and all templates associated with it
    fn try_clone(&self) -> Result<Box<dyn Template>>;

    /// A handle using these delimiters for subsequent parses; empty strings
    /// restore the defaults. The receiver keeps its own delimiters.
    #[must_use]
    fn delims(&self, left: &str, right: &str) -> Box<dyn Template>;

    /// Render this template's body into `out`
    fn execute(&self, out: &mut dyn Write, data: &Value) -> Result<()>;

    /// Render the associated template `name` into `out`
    fn execute_template(&self, out: &mut dyn Write, name: &str, data: &Value) -> Result<()>;

    /// Make functions callable from template bodies in this namespace
    fn funcs(&self, funcs: &FuncMap) -> Box<dyn Template>;

    /// The associated template called `name`, or `None` if it was never parsed
    fn lookup(&self, name: &str) -> Option<Box<dyn Template>>;

    fn name(&self) -> &str;

    /// A new, empty template sharing this one's namespace
    fn new_template(&self, name: &str) -> Box<dyn Template>;

    fn parse(&self, text: &str) -> Result<Box<dyn Template>>;

    /// Parse each file as the template named after its base name
    fn parse_files(&self, filenames: &[&Path]) -> Result<Box<dyn Template>>;

    fn parse_glob(&self, pattern: &str) -> Result<Box<dyn Template>>;

    /// All parsed templates of the namespace, sorted by name
    fn templates(&self) -> Vec<Box<dyn Template>>;

    /// Which engine backs this template
    fn kind(&self) -> Kind;
}

impl dyn Template + '_ {
    /// Serialize `data` and render this template with it
    pub fn render<T: Serialize + ?Sized>(&self, out: &mut dyn Write, data: &T) -> Result<()> {
        let data = serde_json::to_value(data).map_err(Error::Data)?;
        self.execute(out, &data)
    }

    /// Render this template into a string
    pub fn execute_to_string(&self, data: &Value) -> Result<String> {
        let mut out = Vec::<u8>::new();
        self.execute(&mut out, data)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

/// The two template variants, for choosing one at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// No escaping of interpolated values
    Text,
    /// Interpolated values are HTML-escaped
    Html,
}

impl Kind {
    pub fn new_template(self, name: &str) -> Box<dyn Template> {
        match self {
            Kind::Text => text::new(name),
            Kind::Html => html::new(name),
        }
    }

    pub fn parse_files(self, filenames: &[&Path]) -> Result<Box<dyn Template>> {
        match self {
            Kind::Text => text::parse_files(filenames),
            Kind::Html => html::parse_files(filenames),
        }
    }

    pub fn parse_glob(self, pattern: &str) -> Result<Box<dyn Template>> {
        match self {
            Kind::Text => text::parse_glob(pattern),
            Kind::Html => html::parse_glob(pattern),
        }
    }

    /// [`must`] that also insists on this variant
    pub fn must(self, result: Result<Box<dyn Template>>) -> Box<dyn Template> {
        match self {
            Kind::Text => text::must(result),
            Kind::Html => html::must(result),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Text => write!(f, "text"),
            Kind::Html => write!(f, "html"),
        }
    }
}

impl FromStr for Kind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Kind::Text),
            "html" => Ok(Kind::Html),
            _ => Err(Error::UnknownKind(s.to_string())),
        }
    }
}

/// Unwrap a template result, panicking on error.
///
/// For initialization code where a bad template is a programming or
/// deployment mistake, e.g. `must(text::new("t").parse(SRC))`.
pub fn must(result: Result<Box<dyn Template>>) -> Box<dyn Template> {
    match result {
        Ok(template) => template,
        Err(err) => panic!("{}", err),
    }
}

/// Shared body of the per-variant `must` helpers
fn must_be(kind: Kind, result: Result<Box<dyn Template>>) -> Box<dyn Template> {
    let template = must(result);
    if template.kind() != kind {
        panic!(
            "{} template {:?} passed to {}::must",
            template.kind(),
            template.name(),
            kind
        );
    }
    template
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str() {
        assert_eq!("text".parse::<Kind>().unwrap(), Kind::Text);
        assert_eq!("HTML".parse::<Kind>().unwrap(), Kind::Html);
        assert!(matches!("xml".parse::<Kind>(), Err(Error::UnknownKind(s)) if s == "xml"));
    }

    #[test]
    fn test_kind_display_round_trips() {
        for kind in [Kind::Text, Kind::Html] {
            assert_eq!(kind.to_string().parse::<Kind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_kind_selects_variant() {
        for kind in [Kind::Text, Kind::Html] {
            let template = kind.new_template("chosen");
            assert_eq!(template.kind(), kind);
            assert_eq!(template.name(), "chosen");
        }
    }

    #[test]
    #[should_panic(expected = "html template \"page\" passed to text::must")]
    fn test_must_rejects_other_variant() {
        Kind::Text.must(Ok(html::new("page")));
    }
}
