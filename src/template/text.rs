//! Text adapter: [`Template`] over the plain-text engine.

use std::path::Path;

use super::{Kind, Template};
use crate::engine::text;
use crate::error::Result;

/// A plain-text template seen through the [`Template`] trait
#[derive(Debug, Clone)]
pub struct TextTemplate {
    inner: text::Template,
}

impl TextTemplate {
    fn boxed(inner: text::Template) -> Box<dyn Template> {
        Box::new(Self { inner })
    }

    /// The wrapped engine template
    pub fn into_inner(self) -> text::Template {
        self.inner
    }
}

impl From<text::Template> for TextTemplate {
    fn from(inner: text::Template) -> Self {
        Self { inner }
    }
}

impl_template!(TextTemplate, Kind::Text);

/// A new, empty text template
pub fn new(name: &str) -> Box<dyn Template> {
    TextTemplate::boxed(text::Template::new(name))
}

/// Parse files into a text template named after the first one
pub fn parse_files(filenames: &[&Path]) -> Result<Box<dyn Template>> {
    text::parse_files(filenames).map(TextTemplate::boxed)
}

/// Parse the files matching `pattern` into a text template named after the first match
pub fn parse_glob(pattern: &str) -> Result<Box<dyn Template>> {
    text::parse_glob(pattern).map(TextTemplate::boxed)
}

/// Unwrap a text template, panicking on error or on an HTML template
pub fn must(result: Result<Box<dyn Template>>) -> Box<dyn Template> {
    super::must_be(Kind::Text, result)
}
