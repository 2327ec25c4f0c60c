//! HTML adapter: [`Template`] over the HTML-escaping engine.

use std::path::Path;

use super::{Kind, Template};
use crate::engine::html;
use crate::error::Result;

/// An HTML template seen through the [`Template`] trait
#[derive(Debug, Clone)]
pub struct HtmlTemplate {
    inner: html::Template,
}

impl HtmlTemplate {
    fn boxed(inner: html::Template) -> Box<dyn Template> {
        Box::new(Self { inner })
    }

    /// The wrapped engine template
    pub fn into_inner(self) -> html::Template {
        self.inner
    }
}

impl From<html::Template> for HtmlTemplate {
    fn from(inner: html::Template) -> Self {
        Self { inner }
    }
}

impl_template!(HtmlTemplate, Kind::Html);

/// A new, empty HTML template
pub fn new(name: &str) -> Box<dyn Template> {
    HtmlTemplate::boxed(html::Template::new(name))
}

/// Parse files into an HTML template named after the first one
pub fn parse_files(filenames: &[&Path]) -> Result<Box<dyn Template>> {
    html::parse_files(filenames).map(HtmlTemplate::boxed)
}

/// Parse the files matching `pattern` into an HTML template named after the first match
pub fn parse_glob(pattern: &str) -> Result<Box<dyn Template>> {
    html::parse_glob(pattern).map(HtmlTemplate::boxed)
}

/// Unwrap an HTML template, panicking on error or on a text template
pub fn must(result: Result<Box<dyn Template>>) -> Box<dyn Template> {
    super::must_be(Kind::Html, result)
}
