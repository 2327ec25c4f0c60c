use super::Delims;
use crate::error::Result;

/// A precompiled template body that can be attached to any namespace with
/// `add_parse_tree`
#[derive(Debug, Clone)]
pub struct ParseTree {
    inner: handlebars::Template,
}

impl ParseTree {
    /// Compile `text` using the default `{{` `}}` delimiters
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with_delims(text, &Delims::default())
    }

    pub fn parse_with_delims(text: &str, delims: &Delims) -> Result<Self> {
        let source = delims.translate("parse tree", text)?;
        let inner = handlebars::Template::compile(&source)?;
        Ok(Self { inner })
    }

    pub(crate) fn to_template(&self) -> handlebars::Template {
        self.inner.clone()
    }
}

impl From<handlebars::Template> for ParseTree {
    fn from(inner: handlebars::Template) -> Self {
        Self { inner }
    }
}
