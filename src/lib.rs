//! One `Template` trait over a plain-text and an HTML-escaping template engine.
//!
//! The variant only matters when a template is created. Instead of carrying
//! both types through application code:
//!
//! ```no_run
//! use serde_json::json;
//! use template_interface::template::{html, text, Template};
//!
//! # fn run(want_html: bool) -> template_interface::Result<()> {
//! let tpl: Box<dyn Template> = if want_html {
//!     html::new("greeting").parse("<p>Hello {{name}}</p>")?
//! } else {
//!     text::new("greeting").parse("Hello {{name}}")?
//! };
//! tpl.execute(&mut std::io::stdout(), &json!({"name": "Ada"}))?;
//! # Ok(())
//! # }
//! ```
//!
//! Template syntax, escaping and rendering are handled by `handlebars`; the
//! [`engine`] module gives it named templates sharing a namespace, custom
//! delimiters and file/glob loading, and [`template`] puts both engines behind
//! the trait.

pub mod engine;
pub mod error;
pub mod template;
pub mod traits;

#[cfg(test)]
mod test_helpers;

pub use engine::{Delims, Func, FuncMap, FuncResult, ParseTree};
pub use error::{Error, Result};
pub use template::{HtmlTemplate, Kind, Template, TextTemplate, must};
