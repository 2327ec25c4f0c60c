use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the crate
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors produced by templates of either variant.
///
/// Failures raised by handlebars itself are carried unchanged in [`Error::Parse`]
/// and [`Error::Render`]; the remaining variants come from name, file and glob
/// handling around the engine.
#[derive(Debug, Error)]
pub enum Error {
    /// Template source failed to compile
    #[error(transparent)]
    Parse(#[from] handlebars::TemplateError),

    /// Rendering failed, including write failures on the output sink
    #[error(transparent)]
    Render(#[from] handlebars::RenderError),

    /// A custom left delimiter was never closed
    #[error("template: {name}: unclosed action, missing {right:?}")]
    UnclosedAction { name: String, right: String },

    /// The template was created but never given a body
    #[error("template: {name:?} is an incomplete or empty template")]
    Incomplete { name: String },

    /// No template with this name is associated with the receiver
    #[error("template: no template {name:?} associated with template {parent:?}")]
    NotFound { name: String, parent: String },

    #[error("template: no files named in call to ParseFiles")]
    NoFiles,

    #[error("template: pattern matches no files: {pattern:?}")]
    NoMatches { pattern: String },

    #[error("template: invalid pattern {pattern:?}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("template: failed to read {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The HTML engine refuses to change or copy a namespace that already ran
    #[error("html/template: cannot {op} {name:?} after it has executed")]
    AfterExecute { op: &'static str, name: String },

    /// Data handed to `render` could not be turned into a template value
    #[error("template: failed to encode data")]
    Data(#[source] serde_json::Error),

    #[error("unknown template kind {0:?}, expected \"text\" or \"html\"")]
    UnknownKind(String),
}
