//! Concrete template engines backed by handlebars.
//!
//! [`text::Template`] and [`html::Template`] are distinct types with their own
//! APIs; each returns its own type from every method. The
//! [`crate::template`] adapters put both behind a single trait.

mod delims;
mod files;
mod funcs;
pub mod html;
mod namespace;
pub mod text;
mod tree;

pub use delims::Delims;
pub use funcs::{Func, FuncMap, FuncResult};
pub use tree::ParseTree;
