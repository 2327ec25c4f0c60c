pub mod list;
pub mod render;
pub mod sources;

pub use list::ListCommand;
pub use render::RenderCommand;
pub use sources::Sources;
