pub mod sections;
pub mod skills;
pub mod templates;
pub mod tree;

pub use sections::project;
pub use templates::preview;
pub use tree::{LayoutTree, Projected};
