//! Domain layer: shorthand parsing, tree building and normalisation
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod bemjson;
pub mod builder;
pub mod error;
pub mod expand;
pub mod format;
pub mod line;
pub mod sanitize;
pub mod tree_traits;

pub use arena::{NodeArena, TreeNode};
pub use bemjson::{BemNode, Content, ContentItem};
pub use builder::{closest_parent, TreeBuilder};
pub use error::{DomainError, DomainResult};
pub use expand::{ExpansionMode, ExpansionReport, NumberExpander, Overrun};
pub use format::Format;
pub use line::{BemName, LineData, LineParser};
pub use sanitize::TreeSanitizer;
pub use tree_traits::TreeNodeConvert;
