//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod suggestion_cache;
pub mod test_dependencies;
pub mod traits;

pub use deps::{AiSettings, ServerDeps};
pub use suggestion_cache::MokaSuggestionCache;
pub use test_dependencies::{MockCompletionProvider, TestDependencies};
pub use traits::*;
