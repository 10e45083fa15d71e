//! Command implementations.

mod defaults;
mod resolve;
mod sources;

pub use defaults::run_defaults;
pub use resolve::{run_resolve, ResolveArgs};
pub use sources::{run_sources, SourceArgs};
