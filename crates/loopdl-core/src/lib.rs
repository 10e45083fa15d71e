//! Option-resolution layer for the loopdl download tool.
//!
//! Turns raw presentation-surface values (display labels, free-text
//! source lists, sentinel keywords) into the normalized
//! [`resolve::ResolvedCommand`] the download engine consumes. The whole
//! layer is synchronous and runs once per invocation, before any engine
//! work starts.

pub mod archive;
pub mod config;
pub mod exit;
pub mod input;
pub mod labels;
pub mod link;
pub mod logging;
pub mod resolve;
pub mod source;
