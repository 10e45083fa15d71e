//! Process exit statuses shared with the download engine.
//!
//! This layer only ever uses [`OPT`]; the rest belong to the engine but
//! live here so the numbering stays in one place.

/// Missing required external software.
pub const DEP: i32 = 1;
/// Invalid user-specified or configured option.
pub const OPT: i32 = 2;
/// Miscellaneous runtime error.
pub const RUN: i32 = 3;
/// Not every input link could be downloaded.
pub const DOWN: i32 = 4;
/// Early termination requested by the user.
pub const INT: i32 = 5;
/// Connection could not be established or was lost.
pub const CONN: i32 = 6;
