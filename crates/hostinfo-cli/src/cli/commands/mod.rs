//! CLI command handlers, one per file.

mod docs;
mod extract;
mod inspect;
mod resolve;

pub use docs::{run_completions, run_manpage};
pub use extract::run_extract;
pub use inspect::run_inspect;
pub use resolve::run_resolve;
