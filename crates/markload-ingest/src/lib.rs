//! Source ingestion for the markload pipeline: format parsing and roster
//! file loading.

mod format;
mod parse;
mod roster_file;

pub use format::SourceFormat;
pub use parse::{ParseOutcome, parse};
pub use roster_file::load_roster;
