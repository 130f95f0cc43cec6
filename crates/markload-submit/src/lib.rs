//! Batch submission for the markload pipeline: chunked, sequential,
//! idempotent upserts to the hosted backend.

mod client;
mod commit;
mod error;
mod records;
mod sink;

pub use client::{BackendClient, TableSink};
pub use commit::{CancelToken, CommitProgress, CommitSummary, commit_in_chunks};
pub use error::{CommitError, Result, SubmitError};
pub use records::build_records;
pub use sink::{Record, RecordSink};
