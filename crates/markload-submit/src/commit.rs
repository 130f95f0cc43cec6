//! Sequential chunked submission with progress reporting.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info};

use crate::error::{CommitError, SubmitError};
use crate::sink::{Record, RecordSink};

/// Cooperative cancellation flag checked between chunks.
///
/// Cancelling never interrupts an in-flight chunk, so the last committed
/// chunk stays unambiguous.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Progress after a chunk commits.
///
/// Percentages use integer arithmetic so a full run always ends at
/// exactly 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitProgress {
    pub chunks_completed: usize,
    pub total_chunks: usize,
}

impl CommitProgress {
    #[must_use]
    pub fn fraction(&self) -> f64 {
        if self.total_chunks == 0 {
            1.0
        } else {
            self.chunks_completed as f64 / self.total_chunks as f64
        }
    }

    #[must_use]
    pub fn percentage(&self) -> u8 {
        if self.total_chunks == 0 {
            return 100;
        }
        ((self.chunks_completed * 100) / self.total_chunks) as u8
    }
}

/// Outcome of a fully committed submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitSummary {
    pub rows_submitted: usize,
    pub chunks_submitted: usize,
}

/// Submit records in contiguous, order-preserving chunks.
///
/// Chunks go out strictly sequentially; each is awaited before the next, so
/// progress is monotonic and a failure identifies the exact chunk. On error
/// the loop stops immediately: committed chunks stay committed (the upsert
/// is idempotent by natural key) and the caller may retry the whole set.
pub async fn commit_in_chunks<S, F>(
    sink: &S,
    records: &[Record],
    chunk_size: NonZeroUsize,
    mut on_progress: F,
    cancel: &CancelToken,
) -> Result<CommitSummary, CommitError>
where
    S: RecordSink + ?Sized,
    F: FnMut(CommitProgress),
{
    if records.is_empty() {
        on_progress(CommitProgress {
            chunks_completed: 0,
            total_chunks: 0,
        });
        return Ok(CommitSummary::default());
    }

    let chunks: Vec<&[Record]> = records.chunks(chunk_size.get()).collect();
    let total_chunks = chunks.len();
    let mut rows_submitted = 0usize;

    for (index, chunk) in chunks.into_iter().enumerate() {
        if cancel.is_cancelled() {
            return Err(CommitError {
                chunk_index: index,
                total_chunks,
                chunks_committed: index,
                source: SubmitError::Cancelled,
            });
        }
        debug!(chunk = index, rows = chunk.len(), "submitting chunk");
        sink.upsert(chunk).await.map_err(|source| CommitError {
            chunk_index: index,
            total_chunks,
            chunks_committed: index,
            source,
        })?;
        rows_submitted += chunk.len();
        on_progress(CommitProgress {
            chunks_completed: index + 1,
            total_chunks,
        });
    }

    info!(
        rows = rows_submitted,
        chunks = total_chunks,
        "submission complete"
    );
    Ok(CommitSummary {
        rows_submitted,
        chunks_submitted: total_chunks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_is_exact_at_the_end() {
        let progress = CommitProgress {
            chunks_completed: 5,
            total_chunks: 5,
        };
        assert_eq!(progress.percentage(), 100);
        assert!((progress.fraction() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_submission_reports_complete() {
        let progress = CommitProgress {
            chunks_completed: 0,
            total_chunks: 0,
        };
        assert_eq!(progress.percentage(), 100);
    }
}
