//! Error types for batch submission.

use thiserror::Error;

/// Errors from a single backend operation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubmitError {
    /// Transport-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// The backend rejected the call.
    #[error("backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Client-side configuration problem (bad base URL, bad API key).
    #[error("configuration error: {0}")]
    Config(String),

    /// Submission was cancelled between chunks.
    #[error("submission cancelled")]
    Cancelled,
}

impl SubmitError {
    /// Whether retrying the whole submission may succeed. The natural-key
    /// upsert makes a retry safe either way.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Network(_)
                | Self::Backend {
                    status: 500..=599,
                    ..
                }
        )
    }
}

impl From<reqwest::Error> for SubmitError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// A chunk-level commit failure.
///
/// Chunks before `chunk_index` remain committed; there is no rollback, and
/// resubmitting the whole file is safe because the upsert is idempotent.
#[derive(Debug, Error)]
#[error("chunk {chunk_index} of {total_chunks} failed ({chunks_committed} committed): {source}")]
pub struct CommitError {
    /// 0-based index of the failing chunk.
    pub chunk_index: usize,
    pub total_chunks: usize,
    /// Chunks fully committed before the failure.
    pub chunks_committed: usize,
    #[source]
    pub source: SubmitError,
}

pub type Result<T> = std::result::Result<T, SubmitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_classification() {
        assert!(SubmitError::Network("timeout".to_string()).is_retryable());
        assert!(
            SubmitError::Backend {
                status: 503,
                message: "unavailable".to_string()
            }
            .is_retryable()
        );
        assert!(
            !SubmitError::Backend {
                status: 401,
                message: "unauthorized".to_string()
            }
            .is_retryable()
        );
        assert!(!SubmitError::Cancelled.is_retryable());
    }

    #[test]
    fn commit_error_names_the_chunk() {
        let error = CommitError {
            chunk_index: 2,
            total_chunks: 5,
            chunks_committed: 2,
            source: SubmitError::Network("connection reset".to_string()),
        };
        let text = error.to_string();
        assert!(text.contains("chunk 2 of 5"));
        assert!(text.contains("2 committed"));
    }
}
