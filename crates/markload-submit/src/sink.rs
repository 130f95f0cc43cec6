use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// One backend record: a flat JSON object.
pub type Record = Value;

/// Seam between the committer and the backend: a single idempotent
/// insert-or-update call for a slice of records. The backend reports
/// per-call success only, never per-row.
#[async_trait]
pub trait RecordSink: Send + Sync {
    async fn upsert(&self, records: &[Record]) -> Result<()>;
}
