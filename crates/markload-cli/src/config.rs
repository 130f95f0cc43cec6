//! Backend connection settings from flags or the environment.

use anyhow::{Context, Result};

/// Environment variable for the backend base URL.
pub const BASE_URL_ENV_VAR: &str = "MARKLOAD_BASE_URL";

/// Environment variable for the backend API key.
pub const API_KEY_ENV_VAR: &str = "MARKLOAD_API_KEY";

/// Resolve the backend base URL from the flag, falling back to the
/// environment.
pub fn resolve_base_url(flag: Option<String>) -> Result<String> {
    if let Some(url) = flag {
        return Ok(url);
    }
    std::env::var(BASE_URL_ENV_VAR).with_context(|| {
        format!("backend URL not configured; pass --base-url or set {BASE_URL_ENV_VAR}")
    })
}

/// Resolve the backend API key from the flag, falling back to the
/// environment. Absent keys are allowed: some deployments sit behind a
/// network boundary instead.
#[must_use]
pub fn resolve_api_key(flag: Option<String>) -> Option<String> {
    flag.or_else(|| std::env::var(API_KEY_ENV_VAR).ok())
}
