//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use crate::transport::RetryPolicy;

/// Default per-attempt request timeout in seconds.
pub const TIMEOUT_SECS: u64 = 30;

/// Default number of retries after a failed attempt.
pub const MAX_RETRIES: u32 = RetryPolicy::DEFAULT_MAX_RETRIES;
