//! Retry policy configuration for gateway requests.

/// Configuration for fixed-count retry behavior.
///
/// A failed request is repeated immediately, with the same method, endpoint
/// and payload, until it succeeds or `max_retries` additional attempts have
/// been made. There is no delay between attempts, so the worst-case latency
/// of a call is `timeout × (max_retries + 1)`.
///
/// # Defaults
///
/// - `max_retries`: 3 (four attempts in total)
///
/// # Example
///
/// ```
/// use whatsapi::transport::RetryPolicy;
///
/// let policy = RetryPolicy::new().with_max_retries(2);
/// assert_eq!(policy.total_attempts(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Number of attempts made after the initial one.
    ///
    /// A value of 0 means only the initial attempt is made.
    pub max_retries: u32,
}

impl RetryPolicy {
    /// Default number of retries.
    pub const DEFAULT_MAX_RETRIES: u32 = 3;

    /// Creates a new retry policy with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_retries: Self::DEFAULT_MAX_RETRIES,
        }
    }

    /// Creates a policy that never retries.
    #[must_use]
    pub const fn no_retry() -> Self {
        Self { max_retries: 0 }
    }

    /// Sets the number of retries.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Total number of attempts, including the initial one.
    #[must_use]
    pub const fn total_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Returns true if another attempt may follow the given one.
    ///
    /// # Arguments
    ///
    /// * `attempt` - The attempt number (1 = first attempt, 2 = first retry, etc.)
    #[must_use]
    pub const fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.total_attempts()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}
