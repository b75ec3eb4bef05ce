use std::time::Duration;

/// Seconds a read waits for a line before reporting a timeout.
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 5;

/// Seconds the streaming transport pauses before sending a response.
pub const DEFAULT_RESPONSE_DELAY_SECS: u64 = 5;

/// Timing parameters of the streaming transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportConfig {
    pub read_timeout: Duration,
    pub response_delay: Duration,
}

impl TransportConfig {
    pub fn from_secs(read_timeout: u64, response_delay: u64) -> Self {
        Self {
            read_timeout: Duration::from_secs(read_timeout),
            response_delay: Duration::from_secs(response_delay),
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::from_secs(DEFAULT_READ_TIMEOUT_SECS, DEFAULT_RESPONSE_DELAY_SECS)
    }
}
