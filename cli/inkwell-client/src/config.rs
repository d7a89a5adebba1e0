//! Configuration types for client construction.

use std::time::Duration;

/// Request timeout applied to every call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for client construction.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL the request paths are appended to.
    // Using a URL here adds an extra trailing slash,
    // so just use a String.
    pub base_url: String,
    /// Client-wide request timeout.
    pub timeout: Duration,
    /// Which transport serves requests.
    pub mode: TransportMode,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            mode: TransportMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: TransportMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Whether requests go to the network or are served from fixtures.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum TransportMode {
    /// Talk to the configured backend.
    #[default]
    Network,
    /// Serve canned data without touching the network.
    Fixtures,
}

impl TransportMode {
    /// Fixtures are used only in development builds with mocking turned on.
    pub fn from_flags(dev: bool, use_mock: bool) -> Self {
        if dev && use_mock {
            TransportMode::Fixtures
        } else {
            TransportMode::Network
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_need_both_flags() {
        assert_eq!(TransportMode::from_flags(true, true), TransportMode::Fixtures);
        assert_eq!(TransportMode::from_flags(true, false), TransportMode::Network);
        assert_eq!(TransportMode::from_flags(false, true), TransportMode::Network);
        assert_eq!(TransportMode::from_flags(false, false), TransportMode::Network);
    }

    #[test]
    fn default_timeout_is_ten_seconds() {
        let config = ClientConfig::new("http://localhost");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.mode, TransportMode::Network);
    }
}
