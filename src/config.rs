// src/config.rs
// =============================================================================
// Settings for one check run.
//
// The defaults mirror what most pages need:
// - 10 fetches in flight at once
// - 30 seconds per request
// - absolute http(s) hrefs are skipped (only relative links get checked)
// - a 30 second soft budget for the whole run (exceeding it only warns)
// =============================================================================

use crate::checker::LinkPolicy;
use crate::error::CheckError;
use std::time::Duration;

pub const DEFAULT_MAX_CONNECTIONS: usize = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SOFT_BUDGET_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Maximum number of link fetches in flight at the same time
    pub max_connections: usize,
    /// Per-request timeout, applied to the root page and every link
    pub timeout: Duration,
    /// Which hrefs are worth checking
    pub link_policy: LinkPolicy,
    /// Runs longer than this emit an advisory warning
    pub soft_budget: Duration,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            link_policy: LinkPolicy::default(),
            soft_budget: Duration::from_secs(DEFAULT_SOFT_BUDGET_SECS),
            user_agent: concat!("link-inspector/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl CheckConfig {
    /// Builder-style setter for the concurrency bound
    pub fn with_max_connections(mut self, max_connections: usize) -> Self {
        self.max_connections = max_connections;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_link_policy(mut self, link_policy: LinkPolicy) -> Self {
        self.link_policy = link_policy;
        self
    }

    pub fn with_soft_budget(mut self, soft_budget: Duration) -> Self {
        self.soft_budget = soft_budget;
        self
    }

    /// Rejects values the scheduler can't work with
    pub fn validate(&self) -> Result<(), CheckError> {
        if self.max_connections == 0 {
            return Err(CheckError::InvalidConfig(
                "max connections must be at least 1".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(CheckError::InvalidConfig(
                "timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CheckConfig::default();
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.link_policy, LinkPolicy::SkipAbsolute);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_connections_rejected() {
        let config = CheckConfig::default().with_max_connections(0);
        assert!(matches!(config.validate(), Err(CheckError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = CheckConfig::default().with_timeout(Duration::ZERO);
        assert!(config.validate().is_err());
    }
}
