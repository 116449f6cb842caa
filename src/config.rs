use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Overall per-refresh deadline applied when the host supplies none.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Immutable per-team configuration supplied once at startup by the host
/// platform's config layer. The core never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamConfig {
    /// Team abbreviation as it appears in event short names ("SEA").
    pub team_abbr: String,
    /// Display name for whatever presents the record.
    pub name: String,
    /// Overall refresh deadline in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl TeamConfig {
    pub fn new(team_abbr: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            team_abbr: team_abbr.into(),
            name: name.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_defaults_when_host_config_omits_it() {
        let config: TeamConfig =
            serde_json::from_str(r#"{"team_abbr": "SEA", "name": "Seahawks"}"#).unwrap();
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.timeout(), Duration::from_secs(120));
    }

    #[test]
    fn stored_config_round_trips() {
        let config = TeamConfig::new("TEN", "Titans").with_timeout(30);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<TeamConfig>(&json).unwrap(), config);
    }
}
