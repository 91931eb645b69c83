//! Engine settings consumed from the host configuration

use serde::{Deserialize, Serialize};

/// Tunables for the refresh engine, supplied by the hosting application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    /// Refresh from the web automatically once the local cache is older
    /// than `reload_period_minutes`
    pub auto_reload: bool,
    /// Age in minutes after which cached data is considered stale
    pub reload_period_minutes: u64,
    /// Forward verbose diagnostics to the status sink
    pub debug_logging: bool,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            auto_reload: true,
            reload_period_minutes: 30,
            debug_logging: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_settings_fill_in_defaults() {
        let settings: SyncSettings = serde_json::from_str(r#"{"auto_reload": false}"#).unwrap();
        assert!(!settings.auto_reload);
        assert_eq!(settings.reload_period_minutes, 30);
        assert!(!settings.debug_logging);
    }
}
