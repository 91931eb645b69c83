//! Per-league backup cache
//!
//! Every category keeps a JSON backup under `{data_dir}/{league}/`, next to
//! a `meta.json` recording the last successful refresh. Read failures never
//! propagate past this module: a missing or broken backup reads as a miss.

use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::data::CategoryDef;
use crate::logging::StatusLog;

/// Last successful refresh marker, one per league directory
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LeagueMetadata {
    pub last_load_time: DateTime<Utc>,
}

/// File store for one league's category backups and metadata
#[derive(Debug, Clone)]
pub struct LeagueCache {
    dir: PathBuf,
}

impl LeagueCache {
    pub fn new(data_dir: &Path, league: &str) -> Self {
        Self {
            dir: data_dir.join(league),
        }
    }

    /// Path of the category's backup file
    pub fn backup_path(&self, category: &CategoryDef) -> PathBuf {
        self.dir.join(category.backup_file)
    }

    /// Path of the league metadata file
    pub fn metadata_path(&self) -> PathBuf {
        self.dir.join("meta.json")
    }

    /// Loads a category backup; a missing or unreadable file is a miss
    pub fn load_backup<T: DeserializeOwned>(
        &self,
        category: &CategoryDef,
        log: &StatusLog,
    ) -> Option<Vec<T>> {
        let path = self.backup_path(category);
        if !path.exists() {
            log.debug(&format!("No backup for {}", category.backup_file));
            return None;
        }
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                log.debug(&format!(
                    "{} backup data load failed: {err}",
                    category.backup_file
                ));
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(items) => Some(items),
            Err(err) => {
                log.debug(&format!(
                    "{} backup data load failed: {err}",
                    category.backup_file
                ));
                None
            }
        }
    }

    /// Overwrites the category backup with a freshly fetched list
    pub fn save_backup<T: Serialize>(&self, category: &CategoryDef, items: &[T]) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(items)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(self.backup_path(category), json)
    }

    /// Records why a backup could not be written, next to the backup itself
    pub fn write_error_marker(&self, category: &CategoryDef, detail: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("{}.error", category.backup_file));
        fs::write(path, detail)
    }

    /// Stamps the metadata with the current time after a completed refresh
    pub fn save_metadata(&self) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let metadata = LeagueMetadata {
            last_load_time: Utc::now(),
        };
        let json = serde_json::to_string(&metadata)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(self.metadata_path(), json)
    }

    /// Whether the cached data is too old to trust.
    ///
    /// Missing or unreadable metadata counts as stale, so an absent cache
    /// history can never block a refresh.
    pub fn is_stale(&self, reload_period_minutes: u64, log: &StatusLog) -> bool {
        let path = self.metadata_path();
        if !path.exists() {
            return true;
        }
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                log.debug(&format!("Metadata loading failed: {err}"));
                return true;
            }
        };
        match serde_json::from_str::<LeagueMetadata>(&content) {
            Ok(metadata) => {
                Utc::now() - metadata.last_load_time
                    > Duration::minutes(reload_period_minutes as i64)
            }
            Err(err) => {
                log.debug(&format!("Metadata loading failed: {err}"));
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::category;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestItem {
        text: String,
        current_price: f64,
    }

    fn test_cache() -> (LeagueCache, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache = LeagueCache::new(temp_dir.path(), "Standard");
        (cache, temp_dir)
    }

    fn silent_log() -> StatusLog {
        StatusLog::new(None, false)
    }

    fn sample_items() -> Vec<TestItem> {
        vec![
            TestItem {
                text: "Chaos Orb".to_string(),
                current_price: 1.0,
            },
            TestItem {
                text: "Divine Orb".to_string(),
                current_price: 180.5,
            },
        ]
    }

    #[test]
    fn backup_roundtrip() {
        let (cache, _dir) = test_cache();
        let items = sample_items();

        cache
            .save_backup(&category::CURRENCY, &items)
            .expect("save should succeed");

        let loaded: Vec<TestItem> = cache
            .load_backup(&category::CURRENCY, &silent_log())
            .expect("backup should load");
        assert_eq!(loaded, items);
    }

    #[test]
    fn save_backup_creates_league_directory() {
        let temp_dir = TempDir::new().unwrap();
        let cache = LeagueCache::new(temp_dir.path(), "Hardcore");

        cache.save_backup(&category::RUNES, &sample_items()).unwrap();

        assert!(temp_dir.path().join("Hardcore").join("Runes.json").exists());
    }

    #[test]
    fn backup_is_pretty_printed_json_array() {
        let (cache, _dir) = test_cache();
        cache.save_backup(&category::CURRENCY, &sample_items()).unwrap();

        let content = fs::read_to_string(cache.backup_path(&category::CURRENCY)).unwrap();
        assert!(content.starts_with('['));
        assert!(content.contains('\n'));
        assert!(content.contains("Divine Orb"));
    }

    #[test]
    fn missing_backup_is_a_miss() {
        let (cache, _dir) = test_cache();

        let loaded: Option<Vec<TestItem>> = cache.load_backup(&category::CURRENCY, &silent_log());

        assert!(loaded.is_none());
    }

    #[test]
    fn corrupt_backup_is_a_miss() {
        let (cache, _dir) = test_cache();
        fs::create_dir_all(cache.backup_path(&category::CURRENCY).parent().unwrap()).unwrap();
        fs::write(cache.backup_path(&category::CURRENCY), "{ not valid json").unwrap();

        let loaded: Option<Vec<TestItem>> = cache.load_backup(&category::CURRENCY, &silent_log());

        assert!(loaded.is_none());
    }

    #[test]
    fn error_marker_carries_failure_detail() {
        let (cache, dir) = test_cache();

        cache
            .write_error_marker(&category::CURRENCY, "disk full")
            .unwrap();

        let content = fs::read_to_string(
            dir.path()
                .join("Standard")
                .join("Currency.json.error"),
        )
        .unwrap();
        assert_eq!(content, "disk full");
    }

    #[test]
    fn metadata_roundtrip_is_fresh() {
        let (cache, _dir) = test_cache();

        cache.save_metadata().unwrap();

        assert!(!cache.is_stale(60, &silent_log()));
    }

    #[test]
    fn metadata_uses_pascal_case_key() {
        let (cache, _dir) = test_cache();
        cache.save_metadata().unwrap();

        let content = fs::read_to_string(cache.metadata_path()).unwrap();
        assert!(content.contains("LastLoadTime"));
    }

    #[test]
    fn missing_metadata_is_stale() {
        let (cache, _dir) = test_cache();

        assert!(cache.is_stale(60, &silent_log()));
    }

    #[test]
    fn corrupt_metadata_is_stale() {
        let (cache, _dir) = test_cache();
        fs::create_dir_all(cache.metadata_path().parent().unwrap()).unwrap();
        fs::write(cache.metadata_path(), "not json").unwrap();

        assert!(cache.is_stale(60, &silent_log()));
    }

    #[test]
    fn old_metadata_is_stale() {
        let (cache, _dir) = test_cache();
        fs::create_dir_all(cache.metadata_path().parent().unwrap()).unwrap();
        let metadata = LeagueMetadata {
            last_load_time: Utc::now() - Duration::minutes(120),
        };
        fs::write(
            cache.metadata_path(),
            serde_json::to_string(&metadata).unwrap(),
        )
        .unwrap();

        assert!(cache.is_stale(30, &silent_log()));
        assert!(!cache.is_stale(240, &silent_log()));
    }
}
