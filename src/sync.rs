//! Refresh coordination
//!
//! `ScoutSync` owns the single-flight guard, the published snapshot and the
//! per-category fallback chain. A refresh request returns immediately; the
//! work runs on a background task whose failures all funnel into a single
//! status-log line.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::cache::LeagueCache;
use crate::data::{category, CategoryDef, PriceData};
use crate::error::{Result, SyncError};
use crate::logging::{StatusLog, StatusSink};
use crate::scout::client::{ScoutClient, DEFAULT_BASE_URL};
use crate::scout::models::{CurrencyItem, UniqueItem};
use crate::settings::SyncSettings;

/// Engine configuration, snapshotted at the moment a refresh is accepted.
///
/// Mutating it afterwards (`ScoutSync::set_settings` and friends) only
/// affects the next refresh; an in-flight one keeps the values it started
/// with. In particular, a data-directory change while a refresh runs leaves
/// that refresh writing to the old directory.
#[derive(Clone)]
pub struct SyncConfig {
    /// API root; overridable for tests
    pub base_url: String,
    /// Directory holding one subdirectory per league
    pub data_dir: PathBuf,
    pub settings: SyncSettings,
    /// Receives human-readable lifecycle messages
    pub status_sink: Option<StatusSink>,
}

impl SyncConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            data_dir: data_dir.into(),
            settings: SyncSettings::default(),
            status_sink: None,
        }
    }
}

/// Background price-data synchronization engine.
///
/// Cheap to clone; all clones share the same guard and published snapshot.
#[derive(Clone)]
pub struct ScoutSync {
    inner: Arc<SyncInner>,
}

struct SyncInner {
    updating: AtomicBool,
    data: RwLock<Option<Arc<PriceData>>>,
    config: RwLock<SyncConfig>,
    task: Mutex<Option<JoinHandle<()>>>,
}

/// Releases the Running flag on every exit path, panics included
struct UpdateGuard(Arc<SyncInner>);

impl Drop for UpdateGuard {
    fn drop(&mut self) {
        self.0.updating.store(false, Ordering::Release);
    }
}

impl ScoutSync {
    pub fn new(config: SyncConfig) -> Self {
        Self {
            inner: Arc::new(SyncInner {
                updating: AtomicBool::new(false),
                data: RwLock::new(None),
                config: RwLock::new(config),
                task: Mutex::new(None),
            }),
        }
    }

    /// The currently published dataset; `None` until the first successful
    /// refresh
    pub fn data(&self) -> Option<Arc<PriceData>> {
        self.inner.data.read().unwrap().clone()
    }

    /// Reference price derived from the published dataset
    pub fn divine_value(&self) -> Option<f64> {
        self.data().and_then(|data| data.divine_value())
    }

    /// Whether a refresh is currently running
    pub fn is_refreshing(&self) -> bool {
        self.inner.updating.load(Ordering::Acquire)
    }

    /// Replaces the settings used by future refreshes
    pub fn set_settings(&self, settings: SyncSettings) {
        self.inner.config.write().unwrap().settings = settings;
    }

    /// Points future refreshes at a different data directory
    pub fn set_data_dir(&self, data_dir: impl Into<PathBuf>) {
        self.inner.config.write().unwrap().data_dir = data_dir.into();
    }

    /// Awaits the in-flight refresh, if one is running
    pub async fn wait_until_idle(&self) {
        let task = self.inner.task.lock().unwrap().take();
        if let Some(task) = task {
            if let Err(err) = task.await {
                log::error!("Refresh task failed: {err}");
            }
        }
    }

    /// Requests a refresh of `league` and returns immediately.
    ///
    /// At most one refresh runs at a time; a request arriving while another
    /// is in flight is logged and dropped. `force_refresh` skips the
    /// staleness check and goes straight to the web.
    pub fn request_refresh(&self, league: &str, force_refresh: bool, token: CancellationToken) {
        let config = self.inner.config.read().unwrap().clone();
        let log = StatusLog::new(config.status_sink.clone(), config.settings.debug_logging);

        log.status(&format!("Getting data for {league}"));

        if self
            .inner
            .updating
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log.status("Update is already in progress");
            return;
        }
        let guard = UpdateGuard(Arc::clone(&self.inner));

        if league.trim().is_empty() || config.data_dir.to_string_lossy().trim().is_empty() {
            log.status("Data reload aborted: invalid configuration.");
            drop(guard);
            return;
        }

        let inner = Arc::clone(&self.inner);
        let league = league.to_string();
        let task = tokio::spawn(async move {
            let _guard = guard;
            if token.is_cancelled() {
                return;
            }
            // The refresh body runs on its own task; a panic inside it
            // surfaces here as a JoinError rather than vanishing with the
            // worker.
            let refresh = tokio::spawn(run_refresh(
                inner,
                config,
                league,
                force_refresh,
                log.clone(),
                token,
            ));
            match refresh.await {
                Ok(Ok(())) => {}
                Ok(Err(SyncError::Cancelled)) => log.status("Data reload cancelled."),
                Ok(Err(err)) => log.status(&format!("Data reload failed: {err}")),
                Err(err) => log.status(&format!("Data reload panicked: {err}")),
            }
        });
        *self.inner.task.lock().unwrap() = Some(task);
    }
}

async fn run_refresh(
    inner: Arc<SyncInner>,
    config: SyncConfig,
    league: String,
    force_refresh: bool,
    log: StatusLog,
    token: CancellationToken,
) -> Result<()> {
    log.status("Gathering data from Poe2Scout.");

    let cache = LeagueCache::new(&config.data_dir, &league);
    let try_web_first = force_refresh
        || (config.settings.auto_reload
            && cache.is_stale(config.settings.reload_period_minutes, &log));

    let cx = CategoryResolver {
        client: ScoutClient::with_base_url(&config.base_url),
        cache,
        league,
        try_web_first,
        log: log.clone(),
        token: token.clone(),
    };

    let data = PriceData {
        currency: cx.resolve::<CurrencyItem>(&category::CURRENCY).await,
        breach: cx.resolve::<CurrencyItem>(&category::BREACH).await,
        weapons: cx.resolve::<UniqueItem>(&category::WEAPONS).await,
        armour: cx.resolve::<UniqueItem>(&category::ARMOUR).await,
        accessories: cx.resolve::<UniqueItem>(&category::ACCESSORIES).await,
        delirium: cx.resolve::<CurrencyItem>(&category::DELIRIUM).await,
        essences: cx.resolve::<CurrencyItem>(&category::ESSENCES).await,
        runes: cx.resolve::<CurrencyItem>(&category::RUNES).await,
        ritual: cx.resolve::<CurrencyItem>(&category::RITUAL).await,
        ultimatums: cx.resolve::<CurrencyItem>(&category::ULTIMATUMS).await,
        fragments: cx.resolve::<CurrencyItem>(&category::FRAGMENTS).await,
        talismans: cx.resolve::<CurrencyItem>(&category::TALISMANS).await,
        expeditions: cx.resolve::<CurrencyItem>(&category::EXPEDITIONS).await,
        waystones: cx.resolve::<CurrencyItem>(&category::WAYSTONES).await,
        vault_keys: cx.resolve::<CurrencyItem>(&category::VAULT_KEYS).await,
        abyss: cx.resolve::<CurrencyItem>(&category::ABYSS).await,
        uncut_gems: cx.resolve::<CurrencyItem>(&category::UNCUT_GEMS).await,
        divine_value: None,
    };

    if token.is_cancelled() {
        return Err(SyncError::Cancelled);
    }

    let data = Arc::new(data.seal());
    log.status("Finished gathering data from Poe2Scout.");
    *inner.data.write().unwrap() = Some(data);
    log.status("Published updated price data.");

    if let Err(err) = cx.cache.save_metadata() {
        log.debug(&format!("meta.json save failed: {err}"));
    }

    Ok(())
}

/// Per-refresh context implementing the fetch-or-backup fallback chain
struct CategoryResolver {
    client: ScoutClient,
    cache: LeagueCache,
    league: String,
    try_web_first: bool,
    log: StatusLog,
    token: CancellationToken,
}

impl CategoryResolver {
    /// Resolves one category, degrading to an empty list when neither the
    /// web nor the backup can provide it
    async fn resolve<T>(&self, category: &CategoryDef) -> Vec<T>
    where
        T: DeserializeOwned + Serialize,
    {
        self.load_category(category).await.unwrap_or_default()
    }

    /// The fallback chain. The web is attempted at most once per category:
    /// web-first refreshes fall back to the backup, cache-first refreshes
    /// fall back to the web.
    async fn load_category<T>(&self, category: &CategoryDef) -> Option<Vec<T>>
    where
        T: DeserializeOwned + Serialize,
    {
        if self.try_web_first {
            if let Some(items) = self.fetch_and_store(category).await {
                return Some(items);
            }
        }

        if let Some(items) = self.cache.load_backup(category, &self.log) {
            return Some(items);
        }

        if !self.try_web_first {
            return self.fetch_and_store(category).await;
        }

        None
    }

    /// Fetches a category from the web and overwrites its backup.
    ///
    /// The backup is only touched after the full paginated fetch succeeded;
    /// a failed save is recorded in a sidecar file and does not fail the
    /// fetch.
    async fn fetch_and_store<T>(&self, category: &CategoryDef) -> Option<Vec<T>>
    where
        T: DeserializeOwned + Serialize,
    {
        match self
            .client
            .fetch_category::<T>(category, &self.league, &self.log, &self.token)
            .await
        {
            Ok(items) => {
                self.log
                    .debug(&format!("{} downloaded", category.backup_file));
                if let Err(err) = self.cache.save_backup(category, &items) {
                    self.log
                        .debug(&format!("{} save failed: {err}", category.backup_file));
                    if let Err(marker_err) =
                        self.cache.write_error_marker(category, &err.to_string())
                    {
                        self.log.debug(&format!(
                            "{} error marker write failed: {marker_err}",
                            category.backup_file
                        ));
                    }
                }
                Some(items)
            }
            Err(SyncError::Cancelled) => {
                self.log
                    .status(&format!("{} download cancelled", category.backup_file));
                None
            }
            Err(err) => {
                self.log.debug(&format!(
                    "{} fresh data download failed: {err}",
                    category.backup_file
                ));
                None
            }
        }
    }
}
