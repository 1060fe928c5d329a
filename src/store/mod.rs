//! Dual-backend record store.
//!
//! One logical record set, written through to a remote store and a local
//! cache. The remote is the source of truth when it answers with data; the
//! local cache always receives every write, so a remote outage never loses
//! data. Remote errors are swallowed here (logged and kept in
//! [`RecordStore::last_remote_failure`]); only local errors reach the caller.

mod fallback;
mod local;
mod offline;
mod postgrest;
mod sqlite_remote;

pub use fallback::{FallbackReason, LoadDecision, resolve_load};
pub use local::{CACHE_SLOT_KEY, SlotCache};
pub use offline::OfflineRemote;
pub use postgrest::PostgrestRemote;
pub use sqlite_remote::SqliteRemote;

use crate::config::{Config, RemoteKind};
use crate::errors::{AppError, AppResult};
use crate::models::{OfficerPatch, OfficerRecord};
use log::{debug, warn};
use std::time::Duration;
use thiserror::Error;

/// Why a remote call did not go through.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteFailure {
    #[error("no remote store configured")]
    NotConfigured,

    #[error("remote store unreachable: {0}")]
    Unreachable(String),

    #[error("remote request timed out")]
    Timeout,

    #[error("remote store rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("remote backend error: {0}")]
    Backend(String),

    #[error("unexpected remote payload: {0}")]
    Decode(String),
}

pub type RemoteResult<T> = Result<T, RemoteFailure>;

/// The shared, durable store (`house_officers` table), keyed by `id`.
pub trait RemoteStore {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Ordered full-table select (newest `createdAt` first).
    fn load_all(&self) -> RemoteResult<Vec<OfficerRecord>>;

    /// Single-row insert, returning the row as stored.
    fn insert(&mut self, record: &OfficerRecord) -> RemoteResult<OfficerRecord>;

    /// Partial update by key.
    fn update(&mut self, id: &str, patch: &OfficerPatch) -> RemoteResult<()>;

    /// Delete by key.
    fn delete(&mut self, id: &str) -> RemoteResult<()>;

    /// Delete everything, then bulk-insert `records`.
    fn replace_all(&mut self, records: &[OfficerRecord]) -> RemoteResult<()>;
}

/// Process-local cache: one slot holding the whole record set, read and
/// written wholesale.
pub trait LocalCache {
    fn read(&self) -> AppResult<Vec<OfficerRecord>>;
    fn write(&mut self, records: &[OfficerRecord]) -> AppResult<()>;
}

pub struct RecordStore {
    remote: Box<dyn RemoteStore>,
    local: Box<dyn LocalCache>,
    last_remote_failure: Option<RemoteFailure>,
}

impl RecordStore {
    pub fn new(remote: Box<dyn RemoteStore>, local: Box<dyn LocalCache>) -> Self {
        Self {
            remote,
            local,
            last_remote_failure: None,
        }
    }

    /// Wire the backends described by the configuration.
    ///
    /// A misconfigured remote (missing path / url) degrades to
    /// [`OfflineRemote`] with a warning instead of failing the command.
    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        let local = SlotCache::open(&cfg.database)?;
        let remote = remote_from_config(cfg);
        Ok(Self::new(remote, Box::new(local)))
    }

    pub fn remote_name(&self) -> &'static str {
        self.remote.name()
    }

    /// The failure of the most recent remote call, if it failed.
    pub fn last_remote_failure(&self) -> Option<&RemoteFailure> {
        self.last_remote_failure.as_ref()
    }

    /// Current record set.
    ///
    /// Remote first. A non-empty remote answer replaces the local cache and
    /// is returned; an empty answer or a failure falls back to the cache.
    pub fn load(&mut self) -> AppResult<Vec<OfficerRecord>> {
        let remote = self.remote.load_all();
        self.observe("load", "*", remote.as_ref().map(|_| ()).map_err(Clone::clone));

        match resolve_load(remote) {
            LoadDecision::UseRemote(records) => {
                self.local.write(&records)?;
                Ok(records)
            }
            LoadDecision::UseLocal(reason) => {
                debug!(
                    "event=load_fallback backend={} reason={}",
                    self.remote.name(),
                    reason
                );
                self.local.read()
            }
        }
    }

    /// Find one record in the current set.
    pub fn find(&mut self, id: &str) -> AppResult<Option<OfficerRecord>> {
        Ok(self.load()?.into_iter().find(|r| r.id == id))
    }

    /// Add a record: remote insert attempted, local append always.
    ///
    /// The local set is read before the remote call, so an unreadable cache
    /// fails the add without leaving a row on the remote.
    pub fn add(&mut self, record: OfficerRecord) -> AppResult<()> {
        let mut records = self.local.read()?;

        let outcome = self.remote.insert(&record).map(|_| ());
        self.observe("insert", &record.id, outcome);

        records.push(record);
        self.local.write(&records)
    }

    /// Partial update by id: remote attempted, local applied always.
    ///
    /// Derived fields are not recomputed here. Returns `false` when the id
    /// is not in the local cache (the local side is then a no-op).
    pub fn update(&mut self, id: &str, patch: &OfficerPatch) -> AppResult<bool> {
        let outcome = self.remote.update(id, patch);
        self.observe("update", id, outcome);

        let mut records = self.local.read()?;
        let Some(rec) = records.iter_mut().find(|r| r.id == id) else {
            return Ok(false);
        };

        rec.apply(patch);
        self.local.write(&records)?;
        Ok(true)
    }

    /// Delete by id: remote attempted, local filtered always.
    /// Returns `false` when the id was not in the local cache.
    pub fn delete(&mut self, id: &str) -> AppResult<bool> {
        let outcome = self.remote.delete(id);
        self.observe("delete", id, outcome);

        let mut records = self.local.read()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        let removed = records.len() != before;

        self.local.write(&records)?;
        Ok(removed)
    }

    /// Upload the local cache to the remote (delete-all then bulk insert).
    ///
    /// This is an explicit user action, so its failure IS returned.
    pub fn push_local_to_remote(&mut self) -> AppResult<usize> {
        let records = self.local.read()?;
        let outcome = self.remote.replace_all(&records);
        self.observe("replace_all", "*", outcome.clone());

        outcome.map_err(AppError::from)?;
        Ok(records.len())
    }

    fn observe(&mut self, op: &str, target: &str, outcome: RemoteResult<()>) {
        match outcome {
            Ok(()) => self.last_remote_failure = None,
            Err(RemoteFailure::NotConfigured) => {
                self.last_remote_failure = Some(RemoteFailure::NotConfigured);
            }
            Err(e) => {
                warn!(
                    "event=remote_failure op={op} target={target} backend={} error={e}",
                    self.remote.name()
                );
                self.last_remote_failure = Some(e);
            }
        }
    }
}

fn remote_from_config(cfg: &Config) -> Box<dyn RemoteStore> {
    let remote = &cfg.remote;

    match remote.kind {
        RemoteKind::None => Box::new(OfflineRemote),
        RemoteKind::Sqlite => match &remote.path {
            Some(path) => Box::new(SqliteRemote::new(
                path,
                Duration::from_secs(remote.timeout_secs),
            )),
            None => {
                warn!("event=remote_misconfigured kind=sqlite reason=missing_path");
                Box::new(OfflineRemote)
            }
        },
        RemoteKind::Postgrest => match (&remote.url, &remote.api_key) {
            (Some(url), Some(key)) => {
                match PostgrestRemote::new(url, key, Duration::from_secs(remote.timeout_secs)) {
                    Ok(r) => Box::new(r),
                    Err(e) => {
                        warn!("event=remote_misconfigured kind=postgrest error={e}");
                        Box::new(OfflineRemote)
                    }
                }
            }
            _ => {
                warn!("event=remote_misconfigured kind=postgrest reason=missing_url_or_key");
                Box::new(OfflineRemote)
            }
        },
    }
}
