//! Persisted address cache.
//!
//! The cache is one JSON document holding the current device, when it was
//! last confirmed by discovery, and the devices seen by the last collection
//! run. Reads never fail: a missing or unreadable file is an empty record.
//! Writes never fail either: problems are logged and the caller carries on
//! with the in-memory record.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use roku_discovery::Candidate;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// A device remembered from discovery. An empty name means unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnownDevice {
    pub address: String,
    pub name: String,
}

impl KnownDevice {
    /// Case-insensitive name comparison; unnamed devices never match
    pub fn is_named(&self, name: &str) -> bool {
        !self.name.is_empty() && self.name.to_lowercase() == name.to_lowercase()
    }
}

impl From<Candidate> for KnownDevice {
    fn from(candidate: Candidate) -> Self {
        Self {
            address: candidate.address,
            name: candidate.name.unwrap_or_default(),
        }
    }
}

/// The persisted record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheRecord {
    /// Control-base-URL of the current device
    pub address: String,
    /// Name of the current device, empty if unknown
    pub display_name: String,
    /// Unix seconds of the discovery that confirmed `address`; 0 = never
    pub last_refresh: i64,
    /// Every device found by the last discovery, in order of arrival
    pub devices: Vec<KnownDevice>,
    /// Name picked with `use`, preferred over the first device on refresh
    pub preferred_name: String,
}

impl CacheRecord {
    /// True iff the address is set, has been confirmed, and was confirmed
    /// no more than `max_age` before `now`.
    pub fn is_fresh(&self, now: i64, max_age: Duration) -> bool {
        let max_age = i64::try_from(max_age.as_secs()).unwrap_or(i64::MAX);

        !self.address.is_empty()
            && self.last_refresh != 0
            && now.saturating_sub(self.last_refresh) <= max_age
    }

    /// The current device as a [`KnownDevice`]
    pub fn current(&self) -> KnownDevice {
        KnownDevice {
            address: self.address.clone(),
            name: self.display_name.clone(),
        }
    }
}

/// File-backed store for the [`CacheRecord`]
#[derive(Debug, Clone)]
pub struct AddressCache {
    path: PathBuf,
    max_age: Duration,
}

impl AddressCache {
    pub fn new(path: impl Into<PathBuf>, max_age: Duration) -> Self {
        Self {
            path: path.into(),
            max_age,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// Read the record, or an empty one if there is none or it is unreadable
    pub fn load(&self) -> CacheRecord {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no device cache yet");
                return CacheRecord::default();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "could not read device cache");
                return CacheRecord::default();
            }
        };

        serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "device cache is corrupt, ignoring it");
            CacheRecord::default()
        })
    }

    pub fn is_valid(&self, record: &CacheRecord, now: i64) -> bool {
        record.is_fresh(now, self.max_age)
    }

    /// Replace the persisted record. Failures are logged and swallowed.
    pub fn save(&self, record: &CacheRecord) {
        match self.write(record) {
            Ok(()) => debug!(path = %self.path.display(), "saved device cache"),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "could not save device cache")
            }
        }
    }

    /// Delete the persisted record. A missing file is not an error.
    pub fn forget(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }

    // One temp file per save, renamed over the target: readers see a whole
    // record even when several runs save at once.
    fn write(&self, record: &CacheRecord) -> io::Result<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let json = serde_json::to_vec_pretty(record)?;

        let mut tmp = NamedTempFile::new_in(parent)?;
        tmp.write_all(&json)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)?;
        Ok(())
    }
}
