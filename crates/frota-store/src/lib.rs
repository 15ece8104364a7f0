//! In-memory artifact store
//!
//! Every generated workbook is kept under its own random token and handed
//! out once. Entries older than the TTL are refused and evicted.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use frota_types::{ArtifactError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// MIME type of generated workbooks
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Single-use retrieval token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactToken(String);

impl ArtifactToken {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ArtifactToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ArtifactToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for ArtifactToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A downloadable file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Artifact {
    pub fn xlsx(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: XLSX_CONTENT_TYPE.to_string(),
            bytes,
        }
    }
}

struct Entry {
    artifact: Artifact,
    created_at: DateTime<Utc>,
}

/// Token-keyed artifacts; safe to share between concurrent requests
pub struct ArtifactStore {
    ttl: chrono::Duration,
    entries: Mutex<HashMap<ArtifactToken, Entry>>,
}

impl ArtifactStore {
    /// TTLs beyond what `chrono` can represent are clamped to `chrono::Duration::MAX`
    pub fn new(ttl: Duration) -> Self {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or_else(|_| {
            warn!(secs = ttl.as_secs(), "artifact TTL out of range, artifacts will not expire");
            chrono::Duration::MAX
        });
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<ArtifactToken, Entry>> {
        // a panicked holder cannot leave the map half-updated
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Store an artifact under a fresh token
    pub fn put(&self, artifact: Artifact) -> ArtifactToken {
        self.put_at(artifact, Utc::now())
    }

    pub fn put_at(&self, artifact: Artifact, now: DateTime<Utc>) -> ArtifactToken {
        let token = ArtifactToken::generate();
        debug!(%token, filename = %artifact.filename, bytes = artifact.bytes.len(), "artifact stored");
        self.entries().insert(
            token.clone(),
            Entry {
                artifact,
                created_at: now,
            },
        );
        token
    }

    /// Remove and return the artifact; a token works only once
    pub fn take(&self, token: &ArtifactToken) -> Result<Artifact> {
        self.take_at(token, Utc::now())
    }

    pub fn take_at(&self, token: &ArtifactToken, now: DateTime<Utc>) -> Result<Artifact> {
        let entry = self
            .entries()
            .remove(token)
            .ok_or_else(|| ArtifactError::NotFound(token.to_string()))?;
        if now - entry.created_at > self.ttl {
            return Err(ArtifactError::Expired(token.to_string()).into());
        }
        debug!(%token, "artifact retrieved");
        Ok(entry.artifact)
    }

    /// Drop every expired artifact, returning how many were removed
    pub fn evict_expired(&self) -> usize {
        self.evict_expired_at(Utc::now())
    }

    pub fn evict_expired_at(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|_, e| now - e.created_at <= self.ttl);
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frota_types::Error;
    use std::sync::Arc;
    use std::thread;

    fn sample(name: &str) -> Artifact {
        Artifact::xlsx(name, name.as_bytes().to_vec())
    }

    #[test]
    fn test_take_is_single_use() {
        let store = ArtifactStore::new(Duration::from_secs(60));
        let token = store.put(sample("a.xlsx"));
        assert_eq!(store.len(), 1);

        let artifact = store.take(&token).unwrap();
        assert_eq!(artifact.filename, "a.xlsx");
        assert_eq!(artifact.content_type, XLSX_CONTENT_TYPE);
        assert!(store.is_empty());

        let err = store.take(&token).unwrap_err();
        assert!(matches!(err, Error::Artifact(ArtifactError::NotFound(_))));
    }

    #[test]
    fn test_out_of_range_ttl_clamps_to_max() {
        let store = ArtifactStore::new(Duration::from_secs(u64::MAX));
        assert_eq!(store.ttl, chrono::Duration::MAX);

        let created = Utc::now() - chrono::Duration::days(36_500);
        let token = store.put_at(sample("old.xlsx"), created);
        assert_eq!(store.evict_expired_at(Utc::now()), 0);
        assert!(store.take_at(&token, Utc::now()).is_ok());
    }

    #[test]
    fn test_tokens_isolate_requests() {
        let store = ArtifactStore::new(Duration::from_secs(60));
        let first = store.put(sample("first.xlsx"));
        let second = store.put(sample("second.xlsx"));
        assert_ne!(first, second);
        assert_eq!(store.take(&second).unwrap().filename, "second.xlsx");
        assert_eq!(store.take(&first).unwrap().filename, "first.xlsx");
    }

    #[test]
    fn test_expired_artifact_refused() {
        let store = ArtifactStore::new(Duration::from_secs(60));
        let now = Utc::now();
        let token = store.put_at(sample("old.xlsx"), now);
        let err = store
            .take_at(&token, now + chrono::Duration::seconds(61))
            .unwrap_err();
        assert!(matches!(err, Error::Artifact(ArtifactError::Expired(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_evict_expired() {
        let store = ArtifactStore::new(Duration::from_secs(60));
        let now = Utc::now();
        store.put_at(sample("old.xlsx"), now - chrono::Duration::seconds(120));
        let fresh = store.put_at(sample("new.xlsx"), now);
        assert_eq!(store.evict_expired_at(now), 1);
        assert_eq!(store.len(), 1);
        assert!(store.take_at(&fresh, now).is_ok());
    }

    #[test]
    fn test_concurrent_puts_and_takes() {
        let store = Arc::new(ArtifactStore::new(Duration::from_secs(60)));
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let name = format!("{}.xlsx", i);
                    let token = store.put(sample(&name));
                    store.take(&token).map(|a| a.filename == name)
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap().unwrap());
        }
        assert!(store.is_empty());
    }
}
