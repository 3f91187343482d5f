use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::Mutex;
use tracing::debug;

use crate::model::warnings::{RecordedWarning, WarningRecord};
use crate::store::{self, LedgerMap};

/// Shared warning ledger handle passed across crates.
///
/// All mutations run behind one async mutex, and every mutation rewrites the
/// backing file before returning, so concurrent `warn` calls serialize and
/// the file always holds a complete snapshot of what the ledger returned.
#[derive(Clone, Debug)]
pub struct Ledger {
    inner: Arc<Mutex<LedgerMap>>,
    path: Arc<PathBuf>,
}

impl Ledger {
    /// Load the ledger at startup. A missing file starts an empty ledger;
    /// an unreadable or malformed file is an error.
    pub fn load(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let map = store::read_ledger_file(&path)?;

        Ok(Self {
            inner: Arc::new(Mutex::new(map)),
            path: Arc::new(path),
        })
    }

    /// Record a warning for a target user, stamp it with the current unix
    /// time, persist the full ledger, and return the new record with its
    /// warn number.
    pub async fn warn(&self, user_id: u64, reason: &str) -> anyhow::Result<RecordedWarning> {
        anyhow::ensure!(
            !reason.trim().is_empty(),
            "warning reason must not be empty"
        );

        let record = WarningRecord {
            timestamp: now_unix_secs(),
            reason: reason.to_owned(),
        };

        let mut map = self.inner.lock().await;
        let history = map.entry(user_id).or_default();
        history.push(record.clone());
        let warn_number = history.len();

        store::write_ledger_file(&self.path, &map)?;
        debug!(user_id, warn_number, "recorded warning");

        Ok(RecordedWarning {
            record,
            warn_number,
        })
    }

    /// Warning history for a user, oldest first.
    ///
    /// `None` means the user was never warned; a `Some` history is never
    /// empty (zero-warning users are absent from the map).
    pub async fn warnings_for(&self, user_id: u64) -> Option<Vec<WarningRecord>> {
        self.inner.lock().await.get(&user_id).cloned()
    }

    /// Number of users with at least one warning.
    pub async fn user_count(&self) -> usize {
        self.inner.lock().await.len()
    }

    /// Rewrite the backing file from the in-memory state.
    pub async fn persist(&self) -> anyhow::Result<()> {
        let map = self.inner.lock().await;
        store::write_ledger_file(&self.path, &map)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_secs())
}

#[cfg(test)]
mod tests {
    use super::{Ledger, now_unix_secs};

    fn ledger_in(dir: &tempfile::TempDir) -> Ledger {
        Ledger::load(dir.path().join("warnings.json")).expect("load")
    }

    #[tokio::test]
    async fn never_warned_user_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ledger = ledger_in(&dir);

        assert!(ledger.warnings_for(42).await.is_none());
        assert_eq!(ledger.user_count().await, 0);
    }

    #[tokio::test]
    async fn warn_records_reason_and_current_timestamp() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ledger = ledger_in(&dir);

        let before = now_unix_secs();
        let recorded = ledger.warn(42, "spam").await.expect("warn");
        let after = now_unix_secs();

        assert_eq!(recorded.warn_number, 1);
        assert_eq!(recorded.record.reason, "spam");
        assert!(recorded.record.timestamp >= before);
        assert!(recorded.record.timestamp <= after);

        let history = ledger.warnings_for(42).await.expect("history");
        assert_eq!(history, vec![recorded.record]);
    }

    #[tokio::test]
    async fn warn_numbers_count_up_in_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ledger = ledger_in(&dir);

        let first = ledger.warn(42, "spam").await.expect("warn");
        let second = ledger.warn(42, "more spam").await.expect("warn");

        assert_eq!(first.warn_number, 1);
        assert_eq!(second.warn_number, 2);

        let history = ledger.warnings_for(42).await.expect("history");
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].reason, "spam");
        assert_eq!(history[1].reason, "more spam");
    }

    #[tokio::test]
    async fn empty_reason_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ledger = ledger_in(&dir);

        assert!(ledger.warn(42, "   ").await.is_err());
        assert!(ledger.warnings_for(42).await.is_none());
    }

    #[tokio::test]
    async fn persisted_ledger_survives_reload() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("warnings.json");

        let ledger = Ledger::load(&path).expect("load");
        ledger.warn(42, "spam").await.expect("warn");
        ledger.warn(7, "rudeness").await.expect("warn");
        ledger.warn(42, "more spam").await.expect("warn");

        let reloaded = Ledger::load(&path).expect("reload");
        assert_eq!(
            reloaded.warnings_for(42).await,
            ledger.warnings_for(42).await
        );
        assert_eq!(
            reloaded.warnings_for(7).await,
            ledger.warnings_for(7).await
        );
        assert_eq!(reloaded.user_count().await, 2);
    }

    #[tokio::test]
    async fn zero_warning_users_are_absent_from_the_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("warnings.json");

        let ledger = Ledger::load(&path).expect("load");
        ledger.warn(42, "spam").await.expect("warn");

        let raw = std::fs::read_to_string(&path).expect("read raw");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
        let object = value.as_object().expect("object");

        assert!(object.contains_key("42"));
        assert!(!object.contains_key("7"));
    }

    #[tokio::test]
    async fn persist_rewrites_the_backing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("warnings.json");

        let ledger = Ledger::load(&path).expect("load");
        ledger.warn(42, "spam").await.expect("warn");

        std::fs::remove_file(&path).expect("remove");
        ledger.persist().await.expect("persist");

        let reloaded = Ledger::load(&path).expect("reload");
        assert_eq!(reloaded.warnings_for(42).await.expect("history").len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_warns_for_two_users_both_persist() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("warnings.json");
        let ledger = Ledger::load(&path).expect("load");

        let (first, second) = tokio::join!(ledger.warn(1, "spam"), ledger.warn(2, "flooding"));
        first.expect("warn user 1");
        second.expect("warn user 2");

        let reloaded = Ledger::load(&path).expect("reload");
        assert_eq!(reloaded.warnings_for(1).await.expect("user 1").len(), 1);
        assert_eq!(reloaded.warnings_for(2).await.expect("user 2").len(), 1);
    }
}
