use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug)]
struct PendingUnmute {
    generation: u64,
    handle: JoinHandle<()>,
}

/// One-shot delayed un-mute tasks, keyed by target user.
///
/// Scheduling again for the same user replaces the pending task, and a
/// manual un-mute cancels it instead of letting the timer fire redundantly.
/// Finished tasks remove their own entry; the generation check keeps a
/// stale task from removing its replacement.
#[derive(Debug, Default)]
pub struct UnmuteScheduler {
    pending: Mutex<HashMap<u64, PendingUnmute>>,
    generations: AtomicU64,
}

impl UnmuteScheduler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Run `revert` after `delay`, replacing any pending task for the user.
    pub async fn schedule<F>(self: &Arc<Self>, user_id: u64, delay: Duration, revert: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let generation = self.generations.fetch_add(1, Ordering::Relaxed);
        let scheduler = Arc::clone(self);

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            revert.await;

            let mut pending = scheduler.pending.lock().await;
            if pending
                .get(&user_id)
                .is_some_and(|entry| entry.generation == generation)
            {
                pending.remove(&user_id);
            }
        });

        let mut pending = self.pending.lock().await;
        if let Some(previous) = pending.insert(user_id, PendingUnmute { generation, handle }) {
            previous.handle.abort();
            debug!(user_id, "replaced pending un-mute");
        }
    }

    /// Cancel a pending un-mute. Returns whether one was pending.
    pub async fn cancel(&self, user_id: u64) -> bool {
        match self.pending.lock().await.remove(&user_id) {
            Some(entry) => {
                entry.handle.abort();
                debug!(user_id, "cancelled pending un-mute");
                true
            }
            None => false,
        }
    }

    pub async fn is_pending(&self, user_id: u64) -> bool {
        self.pending.lock().await.contains_key(&user_id)
    }
}
