//! Run registry: maps run ids to live run state so HTTP handlers can poll,
//! stop, and download runs owned by background tasks. Nothing here survives
//! a restart — runs are as ephemeral as the uploads that start them.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::pipeline::runner::{RunContext, RunSummary};

/// Terminal result of a run, stored once its background task finishes.
pub enum RunOutcome {
    Pending,
    /// Completed or stopped early; a partial archive is still downloadable.
    Finished { archive: Bytes, summary: RunSummary },
    Failed { error: String },
}

pub struct RunHandle {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub ctx: Arc<RunContext>,
    pub outcome: RwLock<RunOutcome>,
}

impl RunHandle {
    fn new(id: Uuid) -> Self {
        Self {
            id,
            created_at: Utc::now(),
            ctx: Arc::new(RunContext::new()),
            outcome: RwLock::new(RunOutcome::Pending),
        }
    }
}

#[derive(Clone, Default)]
pub struct RunRegistry {
    runs: Arc<RwLock<HashMap<Uuid, Arc<RunHandle>>>>,
}

impl RunRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> Arc<RunHandle> {
        let handle = Arc::new(RunHandle::new(Uuid::new_v4()));
        self.runs.write().await.insert(handle.id, handle.clone());
        handle
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<RunHandle>> {
        self.runs.read().await.get(&id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn created_runs_are_retrievable_by_id() {
        let registry = RunRegistry::new();
        let handle = registry.create().await;
        let fetched = registry.get(handle.id).await.expect("run should exist");
        assert_eq!(fetched.id, handle.id);
        assert!(matches!(*fetched.outcome.read().await, RunOutcome::Pending));
    }

    #[tokio::test]
    async fn unknown_ids_return_none() {
        let registry = RunRegistry::new();
        assert!(registry.get(Uuid::new_v4()).await.is_none());
    }
}
