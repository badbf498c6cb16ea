use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{QueryCache, QueryKey};
use crate::error::ClientError;

/// A cache entry (or family of entries) a successful write makes stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invalidate {
    Key(QueryKey),
    Prefix(QueryKey),
}

#[derive(Debug, Clone)]
pub enum MutationStatus {
    Idle,
    Pending,
    Success,
    Error(ClientError),
}

impl MutationStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, MutationStatus::Pending)
    }
}

type MutationTable = HashMap<QueryKey, MutationStatus>;

/// Puts a pending mutation back to `Idle` if its future is dropped before
/// it settles.
struct PendingGuard<'a> {
    table: &'a Mutex<MutationTable>,
    key: Option<QueryKey>,
}

impl PendingGuard<'_> {
    fn settle(mut self, status: MutationStatus) {
        if let Some(key) = self.key.take() {
            lock(self.table).insert(key, status);
        }
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if let Some(key) = self.key.take() {
            tracing::debug!(key = %key, "Mutation abandoned before completion");
            let mut table = lock(self.table);
            if table.get(&key).is_some_and(MutationStatus::is_pending) {
                table.insert(key, MutationStatus::Idle);
            }
        }
    }
}

fn lock(table: &Mutex<MutationTable>) -> MutexGuard<'_, MutationTable> {
    table.lock().unwrap_or_else(PoisonError::into_inner)
}

impl QueryCache {
    pub(super) fn mutation_table(&self) -> MutexGuard<'_, MutationTable> {
        lock(&self.mutations)
    }

    /// Runs a write identified by `mutation_key`.
    ///
    /// A second trigger of the same mutation while the first is pending is
    /// rejected without sending anything. On success every target in
    /// `invalidates` is marked stale before the result is returned. Dropping
    /// the returned future releases the key.
    pub async fn mutate<T, F, Fut>(
        &self,
        mutation_key: QueryKey,
        invalidates: &[Invalidate],
        mutation: F,
    ) -> Result<T, ClientError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        {
            let mut mutations = self.mutation_table();
            let status = mutations.entry(mutation_key.clone()).or_insert(MutationStatus::Idle);
            if status.is_pending() {
                tracing::debug!(key = %mutation_key, "Mutation already pending");
                return Err(ClientError::AlreadyPending(mutation_key.to_string()));
            }
            *status = MutationStatus::Pending;
        }
        let guard = PendingGuard {
            table: &self.mutations,
            key: Some(mutation_key.clone()),
        };

        let result = mutation().await;

        if result.is_ok() {
            self.apply(invalidates).await;
        }

        let status = match &result {
            Ok(_) => MutationStatus::Success,
            Err(e) => {
                tracing::debug!(key = %mutation_key, error = %e, "Mutation failed");
                MutationStatus::Error(e.clone())
            }
        };
        guard.settle(status);

        result
    }

    pub async fn mutation_status(&self, mutation_key: &QueryKey) -> MutationStatus {
        self.mutation_table().get(mutation_key).cloned().unwrap_or(MutationStatus::Idle)
    }

    /// True while the mutation is in flight; callers disable the submitting control.
    pub async fn is_mutating(&self, mutation_key: &QueryKey) -> bool {
        self.mutation_status(mutation_key).await.is_pending()
    }
}
