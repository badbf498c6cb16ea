//! Cache-aware read and write operations for UI callers.
//!
//! Reads go through [`QueryCache::fetch`] under the keys in [`keys`]; writes
//! go through [`QueryCache::mutate`] and invalidate the keys that depend on
//! the resource they changed.

pub mod boards;
pub mod clubs;
pub mod keys;
pub mod notifications;
pub mod recruitments;
pub mod schedules;
pub mod schools;
pub mod users;

pub use boards::BoardHooks;
pub use clubs::{derive_club_page, ClubHooks};
pub use notifications::NotificationHooks;
pub use recruitments::{ApplicationHooks, RecruitmentHooks};
pub use schedules::ScheduleHooks;
pub use schools::SchoolHooks;
pub use users::UserHooks;

use std::future::Future;
use std::sync::Arc;

use crate::api::{Envelope, ListResponse};
use crate::error::ClientError;
use crate::http::HttpClient;
use crate::query::{Invalidate, QueryCache, QueryKey, QueryState};

/// The HTTP client and cache every hook set works against.
#[derive(Clone)]
pub struct HookContext {
    pub client: Arc<HttpClient>,
    pub cache: Arc<QueryCache>,
}

impl HookContext {
    pub fn new(client: Arc<HttpClient>, cache: Arc<QueryCache>) -> Self {
        Self { client, cache }
    }

    /// Cached read of a single resource.
    pub(crate) async fn read<T, F, Fut>(&self, key: QueryKey, call: F) -> QueryState<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce(Arc<HttpClient>) -> Fut,
        Fut: Future<Output = Result<Envelope<T>, ClientError>> + Send + 'static,
    {
        let client = self.client.clone();
        self.cache
            .fetch(key, move || {
                let fut = call(client);
                async move { fut.await?.into_result() }
            })
            .await
    }

    /// Cached read of a list endpoint; the cache holds the normalized items.
    pub(crate) async fn read_list<T, F, Fut>(&self, key: QueryKey, call: F) -> QueryState<Vec<T>>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce(Arc<HttpClient>) -> Fut,
        Fut: Future<Output = Result<Envelope<ListResponse<T>>, ClientError>> + Send + 'static,
    {
        let client = self.client.clone();
        self.cache
            .fetch(key, move || {
                let fut = call(client);
                async move {
                    let list = fut.await?.into_result()?;
                    Ok::<_, ClientError>(list.into_items())
                }
            })
            .await
    }

    pub(crate) async fn write<T, F, Fut>(
        &self,
        mutation_key: QueryKey,
        invalidates: &[Invalidate],
        call: F,
    ) -> Result<T, ClientError>
    where
        F: FnOnce(Arc<HttpClient>) -> Fut,
        Fut: Future<Output = Result<Envelope<T>, ClientError>>,
    {
        let client = self.client.clone();
        self.cache
            .mutate(mutation_key, invalidates, move || {
                let fut = call(client);
                async move { fut.await?.into_result() }
            })
            .await
    }
}
