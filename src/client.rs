use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::events::AuthEvents;
use crate::hooks::{
    ApplicationHooks, BoardHooks, ClubHooks, HookContext, NotificationHooks, RecruitmentHooks, ScheduleHooks,
    SchoolHooks, UserHooks,
};
use crate::http::HttpClient;
use crate::query::QueryCache;
use crate::session::{AuthSession, LogNavigator, Navigator};
use crate::storage::TokenStorage;

/// Aborts the revocation listener once the last client clone is gone.
struct ListenerGuard(JoinHandle<()>);

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// One wired-up client: HTTP, cache, session and every hook set share the
/// same token storage and revocation bus. The session listens for
/// revocations for as long as any clone is alive.
#[derive(Clone)]
pub struct UniClub {
    config: ClientConfig,
    client: Arc<HttpClient>,
    cache: Arc<QueryCache>,
    session: Arc<AuthSession>,
    _listener: Arc<ListenerGuard>,
}

impl UniClub {
    /// Must be called from within a Tokio runtime.
    pub fn new(config: ClientConfig, tokens: TokenStorage, navigator: Arc<dyn Navigator>) -> Result<Self, ClientError> {
        if tokio::runtime::Handle::try_current().is_err() {
            return Err(ClientError::Config("UniClub requires a running Tokio runtime".to_string()));
        }

        let events = AuthEvents::new();
        let client = Arc::new(HttpClient::new(&config.api, tokens, events)?);
        let cache = Arc::new(QueryCache::new());
        let session = Arc::new(AuthSession::new(
            client.clone(),
            cache.clone(),
            navigator,
            config.routes.clone(),
        ));
        let listener = ListenerGuard(session.spawn_revocation_listener());

        Ok(Self {
            config,
            client,
            cache,
            session,
            _listener: Arc::new(listener),
        })
    }

    /// In-memory storage and log-only navigation.
    pub fn ephemeral(config: ClientConfig) -> Result<Self, ClientError> {
        Self::new(config, TokenStorage::in_memory(), Arc::new(LogNavigator))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn http(&self) -> &Arc<HttpClient> {
        &self.client
    }

    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    pub fn session(&self) -> &Arc<AuthSession> {
        &self.session
    }

    fn context(&self) -> HookContext {
        HookContext::new(self.client.clone(), self.cache.clone())
    }

    pub fn clubs(&self) -> ClubHooks {
        ClubHooks::new(self.context(), self.config.listing.clone())
    }

    pub fn recruitments(&self) -> RecruitmentHooks {
        RecruitmentHooks::new(self.context())
    }

    pub fn applications(&self) -> ApplicationHooks {
        ApplicationHooks::new(self.context())
    }

    pub fn boards(&self) -> BoardHooks {
        BoardHooks::new(self.context())
    }

    pub fn schedules(&self) -> ScheduleHooks {
        ScheduleHooks::new(self.context())
    }

    pub fn notifications(&self) -> NotificationHooks {
        NotificationHooks::new(self.context())
    }

    pub fn users(&self) -> UserHooks {
        UserHooks::new(self.context())
    }

    pub fn schools(&self) -> SchoolHooks {
        SchoolHooks::new(self.context())
    }
}
