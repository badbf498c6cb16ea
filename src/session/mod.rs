//! Authentication session state.
//!
//! One [`AuthSession`] per client. It owns the token lifecycle (login,
//! logout, restore on start-up) and listens on [`AuthEvents`] so the HTTP
//! layer can revoke a session without holding a reference to it.

use std::sync::{Arc, Mutex, Weak};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use crate::api::auth;
use crate::api::users;
use crate::config::RouteConfig;
use crate::error::ClientError;
use crate::events::AuthSignal;
use crate::hooks::keys;
use crate::http::HttpClient;
use crate::models::User;
use crate::query::QueryCache;

#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    Unauthenticated,
    /// Restoring a stored token on start-up
    Checking,
    Authenticated(User),
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, AuthState::Checking)
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
}

impl Route {
    pub fn path<'a>(&self, routes: &'a RouteConfig) -> &'a str {
        match self {
            Route::Home => &routes.home,
            Route::Login => &routes.login,
        }
    }
}

/// Where the session sends the user after a transition.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route, path: &str);
}

/// Logs navigation; for headless callers with nothing to redirect.
#[derive(Debug, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, route: Route, path: &str) {
        tracing::debug!(?route, path, "Navigate");
    }
}

/// Keeps every navigation in order.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> Vec<Route> {
        self.visited.lock().map(|v| v.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<Route> {
        self.visited().last().copied()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route, _path: &str) {
        if let Ok(mut visited) = self.visited.lock() {
            visited.push(route);
        }
    }
}

pub struct AuthSession {
    client: Arc<HttpClient>,
    cache: Arc<QueryCache>,
    navigator: Arc<dyn Navigator>,
    routes: RouteConfig,
    state: watch::Sender<AuthState>,
}

impl AuthSession {
    pub fn new(
        client: Arc<HttpClient>,
        cache: Arc<QueryCache>,
        navigator: Arc<dyn Navigator>,
        routes: RouteConfig,
    ) -> Self {
        let (state, _) = watch::channel(AuthState::Unauthenticated);
        Self {
            client,
            cache,
            navigator,
            routes,
            state,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().user().cloned()
    }

    fn set_state(&self, next: AuthState) {
        self.state.send_replace(next);
    }

    fn navigate(&self, route: Route) {
        self.navigator.navigate(route, route.path(&self.routes));
    }

    /// Signs in and persists the token.
    ///
    /// `remember` selects the durable store; otherwise the token only lives
    /// in the session store. A rejected login leaves the state untouched and
    /// returns the backend's failure.
    pub async fn login(&self, email: &str, password: &str, remember: bool) -> Result<User, ClientError> {
        let response = auth::login(&self.client, email, password).await?.into_result()?;

        self.client
            .tokens()
            .store(&response.token, remember, Some(&response.user))
            .await?;
        self.cache.set_data(keys::me(), response.user.clone()).await;

        tracing::info!(user_id = response.user.user_id, remember, "Signed in");
        self.set_state(AuthState::Authenticated(response.user.clone()));
        self.navigate(Route::Home);
        Ok(response.user)
    }

    /// Ends the session. The backend call is best effort; local credentials
    /// are cleared whatever it returns.
    pub async fn logout(&self) {
        match auth::logout(&self.client).await {
            Ok(envelope) if envelope.is_success() => {}
            Ok(envelope) => {
                let message = envelope.error().map(|e| e.message.clone()).unwrap_or_default();
                tracing::warn!(%message, "Backend logout failed");
            }
            Err(e) => tracing::warn!(error = %e, "Backend logout failed"),
        }

        self.drop_credentials().await;
        tracing::info!("Signed out");
        self.set_state(AuthState::Unauthenticated);
        self.navigate(Route::Login);
    }

    /// Restores a stored session on start-up.
    ///
    /// Any failure to confirm the token clears storage so the next start
    /// does not retry a dead token.
    pub async fn restore(&self) -> AuthState {
        self.set_state(AuthState::Checking);

        let token = match self.client.tokens().resolve_token().await {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored session");
                None
            }
        };

        let next = match token {
            None => AuthState::Unauthenticated,
            Some(_) => match users::me(&self.client).await.and_then(|env| env.into_result()) {
                Ok(user) => {
                    tracing::info!(user_id = user.user_id, "Session restored");
                    self.cache.set_data(keys::me(), user.clone()).await;
                    AuthState::Authenticated(user)
                }
                Err(e) => {
                    tracing::info!(error = %e, "Stored session rejected");
                    self.drop_credentials().await;
                    AuthState::Unauthenticated
                }
            },
        };

        self.set_state(next.clone());
        next
    }

    /// Re-reads the profile of the signed-in user.
    pub async fn refresh_user(&self) -> Result<User, ClientError> {
        if !self.is_authenticated() {
            return Err(ClientError::Api(crate::error::ApiFailure::new(401, "Not signed in")));
        }
        let user = users::me(&self.client).await?.into_result()?;
        self.cache.set_data(keys::me(), user.clone()).await;
        // A revocation during the request wins
        if self.is_authenticated() {
            self.set_state(AuthState::Authenticated(user.clone()));
        }
        Ok(user)
    }

    /// Applies one signal from the HTTP layer.
    pub async fn handle_signal(&self, signal: &AuthSignal) {
        match signal {
            AuthSignal::Unauthorized { path } => {
                tracing::warn!(path = %path, "Session revoked by backend");
                self.drop_credentials().await;
                self.cache.clear().await;
                self.set_state(AuthState::Unauthenticated);
                self.navigate(Route::Login);
            }
        }
    }

    /// Background task applying revocation signals until the session is dropped.
    pub fn spawn_revocation_listener(self: &Arc<Self>) -> JoinHandle<()> {
        let mut receiver = self.client.events().subscribe();
        let session: Weak<Self> = Arc::downgrade(self);

        tokio::spawn(async move {
            loop {
                let signal = match receiver.recv().await {
                    Ok(signal) => signal,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::debug!(skipped, "Auth listener lagged");
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                };
                let Some(session) = session.upgrade() else { break };
                session.handle_signal(&signal).await;
            }
        })
    }

    async fn drop_credentials(&self) {
        if let Err(e) = self.client.tokens().clear().await {
            tracing::error!(error = %e, "Failed to clear stored credentials");
        }
    }
}
