use tokio::sync::broadcast;

/// Signals published by the HTTP layer for whoever owns the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthSignal {
    /// A non-auth request came back 401; stored credentials were already cleared.
    Unauthorized { path: String },
}

/// Revocation bus shared by the HTTP client and the auth session, so neither
/// needs a reference to the other.
#[derive(Debug, Clone)]
pub struct AuthEvents {
    sender: broadcast::Sender<AuthSignal>,
}

impl AuthEvents {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(16);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AuthSignal> {
        self.sender.subscribe()
    }

    pub fn publish(&self, signal: AuthSignal) {
        if let Err(e) = self.sender.send(signal) {
            tracing::debug!(signal = ?e.0, "No auth listeners for signal");
        }
    }
}

impl Default for AuthEvents {
    fn default() -> Self {
        Self::new()
    }
}
