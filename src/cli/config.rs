use std::path::PathBuf;
use std::sync::Arc;

use crate::client::UniClub;
use crate::session::LogNavigator;
use crate::storage::{FileStore, MemoryStore, TokenStorage};

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("UNICLUB_CLI_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME").map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("uniclub").join("cli")
    };

    Ok(config_dir)
}

/// Durable key/value file holding the remembered token.
pub fn storage_path() -> anyhow::Result<PathBuf> {
    Ok(get_config_dir()?.join("storage.json"))
}

/// Client for one CLI invocation. The session store lives in memory, so a
/// login without `--remember` only lasts for the command that made it.
pub fn build_client() -> anyhow::Result<UniClub> {
    let tokens = TokenStorage::new(
        Arc::new(FileStore::new(storage_path()?)),
        Arc::new(MemoryStore::new()),
    );
    let client = UniClub::new(crate::config::config().clone(), tokens, Arc::new(LogNavigator))?;
    Ok(client)
}

