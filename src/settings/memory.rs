use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::watch;

use super::{Settings, SettingsStore};

/// In-process settings pushed by the host, with change notification.
pub struct MemorySettingsStore {
    tx: watch::Sender<Settings>,
}

impl MemorySettingsStore {
    pub fn new(settings: Settings) -> Self {
        let (tx, _rx) = watch::channel(settings);
        Self { tx }
    }

    /// Replaces the settings and notifies every subscriber.
    pub fn update(&self, settings: Settings) {
        self.tx.send_replace(settings);
    }

    pub fn subscribe(&self) -> watch::Receiver<Settings> {
        self.tx.subscribe()
    }
}

impl Default for MemorySettingsStore {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn load(&self) -> Result<Settings> {
        Ok(self.tx.borrow().clone())
    }
}
