use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

/// How long a notification stays visible
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(2);

/// Ephemeral banner with a delayed hide.
///
/// A new notification replaces the visible one and cancels its pending hide.
/// Must be used from within a tokio runtime.
pub struct Notifier {
    visible: Arc<Mutex<Option<String>>>,
    pending_hide: Option<JoinHandle<()>>,
    ttl: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::with_ttl(NOTIFICATION_TTL)
    }
}

impl Notifier {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            visible: Arc::new(Mutex::new(None)),
            pending_hide: None,
            ttl,
        }
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        if let Some(handle) = self.pending_hide.take() {
            handle.abort();
        }

        *lock(&self.visible) = Some(message.into());

        let visible = Arc::clone(&self.visible);
        let ttl = self.ttl;
        self.pending_hide = Some(tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            *lock(&visible) = None;
        }));
    }

    pub fn current(&self) -> Option<String> {
        lock(&self.visible).clone()
    }
}

impl Drop for Notifier {
    fn drop(&mut self) {
        if let Some(handle) = self.pending_hide.take() {
            handle.abort();
        }
    }
}

fn lock(slot: &Mutex<Option<String>>) -> std::sync::MutexGuard<'_, Option<String>> {
    slot.lock().unwrap_or_else(|e| e.into_inner())
}
