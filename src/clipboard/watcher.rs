use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::ClipboardBackend;
use crate::mac::{detect_style, MacStyle};

/// A MAC address that showed up on the clipboard.
#[derive(Debug, Clone, PartialEq)]
pub struct MacEvent {
    pub mac: String,
    /// The style the MAC was copied in.
    pub style: Option<MacStyle>,
    pub detected_at: DateTime<Utc>,
}

impl MacEvent {
    pub fn new(mac: &str) -> Self {
        Self {
            mac: mac.to_string(),
            style: detect_style(mac),
            detected_at: Utc::now(),
        }
    }
}

/// Polls the clipboard and reports MAC addresses as they appear.
///
/// The last-seen digest lives in the watcher itself; only the polling task
/// touches it.
pub struct ClipboardWatcher {
    clipboard: Arc<dyn ClipboardBackend>,
    last_digest: Option<String>,
    poll_interval: Duration,
    event_sender: mpsc::Sender<MacEvent>,
}

impl ClipboardWatcher {
    pub fn new(
        clipboard: Arc<dyn ClipboardBackend>,
        poll_interval: Duration,
    ) -> (Self, mpsc::Receiver<MacEvent>) {
        let (tx, rx) = mpsc::channel(crate::EVENT_CHANNEL_CAPACITY);

        let watcher = Self {
            clipboard,
            last_digest: None,
            poll_interval,
            event_sender: tx,
        };

        (watcher, rx)
    }

    /// Runs until the event receiver is dropped.
    pub async fn start_watching(mut self) {
        let mut interval_timer = interval(self.poll_interval);
        interval_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            "Clipboard watcher started (poll interval: {:?})",
            self.poll_interval
        );

        loop {
            interval_timer.tick().await;

            let Some(event) = self.poll() else {
                continue;
            };

            if let Err(e) = self.event_sender.send(event).await {
                warn!("Event receiver closed, stopping watcher: {}", e);
                break;
            }
        }
    }

    /// One polling step. Returns an event when the clipboard holds a MAC
    /// that differs from the last one reported.
    pub fn poll(&mut self) -> Option<MacEvent> {
        let text = match self.clipboard.read_text() {
            Ok(text) => text,
            Err(e) => {
                debug!("No clipboard text or error: {}", e);
                return None;
            }
        };

        let digest = content_digest(&text);
        if self.last_digest.as_deref() == Some(digest.as_str()) {
            return None;
        }

        // Non-MAC content leaves the cell alone, so copying the same MAC
        // again after some unrelated text is not reported twice.
        let event = MacEvent::new(&text);
        if event.style.is_none() {
            return None;
        }

        self.last_digest = Some(digest);
        info!("MAC address detected on clipboard: {}", event.mac);
        Some(event)
    }
}

fn content_digest(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}
