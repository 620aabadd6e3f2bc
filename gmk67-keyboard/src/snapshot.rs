//! Latest-frame hand-off between a color producer and the push loop.
//!
//! The producer publishes whole color maps; the reader always sees the last
//! complete one, never a map that is half way through an update.

use std::sync::Arc;

use tokio::sync::watch;

use crate::colors::ColorMap;

/// Create a publisher/reader pair seeded with `initial`
pub fn channel(initial: ColorMap) -> (SnapshotPublisher, SnapshotReader) {
    let (tx, rx) = watch::channel(Arc::new(initial));
    (SnapshotPublisher { tx }, SnapshotReader { rx })
}

/// Producer side
#[derive(Debug)]
pub struct SnapshotPublisher {
    tx: watch::Sender<Arc<ColorMap>>,
}

impl SnapshotPublisher {
    /// Replace the current frame
    pub fn publish(&self, colors: ColorMap) {
        self.tx.send_replace(Arc::new(colors));
    }

    /// Get a new reader for this channel
    pub fn subscribe(&self) -> SnapshotReader {
        SnapshotReader {
            rx: self.tx.subscribe(),
        }
    }
}

/// Consumer side
#[derive(Debug, Clone)]
pub struct SnapshotReader {
    rx: watch::Receiver<Arc<ColorMap>>,
}

impl SnapshotReader {
    /// Last published frame
    pub fn latest(&self) -> Arc<ColorMap> {
        Arc::clone(&self.rx.borrow())
    }

    /// Last published frame, marking it seen
    pub fn latest_and_mark_seen(&mut self) -> Arc<ColorMap> {
        Arc::clone(&self.rx.borrow_and_update())
    }

    /// Whether a frame was published since the last `latest_and_mark_seen`.
    ///
    /// Returns false once the publisher is gone.
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Wait until a new frame is published. Returns false once the
    /// publisher is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}
