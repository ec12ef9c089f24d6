use std::thread::JoinHandle;

use tokio::sync::mpsc;

use crate::records::record::Record;
use crate::records::store::CsvRecordStore;

/// Single-writer queue in front of the CSV store.
///
/// Handlers call `submit` and return immediately. One dedicated thread owns the
/// store and appends records in arrival order, so rows never interleave and the
/// header is written once. Persistence errors are logged and dropped.
#[derive(Clone)]
pub struct RecordWriter {
    tx: mpsc::UnboundedSender<Record>,
}

impl RecordWriter {
    /// Starts the writer thread. It exits once every `RecordWriter` clone is dropped.
    pub fn spawn(store: CsvRecordStore) -> std::io::Result<(Self, JoinHandle<()>)> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Record>();

        let handle = std::thread::Builder::new()
            .name("record-writer".into())
            .spawn(move || {
                tracing::info!("Record writer started ({})", store.path().display());

                while let Some(record) = rx.blocking_recv() {
                    if let Err(e) = store.append(&record) {
                        tracing::error!(
                            "Failed to persist submission to {}: {e}",
                            store.path().display()
                        );
                    }
                }

                tracing::info!("Record writer stopped");
            })?;

        Ok((Self { tx }, handle))
    }

    /// Queues a record for persistence. Never fails the caller.
    pub fn submit(&self, record: Record) {
        if self.tx.send(record).is_err() {
            tracing::error!("Record writer is not running, submission was not persisted");
        }
    }
}

/// Waits for the writer thread to persist everything queued and exit.
/// Returns only after every `RecordWriter` clone has been dropped.
pub async fn drain_writer(handle: JoinHandle<()>) {
    match tokio::task::spawn_blocking(move || handle.join()).await {
        Ok(Ok(())) => tracing::info!("Record writer drained"),
        Ok(Err(_)) => tracing::error!("Record writer thread panicked"),
        Err(e) => tracing::error!("Failed to wait for record writer: {e}"),
    }
}
