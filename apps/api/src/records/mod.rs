// Record Store: one CSV row per submission.
// Handlers never touch the file; they enqueue on the RecordWriter, which owns the store.

pub mod record;
pub mod store;
pub mod writer;

pub use record::{Record, RecordSchema};
pub use store::CsvRecordStore;
pub use writer::{drain_writer, RecordWriter};
