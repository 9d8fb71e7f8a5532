//! The phone directory record store.
//!
//! Records live in one persisted collection. Every operation reloads that
//! collection through a [`storageengine::operations::DbOperations`] backend,
//! works on it in memory, and writes it back whole if anything changed.

use storageengine::file_handler::FileHandlerImpl;
use storageengine::operations::DbOperationsImpl;

pub mod collection;
pub mod error;
pub mod record;
pub mod store;

pub use collection::{Collection, UpdateOutcome};
pub use error::StoreError;
pub use record::{Field, NewRecord, PartialRecord, Query, Record, RecordId, RecordPatch};
pub use store::{Loaded, RecordStore};

/// Opens a store backed by the JSON file at `file_name`. The file does not
/// have to exist yet.
pub fn open_file_store(file_name: &str) -> anyhow::Result<RecordStore> {
    let file_handler = FileHandlerImpl::new(file_name)?;
    let operations = DbOperationsImpl::new(Box::new(file_handler));
    Ok(RecordStore::new(Box::new(operations)))
}
