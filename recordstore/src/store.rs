use storageengine::operations::DbOperations;

use crate::collection::{Collection, UpdateOutcome};
use crate::error::StoreError;
use crate::record::{NewRecord, Query, Record, RecordId, RecordPatch};

/// Result of [`RecordStore::load`]. A failed read still hands back a usable
/// (empty) collection; `failure` says why it is empty.
#[derive(Debug)]
pub struct Loaded {
    pub collection: Collection,
    pub failure: Option<StoreError>,
}

impl Loaded {
    pub fn into_result(self) -> Result<Collection, StoreError> {
        match self.failure {
            Some(e) => Err(e),
            None => Ok(self.collection),
        }
    }
}

/// Owns the backend and nothing else. Each operation reloads the whole
/// collection and, if it mutates, writes the whole collection back.
pub struct RecordStore {
    db_operations: Box<dyn DbOperations<Record>>,
}

impl RecordStore {
    pub fn new(db_operations: Box<dyn DbOperations<Record>>) -> Self {
        Self {
            db_operations,
        }
    }

    pub fn load(&mut self) -> Loaded {
        match self.db_operations.load() {
            Ok(records) => Loaded {
                collection: records.into(),
                failure: None,
            },
            Err(e) => {
                log::warn!("load failed: {:#}", e);
                Loaded {
                    collection: Collection::new(),
                    failure: Some(StoreError::Read(e)),
                }
            }
        }
    }

    pub fn save(&mut self, collection: &Collection) -> Result<(), StoreError> {
        self.db_operations.save(collection.records()).map_err(|e| {
            log::warn!("save failed: {:#}", e);
            StoreError::Write(e)
        })
    }

    pub fn get(&mut self, id: RecordId) -> Result<Option<Record>, StoreError> {
        let collection = self.load().into_result()?;
        Ok(collection.get(id).cloned())
    }

    /// Appends a record and persists the collection. A collection that could
    /// not be read, or that has no id left to hand out, is never written back.
    pub fn add_record(&mut self, fields: NewRecord) -> Result<Record, StoreError> {
        let mut collection = self.load().into_result()?;
        let Some(added) = collection.add_record(fields).cloned() else {
            return Err(StoreError::IdsExhausted(RecordId::MAX));
        };
        self.save(&collection)?;

        log::info!("added record {}", added.id);
        Ok(added)
    }

    pub fn find_records(&mut self, query: &Query) -> Result<Vec<Record>, StoreError> {
        let collection = self.load().into_result()?;
        let found: Vec<Record> = collection.find_records(query).cloned().collect();
        log::debug!("query matched {} of {} records", found.len(), collection.len());

        Ok(found)
    }

    /// Applies `patch` to the records carrying `id`. Nothing is written when
    /// no record matches.
    pub fn update_record(&mut self, id: RecordId, patch: &RecordPatch) -> Result<UpdateOutcome, StoreError> {
        let mut collection = self.load().into_result()?;
        let outcome = collection.update_record(id, patch);
        if let UpdateOutcome::Updated(_) = outcome {
            self.save(&collection)?;
            log::info!("updated record {}", id);
        }

        Ok(outcome)
    }
}
