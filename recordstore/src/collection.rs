use crate::record::{NewRecord, Query, Record, RecordId, RecordPatch};

/// Records in insertion order. Nothing here ever sorts them.
#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct Collection {
    records: Vec<Record>,
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum UpdateOutcome {
    /// No record carries the target id; the collection is unchanged.
    NoMatch,
    /// Number of records that were rewritten. Anything above one means the
    /// collection holds duplicate ids.
    Updated(usize),
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Next id is one past the largest id ever seen, so gaps are never filled.
    /// `None` once the largest id is `RecordId::MAX`: wrapping around would
    /// hand out an id that may already be taken.
    pub fn next_id(&self) -> Option<RecordId> {
        self.records.iter().map(|record| record.id).max().unwrap_or(0).checked_add(1)
    }

    /// Appends `fields` under a fresh id and returns the stored record, or
    /// `None` without touching the collection when no fresh id is left.
    pub fn add_record(&mut self, fields: NewRecord) -> Option<&Record> {
        let id = self.next_id()?;
        self.records.push(Record::from_new(id, fields));
        self.records.last()
    }

    /// Every record whose fields equal all fields present in `query`, in
    /// collection order. An empty query matches everything; callers that do
    /// not want that must check [`Query::is_empty`] first.
    pub fn find_records<'a>(&'a self, query: &'a Query) -> impl Iterator<Item = &'a Record> + Clone + 'a {
        self.records.iter().filter(move |record| record.matches(query))
    }

    pub fn update_record(&mut self, id: RecordId, patch: &RecordPatch) -> UpdateOutcome {
        let mut updated = 0;
        for record in self.records.iter_mut().filter(|record| record.id == id) {
            record.apply(patch);
            updated += 1;
        }

        match updated {
            0 => UpdateOutcome::NoMatch,
            1 => UpdateOutcome::Updated(1),
            n => {
                log::warn!("id {} is shared by {} records; all of them were updated", id, n);
                UpdateOutcome::Updated(n)
            }
        }
    }
}

impl From<Vec<Record>> for Collection {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}
