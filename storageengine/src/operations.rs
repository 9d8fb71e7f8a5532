use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::file_handler::FileHandler;

const INDENT: &[u8] = b"    ";

/// Load and save a whole collection of rows. Every save replaces the previous
/// collection entirely.
pub trait DbOperations<T> {
    fn load(&mut self) -> Result<Vec<T>>;
    fn save(&mut self, rows: &[T]) -> Result<()>;
}

/// Stores the collection as one pretty-printed JSON array.
pub struct DbOperationsImpl {
    file_handler: Box<dyn FileHandler>,
}

impl DbOperationsImpl {
    pub fn new(file_handler: Box<dyn FileHandler>) -> Self {
        Self {
            file_handler,
        }
    }
}

impl<T> DbOperations<T> for DbOperationsImpl where T: Serialize + DeserializeOwned {
    fn load(&mut self) -> Result<Vec<T>> {
        let buf = self.file_handler.read_all()?;
        if buf.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let rows: Vec<T> = serde_json::from_slice(&buf).context("malformed collection data")?;
        log::debug!("loaded {} rows", rows.len());

        Ok(rows)
    }

    fn save(&mut self, rows: &[T]) -> Result<()> {
        let buf = encode(rows)?;
        self.file_handler.replace(&buf)?;
        log::debug!("saved {} rows", rows.len());

        Ok(())
    }
}

fn encode<T: Serialize>(rows: &[T]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    rows.serialize(&mut serializer)?;

    Ok(buf)
}
