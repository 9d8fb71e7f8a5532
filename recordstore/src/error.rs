use thiserror::Error;

use crate::record::RecordId;

/// Backend failures, plus running out of ids. Everything else the store can
/// report is a normal outcome, not an error.
///
/// The message names only the outermost context of the cause; the full chain
/// stays reachable through `source()`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read the directory: {0}")]
    Read(#[source] anyhow::Error),
    #[error("failed to write the directory: {0}")]
    Write(#[source] anyhow::Error),
    #[error("no record id is left after {0}")]
    IdsExhausted(RecordId),
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use anyhow::anyhow;

    use super::*;

    #[test]
    fn message_names_each_cause_once() {
        let error = StoreError::Write(anyhow!("disk full").context("failed to replace phonebook.json"));

        let message = error.to_string();

        assert_eq!(message, "failed to write the directory: failed to replace phonebook.json");
        assert_eq!(message.matches("phonebook.json").count(), 1);
        let source = error.source().map(|e| e.to_string());
        assert_eq!(source.as_deref(), Some("failed to replace phonebook.json"));
    }

    #[test]
    fn exhausted_ids_name_the_last_id() {
        let error = StoreError::IdsExhausted(RecordId::MAX);

        assert_eq!(error.to_string(), format!("no record id is left after {}", u64::MAX));
    }
}
