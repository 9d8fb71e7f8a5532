use std::io::{self, Write};

use clap::Args;
use recordstore::{Field, NewRecord, PartialRecord, RecordId, RecordStore, UpdateOutcome};

use crate::table::Pager;

/// Every text field, all required.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct NewRecordArgs {
    #[arg(long)]
    pub surname: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub patronymic: String,
    #[arg(long)]
    pub organization: String,
    #[arg(long)]
    pub phone_work: String,
    #[arg(long)]
    pub phone_personal: String,
}

/// Any subset of the text fields.
#[derive(Args, Debug, Clone, PartialEq, Default)]
pub struct FieldArgs {
    #[arg(long)]
    pub surname: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub patronymic: Option<String>,
    #[arg(long)]
    pub organization: Option<String>,
    #[arg(long)]
    pub phone_work: Option<String>,
    #[arg(long)]
    pub phone_personal: Option<String>,
}

impl From<NewRecordArgs> for NewRecord {
    fn from(args: NewRecordArgs) -> Self {
        NewRecord {
            surname: args.surname,
            name: args.name,
            patronymic: args.patronymic,
            organization: args.organization,
            phone_work: args.phone_work,
            phone_personal: args.phone_personal,
        }
    }
}

impl From<FieldArgs> for PartialRecord {
    fn from(args: FieldArgs) -> Self {
        PartialRecord {
            surname: args.surname,
            name: args.name,
            patronymic: args.patronymic,
            organization: args.organization,
            phone_work: args.phone_work,
            phone_personal: args.phone_personal,
        }
    }
}

pub fn list<W: Write>(store: &mut RecordStore, page_size: usize, out: &mut W) -> io::Result<()> {
    let loaded = store.load();
    if let Some(e) = &loaded.failure {
        return writeln!(out, "{}", e);
    }
    if loaded.collection.is_empty() {
        return writeln!(out, "The directory is empty.");
    }

    Pager::new(page_size, false).show(loaded.collection.records(), &mut io::empty(), out)
}

pub fn add<W: Write>(store: &mut RecordStore, fields: NewRecordArgs, out: &mut W) -> io::Result<()> {
    match store.add_record(fields.into()) {
        Ok(record) => writeln!(out, "Added record #{}.", record.id),
        Err(e) => writeln!(out, "{}", e),
    }
}

pub fn edit<W: Write>(store: &mut RecordStore, id: RecordId, fields: FieldArgs, out: &mut W) -> io::Result<()> {
    let patch = PartialRecord::from(fields);
    if patch.is_empty() {
        return writeln!(out, "Specify at least one field to change.");
    }

    match store.update_record(id, &patch) {
        Ok(UpdateOutcome::Updated(_)) => {
            let changed: Vec<&str> = patch.iter().map(|(field, _)| field.key()).collect();
            writeln!(out, "Record #{} updated: {}.", id, changed.join(", "))
        }
        Ok(UpdateOutcome::NoMatch) => writeln!(out, "There is no record #{} in the directory.", id),
        Err(e) => writeln!(out, "{}", e),
    }
}

pub fn find<W: Write>(store: &mut RecordStore, fields: FieldArgs, page_size: usize, out: &mut W) -> io::Result<()> {
    let query = PartialRecord::from(fields);
    if query.is_empty() {
        let options: Vec<String> = Field::ALL.iter().map(|field| format!("--{}", field.flag())).collect();
        return writeln!(out, "Specify at least one field to search by ({}).", options.join(", "));
    }

    match store.find_records(&query) {
        Ok(found) if found.is_empty() => writeln!(out, "No records match these values."),
        Ok(found) => Pager::new(page_size, false).show(&found, &mut io::empty(), out),
        Err(e) => writeln!(out, "{}", e),
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use recordstore::{open_file_store, Record};

    use super::*;

    fn petrov() -> NewRecordArgs {
        NewRecordArgs {
            surname: "Petrov".to_string(),
            name: "Petr".to_string(),
            patronymic: "A".to_string(),
            organization: "X".to_string(),
            phone_work: "111".to_string(),
            phone_personal: "222".to_string(),
        }
    }

    fn temp_store() -> Result<(tempfile::TempDir, RecordStore)> {
        let dir = tempfile::tempdir()?;
        let file_path = dir.path().join("phonebook.json");
        let store = open_file_store(file_path.to_str().unwrap())?;
        Ok((dir, store))
    }

    #[test]
    fn add_then_list_prints_every_page() -> Result<()> {
        let (_dir, mut store) = temp_store()?;
        let mut out = Vec::new();
        for _ in 0..3 {
            add(&mut store, petrov(), &mut out)?;
        }

        list(&mut store, 2, &mut out)?;

        let text = String::from_utf8(out)?;
        assert!(text.contains("Added record #3."));
        assert!(text.contains("Page 2/2"));

        Ok(())
    }

    #[test]
    fn edit_applies_only_given_fields() -> Result<()> {
        let (_dir, mut store) = temp_store()?;
        let mut out = Vec::new();
        add(&mut store, petrov(), &mut out)?;

        let fields = FieldArgs { organization: Some("Acme".to_string()), ..FieldArgs::default() };
        edit(&mut store, 1, fields, &mut out)?;

        let text = String::from_utf8(out)?;
        assert!(text.contains("Record #1 updated: organization."));
        let expected = Record { organization: "Acme".to_string(), ..Record::from_new(1, petrov().into()) };
        assert_eq!(store.get(1)?, Some(expected));

        Ok(())
    }

    #[test]
    fn edit_rejects_empty_patch_and_unknown_id() -> Result<()> {
        let (_dir, mut store) = temp_store()?;
        let mut out = Vec::new();

        edit(&mut store, 1, FieldArgs::default(), &mut out)?;
        let fields = FieldArgs { name: Some("X".to_string()), ..FieldArgs::default() };
        edit(&mut store, 999, fields, &mut out)?;

        let text = String::from_utf8(out)?;
        assert!(text.contains("Specify at least one field to change."));
        assert!(text.contains("There is no record #999 in the directory."));

        Ok(())
    }

    #[test]
    fn find_requires_a_field() -> Result<()> {
        let (_dir, mut store) = temp_store()?;
        let mut out = Vec::new();

        find(&mut store, FieldArgs::default(), 5, &mut out)?;

        let text = String::from_utf8(out)?;
        for field in Field::ALL {
            assert!(text.contains(&format!("--{}", field.flag())));
        }

        Ok(())
    }

    #[test]
    fn find_prints_matches() -> Result<()> {
        let (_dir, mut store) = temp_store()?;
        let mut out = Vec::new();
        add(&mut store, petrov(), &mut out)?;

        let fields = FieldArgs { phone_personal: Some("222".to_string()), ..FieldArgs::default() };
        find(&mut store, fields, 5, &mut out)?;

        let text = String::from_utf8(out)?;
        assert!(text.contains("| 1 | Petrov  |"));

        Ok(())
    }

    #[test]
    fn list_reports_unreadable_directory() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let file_path = dir.path().join("phonebook.json");
        std::fs::write(&file_path, "not json")?;
        let mut store = open_file_store(file_path.to_str().unwrap())?;
        let mut out = Vec::new();

        list(&mut store, 5, &mut out)?;

        let text = String::from_utf8(out)?;
        assert!(text.contains("failed to read the directory"));
        assert_eq!(std::fs::read_to_string(&file_path)?, "not json");

        Ok(())
    }
}
