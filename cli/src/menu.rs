use std::io::{self, BufRead, Write};

use recordstore::{Field, NewRecord, PartialRecord, Query, RecordId, RecordPatch, RecordStore, UpdateOutcome};

use crate::table::Pager;

const MAIN_MENU: &str = "
Choose an option:
1. Show the directory
2. Add a new record
3. Edit an existing record
4. Find records by field values
0. Exit
";

const SEARCH_MENU: &str = "
Choose the number of a field to search by, or finish the search:
1. Surname
2. Name
3. Patronymic
4. Organization
5. Work phone
6. Personal phone
0. Cancel search";

const RUN_SEARCH_OPTION: &str = "7. Search by the chosen fields";

/// Interactive console loop. Input and output are generic so the whole
/// dialogue can be driven from a script or a test.
pub struct Menu<'a, R, W> {
    store: &'a mut RecordStore,
    input: R,
    out: W,
    pager: Pager,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(store: &'a mut RecordStore, input: R, out: W, page_size: usize) -> Self {
        Self {
            store,
            input,
            out,
            pager: Pager::new(page_size, true),
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        loop {
            write!(self.out, "{}", MAIN_MENU)?;
            self.out.flush()?;
            let Some(line) = self.read_line()? else {
                return Ok(());
            };

            match line.trim().parse::<u32>() {
                Ok(0) => return Ok(()),
                Ok(1) => self.show_all()?,
                Ok(2) => self.add()?,
                Ok(3) => self.edit()?,
                Ok(4) => self.search()?,
                Ok(_) => {}
                Err(_) => writeln!(self.out, "Enter the number of an option from the menu.")?,
            }
        }
    }

    fn show_all(&mut self) -> io::Result<()> {
        let loaded = self.store.load();
        if let Some(e) = &loaded.failure {
            writeln!(self.out, "{}", e)?;
            return Ok(());
        }
        if loaded.collection.is_empty() {
            writeln!(self.out, "The directory is empty.")?;
            return Ok(());
        }

        self.pager.show(loaded.collection.records(), &mut self.input, &mut self.out)
    }

    fn add(&mut self) -> io::Result<()> {
        let mut candidate = PartialRecord::new();
        for field in Field::ALL {
            let prompt = format!("Enter {} (or 'q' to cancel): ", field.label());
            match self.prompt(&prompt)? {
                Some(value) if !is_cancel(&value) => candidate.set(field, value),
                _ => {
                    writeln!(self.out, "Input cancelled.")?;
                    return Ok(());
                }
            }
        }

        let Some(fields) = NewRecord::from_partial(candidate) else {
            return Ok(());
        };
        match self.store.add_record(fields) {
            Ok(record) => writeln!(self.out, "Added record #{}.", record.id),
            Err(e) => writeln!(self.out, "{}", e),
        }
    }

    fn edit(&mut self) -> io::Result<()> {
        let Some(id) = self.prompt_id()? else {
            writeln!(self.out, "Invalid input, editing cancelled.")?;
            return Ok(());
        };

        let record = match self.store.get(id) {
            Ok(Some(record)) => record,
            Ok(None) => {
                writeln!(self.out, "There is no record with that number in the directory.")?;
                return Ok(());
            }
            Err(e) => {
                writeln!(self.out, "{}", e)?;
                return Ok(());
            }
        };

        let mut patch = RecordPatch::new();
        for field in Field::ALL {
            let prompt = format!(
                "\n{} | current value: {}\nPress Enter to keep it (or 'q' to cancel editing): ",
                field.label(),
                record.get(field)
            );
            match self.prompt(&prompt)? {
                Some(value) if is_cancel(&value) => {
                    writeln!(self.out, "Editing cancelled.")?;
                    return Ok(());
                }
                None => {
                    writeln!(self.out, "Editing cancelled.")?;
                    return Ok(());
                }
                Some(value) if value.is_empty() => {}
                Some(value) => patch.set(field, value),
            }
        }

        if patch.is_empty() {
            writeln!(self.out, "Nothing changed.")?;
            return Ok(());
        }

        match self.store.update_record(id, &patch) {
            Ok(UpdateOutcome::Updated(_)) => writeln!(self.out, "Record #{} updated.", id),
            Ok(UpdateOutcome::NoMatch) => writeln!(self.out, "There is no record with that number in the directory."),
            Err(e) => writeln!(self.out, "{}", e),
        }
    }

    fn search(&mut self) -> io::Result<()> {
        let Some(query) = self.prompt_query()? else {
            return Ok(());
        };

        match self.store.find_records(&query) {
            Ok(found) if found.is_empty() => writeln!(self.out, "No records match these values."),
            Ok(found) => self.pager.show(&found, &mut self.input, &mut self.out),
            Err(e) => writeln!(self.out, "{}", e),
        }
    }

    /// Collects field values until the user runs the search. `None` means the
    /// search was cancelled.
    fn prompt_query(&mut self) -> io::Result<Option<Query>> {
        let mut query = Query::new();
        loop {
            if query.is_empty() {
                writeln!(self.out, "{}", SEARCH_MENU)?;
            } else {
                writeln!(self.out, "{}\n{}", SEARCH_MENU, RUN_SEARCH_OPTION)?;
            }
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };

            match line.trim().parse::<usize>() {
                Ok(0) => return Ok(None),
                Ok(7) if !query.is_empty() => return Ok(Some(query)),
                Ok(choice @ 1..=6) => {
                    let field = Field::ALL[choice - 1];
                    let prompt = format!("Enter the {} to search for: ", field.label());
                    match self.prompt(&prompt)? {
                        Some(value) if !value.is_empty() => query.set(field, value),
                        Some(_) => {}
                        None => return Ok(None),
                    }
                }
                Ok(_) => {}
                Err(_) => writeln!(self.out, "Invalid input.")?,
            }
        }
    }

    fn prompt_id(&mut self) -> io::Result<Option<RecordId>> {
        let Some(line) = self.prompt("Enter the # of the record to edit: ")? else {
            return Ok(None);
        };
        Ok(parse_id(&line))
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.out, "{}", text)?;
        self.out.flush()?;
        self.read_line()
    }

    /// One line without its terminator, or `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);

        Ok(Some(line))
    }
}

fn is_cancel(value: &str) -> bool {
    value.eq_ignore_ascii_case("q")
}

/// Record numbers are plain digits and start at one.
fn parse_id(line: &str) -> Option<RecordId> {
    let line = line.trim();
    if line.is_empty() || !line.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    line.parse::<RecordId>().ok().filter(|id| *id > 0)
}
