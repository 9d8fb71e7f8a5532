use std::io::{self, BufRead, Write};

use recordstore::{Field, Record};
use unicode_width::UnicodeWidthStr;

const TITLE: &str = "Phone directory";
const ID_HEADER: &str = "#";

/// Bordered table with a rule between every row. Widths are fitted once to
/// the whole result so every page of it lines up.
pub struct Table {
    widths: Vec<usize>,
}

impl Table {
    pub fn fitted_to(records: &[Record]) -> Self {
        let mut widths: Vec<usize> = headers().iter().map(|header| header.width()).collect();
        for record in records {
            for (width, cell) in widths.iter_mut().zip(cells(record)) {
                *width = (*width).max(cell.width());
            }
        }

        Self { widths }
    }

    pub fn render(&self, records: &[Record]) -> String {
        let rule = self.rule();
        let inner = rule.len() - 2;
        let title_width = TITLE.width();
        let left = inner.saturating_sub(title_width) / 2;
        let right = inner.saturating_sub(title_width + left);

        let mut out = String::new();
        out.push_str(&format!("+{}+\n", "-".repeat(inner)));
        out.push_str(&format!("|{}{}{}|\n", " ".repeat(left), TITLE, " ".repeat(right)));
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&self.line(&headers()));
        out.push('\n');
        out.push_str(&rule);
        for record in records {
            out.push('\n');
            out.push_str(&self.line(&cells(record)));
            out.push('\n');
            out.push_str(&rule);
        }

        out
    }

    fn rule(&self) -> String {
        let segments: Vec<String> = self.widths.iter().map(|width| "-".repeat(width + 2)).collect();
        format!("+{}+", segments.join("+"))
    }

    fn line<S: AsRef<str>>(&self, cells: &[S]) -> String {
        let padded: Vec<String> = self
            .widths
            .iter()
            .zip(cells)
            .map(|(width, cell)| {
                let cell: &str = cell.as_ref();
                format!(" {}{} ", cell, " ".repeat(width - cell.width()))
            })
            .collect();
        format!("|{}|", padded.join("|"))
    }
}

fn headers() -> Vec<&'static str> {
    let mut headers = vec![ID_HEADER];
    headers.extend(Field::ALL.iter().map(|field| field.label()));
    headers
}

fn cells(record: &Record) -> Vec<String> {
    let mut cells = vec![record.id.to_string()];
    cells.extend(Field::ALL.iter().map(|field| record.get(*field).to_string()));
    cells
}

/// Prints records in fixed-size pages. In interactive mode it waits after
/// every page but the last: Enter shows the next one, `q` stops.
pub struct Pager {
    page_size: usize,
    interactive: bool,
}

impl Pager {
    pub fn new(page_size: usize, interactive: bool) -> Self {
        Self {
            page_size: page_size.max(1),
            interactive,
        }
    }

    pub fn show<R: BufRead, W: Write>(&self, records: &[Record], input: &mut R, out: &mut W) -> io::Result<()> {
        let table = Table::fitted_to(records);
        let last_page = records.len().div_ceil(self.page_size);

        for (index, page) in records.chunks(self.page_size).enumerate() {
            writeln!(out, "{}", table.render(page))?;
            writeln!(out, "\nPage {}/{}\n", index + 1, last_page)?;

            if !self.interactive || index + 1 == last_page {
                continue;
            }

            write!(out, "Press Enter to show the next page, or type 'q' to stop: ")?;
            out.flush()?;
            let mut decision = String::new();
            if input.read_line(&mut decision)? == 0 || decision.trim().eq_ignore_ascii_case("q") {
                break;
            }
        }

        Ok(())
    }
}
