//! Plain-text export of a record store.
//!
//! One header line, then one line per record in store order. Every value is
//! wrapped in double quotes with embedded quotes doubled; missing fields are
//! written as `""`.

use std::io::{self, Write};

use crate::record::{FieldId, Record};
use crate::store::RecordStore;

pub const HEADER: &str = "UUID,Group,Title,User,Password,Notes";

const COLUMNS: [FieldId; 6] = [
    FieldId::Uuid,
    FieldId::Group,
    FieldId::Title,
    FieldId::User,
    FieldId::Password,
    FieldId::Notes,
];

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Formats one record as an export line, without the line terminator.
pub fn format_line(record: &Record) -> String {
    COLUMNS
        .iter()
        .map(|field| {
            let value = record.get_or(*field, "");
            if *field == FieldId::Notes {
                quote(value.trim_end())
            } else {
                quote(value)
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Writes every record in `store` to `out`. Returns the number of records
/// written.
pub fn write_plaintext<W: Write>(store: &RecordStore, mut out: W) -> io::Result<usize> {
    writeln!(out, "{}", HEADER)?;
    let mut count = 0;
    for record in store.iter() {
        writeln!(out, "{}", format_line(record))?;
        count += 1;
    }
    out.flush()?;
    Ok(count)
}
