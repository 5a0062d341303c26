//! Roster input: the CSV of people to enrich.
//!
//! Required header columns are `FirstName`, `LastName`, `Title`,
//! `Organization`, in any position; extra columns are ignored. A roster
//! missing any required column is a fatal input error: the batch never
//! starts and no output is produced.

use std::path::Path;

use prospect_core::PersonQuery;
use thiserror::Error;

pub const REQUIRED_COLUMNS: [&str; 4] = ["FirstName", "LastName", "Title", "Organization"];

#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("failed to read roster: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse roster: {0}")]
    Csv(#[from] csv::Error),
    #[error("roster is missing required column(s): {0}")]
    MissingColumns(String),
}

/// Read all lookup subjects from a roster file, preserving row order.
pub fn read_roster(path: &Path) -> Result<Vec<PersonQuery>, EnrichError> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    let indices = column_indices(&headers)?;

    let mut queries = Vec::new();
    for record in reader.records() {
        let record = record?;
        queries.push(PersonQuery {
            first_name: field(&record, indices[0]),
            last_name: field(&record, indices[1]),
            title: field(&record, indices[2]),
            organization: field(&record, indices[3]),
        });
    }

    Ok(queries)
}

fn column_indices(headers: &csv::StringRecord) -> Result<[usize; 4], EnrichError> {
    let mut indices = [0usize; 4];
    let mut missing = Vec::new();

    for (slot, name) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
        match headers.iter().position(|h| h == name) {
            Some(index) => *slot = index,
            None => missing.push(name),
        }
    }

    if missing.is_empty() {
        Ok(indices)
    } else {
        Err(EnrichError::MissingColumns(missing.join(", ")))
    }
}

fn field(record: &csv::StringRecord, index: usize) -> String {
    record.get(index).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn roster_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file should be created");
        file.write_all(content.as_bytes())
            .expect("roster content should be written");
        file
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn rows_are_read_in_order() {
        let file = roster_file(
            "FirstName,LastName,Title,Organization\n\
             Jane,Doe,Professor,Acme University\n\
             John,Smith,Dean,Other College\n",
        );

        let queries = read_roster(file.path()).expect("roster should parse");

        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0].first_name, "Jane");
        assert_eq!(queries[0].organization, "Acme University");
        assert_eq!(queries[1].first_name, "John");
        assert_eq!(queries[1].title, "Dean");
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn extra_columns_are_ignored_and_order_is_free() {
        let file = roster_file(
            "Notes,Organization,Title,LastName,FirstName\n\
             irrelevant,Acme University,Professor,Doe,Jane\n",
        );

        let queries = read_roster(file.path()).expect("roster should parse");

        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].first_name, "Jane");
        assert_eq!(queries[0].last_name, "Doe");
        assert_eq!(queries[0].title, "Professor");
        assert_eq!(queries[0].organization, "Acme University");
    }

    #[test]
    fn missing_columns_are_named_in_the_error() {
        let file = roster_file("FirstName,Title\nJane,Professor\n");

        let result = read_roster(file.path());

        match result {
            Err(EnrichError::MissingColumns(missing)) => {
                assert_eq!(missing, "LastName, Organization");
            }
            other => panic!("expected missing-columns error, got {other:?}"),
        }
    }

    #[test]
    fn unreadable_file_is_an_io_error() {
        let result = read_roster(Path::new("/nonexistent/roster.csv"));
        assert!(matches!(result, Err(EnrichError::Csv(_) | EnrichError::Io(_))));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn empty_roster_yields_no_queries() {
        let file = roster_file("FirstName,LastName,Title,Organization\n");
        let queries = read_roster(file.path()).expect("roster should parse");
        assert!(queries.is_empty());
    }
}
