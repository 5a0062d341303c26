//! Batch enrichment driver: one resolver call per roster row, strictly
//! sequential, results published wholesale at the end.

use std::path::{Path, PathBuf};
use std::time::Duration;

use prospect_core::{ContactRecord, ContactResolver, PersonQuery, SearchProvider};
use serde::Serialize;
use tokio::time::sleep;
use tracing::info;

use crate::progress::{ProgressSink, percent};
use crate::roster::{EnrichError, read_roster};

const OUTPUT_COLUMNS: [&str; 8] = [
    "FirstName",
    "LastName",
    "Title",
    "Organization",
    "Email",
    "Phone Number",
    "Is Edu Email",
    "Source Link",
];

/// One output row: the four input fields verbatim plus the resolved
/// contact data. Serialized by `serde` in struct field order, so the CSV
/// header always matches [`OUTPUT_COLUMNS`].
#[derive(Debug, Serialize)]
struct OutputRow {
    #[serde(rename = "FirstName")]
    first_name: String,
    #[serde(rename = "LastName")]
    last_name: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Organization")]
    organization: String,
    #[serde(rename = "Email")]
    email: String,
    #[serde(rename = "Phone Number")]
    phone_number: String,
    #[serde(rename = "Is Edu Email")]
    is_edu_email: bool,
    #[serde(rename = "Source Link")]
    source_link: String,
}

impl OutputRow {
    /// Absent optional fields become empty cells, except `Is Edu Email`
    /// which defaults to `false`.
    fn assemble(query: &PersonQuery, record: &ContactRecord) -> Self {
        Self {
            first_name: query.first_name.clone(),
            last_name: query.last_name.clone(),
            title: query.title.clone(),
            organization: query.organization.clone(),
            email: record.email.clone().unwrap_or_default(),
            phone_number: record.phone_number.clone().unwrap_or_default(),
            is_edu_email: record.edu_email.unwrap_or(false),
            source_link: record.source_link.clone().unwrap_or_default(),
        }
    }
}

pub struct EnrichmentDriver<P, S> {
    resolver: ContactResolver<P>,
    sink: S,
    row_delay: Duration,
}

impl<P: SearchProvider, S: ProgressSink> EnrichmentDriver<P, S> {
    pub fn new(resolver: ContactResolver<P>, sink: S) -> Self {
        Self {
            resolver,
            sink,
            row_delay: Duration::from_secs(3),
        }
    }

    /// Set the pause between rows. The pause exists purely to stay under
    /// the upstream request rate and is independent of the resolver's own
    /// rate-limit cooldown.
    #[must_use]
    pub const fn with_row_delay(mut self, row_delay: Duration) -> Self {
        self.row_delay = row_delay;
        self
    }

    /// Run the batch over `input` and write the enriched roster next to it.
    ///
    /// The resolver never fails outward, so every row produces exactly one
    /// output row and only input-format problems abort the run. Progress
    /// is reported to the sink after each row; the terminal event carries
    /// the output path.
    pub async fn run(&self, input: &Path) -> Result<PathBuf, EnrichError> {
        let queries = read_roster(input)?;
        let total = queries.len();

        info!("Enriching {} rows from {}", total, input.display());

        let mut rows = Vec::with_capacity(total);
        for (index, query) in queries.iter().enumerate() {
            let record = self.resolver.resolve(query).await;
            rows.push(OutputRow::assemble(query, &record));

            self.sink.on_progress(percent(index + 1, total));

            if index + 1 < total {
                sleep(self.row_delay).await;
            }
        }

        let output_path = derive_output_path(input);
        write_output(&output_path, &rows)?;

        info!(
            "Wrote {} enriched rows to {}",
            rows.len(),
            output_path.display()
        );
        self.sink.on_complete(&output_path);

        Ok(output_path)
    }
}

/// `<input path>_output.csv`, appended to the full input path string.
fn derive_output_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push("_output.csv");
    PathBuf::from(name)
}

fn write_output(path: &Path, rows: &[OutputRow]) -> Result<(), EnrichError> {
    let mut writer = csv::Writer::from_path(path)?;

    if rows.is_empty() {
        // serialize() emits the header from the first row; an empty batch
        // still gets one.
        writer.write_record(OUTPUT_COLUMNS)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}
