use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::{Terminator, WriterBuilder};

use crate::record::{ItemRecord, HEADER};

pub const DEFAULT_OUTPUT: &str = "plants_data2.csv";

/// Append-only CSV output. Every append reopens the file, so rows written
/// before a crash are never lost.
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    /// Create or truncate `path` and write the header row.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut writer = writer_builder()
            .from_path(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        writer
            .write_record(HEADER)
            .context("Failed to write CSV header")?;
        writer.flush().context("Failed to flush CSV header")?;
        Ok(Self { path })
    }

    pub fn append(&self, record: &ItemRecord) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open {} for append", self.path.display()))?;
        let mut writer = writer_builder().has_headers(false).from_writer(file);
        writer
            .serialize(record)
            .context("Failed to write CSV record")?;
        writer.flush().context("Failed to flush CSV record")?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn writer_builder() -> WriterBuilder {
    let mut builder = WriterBuilder::new();
    builder.terminator(Terminator::CRLF);
    builder
}
