use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::domain::DeckRecord;
use crate::errors::storage_context;

/// Append-only newline-delimited JSON file of deck records
pub struct CorpusWriter {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl CorpusWriter {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| storage_context("open", &path))?;

        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    /// Write one record as a single line and flush it to disk right away
    pub fn append(&mut self, record: &DeckRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record).context("Failed to serialize deck record")?;
        self.writer.write_all(b"\n")?;
        self.writer
            .flush()
            .with_context(|| storage_context("append to", &self.path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
