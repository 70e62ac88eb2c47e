use crate::error::Result;
use lif_data::{PopulationStats, StatsRecord};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Per-generation statistics as CSV, one row per generation.
///
/// The header is written before the first row. Absent values become empty
/// fields; floats use their shortest round-tripping form.
pub struct StatsWriter<W: Write> {
    writer: W,
    header_written: bool,
    rows: u64,
}

impl StatsWriter<BufWriter<File>> {
    /// Creates (or truncates) the CSV file at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> StatsWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            header_written: false,
            rows: 0,
        }
    }

    pub fn write_record(&mut self, record: &StatsRecord) -> Result<()> {
        if !self.header_written {
            writeln!(self.writer, "{}", StatsRecord::FIELDS.join(","))?;
            self.header_written = true;
        }
        writeln!(self.writer, "{}", record.values().join(","))?;
        self.rows += 1;
        Ok(())
    }

    pub fn write_stats(&mut self, stats: &PopulationStats) -> Result<()> {
        self.write_record(&stats.record())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Data rows written so far.
    pub fn rows(&self) -> u64 {
        self.rows
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
