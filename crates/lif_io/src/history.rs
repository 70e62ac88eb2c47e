use crate::error::Result;
use lif_core::LineageRegistry;
use lif_data::{LineageId, LiveEvent, PopulationStats};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Lineages listed in every snapshot.
const SNAPSHOT_TOP_LINEAGES: usize = 5;

/// Appends run history to `<log_dir>/live.jsonl`.
pub struct HistoryLogger {
    live_file: Option<BufWriter<File>>,
    log_dir: PathBuf,
}

impl HistoryLogger {
    pub fn new_at<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.exists() {
            std::fs::create_dir_all(dir)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("live.jsonl"))?;
        Ok(Self {
            live_file: Some(BufWriter::new(file)),
            log_dir: dir.to_path_buf(),
        })
    }

    /// A logger that writes nothing.
    pub fn new_dummy() -> Self {
        Self {
            live_file: None,
            log_dir: PathBuf::new(),
        }
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn log_event(&mut self, event: &LiveEvent) -> Result<()> {
        if let Some(ref mut file) = self.live_file {
            let json = serde_json::to_string(event)?;
            writeln!(file, "{}", json)?;
            file.flush()?;
        }
        Ok(())
    }

    pub fn log_snapshot(&mut self, stats: &PopulationStats, fingerprint: &str) -> Result<()> {
        self.log_event(&LiveEvent::Snapshot {
            generation: stats.generation,
            stats: stats.record(),
            events: stats.events,
            top_lineages: stats.top_lineages(SNAPSHOT_TOP_LINEAGES),
            fingerprint: fingerprint.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        })
    }

    /// Records every lineage that went extinct in `generation`.
    pub fn log_extinctions(
        &mut self,
        generation: u64,
        extinct: &[LineageId],
        registry: &LineageRegistry,
    ) -> Result<()> {
        for &lineage in extinct {
            let peak_population = registry
                .get(lineage)
                .map(|r| r.peak_population)
                .unwrap_or(0);
            self.log_event(&LiveEvent::Extinction {
                lineage,
                generation,
                peak_population,
                timestamp: chrono::Utc::now().to_rfc3339(),
            })?;
        }
        Ok(())
    }

    /// Reads back every event logged so far; unparsable lines are skipped.
    pub fn read_events(&self) -> Result<Vec<LiveEvent>> {
        if self.live_file.is_none() {
            return Ok(vec![]);
        }
        let file = match File::open(self.log_dir.join("live.jsonl")) {
            Ok(f) => f,
            Err(_) => return Ok(vec![]),
        };
        let reader = BufReader::new(file);
        let mut events = Vec::new();
        for line in reader.lines().map_while(std::result::Result::ok) {
            if let Ok(event) = serde_json::from_str::<LiveEvent>(&line) {
                events.push(event);
            }
        }
        Ok(events)
    }
}
