// src/logging.rs
//
// Telemetry sinks for recsim.
// - StepSink: trait driven by the harness, one call per completed step
// - NoopSink: discards all records
// - JsonlSink: writes one JSON object per step for offline analysis

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::types::Interaction;

/// Abstract sink for per-step telemetry.
pub trait StepSink {
    fn log_step(&mut self, interaction: &Interaction, reward_total: f64);
}

/// Sink that discards all records.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl StepSink for NoopSink {
    fn log_step(&mut self, _interaction: &Interaction, _reward_total: f64) {
        // intentionally no-op
    }
}

/// JSONL file sink. Each step is one JSON object on its own line.
pub struct JsonlSink {
    writer: BufWriter<File>,
}

impl JsonlSink {
    /// Create a new sink writing to `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

#[derive(serde::Serialize)]
struct StepLine<'a> {
    #[serde(flatten)]
    interaction: &'a Interaction,
    reward_total: f64,
}

impl StepSink for JsonlSink {
    fn log_step(&mut self, interaction: &Interaction, reward_total: f64) {
        let line = StepLine {
            interaction,
            reward_total,
        };
        // If logging fails we don't want to crash the simulation,
        // so we deliberately ignore I/O errors.
        if let Ok(json) = serde_json::to_string(&line) {
            let _ = self.writer.write_all(json.as_bytes());
            let _ = self.writer.write_all(b"\n");
            let _ = self.writer.flush();
        }
    }
}
