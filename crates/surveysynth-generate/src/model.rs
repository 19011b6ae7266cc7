use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Options for the synthesis engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Seed for the engine RNG; `None` seeds from the operating system.
    pub seed: Option<u64>,
}

/// Report for a synthesis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisReport {
    pub run_id: String,
    pub rows_requested: u64,
    pub rows_generated: u64,
    /// Draw counts per value source.
    pub source_usage: BTreeMap<String, u64>,
    /// Draws that fell through to the no-information placeholder branch.
    pub fallback_count: u64,
    /// Columns removed from the output for being blank throughout.
    pub columns_dropped: Vec<String>,
}

impl SynthesisReport {
    pub fn new(run_id: String) -> Self {
        Self {
            run_id,
            rows_requested: 0,
            rows_generated: 0,
            source_usage: BTreeMap::new(),
            fallback_count: 0,
            columns_dropped: Vec::new(),
        }
    }

    pub fn record_source_usage(&mut self, id: &str) {
        *self.source_usage.entry(id.to_string()).or_insert(0) += 1;
    }

    pub fn record_fallback(&mut self) {
        self.fallback_count += 1;
    }
}
