use std::collections::{BTreeMap, HashMap};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use surveysynth_core::schema::TableSchema;
use surveysynth_core::table::ResponseTable;
use surveysynth_form::matcher::bind_columns;
use surveysynth_form::model::FormQuestion;

use crate::errors::GenerationError;
use crate::generators::{RowContext, ValueSource, draw};
use crate::model::{GenerateOptions, SynthesisReport};

/// Result of a synthesis run.
#[derive(Debug, Clone)]
pub struct SynthesisResult {
    pub table: ResponseTable,
    pub report: SynthesisReport,
}

/// Entry point for enlarging a table with synthetic rows.
#[derive(Debug, Clone)]
pub struct SynthesisEngine {
    options: GenerateOptions,
}

impl SynthesisEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    /// Full pipeline over a raw ingested table.
    ///
    /// Drops timestamp-like columns, canonicalizes identifiers, infers the
    /// schema, binds questions, and synthesizes `rows` additional rows.
    pub fn enrich(
        &self,
        raw: ResponseTable,
        questions: &[FormQuestion],
        rows: i64,
    ) -> Result<SynthesisResult, GenerationError> {
        let mut table = raw.without_timestamp_columns();
        table.canonicalize_columns();

        let schema = TableSchema::infer(&table);
        let columns: Vec<String> = table.column_names().map(str::to_string).collect();
        let bindings = bind_columns(&columns, questions);

        self.synthesize(&table, &schema, &bindings, rows)
    }

    /// Generate `rows` synthetic rows and merge them with `table`.
    ///
    /// Rejects a negative `rows` before any generation; zero is valid and
    /// yields the schema-filtered original. The output keeps the original
    /// rows first, restricts the column set to schema columns, and drops
    /// columns that end up blank throughout.
    pub fn synthesize(
        &self,
        table: &ResponseTable,
        schema: &TableSchema,
        bindings: &BTreeMap<String, FormQuestion>,
        rows: i64,
    ) -> Result<SynthesisResult, GenerationError> {
        if rows < 0 {
            return Err(GenerationError::InvalidRowCount(rows));
        }
        let rows = rows as u64;

        let run_id = uuid::Uuid::new_v4().to_string();
        let mut report = SynthesisReport::new(run_id.clone());
        report.rows_requested = rows;

        let mut rng = match self.options.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        };

        // One rule-table evaluation per column; every row dispatches on the
        // resolved source.
        let sources: Vec<(String, ValueSource)> = table
            .column_names()
            .map(|name| {
                let source = ValueSource::resolve(bindings.get(name), schema.domain(name));
                (name.to_string(), source)
            })
            .collect();

        info!(
            run_id = %run_id,
            rows,
            columns = sources.len(),
            bound = bindings.len(),
            seed = ?self.options.seed,
            "synthesis started"
        );

        let mut enriched = table.clone();
        enriched.retain_columns(|name| schema.contains(name));

        for _ in 0..rows {
            let mut ctx = RowContext::default();
            let mut row: HashMap<String, String> = HashMap::new();
            for (name, source) in &sources {
                let value = draw(source, name, &mut ctx, &mut rng)?;
                report.record_source_usage(source.id());
                if source.is_fallback() {
                    report.record_fallback();
                }
                row.insert(name.clone(), value);
            }
            enriched.push_row(&row);
            report.rows_generated += 1;
        }

        let dropped = enriched.drop_blank_columns();
        if !dropped.is_empty() {
            warn!(
                run_id = %run_id,
                dropped = dropped.len(),
                "blank columns dropped from output"
            );
        }
        report.columns_dropped = dropped;

        info!(
            run_id = %run_id,
            rows_generated = report.rows_generated,
            columns = enriched.column_count(),
            "synthesis completed"
        );

        Ok(SynthesisResult {
            table: enriched,
            report,
        })
    }
}
