//! Conditional synthetic-row generation engine for Surveysynth.
//!
//! Consumes the canonical table, its inferred schema, and the question
//! bindings to produce plausible additional survey rows merged into an
//! enlarged table.

pub mod engine;
pub mod errors;
pub mod generators;
pub mod model;

pub use engine::{SynthesisEngine, SynthesisResult};
pub use errors::GenerationError;
pub use generators::{RowContext, ValueSource};
pub use model::{GenerateOptions, SynthesisReport};
