//! Question metadata and column binding for Surveysynth.
//!
//! This crate models the externally supplied form-question records and
//! binds canonical column identifiers to them once per table: fuzzy text
//! matching first, then a typed classification the generation engine can
//! dispatch on without re-scanning question text per row.

pub mod classify;
pub mod matcher;
pub mod model;

pub use classify::{AnswerKind, FreeTextTheme, QuestionRole, classify, role_of};
pub use matcher::{MATCH_THRESHOLD, bind_columns, similarity_ratio};
pub use model::{FREE_TEXT_SENTINEL, FormQuestion};
