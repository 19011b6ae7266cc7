use serde::{Deserialize, Serialize};

/// Vocabulary marker for open-ended (free text / numeric) questions.
pub const FREE_TEXT_SENTINEL: &str = "(نص حر / رقم)";

/// One question extracted from the survey form definition.
///
/// Produced by the external form-metadata collaborator (typically as JSON);
/// read-only to this workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormQuestion {
    /// Question text as shown on the form.
    pub question: String,
    /// Answer vocabulary; a single sentinel entry marks free text.
    pub answers: Vec<String>,
    /// Form entry identifiers for the question's input fields.
    #[serde(default)]
    pub entries: Vec<String>,
}

impl FormQuestion {
    /// True when the vocabulary is exactly the free-text sentinel.
    pub fn is_free_text(&self) -> bool {
        matches!(self.answers.as_slice(), [only] if only == FREE_TEXT_SENTINEL)
    }
}
