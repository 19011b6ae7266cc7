use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::seq::IndexedRandom;

use surveysynth_core::schema::ColumnDomain;
use surveysynth_form::classify::{self, AnswerKind, FreeTextTheme, QuestionRole};
use surveysynth_form::model::FormQuestion;

use crate::errors::GenerationError;

const AGE_MIN: i64 = 3;
const AGE_MAX: i64 = 5;
/// Age that maps to the advanced stage label; 3 and 4 are preparatory.
const ADVANCED_AGE: i64 = 5;

const ADVANCED_STAGE: &str = "التحصيري";
const PREPARATORY_STAGE: &str = "التمهيدي";

const PERSON_NAMES: &[&str] = &[
    "أحمد", "محمد", "سارة", "ليلى", "يوسف", "مريم", "خديجة", "فاطمة",
];
const STAGE_LABELS: &[&str] = &["تمهيدي", "التحصيري"];
const PLACEHOLDERS: &[&str] = &["غير محدد", "—"];

// Hand-tuned sibling-count distributions per recorded age. The weights are
// survey-population calibration carried over verbatim; do not re-derive.
const SIBLINGS_AGE_3: (&[i64], &[f64]) = (&[0, 1, 2, 3], &[40.0, 35.0, 20.0, 5.0]);
const SIBLINGS_AGE_4: (&[i64], &[f64]) = (&[0, 1, 2, 3, 4], &[20.0, 35.0, 30.0, 10.0, 5.0]);
const SIBLINGS_AGE_5: (&[i64], &[f64]) = (&[0, 1, 2, 3, 4, 5], &[10.0, 20.0, 35.0, 25.0, 7.0, 3.0]);
const SIBLINGS_DEFAULT: i64 = 1;

const YES_NO_BIAS: f64 = 0.7;

// Frequency-scale weights: front-loaded "never" end, tail-loaded "always"
// end, every middle option at the shared middle weight. Un-normalized like
// the calibration source; the sampler normalizes.
const FREQUENCY_NEVER_WEIGHT: f64 = 0.6;
const FREQUENCY_MIDDLE_WEIGHT: f64 = 0.3;
const FREQUENCY_ALWAYS_WEIGHT: f64 = 0.1;

/// Per-row generation state for cross-field conditioning.
///
/// Owned by a single row's generation pass and discarded afterwards; never
/// shared across rows.
#[derive(Debug, Default)]
pub struct RowContext {
    /// Child age recorded by the age column, consumed by the stage and
    /// sibling-count columns later in the same row.
    pub child_age: Option<i64>,
}

/// Resolved generation strategy for one output column.
///
/// The ordered rule table in [`ValueSource::resolve`] runs once per column
/// per run; every row then dispatches on the resulting variant without
/// re-scanning question text.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueSource {
    /// Uniform age draw, recorded into the row context.
    ChildAge,
    /// Age-conditional stage label, with the question's own vocabulary as
    /// the no-age fallback.
    StudyStage { fallback: Vec<String> },
    /// Age-conditional sibling-count distribution.
    SiblingCount,
    /// Themed free-text pool.
    FreeText(FreeTextTheme),
    /// 70/30 weighted yes/no draw, direction set by sentiment keywords.
    YesNo { negative: bool },
    /// Front-loaded draw over an ordered frequency vocabulary.
    FrequencyScale { answers: Vec<String> },
    /// Uniform draw over the bound vocabulary.
    Choice { answers: Vec<String> },
    /// Uniform draw within observed numeric bounds.
    NumericRange { min: f64, max: f64 },
    /// Uniform draw over observed categorical values.
    Observed { values: Vec<String> },
    /// Placeholder draw for columns with no schema and no binding.
    Unconstrained,
}

impl ValueSource {
    /// Evaluate the ordered rule table for one column.
    ///
    /// Conditioning roles are checked before vocabulary kinds: the age
    /// question is itself free-text on the form, and must win over the
    /// sentinel branch for the age/stage/sibling coupling to hold.
    pub fn resolve(binding: Option<&FormQuestion>, domain: Option<&ColumnDomain>) -> Self {
        if let Some(question) = binding {
            if let Some(role) = classify::role_of(question) {
                return match role {
                    QuestionRole::ChildAge => ValueSource::ChildAge,
                    QuestionRole::StudyStage => ValueSource::StudyStage {
                        fallback: stage_fallback(question),
                    },
                    QuestionRole::SiblingCount => ValueSource::SiblingCount,
                };
            }
            return match classify::classify(question) {
                AnswerKind::FreeText(theme) => ValueSource::FreeText(theme),
                AnswerKind::YesNo { negative } => ValueSource::YesNo { negative },
                AnswerKind::FrequencyScale => ValueSource::FrequencyScale {
                    answers: question.answers.clone(),
                },
                AnswerKind::Choice => ValueSource::Choice {
                    answers: question.answers.clone(),
                },
            };
        }

        match domain {
            Some(ColumnDomain::Numeric { min, max }) => ValueSource::NumericRange {
                min: *min,
                max: *max,
            },
            Some(ColumnDomain::Categorical { values }) => ValueSource::Observed {
                values: values.clone(),
            },
            None => ValueSource::Unconstrained,
        }
    }

    /// Stable identifier for report counters.
    pub fn id(&self) -> &'static str {
        match self {
            ValueSource::ChildAge => "role.child_age",
            ValueSource::StudyStage { .. } => "role.study_stage",
            ValueSource::SiblingCount => "role.sibling_count",
            ValueSource::FreeText(FreeTextTheme::PersonName) => "free_text.person_name",
            ValueSource::FreeText(FreeTextTheme::SchoolStage) => "free_text.school_stage",
            ValueSource::FreeText(FreeTextTheme::Generic) => "free_text.generic",
            ValueSource::YesNo { .. } => "vocab.yes_no",
            ValueSource::FrequencyScale { .. } => "vocab.frequency_scale",
            ValueSource::Choice { .. } => "vocab.choice",
            ValueSource::NumericRange { .. } => "domain.numeric",
            ValueSource::Observed { .. } => "domain.categorical",
            ValueSource::Unconstrained => "fallback.placeholder",
        }
    }

    /// True when this source is the no-information fallback.
    pub fn is_fallback(&self) -> bool {
        matches!(self, ValueSource::Unconstrained)
    }
}

/// Produce one value for a column, updating the row context.
///
/// Total over every source: absence of data falls through to a default, so
/// generation never fails once the domain preconditions hold.
pub fn draw(
    source: &ValueSource,
    column: &str,
    ctx: &mut RowContext,
    rng: &mut impl Rng,
) -> Result<String, GenerationError> {
    match source {
        ValueSource::ChildAge => {
            let age = rng.random_range(AGE_MIN..=AGE_MAX);
            ctx.child_age = Some(age);
            Ok(age.to_string())
        }
        ValueSource::StudyStage { fallback } => match ctx.child_age {
            Some(age) if age == ADVANCED_AGE => Ok(ADVANCED_STAGE.to_string()),
            Some(_) => Ok(PREPARATORY_STAGE.to_string()),
            None => choose(fallback, column, rng),
        },
        ValueSource::SiblingCount => {
            let (support, weights) = match ctx.child_age {
                Some(3) => SIBLINGS_AGE_3,
                Some(4) => SIBLINGS_AGE_4,
                Some(5) => SIBLINGS_AGE_5,
                _ => return Ok(SIBLINGS_DEFAULT.to_string()),
            };
            let index = weighted_index(weights, rng)?;
            Ok(support[index].to_string())
        }
        ValueSource::FreeText(theme) => {
            let pool = match theme {
                FreeTextTheme::PersonName => PERSON_NAMES,
                FreeTextTheme::SchoolStage => STAGE_LABELS,
                FreeTextTheme::Generic => PLACEHOLDERS,
            };
            let value = pool
                .choose(rng)
                .ok_or_else(|| GenerationError::EmptyDomain(column.to_string()))?;
            Ok((*value).to_string())
        }
        ValueSource::YesNo { negative } => {
            let (favored, other) = if *negative {
                (classify::NO, classify::YES)
            } else {
                (classify::YES, classify::NO)
            };
            let value = if rng.random_bool(YES_NO_BIAS) {
                favored
            } else {
                other
            };
            Ok(value.to_string())
        }
        ValueSource::FrequencyScale { answers } => {
            let weights = frequency_weights(answers.len());
            let index = weighted_index(&weights, rng)?;
            answers
                .get(index)
                .cloned()
                .ok_or_else(|| GenerationError::EmptyDomain(column.to_string()))
        }
        ValueSource::Choice { answers } => choose(answers, column, rng),
        ValueSource::NumericRange { min, max } => Ok(draw_numeric(*min, *max, rng)),
        ValueSource::Observed { values } => choose(values, column, rng),
        ValueSource::Unconstrained => {
            let index = rng.random_range(0..=PLACEHOLDERS.len());
            if index < PLACEHOLDERS.len() {
                Ok(PLACEHOLDERS[index].to_string())
            } else {
                Ok(rng.random_range(1..=5).to_string())
            }
        }
    }
}

fn stage_fallback(question: &FormQuestion) -> Vec<String> {
    if question.is_free_text() {
        STAGE_LABELS.iter().map(|label| label.to_string()).collect()
    } else {
        question.answers.clone()
    }
}

fn choose(
    values: &[String],
    column: &str,
    rng: &mut impl Rng,
) -> Result<String, GenerationError> {
    values
        .choose(rng)
        .cloned()
        .ok_or_else(|| GenerationError::EmptyDomain(column.to_string()))
}

fn weighted_index(weights: &[f64], rng: &mut impl Rng) -> Result<usize, GenerationError> {
    let dist = WeightedIndex::new(weights)
        .map_err(|err| GenerationError::InvalidWeights(err.to_string()))?;
    Ok(dist.sample(rng))
}

fn frequency_weights(len: usize) -> Vec<f64> {
    let mut weights = Vec::with_capacity(len.max(2));
    weights.push(FREQUENCY_NEVER_WEIGHT);
    for _ in 0..len.saturating_sub(2) {
        weights.push(FREQUENCY_MIDDLE_WEIGHT);
    }
    weights.push(FREQUENCY_ALWAYS_WEIGHT);
    weights.truncate(len);
    weights
}

fn draw_numeric(min: f64, max: f64, rng: &mut impl Rng) -> String {
    if min.fract() == 0.0 && max.fract() == 0.0 {
        rng.random_range(min as i64..=max as i64).to_string()
    } else {
        let value = rng.random_range(min..=max);
        ((value * 100.0).round() / 100.0).to_string()
    }
}
