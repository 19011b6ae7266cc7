use std::collections::HashSet;

use crate::model::FormQuestion;

/// Question-text keyword marking the child-age question.
pub const AGE_KEYWORD: &str = "عمر الطفل";
/// Question-text keyword marking the study-stage question.
pub const STAGE_KEYWORD: &str = "المرحلة الدراسية";
/// Question-text keyword marking the sibling-count question.
pub const SIBLINGS_KEYWORD: &str = "عدد الأشقاء";

/// Behavioral/psychological keywords that bias yes/no answers toward "no".
pub const NEGATIVE_KEYWORDS: &[&str] = &[
    "مزاج",
    "يشتكي",
    "صعوبة",
    "خجل",
    "انسحاب",
    "قلق",
    "آلام",
    "متوتر",
    "مكتئب",
];

/// Domain-language yes/no vocabulary.
pub const YES: &str = "نعم";
pub const NO: &str = "لا";

/// Extremes of the ordered frequency scale.
pub const NEVER: &str = "ابدا";
pub const ALWAYS: &str = "دائما";

const NAME_KEYWORD: &str = "اسم";
const LEVEL_KEYWORDS: &[&str] = &["المستوى", "المرحلة"];

/// Cross-field conditioning role derived from the question text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionRole {
    ChildAge,
    StudyStage,
    SiblingCount,
}

/// Themed pool for free-text questions, picked by question-text keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreeTextTheme {
    PersonName,
    SchoolStage,
    Generic,
}

/// Typed answer-vocabulary classification, computed once at bind time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerKind {
    FreeText(FreeTextTheme),
    YesNo { negative: bool },
    FrequencyScale,
    Choice,
}

/// Detect the conditioning role of a question, if any.
pub fn role_of(question: &FormQuestion) -> Option<QuestionRole> {
    let text = question.question.as_str();
    if text.contains(AGE_KEYWORD) {
        return Some(QuestionRole::ChildAge);
    }
    if text.contains(STAGE_KEYWORD) {
        return Some(QuestionRole::StudyStage);
    }
    if text.contains(SIBLINGS_KEYWORD) {
        return Some(QuestionRole::SiblingCount);
    }
    None
}

/// Classify a question's answer vocabulary.
pub fn classify(question: &FormQuestion) -> AnswerKind {
    if question.is_free_text() {
        return AnswerKind::FreeText(free_text_theme(&question.question));
    }

    if is_yes_no(&question.answers) {
        let negative = NEGATIVE_KEYWORDS
            .iter()
            .any(|keyword| question.question.contains(keyword));
        return AnswerKind::YesNo { negative };
    }

    let has_never = question.answers.iter().any(|answer| answer == NEVER);
    let has_always = question.answers.iter().any(|answer| answer == ALWAYS);
    if has_never && has_always {
        return AnswerKind::FrequencyScale;
    }

    AnswerKind::Choice
}

fn free_text_theme(text: &str) -> FreeTextTheme {
    if text.contains(NAME_KEYWORD) {
        return FreeTextTheme::PersonName;
    }
    if LEVEL_KEYWORDS.iter().any(|keyword| text.contains(keyword)) {
        return FreeTextTheme::SchoolStage;
    }
    FreeTextTheme::Generic
}

fn is_yes_no(answers: &[String]) -> bool {
    let distinct: HashSet<&str> = answers.iter().map(String::as_str).collect();
    distinct.len() == 2 && distinct.contains(YES) && distinct.contains(NO)
}
