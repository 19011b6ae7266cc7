use std::env;

use surveysynth_core::table::ResponseTable;
use surveysynth_form::model::{FREE_TEXT_SENTINEL, FormQuestion};
use surveysynth_generate::{GenerateOptions, SynthesisEngine};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let rows: i64 = env::args()
        .nth(1)
        .map(|arg| arg.parse())
        .transpose()?
        .unwrap_or(5);

    let cell = |value: &str| Some(value.to_string());
    let raw = ResponseTable::from_rows(
        vec![
            "Timestamp".to_string(),
            "ما اسم الطفل؟".to_string(),
            "كم عمر الطفل بالسنوات؟".to_string(),
            "ما المرحلة الدراسية الحالية؟".to_string(),
            "هل يحب طفلك الروضة؟".to_string(),
        ],
        vec![
            vec![cell("t1"), cell("أمل"), cell("4"), cell("التمهيدي"), cell("نعم")],
            vec![cell("t2"), cell("سامي"), cell("5"), cell("التحصيري"), cell("لا")],
        ],
    )?;

    let questions = vec![
        FormQuestion {
            question: "ما اسم الطفل؟".to_string(),
            answers: vec![FREE_TEXT_SENTINEL.to_string()],
            entries: Vec::new(),
        },
        FormQuestion {
            question: "كم عمر الطفل بالسنوات؟".to_string(),
            answers: vec![FREE_TEXT_SENTINEL.to_string()],
            entries: Vec::new(),
        },
        FormQuestion {
            question: "ما المرحلة الدراسية الحالية؟".to_string(),
            answers: vec!["التمهيدي".to_string(), "التحصيري".to_string()],
            entries: Vec::new(),
        },
        FormQuestion {
            question: "هل يحب طفلك الروضة؟".to_string(),
            answers: vec!["نعم".to_string(), "لا".to_string()],
            entries: Vec::new(),
        },
    ];

    let engine = SynthesisEngine::new(GenerateOptions { seed: Some(42) });
    let result = engine.enrich(raw, &questions, rows)?;

    for column in result.table.columns() {
        let values: Vec<&str> = column
            .cells
            .iter()
            .map(|cell| cell.as_deref().unwrap_or(""))
            .collect();
        println!("{}: {}", column.name, values.join(" | "));
    }
    println!(
        "rows={} fallbacks={}",
        result.table.row_count(),
        result.report.fallback_count
    );

    Ok(())
}
