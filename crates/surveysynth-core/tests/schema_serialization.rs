use surveysynth_core::{ColumnDomain, ResponseColumn, ResponseTable, TableSchema};

#[test]
fn schema_round_trips_through_json() {
    let table = ResponseTable::from_columns(vec![
        ResponseColumn {
            name: "age".to_string(),
            cells: vec![Some("3".to_string()), Some("5".to_string())],
        },
        ResponseColumn {
            name: "answer".to_string(),
            cells: vec![Some("نعم".to_string()), None],
        },
    ])
    .expect("build table");

    let schema = TableSchema::infer(&table);
    let json = serde_json::to_string(&schema).expect("serialize schema");
    let parsed: TableSchema = serde_json::from_str(&json).expect("parse schema");
    assert_eq!(parsed, schema);
    assert_eq!(
        parsed.domain("age"),
        Some(&ColumnDomain::Numeric { min: 3.0, max: 5.0 })
    );
}

#[test]
fn table_round_trips_through_json() {
    let table = ResponseTable::from_rows(
        vec!["a".to_string(), "b".to_string()],
        vec![vec![Some("1".to_string()), None]],
    )
    .expect("build table");

    let json = serde_json::to_string(&table).expect("serialize table");
    let parsed: ResponseTable = serde_json::from_str(&json).expect("parse table");
    assert_eq!(parsed, table);
}
