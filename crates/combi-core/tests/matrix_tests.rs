use combi_core::matrix::{build_engine, load_engine, BuildError};
use combi_engine::{Combination, EngineError, Mode, Value};
use combi_ir::parse::parse_matrix;
use pretty_assertions::assert_eq;

#[test]
fn test_load_fixture_applies_exclusions() {
    let json = include_str!("fixtures/odata_formats.json");
    let mut engine = load_engine(json).expect("fixture should build");
    assert_eq!(engine.mode(), Mode::FullCombinatorial);
    assert!(engine.has_filter());

    let produced: Vec<Combination> = engine.iter().collect();
    // 3 * 4 * 2 = 24, minus 3 (GET, batch) and 2 (Xml, DELETE).
    assert_eq!(produced.len(), 19);

    let xml = Value::enum_variant("Format", "Xml");
    assert!(produced.iter().all(|c| {
        !(c.get("Verb") == Some(&Value::from("GET")) && c.get("Batch") == Some(&Value::from(true)))
            && !(c.get("Format") == Some(&xml) && c.get("Verb") == Some(&Value::from("DELETE")))
    }));
}

#[test]
fn test_color_size_from_json() {
    let json = r#"{
        "dimensions": [
            { "name": "Color", "values": ["Red", "Green", "Blue"] },
            { "name": "Size", "values": ["Small", "Large"] }
        ],
        "exclusions": [ { "when": { "Color": "Blue" } } ]
    }"#;
    let mut engine = load_engine(json).unwrap();
    let colors: Vec<String> = engine
        .iter()
        .map(|c| c.get("Color").unwrap().to_string())
        .collect();
    assert_eq!(colors, vec!["Red", "Green", "Red", "Green"]);
}

#[test]
fn test_every_element_mode_from_json() {
    let json = r#"{
        "dimensions": [
            { "name": "A", "values": [1, 2, 3] },
            { "name": "B", "values": [1, 2, 3] }
        ],
        "mode": "every_element"
    }"#;
    let mut engine = load_engine(json).unwrap();
    assert_eq!(engine.mode(), Mode::EveryElement);
    assert_eq!(engine.iter().count(), 5);
}

#[test]
fn test_pair_wise_mode_fails_build() {
    let json = r#"{ "dimensions": [ { "name": "A", "values": [1] } ], "mode": "pair_wise" }"#;
    let err = load_engine(json).unwrap_err();
    assert!(matches!(
        err,
        BuildError::Engine(EngineError::NotImplemented(Mode::PairWise))
    ));
}

#[test]
fn test_empty_dimension_list_fails_build() {
    let err = load_engine(r#"{ "dimensions": [] }"#).unwrap_err();
    assert!(matches!(err, BuildError::Engine(EngineError::NoDimensions)));
}

#[test]
fn test_dimension_without_values_fails_build() {
    let err = load_engine(r#"{ "dimensions": [ { "name": "A", "values": [] } ] }"#).unwrap_err();
    assert!(matches!(err, BuildError::Dimension(_)));
    assert_eq!(err.to_string(), "invalid dimension: dimension 'A' has no values");
}

#[test]
fn test_unnamed_dimension_fails_build() {
    let err = load_engine(r#"{ "dimensions": [ { "name": "", "values": [1] } ] }"#).unwrap_err();
    assert!(matches!(err, BuildError::Dimension(_)));
}

#[test]
fn test_unknown_exclusion_dimension_fails_build() {
    let json = r#"{
        "dimensions": [ { "name": "A", "values": [1, 2] } ],
        "exclusions": [ { "when": { "A": 1 } }, { "when": { "Ghost": 1 } } ]
    }"#;
    let err = load_engine(json).unwrap_err();
    match err {
        BuildError::UnknownExclusionDimension { rule, name } => {
            assert_eq!(rule, 1);
            assert_eq!(name, "Ghost");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_malformed_json_fails_build() {
    assert!(matches!(load_engine("not json"), Err(BuildError::Parse(_))));
}

#[test]
fn test_build_from_parsed_def_is_repeatable() {
    let def = parse_matrix(include_str!("fixtures/odata_formats.json")).unwrap();
    let mut a = build_engine(&def).unwrap();
    let mut b = build_engine(&def).unwrap();
    let first: Vec<Combination> = a.iter().collect();
    let second: Vec<Combination> = b.iter().collect();
    assert_eq!(first, second);
}
