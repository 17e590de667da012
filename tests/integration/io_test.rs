use std::fs;

use survey_engine::reader::parquet::write_parquet;
use survey_engine::{
    CodeBook, ResponseSource, ResponseTable, Rounding, SurveyConfig, SurveyError, SurveySchema,
    Value, distribution,
};

use crate::utils::{cohort, rename_column};

const EXPORT: &str = "\
Student survey 2024,,,,
Exported sheet,,,,
id,school_id,gender , stem_participation,coding
1,10,1,1,2
2,10,2,2,0
3,10,2,999,1
4,20,1,1,abc
5,20,2,2,2
";

fn schema() -> SurveySchema {
    SurveySchema::new("id", "school_id")
        .with_field(survey_engine::FieldSpec::ordinal("gender", &[(1, "m"), (2, "f")]))
        .with_field(survey_engine::FieldSpec::flag("stem_participation", [1], [2]))
}

#[test]
fn test_csv_export_with_metadata_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.csv");
    fs::write(&path, EXPORT).unwrap();

    let table = ResponseTable::load(
        &ResponseSource::from_path(&path),
        &schema(),
        &CodeBook::builtin(),
        &SurveyConfig::default(),
    )
    .unwrap();

    assert_eq!(table.size(), 5);
    assert_eq!(table.ids(), &[1, 2, 3, 4, 5]);
    assert_eq!(table.count_flag("stem_participation", true).unwrap(), 2);
    assert_eq!(table.count_flag("stem_participation", false).unwrap(), 2);

    // text that is not a number counts as missing
    let coding = distribution(&table, "coding", Rounding::default()).unwrap();
    assert_eq!(coding.share(&Value::code(2)), 40.0);
    assert_eq!(coding.share(&Value::code(0)), 20.0);
    assert_eq!(coding.len(), 3);
}

#[test]
fn test_csv_school_filter() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.csv");
    fs::write(&path, EXPORT).unwrap();
    let source = ResponseSource::from_path(&path);

    let config = SurveyConfig::default().for_school(20);
    let table = ResponseTable::load(&source, &schema(), &CodeBook::builtin(), &config).unwrap();
    assert_eq!(table.ids(), &[4, 5]);
    assert_eq!(table.school_id(), Some(20));

    let config = SurveyConfig::default().for_school(30);
    let result = ResponseTable::load(&source, &schema(), &CodeBook::builtin(), &config);
    assert!(matches!(result, Err(SurveyError::EmptyCohort { school_id: Some(30) })));
}

#[test]
fn test_parquet_file_and_directory_agree() {
    let dir = tempfile::tempdir().unwrap();
    let batch = cohort(vec![1, 2, 3], 40, false);
    let file = dir.path().join("all.parquet");
    write_parquet(&file, &batch).unwrap();

    let parts = dir.path().join("parts");
    fs::create_dir(&parts).unwrap();
    write_parquet(&parts.join("a.parquet"), &batch.slice(0, 60)).unwrap();
    write_parquet(&parts.join("b.parquet"), &batch.slice(60, 60)).unwrap();

    let schema = SurveySchema::standard();
    let book = CodeBook::builtin();
    let config = SurveyConfig::default();
    let whole = ResponseTable::load(&ResponseSource::from_path(&file), &schema, &book, &config)
        .unwrap();
    let split = ResponseTable::load(&ResponseSource::from_path(&parts), &schema, &book, &config)
        .unwrap();
    let memory = ResponseTable::load(&ResponseSource::from(batch), &schema, &book, &config)
        .unwrap();

    assert_eq!(whole.size(), 120);
    assert_eq!(whole.ids(), split.ids());
    assert_eq!(whole.ids(), memory.ids());
    assert_eq!(
        distribution(&whole, "stress_lv", Rounding::default()).unwrap(),
        distribution(&split, "stress_lv", Rounding::default()).unwrap()
    );
}

#[test]
fn test_missing_required_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.csv");
    fs::write(&path, "meta\nmeta\nid,school_id\n1,10\n").unwrap();

    let result = ResponseTable::load(
        &ResponseSource::from_path(&path),
        &schema(),
        &CodeBook::builtin(),
        &SurveyConfig::default(),
    );
    assert!(matches!(result, Err(SurveyError::MissingColumn { .. })));
}

#[test]
fn test_converter_spellings_load_as_listed_fields() {
    let dir = tempfile::tempdir().unwrap();
    let batch = cohort(vec![1, 2], 30, false);
    let exported = rename_column(&batch, "stress_source", "stress_scource");
    let exported = rename_column(&exported, "workload_B", "worload_B");
    let path = dir.path().join("export.parquet");
    write_parquet(&path, &exported).unwrap();

    let schema = SurveySchema::standard();
    let book = CodeBook::builtin();
    let config = SurveyConfig::default();
    let loaded = ResponseTable::load(&ResponseSource::from_path(&path), &schema, &book, &config)
        .unwrap();
    let expected = ResponseTable::from_batch(&batch, &schema, &book, &config).unwrap();

    for name in ["stress_source", "workload_B"] {
        assert!(loaded.has_field(name));
        assert_eq!(
            loaded.decoded_field(name).unwrap(),
            expected.decoded_field(name).unwrap()
        );
    }
    assert!(!loaded.has_field("stress_scource"));
}
