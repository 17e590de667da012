use std::sync::Arc;

use survey_engine::async_io::{
    find_parquet_files_async, load_cohorts, load_tables, read_parquet_async, read_source_async,
};
use survey_engine::reader::parquet::write_parquet;
use survey_engine::{CodeBook, ResponseSource, SurveyConfig, SurveyError, SurveySchema};

use crate::utils::cohort;

#[tokio::test]
async fn test_read_parquet_async() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cohort.parquet");
    let batch = cohort(vec![1, 2], 30, false);
    write_parquet(&path, &batch).unwrap();

    let (schema, batches) = read_parquet_async(&path, Some(16)).await.unwrap();
    assert_eq!(schema.fields().len(), batch.num_columns());
    assert_eq!(batches.iter().map(|b| b.num_rows()).sum::<usize>(), 60);
    assert!(batches.iter().all(|b| b.num_rows() <= 16));

    let whole = read_source_async(ResponseSource::from_path(&path), &SurveyConfig::default())
        .await
        .unwrap();
    assert_eq!(whole.num_rows(), 60);
}

#[tokio::test]
async fn test_find_parquet_files_async() {
    let dir = tempfile::tempdir().unwrap();
    let batch = cohort(vec![1], 10, false);
    write_parquet(&dir.path().join("b.parquet"), &batch).unwrap();
    write_parquet(&dir.path().join("a.parquet"), &batch).unwrap();
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let files = find_parquet_files_async(dir.path()).await.unwrap();
    let names = files
        .iter()
        .filter_map(|path| path.file_name()?.to_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["a.parquet", "b.parquet"]);
}

#[tokio::test]
async fn test_load_cohorts_from_one_export() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("all.parquet");
    write_parquet(&path, &cohort(vec![1, 2, 3], 25, false)).unwrap();

    let config = SurveyConfig::default().for_school(2);
    let (school, general) = load_cohorts(
        ResponseSource::from_path(&path),
        None,
        Arc::new(SurveySchema::standard()),
        Arc::new(CodeBook::builtin()),
        &config,
    )
    .await
    .unwrap();

    assert_eq!(school.size(), 25);
    assert_eq!(school.school_id(), Some(2));
    assert_eq!(general.size(), 75);
    assert_eq!(general.school_id(), None);
}

#[tokio::test]
async fn test_load_cohorts_with_separate_school_export() {
    let dir = tempfile::tempdir().unwrap();
    let general_path = dir.path().join("all.parquet");
    let school_path = dir.path().join("school.parquet");
    write_parquet(&general_path, &cohort(vec![1, 2], 20, false)).unwrap();
    write_parquet(&school_path, &cohort(vec![9], 15, false)).unwrap();

    let (school, general) = load_cohorts(
        ResponseSource::from_path(&general_path),
        Some(ResponseSource::from_path(&school_path)),
        Arc::new(SurveySchema::standard()),
        Arc::new(CodeBook::builtin()),
        &SurveyConfig::default().for_school(9),
    )
    .await
    .unwrap();

    assert_eq!(school.size(), 15);
    assert_eq!(general.size(), 40);
}

#[tokio::test]
async fn test_load_tables_keeps_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut sources = Vec::new();
    for (idx, size) in [12, 4, 8].into_iter().enumerate() {
        let path = dir.path().join(format!("part_{idx}.parquet"));
        write_parquet(&path, &cohort(vec![1], size, false)).unwrap();
        sources.push(ResponseSource::from_path(&path));
    }

    let tables = load_tables(
        sources,
        Arc::new(SurveySchema::standard()),
        Arc::new(CodeBook::builtin()),
        &SurveyConfig::default(),
    )
    .await
    .unwrap();
    let sizes = tables.iter().map(|table| table.size()).collect::<Vec<_>>();
    assert_eq!(sizes, vec![12, 4, 8]);

    let empty = load_tables(
        Vec::new(),
        Arc::new(SurveySchema::standard()),
        Arc::new(CodeBook::builtin()),
        &SurveyConfig::default(),
    )
    .await;
    assert!(matches!(empty, Err(SurveyError::EmptyCohort { .. })));
}
