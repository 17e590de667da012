use survey_engine::{
    FieldSpec, Rounding, SurveySchema, Value, combine_group, distribution, grouped_distribution,
};

use crate::utils::{cohort, ids, int_batch, table};

fn favorite_schema() -> SurveySchema {
    SurveySchema::new("id", "school_id")
        .with_field(FieldSpec::ordinal("favorite", &[(1, "A"), (2, "B"), (3, "C")]))
        .with_field(FieldSpec::ordinal("gender", &[(1, "m"), (2, "f")]))
}

#[test]
fn test_shares_are_relative_to_all_respondents() {
    // A A B A B C A B _ B
    let favorite = vec![
        Some(1),
        Some(1),
        Some(2),
        Some(1),
        Some(2),
        Some(3),
        Some(1),
        Some(2),
        Some(999),
        Some(2),
    ];
    let batch = int_batch(vec![("id", ids(10)), ("favorite", favorite)]);
    let table = table(&batch, &favorite_schema());

    let shares = distribution(&table, "favorite", Rounding::default()).unwrap();
    assert_eq!(shares.len(), 3);
    assert_eq!(shares.share(&Value::label("A")), 40.0);
    assert_eq!(shares.share(&Value::label("B")), 40.0);
    assert_eq!(shares.share(&Value::label("C")), 10.0);
    assert!((shares.sum() - 90.0).abs() < 1e-9);
}

#[test]
fn test_unknown_field_is_an_error() {
    let batch = int_batch(vec![("id", ids(2)), ("favorite", vec![Some(1), Some(2)])]);
    let table = table(&batch, &favorite_schema());
    assert!(distribution(&table, "nonexistent", Rounding::default()).is_err());
}

#[test]
fn test_grouped_shares_use_group_size() {
    let batch = int_batch(vec![
        ("id", ids(6)),
        ("gender", vec![Some(1), Some(1), Some(1), Some(2), Some(2), None]),
        ("favorite", vec![Some(1), Some(2), Some(1), Some(3), None, Some(1)]),
    ]);
    let table = table(&batch, &favorite_schema());

    let grouped =
        grouped_distribution(&table, "favorite", "gender", Rounding::decimals(2)).unwrap();
    assert_eq!(grouped.len(), 2);

    let male = grouped.group(&Value::label("m")).unwrap();
    assert_eq!(male.share(&Value::label("A")), 66.67);
    assert_eq!(male.share(&Value::label("B")), 33.33);

    // the unanswered row is not part of the female denominator
    let female = grouped.group(&Value::label("f")).unwrap();
    assert_eq!(female.share(&Value::label("C")), 100.0);
    assert_eq!(female.get(&Value::label("A")), None);
}

#[test]
fn test_single_answer_groups_sum_to_one_hundred() {
    let batch = cohort(vec![1, 2], 80, false);
    let table = table(&batch, &SurveySchema::standard());

    let grouped =
        grouped_distribution(&table, "stress_lv", "gender", Rounding::decimals(6)).unwrap();
    assert!(!grouped.is_empty());
    for (_, shares) in grouped.iter() {
        assert!((shares.sum() - 100.0).abs() < 1e-3, "sum was {}", shares.sum());
    }
}

#[test]
fn test_long_table_shares_count_each_respondent_once_per_answer() {
    let batch = cohort(vec![1], 60, false);
    let table = table(&batch, &SurveySchema::standard());
    let long = combine_group(&table, "target_major", &["gender"]).unwrap();

    let shares = distribution(&long, "target_major", Rounding::decimals(6)).unwrap();
    assert!(!shares.is_empty());
    for (_, share) in shares.iter() {
        assert!(share > 0.0);
        assert!(share <= 300.0);
    }
}
