use survey_engine::schema::survey::STEM_SKILLS;
use survey_engine::{
    FieldSpec, Rounding, SurveyError, SurveySchema, Value, combine_group, percent_of,
};

use crate::utils::{cohort, ids, int_batch, table};

#[test]
fn test_zero_code_is_dropped_and_the_rest_renormalized() {
    // half the respondents answered 0, a quarter each 1 and 2
    let answers = vec![Some(0), Some(0), Some(0), Some(0), Some(1), Some(1), Some(2), Some(2)];
    let batch = int_batch(vec![("id", ids(8)), ("coding", answers)]);
    let table = table(&batch, &SurveySchema::new("id", "school_id"));
    let targets = [Value::code(0), Value::code(1), Value::code(2)];

    let shares = percent_of(&table, "coding", &targets, true, Rounding::default()).unwrap();
    assert_eq!(shares[&Value::code(0)], 0.0);
    assert_eq!(shares[&Value::code(1)], 50.0);
    assert_eq!(shares[&Value::code(2)], 50.0);
}

#[test]
fn test_labelled_targets() {
    let schema = SurveySchema::new("id", "school_id")
        .with_field(FieldSpec::ordinal("stress_source", &[(1, "personal"), (2, "external")]));
    let batch = int_batch(vec![
        ("id", ids(5)),
        ("stress_source", vec![Some(1), Some(2), Some(2), Some(999), Some(2)]),
    ]);
    let table = table(&batch, &schema);

    let targets = [Value::label("personal"), Value::label("external")];
    let shares = percent_of(&table, "stress_source", &targets, true, Rounding::default()).unwrap();
    assert_eq!(shares[&Value::label("personal")], 25.0);
    assert_eq!(shares[&Value::label("external")], 75.0);
}

#[test]
fn test_renormalized_shares_sum_to_one_hundred() {
    let batch = cohort(vec![1, 2], 100, false);
    let table = table(&batch, &SurveySchema::standard());
    let targets = [Value::code(1), Value::code(2)];

    for skill in STEM_SKILLS {
        let shares = percent_of(&table, skill, &targets, true, Rounding::decimals(4)).unwrap();
        let total: f64 = shares.values().sum();
        assert!((total - 100.0).abs() < 1e-2, "{skill} summed to {total}");
    }
}

#[test]
fn test_long_table_percentages() {
    let batch = cohort(vec![1], 50, false);
    let table = table(&batch, &SurveySchema::standard());
    let long = combine_group(&table, "target_major", &[]).unwrap();

    let targets = [Value::label("Law"), Value::Unknown];
    let shares = percent_of(&long, "target_major", &targets, false, Rounding::default()).unwrap();
    assert!(shares.values().all(|share| (0.0..=100.0).contains(share)));
}

#[test]
fn test_only_zero_answers() {
    let batch = int_batch(vec![("id", ids(3)), ("coding", vec![Some(0), Some(0), None])]);
    let table = table(&batch, &SurveySchema::new("id", "school_id"));

    let result = percent_of(&table, "coding", &[Value::code(1)], true, Rounding::default());
    assert!(matches!(result, Err(SurveyError::NoResponses { .. })));
}
