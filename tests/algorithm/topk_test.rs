use survey_engine::{
    Distribution, FieldSpec, Rounding, SurveySchema, Value, combine, combine_group, distribution,
    rank, top_k,
};

use crate::utils::{cohort, ids, int_batch, table};

#[test]
fn test_top_k_is_sorted_and_bounded() {
    let batch = cohort(vec![1, 2, 3], 100, false);
    let table = table(&batch, &SurveySchema::standard());
    let long = combine_group(&table, "target_major", &["gender"]).unwrap();
    let shares = distribution(&long, "target_major", Rounding::default()).unwrap();

    for k in [0, 1, 5, 10, shares.len() + 5] {
        let top = top_k(&shares, k);
        assert_eq!(top.len(), k.min(shares.len()));
        for pair in top.windows(2) {
            assert!(shares.share(&pair[0]) >= shares.share(&pair[1]));
        }
    }
}

#[test]
fn test_ties_break_by_value() {
    let shares: Distribution = [
        (Value::label("Nursing"), 20.0),
        (Value::label("Law"), 20.0),
        (Value::label("Medicine"), 30.0),
    ]
    .into_iter()
    .collect();
    assert_eq!(
        top_k(&shares, 3),
        vec![
            Value::label("Medicine"),
            Value::label("Law"),
            Value::label("Nursing")
        ]
    );
}

#[test]
fn test_ranking_is_deterministic() {
    let batch = cohort(vec![1], 100, false);
    let table = table(&batch, &SurveySchema::standard());
    let long = combine_group(&table, "target_occupation", &["gender"]).unwrap();

    let first = rank(&long, "gender", 10).unwrap();
    let second = rank(&long, "gender", 10).unwrap();
    assert_eq!(first, second);
    assert!(first.all.len() <= 10);
}

#[test]
fn test_symmetric_cohort_ranks_genders_alike() {
    let batch = cohort(vec![1], 100, true);
    let table = table(&batch, &SurveySchema::standard());
    let long = combine_group(&table, "target_major", &["gender"]).unwrap();

    let ranking = rank(&long, "gender", 10).unwrap();
    let male = ranking.group(&Value::label("m")).unwrap();
    let female = ranking.group(&Value::label("f")).unwrap();
    assert_eq!(male, female);
}

#[test]
fn test_near_ties_rank_by_count_not_rounded_share() {
    let favourites: Vec<Option<i64>> = std::iter::repeat_n(Some(1), 1001)
        .chain(std::iter::repeat_n(Some(2), 1002))
        .chain(std::iter::repeat_n(Some(3), 997))
        .collect();
    let batch = int_batch(vec![
        ("id", ids(3000)),
        ("gender", vec![Some(1); 3000]),
        ("fav", favourites),
    ]);
    let schema = SurveySchema::new("id", "school_id")
        .with_field(FieldSpec::ordinal("gender", &[(1, "m"), (2, "f")]))
        .with_field(FieldSpec::ordinal("fav", &[(1, "Alpha"), (2, "Zeta"), (3, "Other")]));
    let table = table(&batch, &schema);
    let long = combine(&table, &["fav"], "fav", &["gender"]).unwrap();

    // Alpha and Zeta both round to 33.4
    let rounded = distribution(&long, "fav", Rounding::decimals(1)).unwrap();
    assert_eq!(
        rounded.share(&Value::label("Alpha")),
        rounded.share(&Value::label("Zeta"))
    );

    let ranking = rank(&long, "gender", 3).unwrap();
    let expected = vec![
        Value::label("Zeta"),
        Value::label("Alpha"),
        Value::label("Other"),
    ];
    assert_eq!(ranking.all, expected);
    assert_eq!(ranking.group(&Value::label("m")).unwrap(), expected.as_slice());
}
