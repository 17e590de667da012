use survey_engine::{
    ChoiceGroup, CodeBook, Domain, FieldSpec, ResponseTable, Rounding, SurveyConfig, SurveyError,
    SurveySchema, class_match,
};

use crate::utils::{cohort, ids, int_batch, table};

fn schema(truthy: i32, falsy: i32) -> SurveySchema {
    SurveySchema::new("id", "school_id")
        .with_field(FieldSpec::flag("stem_participation", [truthy], [falsy]))
        .with_choice_group(ChoiceGroup::numbered("target_major", Domain::Major, 3))
}

fn answers() -> Vec<(&'static str, Vec<Option<i64>>)> {
    // five participants all chose Computer Science, five others only Law
    let mut flags = vec![Some(1); 5];
    flags.extend(vec![Some(2); 5]);
    let mut first = vec![Some(61); 5];
    first.extend(vec![Some(39); 5]);
    vec![
        ("id", ids(10)),
        ("stem_participation", flags),
        ("target_major1", first),
        ("target_major2", vec![None; 10]),
        ("target_major3", vec![Some(999); 10]),
    ]
}

#[test]
fn test_all_versus_none() {
    let table = table(&int_batch(answers()), &schema(1, 2));
    let group = table.choice_group("target_major").unwrap().clone();
    let book = CodeBook::builtin();

    let rates = class_match(
        &table,
        &book,
        &group,
        "Science",
        "stem_participation",
        Rounding::default(),
    )
    .unwrap();
    assert_eq!(rates.as_pair(), (100.0, 0.0));
    assert_eq!(rates.difference(), 100.0);
}

#[test]
fn test_swapping_the_flag_swaps_the_rates() {
    let book = CodeBook::builtin();
    let batch = int_batch(answers());
    let rates = |schema: &SurveySchema| {
        let table = table(&batch, schema);
        let group = table.choice_group("target_major").unwrap().clone();
        class_match(
            &table,
            &book,
            &group,
            "Science",
            "stem_participation",
            Rounding::default(),
        )
        .unwrap()
    };

    let (a, b) = rates(&schema(1, 2)).as_pair();
    assert_eq!(rates(&schema(2, 1)).as_pair(), (b, a));
}

#[test]
fn test_rates_stay_within_bounds() {
    let table = table(&cohort(vec![1, 2], 100, false), &SurveySchema::standard());
    let book = CodeBook::builtin();
    for group_name in ["target_major", "target_occupation"] {
        let group = table.choice_group(group_name).unwrap().clone();
        for category in ["Engineering", "Science", "Business"] {
            let rates = class_match(
                &table,
                &book,
                &group,
                category,
                "gba_understanding",
                Rounding::default(),
            )
            .unwrap();
            let (a, b) = rates.as_pair();
            assert!((0.0..=100.0).contains(&a));
            assert!((0.0..=100.0).contains(&b));
        }
    }
}

#[test]
fn test_custom_code_book() {
    let book = CodeBook::from_json_str(
        r#"{
            "major": {
                "labels": {"1": "Physics", "2": "History"},
                "categories": {"1": "Science", "2": "Humanities"}
            },
            "occupation": {"labels": {}}
        }"#,
    )
    .unwrap();
    let batch = int_batch(vec![
        ("id", ids(4)),
        ("stem_participation", vec![Some(1), Some(1), Some(2), Some(2)]),
        ("target_major1", vec![Some(2), Some(2), Some(2), Some(1)]),
        ("target_major2", vec![Some(1), None, None, None]),
        ("target_major3", vec![None; 4]),
    ]);
    let table =
        ResponseTable::from_batch(&batch, &schema(1, 2), &book, &SurveyConfig::default()).unwrap();
    let group = table.choice_group("target_major").unwrap().clone();

    let rates = class_match(
        &table,
        &book,
        &group,
        "Science",
        "stem_participation",
        Rounding::default(),
    )
    .unwrap();
    assert_eq!(rates.as_pair(), (50.0, 50.0));

    let result = class_match(
        &table,
        &book,
        &group,
        "Engineering",
        "stem_participation",
        Rounding::default(),
    );
    assert!(matches!(result, Err(SurveyError::LookupMiss { .. })));
}
