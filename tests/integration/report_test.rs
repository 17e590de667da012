use survey_engine::schema::survey::STEM_SKILLS;
use survey_engine::{
    CodeBook, ReportDocument, ReportFacts, SurveyConfig, SurveyError, SurveySchema, Value,
    run_batch,
};

use crate::utils::cohort;

fn facts(school_id: i64) -> ReportFacts {
    let batch = cohort(vec![1, 2, 3], 120, false);
    let schema = SurveySchema::standard();
    let book = CodeBook::builtin();
    let config = SurveyConfig::default();

    let school = survey_engine::ResponseTable::from_batch(
        &batch,
        &schema,
        &book,
        &config.for_school(school_id),
    )
    .unwrap();
    let general =
        survey_engine::ResponseTable::from_batch(&batch, &schema, &book, &config).unwrap();
    ReportFacts::build(&school, &general, &book, &config)
}

#[test]
fn test_every_section_is_computed() {
    let facts = facts(2);
    assert_eq!(facts.school_id, Some(2));
    assert_eq!(facts.respondents, 120);
    assert_eq!(facts.general_respondents, 360);

    let majors = facts.majors.as_ref().unwrap();
    assert!(!majors.preferred.all.is_empty());
    assert!(majors.preferred.all.len() <= 10);
    assert!(majors.preferred.group(&Value::label("m")).is_some());
    assert!(majors.factors.values().all(Option::is_some));

    let stem = facts.stem.as_ref().unwrap();
    assert!(stem.participants + stem.non_participants <= facts.respondents);
    for skill in STEM_SKILLS {
        let gain = stem.skills[skill].unwrap();
        assert!((gain.strong + gain.partial - 100.0).abs() <= 0.1);
    }
    for comparison in [stem.majors.engineering, stem.majors.science, stem.occupations.science] {
        assert!((0.0..=100.0).contains(&comparison.group_true));
        assert!((0.0..=100.0).contains(&comparison.group_false));
    }

    let gba = facts.gba.as_ref().unwrap();
    assert_eq!(gba.majors.len(), 2);
    assert_eq!(gba.occupations.len(), 3);

    let stress = facts.stress.as_ref().unwrap();
    let level_total: f64 = stress.levels.general.values().flatten().sum();
    assert!((level_total - 100.0).abs() <= 0.5, "levels summed to {level_total}");
    assert!(stress.methods.school.values().all(Option::is_some));
}

#[test]
fn test_report_document_json() {
    let facts = facts(1);
    let document = ReportDocument::new(&facts, Some("Harbour College"));
    let json = serde_json::to_value(&document).unwrap();

    assert_eq!(json["school_name"], "Harbour College");
    assert_eq!(json["facts"]["school_id"], 1);
    assert!(json["generated_at"].is_string());
    assert!(json["facts"]["majors"]["preferred"]["all"].is_array());
    assert!(json["facts"]["stress"]["levels"]["school"].is_object());
}

#[test]
fn test_batch_reports_every_school() {
    let batch = cohort(vec![4, 5, 6], 40, false);
    let reports = run_batch(
        &batch,
        &SurveySchema::standard(),
        &CodeBook::builtin(),
        &SurveyConfig::default(),
        None,
    )
    .unwrap();

    let schools = reports.iter().map(|report| report.school_id).collect::<Vec<_>>();
    assert_eq!(schools, vec![4, 5, 6]);
    for report in &reports {
        let facts = report.facts.as_ref().unwrap();
        assert_eq!(facts.respondents, 40);
        assert_eq!(facts.general_respondents, 120);
    }
}

#[test]
fn test_batch_isolates_unknown_schools() {
    let batch = cohort(vec![1, 2], 30, false);
    let reports = run_batch(
        &batch,
        &SurveySchema::standard(),
        &CodeBook::builtin(),
        &SurveyConfig::default(),
        Some(&[2, 99]),
    )
    .unwrap();

    assert_eq!(reports.len(), 2);
    assert!(reports[0].facts.is_ok());
    assert!(matches!(
        reports[1].facts,
        Err(SurveyError::EmptyCohort { school_id: Some(99) })
    ));
}

#[test]
fn test_cohort_past_the_sentinel_size() {
    let batch = cohort((1..=10).collect(), 100, false);
    let schema = SurveySchema::standard();
    let book = CodeBook::builtin();
    let config = SurveyConfig::default();

    let general = survey_engine::ResponseTable::from_batch(&batch, &schema, &book, &config).unwrap();
    assert_eq!(general.size(), 1000);
    assert!(general.ids().contains(&999));
    assert!(general.ids().contains(&1000));

    let reports = run_batch(&batch, &schema, &book, &config, None).unwrap();
    assert_eq!(reports.len(), 10);
    for report in &reports {
        let facts = report.facts.as_ref().unwrap();
        assert_eq!(facts.respondents, 100);
        assert_eq!(facts.general_respondents, 1000);
    }
}

#[test]
fn test_school_numbered_like_the_sentinel() {
    let batch = cohort(vec![998, 999], 20, false);
    let reports = run_batch(
        &batch,
        &SurveySchema::standard(),
        &CodeBook::builtin(),
        &SurveyConfig::default(),
        None,
    )
    .unwrap();

    let schools = reports.iter().map(|report| report.school_id).collect::<Vec<_>>();
    assert_eq!(schools, vec![998, 999]);
    assert_eq!(reports[1].facts.as_ref().unwrap().respondents, 20);
}
