//! Console summaries for the command line

use itertools::Itertools;

use crate::report::ReportFacts;
use crate::report::batch::SchoolReport;
use crate::table::ResponseTable;

/// Print size and columns of a loaded table
pub fn print_table_summary(table: &ResponseTable) {
    match table.school_id() {
        Some(school_id) => println!("School {school_id}: {} respondents", table.size()),
        None => println!("All schools: {} respondents", table.size()),
    }
    println!("Columns: {}", table.schema().fields().len());
}

/// Print the headline facts of a report and which sections are missing
pub fn print_report_summary(facts: &ReportFacts) {
    println!(
        "Respondents: {} (comparison cohort {})",
        facts.respondents, facts.general_respondents
    );
    if let Some(majors) = &facts.majors {
        println!("Top majors: {}", majors.preferred.all.iter().take(5).join(", "));
    }
    if let Some(occupations) = &facts.occupations {
        println!(
            "Top occupations: {}",
            occupations.preferred.all.iter().take(5).join(", ")
        );
    }

    let missing = [
        ("majors", facts.majors.is_none()),
        ("occupations", facts.occupations.is_none()),
        ("stem", facts.stem.is_none()),
        ("gba", facts.gba.is_none()),
        ("stress", facts.stress.is_none()),
    ]
    .into_iter()
    .filter_map(|(name, missing)| missing.then_some(name))
    .join(", ");
    if !missing.is_empty() {
        println!("Missing sections: {missing}");
    }
}

/// Print one line per school of a batch run
pub fn print_batch_summary(reports: &[SchoolReport]) {
    for report in reports {
        match &report.facts {
            Ok(facts) => println!("School {}: {} respondents", report.school_id, facts.respondents),
            Err(error) => println!("School {}: failed ({error})", report.school_id),
        }
    }
}
