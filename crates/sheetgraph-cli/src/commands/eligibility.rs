use crate::config::Config;
use crate::support::{ELIGIBILITY_KIND, OUTPUT_SCHEMA, load_project_or_exit, print_json};
use serde_json::json;
use sheetgraph_analyzer::{
    EligibilityOptions, EligibilityReport, EligibilityVerdict, check_all_sheets, check_eligibility,
};

fn describe(verdict: &EligibilityVerdict) -> String {
    match verdict {
        EligibilityVerdict::Exclusive { scene } => format!("exclusive to {scene}"),
        EligibilityVerdict::NoOwner => "no exclusive scene".to_string(),
        EligibilityVerdict::MultipleOwners { first, second } => {
            format!("shared by {first} and {second}")
        }
    }
}

pub fn run(
    config: &Config,
    project: String,
    sheet: Option<String>,
    all: bool,
    sequential: bool,
    json_output: bool,
) {
    let loaded = load_project_or_exit(&project, config);
    let options = EligibilityOptions {
        parallel: config.eligibility.parallel && !sequential,
    };

    let reports: Vec<EligibilityReport> = match sheet {
        Some(name) if !all => {
            let report = check_eligibility(&loaded, &name, &options).unwrap_or_else(|e| {
                eprintln!("error: {e}");
                std::process::exit(1);
            });
            vec![report]
        }
        _ => check_all_sheets(&loaded, &options),
    };
    let eligible_count = reports.iter().filter(|r| r.is_eligible()).count();

    if json_output {
        let payload = json!({
            "schema": OUTPUT_SCHEMA,
            "kind": ELIGIBILITY_KIND,
            "project_path": project,
            "parallel": options.parallel,
            "sheet_count": reports.len(),
            "eligible_count": eligible_count,
            "reports": reports,
        });
        print_json(&payload);
    } else {
        println!("sheetgraph eligibility");
        println!("  Source: {project}");
        println!("  Eligible: {eligible_count} of {}", reports.len());
        for report in &reports {
            println!("  {}: {}", report.sheet, describe(&report.verdict));
            if !report.skipped_cyclic_scenes.is_empty() {
                println!(
                    "    skipped cyclic scenes: {}",
                    report.skipped_cyclic_scenes.join(", ")
                );
            }
        }
    }
}
