use crate::config::Config;
use crate::support::{CYCLES_KIND, OUTPUT_SCHEMA, load_project_or_exit, print_json};
use serde_json::json;
use sheetgraph_analyzer::find_cycles;

pub fn run(config: &Config, project: String, json_output: bool) {
    let loaded = load_project_or_exit(&project, config);
    let cycles = find_cycles(&loaded);

    if json_output {
        let payload = json!({
            "schema": OUTPUT_SCHEMA,
            "kind": CYCLES_KIND,
            "project_path": project,
            "root_count": loaded.scene_count() + loaded.sheet_count(),
            "cycle_count": cycles.len(),
            "cycles": cycles,
        });
        print_json(&payload);
    } else {
        println!("sheetgraph cycles");
        println!("  Source: {project}");
        println!("  Cyclic roots: {}", cycles.len());
        for cycle in &cycles {
            println!(
                "    - {} {}: {} {} -> {}",
                cycle.root_kind,
                cycle.root,
                cycle.target_kind,
                cycle.chain.join(" -> "),
                cycle.target
            );
        }
    }

    if !cycles.is_empty() {
        std::process::exit(1);
    }
}
