use crate::config::Config;
use crate::support::{
    ANALYZE_KIND, OUTPUT_SCHEMA, load_project_or_exit, print_json, print_list_block,
};
use serde_json::json;
use sheetgraph_analyzer::{AnalysisError, DependencyAnalyzer, LinkKind};

pub fn run(
    config: &Config,
    project: String,
    scene: Option<String>,
    sheet: Option<String>,
    json_output: bool,
) {
    let loaded = load_project_or_exit(&project, config);

    let (root_kind, root_name, analyzer) = match (scene, sheet) {
        (Some(name), _) => {
            let analyzer = DependencyAnalyzer::for_scene_named(&loaded, &name);
            (LinkKind::Scene, name, analyzer)
        }
        (None, Some(name)) => {
            let analyzer = DependencyAnalyzer::for_sheet_named(&loaded, &name);
            (LinkKind::Sheet, name, analyzer)
        }
        (None, None) => {
            eprintln!("error: one of --scene or --sheet is required");
            std::process::exit(1);
        }
    };
    let mut analyzer = analyzer.unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    let result = analyzer.analyze().map(|_| ());
    let cycle = match result {
        Ok(()) => None,
        Err(AnalysisError::CyclicDependency {
            kind,
            target,
            chain,
        }) => Some((kind, target, chain)),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    if json_output {
        let cycle_json = cycle.as_ref().map(|(kind, target, chain)| {
            json!({
                "kind": kind,
                "target": target,
                "chain": chain,
            })
        });
        let payload = json!({
            "schema": OUTPUT_SCHEMA,
            "kind": ANALYZE_KIND,
            "project_path": project,
            "root_kind": root_kind,
            "root": root_name,
            "acyclic": cycle.is_none(),
            "cycle": cycle_json,
            "dependencies": analyzer.dependencies(),
            "unresolved_links": analyzer.unresolved_links(),
        });
        print_json(&payload);
    } else {
        println!("sheetgraph analyze {root_kind} {root_name}");
        println!("  Source: {project}");
        match &cycle {
            None => {
                let deps = analyzer.dependencies();
                println!("  Acyclic: yes");
                print_list_block("Scenes", deps.scenes());
                print_list_block("External sheets", deps.sheets());
                print_list_block("Source files", deps.source_files());
                print_list_block("Nested scenes", deps.not_top_level_scenes());
                print_list_block("Nested external sheets", deps.not_top_level_sheets());
                print_list_block("Unresolved links", analyzer.unresolved_links());
            }
            Some((kind, target, chain)) => {
                println!("  Acyclic: no");
                println!("  Cycle: {kind} {} -> {target}", chain.join(" -> "));
            }
        }
    }

    if cycle.is_some() {
        std::process::exit(1);
    }
}
