use crate::config::Config;
use serde_json::Value;
use sheetgraph_model::{Project, read_project_from_path};
use std::path::Path;

pub const OUTPUT_SCHEMA: u64 = 1;
pub const ANALYZE_KIND: &str = "sheetgraph.analyze.v1";
pub const ELIGIBILITY_KIND: &str = "sheetgraph.eligibility.v1";
pub const CYCLES_KIND: &str = "sheetgraph.cycles.v1";

pub fn load_config_or_exit(path: Option<&str>) -> Config {
    Config::load(path.map(Path::new)).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    })
}

/// Load the project and apply the config's source naming, if any.
pub fn load_project_or_exit(path: &str, config: &Config) -> Project {
    let project = read_project_from_path(Path::new(path)).unwrap_or_else(|e| {
        eprintln!("error: failed to load {path}: {e}");
        std::process::exit(1);
    });
    tracing::debug!(
        path,
        scenes = project.scene_count(),
        sheets = project.sheet_count(),
        "project loaded"
    );
    match &config.sources {
        Some(naming) => project.with_source_naming(naming.clone()),
        None => project,
    }
}

pub fn print_json(payload: &Value) {
    match serde_json::to_string_pretty(payload) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("error: failed to render json output: {e}");
            std::process::exit(1);
        }
    }
}

pub fn print_list_block<'a, I>(label: &str, items: I)
where
    I: IntoIterator<Item = &'a String>,
{
    let items: Vec<&str> = items.into_iter().map(String::as_str).collect();
    if items.is_empty() {
        println!("  {label}: none");
        return;
    }
    println!("  {label} ({}):", items.len());
    for item in items {
        println!("    - {item}");
    }
}
