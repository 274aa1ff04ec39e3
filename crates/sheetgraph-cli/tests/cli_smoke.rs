use serde_json::{Value, json};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

struct TempDirGuard {
    path: PathBuf,
}

impl TempDirGuard {
    fn new(prefix: &str) -> Self {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "sheetgraph-cli-{prefix}-{}-{unique}",
            std::process::id()
        ));
        fs::create_dir_all(&path).expect("temp dir should be created");
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDirGuard {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn run_sheetgraph<I, S>(cwd: &Path, args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = env!("CARGO_BIN_EXE_sheetgraph");
    Command::new(bin)
        .current_dir(cwd)
        .env_remove("SHEETGRAPH_LOG")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("sheetgraph command should execute")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        panic!(
            "command failed with status {:?}\nstdout:\n{}\nstderr:\n{}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
}

fn assert_failure(output: &Output) {
    if output.status.success() {
        panic!(
            "command unexpectedly succeeded\nstdout:\n{}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
}

fn stdout_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn parse_json_stdout(output: &Output) -> Value {
    serde_json::from_slice::<Value>(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "expected valid JSON stdout, got error: {e}\nstdout:\n{}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

fn write_sample_project(path: &Path) {
    let project = json!({
        "name": "Platformer",
        "scenes": [
            {
                "name": "Level1",
                "events": [
                    { "type": "link", "target": "Common" },
                    {
                        "type": "standard",
                        "events": [{ "type": "link", "target": "Enemies" }]
                    },
                    { "type": "code", "id": "1", "dependencies": ["lib/physics.cpp"] }
                ]
            },
            {
                "name": "Level2",
                "events": [{ "type": "link", "target": "Enemies" }]
            }
        ],
        "externalSheets": [
            { "name": "Common" },
            { "name": "Enemies" }
        ]
    });
    fs::write(
        path,
        serde_json::to_string_pretty(&project).expect("sample project should serialize"),
    )
    .expect("sample project should be written");
}

fn write_cyclic_project(path: &Path) {
    let project = json!({
        "name": "Loops",
        "scenes": [
            { "name": "A", "events": [{ "type": "link", "target": "B" }] },
            { "name": "B", "events": [{ "type": "link", "target": "A" }] }
        ]
    });
    fs::write(
        path,
        serde_json::to_string_pretty(&project).expect("cyclic project should serialize"),
    )
    .expect("cyclic project should be written");
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[test]
fn analyze_scene_json_reports_all_sets() {
    let tmp = TempDirGuard::new("analyze-json");
    let project = tmp.path().join("project.json");
    write_sample_project(&project);

    let output = run_sheetgraph(
        tmp.path(),
        [
            "analyze",
            "--project",
            path_arg(&project).as_str(),
            "--scene",
            "Level1",
            "--json",
        ],
    );
    assert_success(&output);

    let payload = parse_json_stdout(&output);
    assert_eq!(payload["schema"], 1);
    assert_eq!(payload["kind"], "sheetgraph.analyze.v1");
    assert_eq!(payload["root_kind"], "scene");
    assert_eq!(payload["root"], "Level1");
    assert_eq!(payload["acyclic"], true);
    assert_eq!(payload["cycle"], Value::Null);
    assert_eq!(
        payload["dependencies"],
        json!({
            "scenes": [],
            "sheets": ["Common", "Enemies"],
            "source_files": ["GDpriv1.cpp", "lib/physics.cpp"],
            "not_top_level_scenes": [],
            "not_top_level_sheets": ["Enemies"]
        })
    );
    assert_eq!(payload["unresolved_links"], json!([]));
}

#[test]
fn analyze_text_output_lists_sets() {
    let tmp = TempDirGuard::new("analyze-text");
    let project = tmp.path().join("project.json");
    write_sample_project(&project);

    let output = run_sheetgraph(
        tmp.path(),
        [
            "analyze",
            "--project",
            path_arg(&project).as_str(),
            "--sheet",
            "Common",
        ],
    );
    assert_success(&output);

    let text = stdout_text(&output);
    assert!(text.contains("sheetgraph analyze external sheet Common"));
    assert!(text.contains("Acyclic: yes"));
    assert!(text.contains("Scenes: none"));
}

#[test]
fn analyze_cycle_exits_nonzero_with_chain() {
    let tmp = TempDirGuard::new("analyze-cycle");
    let project = tmp.path().join("project.json");
    write_cyclic_project(&project);

    let output = run_sheetgraph(
        tmp.path(),
        [
            "analyze",
            "--project",
            path_arg(&project).as_str(),
            "--scene",
            "A",
            "--json",
        ],
    );
    assert_failure(&output);

    let payload = parse_json_stdout(&output);
    assert_eq!(payload["acyclic"], false);
    assert_eq!(
        payload["cycle"],
        json!({ "kind": "scene", "target": "A", "chain": ["A", "B"] })
    );
    assert_eq!(payload["dependencies"]["scenes"], json!([]));
}

#[test]
fn analyze_unknown_scene_fails() {
    let tmp = TempDirGuard::new("analyze-unknown");
    let project = tmp.path().join("project.json");
    write_sample_project(&project);

    let output = run_sheetgraph(
        tmp.path(),
        [
            "analyze",
            "--project",
            path_arg(&project).as_str(),
            "--scene",
            "Nowhere",
        ],
    );
    assert_failure(&output);
    assert!(stderr_text(&output).contains("error:"));
    assert!(stderr_text(&output).contains("Nowhere"));
}

#[test]
fn analyze_requires_a_root() {
    let tmp = TempDirGuard::new("analyze-no-root");
    let project = tmp.path().join("project.json");
    write_sample_project(&project);

    let output = run_sheetgraph(
        tmp.path(),
        ["analyze", "--project", path_arg(&project).as_str()],
    );
    assert_failure(&output);
}

#[test]
fn missing_project_file_fails() {
    let tmp = TempDirGuard::new("missing-project");
    let project = tmp.path().join("absent.json");

    let output = run_sheetgraph(
        tmp.path(),
        ["cycles", "--project", path_arg(&project).as_str()],
    );
    assert_failure(&output);
    assert!(stderr_text(&output).contains("failed to load"));
}

#[test]
fn eligibility_all_json_reports_every_sheet() {
    let tmp = TempDirGuard::new("eligibility-all");
    let project = tmp.path().join("project.json");
    write_sample_project(&project);

    for mode in [None, Some("--sequential")] {
        let mut args = vec![
            "eligibility".to_string(),
            "--project".to_string(),
            path_arg(&project),
            "--all".to_string(),
            "--json".to_string(),
        ];
        args.extend(mode.map(str::to_string));
        let output = run_sheetgraph(tmp.path(), &args);
        assert_success(&output);

        let payload = parse_json_stdout(&output);
        assert_eq!(payload["kind"], "sheetgraph.eligibility.v1");
        assert_eq!(payload["parallel"], mode.is_none());
        assert_eq!(payload["sheet_count"], 2);
        assert_eq!(payload["eligible_count"], 2);
        assert_eq!(
            payload["reports"],
            json!([
                {
                    "sheet": "Common",
                    "verdict": { "kind": "exclusive", "scene": "Level1" },
                    "skipped_cyclic_scenes": []
                },
                {
                    "sheet": "Enemies",
                    "verdict": { "kind": "exclusive", "scene": "Level2" },
                    "skipped_cyclic_scenes": []
                }
            ])
        );
    }
}

#[test]
fn eligibility_verdict_is_not_a_failure() {
    let tmp = TempDirGuard::new("eligibility-single");
    let project = tmp.path().join("project.json");
    write_sample_project(&project);

    let output = run_sheetgraph(
        tmp.path(),
        [
            "eligibility",
            "--project",
            path_arg(&project).as_str(),
            "--sheet",
            "Enemies",
        ],
    );
    assert_success(&output);
    assert!(stdout_text(&output).contains("Enemies: exclusive to Level2"));

    let output = run_sheetgraph(
        tmp.path(),
        [
            "eligibility",
            "--project",
            path_arg(&project).as_str(),
            "--sheet",
            "Ghost",
        ],
    );
    assert_failure(&output);
}

#[test]
fn cycles_exit_code_tracks_cyclic_roots() {
    let tmp = TempDirGuard::new("cycles");
    let cyclic = tmp.path().join("cyclic.json");
    let acyclic = tmp.path().join("acyclic.json");
    write_cyclic_project(&cyclic);
    write_sample_project(&acyclic);

    let output = run_sheetgraph(
        tmp.path(),
        ["cycles", "--project", path_arg(&cyclic).as_str(), "--json"],
    );
    assert_failure(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["kind"], "sheetgraph.cycles.v1");
    assert_eq!(payload["cycle_count"], 2);
    assert_eq!(payload["cycles"][0]["root"], "A");
    assert_eq!(payload["cycles"][0]["chain"], json!(["A", "B"]));

    let output = run_sheetgraph(
        tmp.path(),
        ["cycles", "--project", path_arg(&acyclic).as_str(), "--json"],
    );
    assert_success(&output);
    assert_eq!(parse_json_stdout(&output)["cycle_count"], 0);
}

#[test]
fn config_sources_override_project_naming() {
    let tmp = TempDirGuard::new("config-sources");
    let project = tmp.path().join("project.json");
    write_sample_project(&project);
    let config = tmp.path().join("custom.toml");
    fs::write(
        &config,
        "[sources]\ndirectory = \"gen\"\nprefix = \"Priv\"\nextension = \"cc\"\n",
    )
    .expect("config should be written");

    let output = run_sheetgraph(
        tmp.path(),
        [
            "--config",
            path_arg(&config).as_str(),
            "analyze",
            "--project",
            path_arg(&project).as_str(),
            "--scene",
            "Level1",
            "--json",
        ],
    );
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(
        payload["dependencies"]["source_files"],
        json!(["gen/Priv1.cc", "lib/physics.cpp"])
    );
}

#[test]
fn default_config_is_picked_up_from_working_directory() {
    let tmp = TempDirGuard::new("config-default");
    let project = tmp.path().join("project.json");
    write_sample_project(&project);
    fs::write(
        tmp.path().join("sheetgraph.toml"),
        "[eligibility]\nparallel = false\n",
    )
    .expect("default config should be written");

    let output = run_sheetgraph(
        tmp.path(),
        [
            "eligibility",
            "--project",
            path_arg(&project).as_str(),
            "--all",
            "--json",
        ],
    );
    assert_success(&output);
    assert_eq!(parse_json_stdout(&output)["parallel"], false);
}

#[test]
fn missing_explicit_config_fails() {
    let tmp = TempDirGuard::new("config-missing");
    let project = tmp.path().join("project.json");
    write_sample_project(&project);
    let config = tmp.path().join("nope.toml");

    let output = run_sheetgraph(
        tmp.path(),
        [
            "--config",
            path_arg(&config).as_str(),
            "cycles",
            "--project",
            path_arg(&project).as_str(),
        ],
    );
    assert_failure(&output);
    assert!(stderr_text(&output).contains("config file not found"));
}
