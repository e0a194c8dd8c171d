use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn anymod() -> Command {
    let mut cmd = Command::cargo_bin("anymod").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn workspace() -> TempDir {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("notes.txt"), "first\nsecond\n").unwrap();
    fs::write(tmp.path().join("app.json"), r#"{"debug": true, "port": 8080}"#).unwrap();
    fs::create_dir(tmp.path().join("pkg")).unwrap();
    fs::write(tmp.path().join("pkg/settings.ini"), "[server]\nhost = localhost\n[paths]\nroot=/srv\n")
        .unwrap();
    tmp
}

#[test]
fn without_arguments_prints_help() {
    anymod().assert().failure().stderr(predicate::str::contains("Usage"));
}

#[test]
fn resolves_a_native_text_unit() {
    let tmp = workspace();

    anymod()
        .arg("resolve")
        .arg("notes")
        .arg("-I")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("name:    notes"))
        .stdout(predicate::str::contains("handler: TextHandler"))
        .stdout(predicate::str::contains("summary: text, 2 lines, 13 bytes"));
}

#[test]
fn resolves_nested_names_from_the_working_directory() {
    let tmp = workspace();

    anymod()
        .current_dir(tmp.path())
        .args(["resolve", "pkg.settings"])
        .assert()
        .success()
        .stdout(predicate::str::contains("handler: IniHandler"))
        .stdout(predicate::str::contains("summary: config, 2 sections, 2 fields"))
        .stdout(predicate::str::contains("sections: server, paths"))
        .stdout(predicate::str::contains("settings.ini"));
}

#[test]
fn resolves_json_with_its_kind() {
    let tmp = workspace();

    anymod()
        .args(["resolve", "app", "-I"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("handler: JsonHandler"))
        .stdout(predicate::str::contains("kind:    object"));
}

#[test]
fn unknown_names_fail_with_context() {
    let tmp = workspace();

    anymod()
        .args(["resolve", "missing", "-I"])
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to resolve 'missing'"))
        .stderr(predicate::str::contains("no unit named 'missing'"));
}

#[test]
fn malformed_names_are_rejected() {
    anymod().args(["resolve", "1.bad"]).assert().failure().stderr(predicate::str::contains("1.bad"));
}

#[test]
fn bindings_list_native_entries_first() {
    let output = anymod().arg("bindings").assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(output).unwrap();
    let lines: Vec<_> = stdout.lines().collect();

    assert!(lines[0].starts_with(".txt") && lines[0].ends_with("native"), "{stdout}");
    assert!(lines[1].starts_with(".bin") && lines[1].ends_with("native"), "{stdout}");
    assert!(stdout.contains("JsonHandler"));
    assert!(lines.iter().skip(2).all(|line| line.ends_with("open")), "{stdout}");
}

#[test]
fn handlers_flag_limits_installed_formats() {
    anymod()
        .args(["bindings", "--handlers", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".json"))
        .stdout(predicate::str::contains(".ini").not())
        .stdout(predicate::str::contains(".png").not());
}

#[test]
fn unknown_handler_names_are_usage_errors() {
    anymod()
        .args(["bindings", "--handlers", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown handler 'yaml'"));
}

#[test]
fn disabled_handlers_leave_their_files_unresolved() {
    let tmp = workspace();

    anymod()
        .args(["resolve", "app", "--handlers", "ini", "-I"])
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no unit named 'app'"));
}

#[test]
fn environment_overrides_configuration() {
    let tmp = workspace();

    anymod()
        .env("ANYMOD__RESOLVER__SEARCH_PATHS", tmp.path())
        .env("ANYMOD__RESOLVER__HANDLERS", "json")
        .args(["resolve", "app"])
        .assert()
        .success()
        .stdout(predicate::str::contains("handler: JsonHandler"));
}

#[test]
fn configuration_file_sets_search_paths() {
    let tmp = workspace();
    let config = tmp.path().join("anymod.json");
    let body = config_json(tmp.path().join("pkg").to_string_lossy().as_ref());
    fs::write(&config, body).unwrap();

    anymod()
        .arg("--config")
        .arg(&config)
        .args(["resolve", "settings"])
        .assert()
        .success()
        .stdout(predicate::str::contains("handler: IniHandler"));
}

#[test]
fn command_line_search_paths_win_over_configuration() {
    let tmp = workspace();
    let config = tmp.path().join("anymod.json");
    fs::write(&config, config_json("/nonexistent")).unwrap();

    anymod()
        .arg("--config")
        .arg(&config)
        .arg("-I")
        .arg(tmp.path())
        .args(["resolve", "notes"])
        .assert()
        .success();
}

#[test]
fn missing_configuration_file_fails() {
    anymod()
        .args(["--config", "/nonexistent/anymod.toml", "bindings"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

fn config_json(search_path: &str) -> String {
    format!(r#"{{"resolver": {{"search_paths": [{search_path:?}]}}, "logging": {{"level": "error"}}}}"#)
}
