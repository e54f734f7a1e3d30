use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_jscov-cobertura"))
}

#[test]
fn shows_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cobertura"));
}

#[test]
fn converts_default_locations() {
    let dir = tempfile::tempdir().unwrap();
    let coverage_dir = dir.path().join("target").join("coverage");
    fs::create_dir_all(&coverage_dir).unwrap();
    fs::write(
        coverage_dir.join("jscoverage.json"),
        r#"{"a.js": {"coverage": [null, 1, 0, 2]}}"#,
    )
    .unwrap();

    cmd()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Output written to"));

    let xml = fs::read_to_string(coverage_dir.join("cobertura-coverage.xml")).unwrap();
    assert!(xml.contains(r#"filename="a.js""#));
}

#[test]
fn explicit_paths_and_quiet() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.json"), r#"{"b.js": {"coverage": [1]}}"#).unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["-i", "in.json", "-o", "out.xml", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(dir.path().join("out.xml").exists());
}

#[test]
fn reads_paths_from_config() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("cov.json"), r#"{"c.js": {"coverage": [0]}}"#).unwrap();
    fs::write(
        dir.path().join("jscov-cobertura.toml"),
        "[paths]\ninput = \"cov.json\"\noutput = \"report/cobertura.xml\"\n",
    )
    .unwrap();

    cmd().current_dir(dir.path()).arg("-q").assert().success();

    let xml = fs::read_to_string(dir.path().join("report").join("cobertura.xml")).unwrap();
    assert!(xml.contains(r#"line-rate="0""#));
}

#[test]
fn fails_on_malformed_input() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.json"), r#"{"a.js": {"coverage": ["x"]}}"#).unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["-i", "in.json", "-o", "out.xml"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Malformed coverage input"));

    assert!(!dir.path().join("out.xml").exists());
}

#[test]
fn fails_on_missing_input() {
    let dir = tempfile::tempdir().unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["-i", "nope.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.json"));
}

#[test]
fn rejects_same_input_and_output() {
    let dir = tempfile::tempdir().unwrap();
    let json = r#"{"a.js": {"coverage": [1]}}"#;
    fs::write(dir.path().join("in.json"), json).unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["-i", "in.json", "-o", "in.json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("both point to"));

    assert_eq!(fs::read_to_string(dir.path().join("in.json")).unwrap(), json);
}

#[test]
fn rejects_output_spelled_differently_from_input() {
    let dir = tempfile::tempdir().unwrap();
    let json = r#"{"a.js": {"coverage": [1]}}"#;
    fs::write(dir.path().join("in.json"), json).unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();

    for output in ["sub/../in.json", "./in.json", "missing/../in.json"] {
        cmd()
            .current_dir(dir.path())
            .args(["-i", "in.json", "-o", output, "-q"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("both point to"));
    }

    assert_eq!(fs::read_to_string(dir.path().join("in.json")).unwrap(), json);
    assert!(!dir.path().join("missing").exists());
}

#[test]
fn resolves_paths_against_base_dir() {
    let dir = tempfile::tempdir().unwrap();
    let project = dir.path().join("project");
    fs::create_dir(&project).unwrap();
    fs::write(project.join("in.json"), r#"{"a.js": {"coverage": [1]}}"#).unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["-b", "project", "-i", "in.json", "-o", "out.xml", "-q"])
        .assert()
        .success();

    assert!(project.join("out.xml").exists());
    assert!(!dir.path().join("out.xml").exists());
}

#[test]
fn cli_flags_override_config() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("cov.json"), r#"{"c.js": {"coverage": [2]}}"#).unwrap();
    fs::write(
        dir.path().join("jscov-cobertura.toml"),
        "[paths]\ninput = \"cov.json\"\noutput = \"from-config.xml\"\n",
    )
    .unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["-o", "from-cli.xml", "-q"])
        .assert()
        .success();

    let xml = fs::read_to_string(dir.path().join("from-cli.xml")).unwrap();
    assert!(xml.contains(r#"filename="c.js""#));
    assert!(!dir.path().join("from-config.xml").exists());
}

#[test]
fn fails_on_missing_explicit_config() {
    let dir = tempfile::tempdir().unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["--config", "missing.toml"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("missing.toml"));
}

#[test]
fn config_paths_are_relative_to_config_dir() {
    let dir = tempfile::tempdir().unwrap();
    let conf = dir.path().join("conf");
    fs::create_dir(&conf).unwrap();
    fs::write(conf.join("cov.json"), r#"{"d.js": {"coverage": [null, 1]}}"#).unwrap();
    fs::write(
        conf.join("settings.toml"),
        "[paths]\ninput = \"cov.json\"\noutput = \"out.xml\"\n",
    )
    .unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["-c", "conf/settings.toml", "-q"])
        .assert()
        .success();

    assert!(conf.join("out.xml").exists());
    assert!(!dir.path().join("out.xml").exists());
}
