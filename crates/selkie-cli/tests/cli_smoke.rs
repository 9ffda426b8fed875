use assert_cmd::Command;
use std::fs;

fn write_fixture(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

#[test]
fn parse_accepts_a_valid_flowchart() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let fixture = write_fixture(&tmp, "basic.mmd", "graph TD; A-->B;\n");

    let exe = assert_cmd::cargo_bin!("selkie-cli");
    Command::new(exe)
        .args(["parse", fixture.to_string_lossy().as_ref()])
        .assert()
        .success()
        .stdout("No errors\n");
}

#[test]
fn parse_rejects_a_dangling_edge() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let fixture = write_fixture(&tmp, "dangling.mmd", "graph TD; A-->\n");

    let exe = assert_cmd::cargo_bin!("selkie-cli");
    Command::new(exe)
        .args(["parse", fixture.to_string_lossy().as_ref()])
        .assert()
        .code(1);
}

#[test]
fn parse_reads_stdin_dash() {
    let exe = assert_cmd::cargo_bin!("selkie-cli");
    Command::new(exe)
        .args(["parse", "-"])
        .write_stdin("```mermaid\ngraph TD; A-->B;\n```")
        .assert()
        .success()
        .stdout("No errors\n");
}

#[test]
fn empty_diagram_is_a_failing_verdict() {
    let exe = assert_cmd::cargo_bin!("selkie-cli");
    Command::new(exe)
        .args(["parse", "-"])
        .write_stdin("```mermaid\n```")
        .assert()
        .code(1)
        .stdout("Empty diagram\n");
}

#[test]
fn detect_prints_the_token() {
    let exe = assert_cmd::cargo_bin!("selkie-cli");
    Command::new(exe)
        .args(["detect", "-"])
        .write_stdin("sequenceDiagram\nAlice->>Bob: Hello\n")
        .assert()
        .success()
        .stdout("sequence\n");
}

#[test]
fn detect_json_output() {
    let exe = assert_cmd::cargo_bin!("selkie-cli");
    Command::new(exe)
        .args(["detect", "-", "--json"])
        .write_stdin("graph TD; A-->B;\n")
        .assert()
        .success()
        .stdout("{\"diagram_type\":\"flowchart-v2\"}\n");
}

#[test]
fn unrecognized_markup_detects_as_empty_and_fails() {
    let exe = assert_cmd::cargo_bin!("selkie-cli");
    Command::new(exe)
        .args(["detect", "-"])
        .write_stdin("certainly not mermaid\n")
        .assert()
        .code(1)
        .stdout("\n");
}

#[test]
fn missing_command_is_a_usage_error() {
    let exe = assert_cmd::cargo_bin!("selkie-cli");
    Command::new(exe).assert().code(2);
}

#[test]
fn unknown_option_is_a_usage_error() {
    let exe = assert_cmd::cargo_bin!("selkie-cli");
    Command::new(exe)
        .args(["parse", "--frobnicate"])
        .assert()
        .code(2);
}
