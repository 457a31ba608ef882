use std::io::Write;

use assert_cmd::Command;
use tempfile::NamedTempFile;

fn edspaths() -> Command {
    Command::cargo_bin("edspaths").unwrap()
}

fn eds_file(text: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    writeln!(f, "{text}").unwrap();
    f
}

#[test]
fn paths_from_file_writes_tsv() {
    let input = eds_file("_GGG{CCG,AGGGA}A_");
    let out = NamedTempFile::new().unwrap();
    let assert = edspaths()
        .args(["paths", "--input"])
        .arg(input.path())
        .arg("--outfile")
        .arg(out.path())
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.contains("score\t5"), "{stdout}");
    assert!(stdout.contains("paths\t2"), "{stdout}");

    let tsv = std::fs::read_to_string(out.path()).unwrap();
    let lines: Vec<&str> = tsv.lines().collect();
    assert_eq!(lines[0], "path\tlength\tweight\tfirst\tlast\ttext\tvertices");
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("1\t6\t6\t(0,0,1)\t(1,0,2)\tGGGCCG\t"), "{}", lines[1]);
    assert!(lines[2].starts_with("2\t3\t3\t(1,1,1)\t(1,1,3)\tGGG\t"), "{}", lines[2]);
}

#[test]
fn paths_from_stdin() {
    let out = NamedTempFile::new().unwrap();
    let assert = edspaths()
        .arg("paths")
        .arg("--outfile")
        .arg(out.path())
        .write_stdin("  _GGG{ATT,ATA,}AGCGC_\n")
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.contains("score\t4"), "{stdout}");
    let tsv = std::fs::read_to_string(out.path()).unwrap();
    assert!(tsv.contains("GGG_AGCGC_"), "{tsv}");
}

#[test]
fn penalty_and_weights_are_configurable() {
    let input = eds_file("_GGAGG_");
    let out = NamedTempFile::new().unwrap();
    let assert = edspaths()
        .args(["paths", "--penalty", "1", "--mismatch", "-5", "--input"])
        .arg(input.path())
        .arg("--outfile")
        .arg(out.path())
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.contains("score\t2"), "{stdout}");
    assert!(stdout.contains("paths\t2"), "{stdout}");
}

#[test]
fn segments_table() {
    let input = eds_file("_A{C,,GT}{A,G}_");
    let out = NamedTempFile::new().unwrap();
    edspaths()
        .args(["segments", "--input"])
        .arg(input.path())
        .arg("--outfile")
        .arg(out.path())
        .assert()
        .success();
    let tsv = std::fs::read_to_string(out.path()).unwrap();
    let lines: Vec<&str> = tsv.lines().collect();
    assert_eq!(lines[0], "segment\tlayer\ttext\tweights");
    assert_eq!(lines[1], "0\t0\t_A\t0,-1");
    assert_eq!(lines[2], "1\t0\tC\t1");
    assert_eq!(lines[3], "1\t1\t_\t0");
    assert_eq!(lines[4], "1\t2\tGT\t1,-1");
    assert_eq!(lines[5], "2\t0\t_\t0");
    assert_eq!(lines.len(), 9);
}

#[test]
fn malformed_input_fails() {
    let out = NamedTempFile::new().unwrap();
    edspaths()
        .arg("paths")
        .arg("--outfile")
        .arg(out.path())
        .write_stdin("_A,C_")
        .assert()
        .failure();
}

#[test]
fn missing_file_fails() {
    edspaths()
        .args(["paths", "--input", "/nonexistent/input.eds"])
        .assert()
        .failure();
}

#[test]
fn negative_penalty_fails() {
    let out = NamedTempFile::new().unwrap();
    edspaths()
        .args(["paths", "--penalty", "-1", "--outfile"])
        .arg(out.path())
        .write_stdin("_GG_")
        .assert()
        .failure();
}
