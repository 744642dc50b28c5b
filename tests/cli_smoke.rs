use assert_cmd::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn write_loc_csv(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("loc.csv");
    let csv = "\
commit,file,type,line,depth,length,date,time,timezone,datetime,author
abc,src/a.js,js,1,0,30,2024-01-01,09:30,+00:00,2024-01-01T09:30:00+00:00,ada
abc,src/a.js,js,2,1,40,2024-01-01,09:30,+00:00,2024-01-01T09:30:00+00:00,ada
abc,src/a.js,js,3,0,20,2024-01-01,09:30,+00:00,2024-01-01T09:30:00+00:00,ada
def,style.css,css,1,0,12,2024-01-05,22:00,+00:00,2024-01-05T22:00:00+00:00,ada
def,style.css,css,2,0,18,2024-01-05,22:00,+00:00,2024-01-05T22:00:00+00:00,ada
";
    fs::write(&path, csv).unwrap();
    path
}

fn write_projects_json(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("projects.json");
    let json = r#"[
        {"title": "Visualizer", "image": "images/viz.png", "description": "Commit scatterplot", "year": 2024},
        {"title": "Parser", "image": "images/parser.png", "description": "Streaming CSV reader", "year": 2024},
        {"title": "Gallery", "image": "images/gallery.png", "description": "Project pie chart", "year": 2023}
    ]"#;
    fs::write(&path, json).unwrap();
    path
}

#[test]
fn stats_json_reports_summary_figures() {
    let dir = tempdir().unwrap();
    let input = write_loc_csv(dir.path());

    let mut cmd = Command::cargo_bin("locmap").unwrap();
    cmd.arg("--input").arg(&input).args(["stats", "--json"]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();

    assert_eq!(v["summary"]["commits"], 2);
    assert_eq!(v["summary"]["files"], 2);
    assert_eq!(v["summary"]["total_loc"], 5);
    assert_eq!(v["summary"]["max_line"], 3);
    let langs = v["languages"].as_array().unwrap();
    assert_eq!(langs.len(), 2);
    let pct_sum: f64 = langs.iter().map(|l| l["pct"].as_f64().unwrap()).sum();
    assert!((pct_sum - 100.0).abs() < 0.1);
}

#[test]
fn stats_ndjson_leads_with_the_summary_record() {
    let dir = tempdir().unwrap();
    let input = write_loc_csv(dir.path());

    let mut cmd = Command::cargo_bin("locmap").unwrap();
    cmd.arg("--input").arg(&input).args(["stats", "--ndjson"]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let lines: Vec<serde_json::Value> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    // Summary first, then one record per language.
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["commits"], 2);
    assert_eq!(lines[0]["total_loc"], 5);
    assert!(lines[1].get("kind").is_some());
    assert!(lines[2].get("kind").is_some());
}

#[test]
fn export_json_outputs_sorted_entries_without_backrefs() {
    let dir = tempdir().unwrap();
    let input = write_loc_csv(dir.path());

    let mut cmd = Command::cargo_bin("locmap").unwrap();
    cmd.arg("--input")
        .arg(&input)
        .args(["--repo-url", "https://example.com/repo", "export", "--json"]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();

    let entries = v["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["id"], "abc");
    assert_eq!(entries[0]["total_lines"], 3);
    assert_eq!(entries[0]["url"], "https://example.com/repo/commit/abc");
    assert_eq!(entries[1]["id"], "def");
    // The constituent-line back-reference stays internal.
    assert!(entries[0].get("lines").is_none());
}

#[test]
fn until_flag_is_boundary_inclusive() {
    let dir = tempdir().unwrap();
    let input = write_loc_csv(dir.path());

    let mut cmd = Command::cargo_bin("locmap").unwrap();
    cmd.arg("--input")
        .arg(&input)
        .args(["--until", "2024-01-05T22:00:00+00:00", "export", "--json"]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["entries"].as_array().unwrap().len(), 2);

    let mut cmd = Command::cargo_bin("locmap").unwrap();
    cmd.arg("--input")
        .arg(&input)
        .args(["--until", "2024-01-04", "export", "--json"]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["entries"].as_array().unwrap().len(), 1);
}

#[test]
fn missing_input_fails_before_any_output() {
    let dir = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("locmap").unwrap();
    cmd.arg("--input")
        .arg(dir.path().join("absent.csv"))
        .args(["stats", "--json"]);
    cmd.assert().failure();
}

#[test]
fn malformed_row_fails_the_whole_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("loc.csv");
    fs::write(
        &path,
        "commit,file,type,line,depth,length,date,time,timezone,datetime,author\n\
         abc,a.js,js,NOT_A_NUMBER,0,30,2024-01-01,09:30,+00:00,2024-01-01T09:30:00+00:00,ada\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("locmap").unwrap();
    cmd.arg("--input").arg(&path).args(["export", "--json"]);
    cmd.assert().failure();
}

#[test]
fn projects_json_rolls_up_years_and_filters() {
    let dir = tempdir().unwrap();
    let projects = write_projects_json(dir.path());

    let mut cmd = Command::cargo_bin("locmap").unwrap();
    cmd.args(["projects", "--json", "--file"]).arg(&projects);
    let out = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["total"], 3);
    let years = v["years"].as_array().unwrap();
    assert_eq!(years[0]["year"], "2024");
    assert_eq!(years[0]["count"], 2);

    let mut cmd = Command::cargo_bin("locmap").unwrap();
    cmd.args(["projects", "--json", "--query", "scatter", "--file"])
        .arg(&projects);
    let out = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["total"], 1);
    assert_eq!(v["projects"][0]["title"], "Visualizer");
}
