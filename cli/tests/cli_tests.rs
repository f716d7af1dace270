use std::fs;
use std::path::PathBuf;

use clap::Parser;
use dtokit_cli::{Cli, Command, InspectArgs, MergeArgs, derive_schema, run_inspect, run_merge};
use dtokit_model::Dto;
use dtokit_store::Mapping;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn merge_args(index: &str, inputs: Vec<PathBuf>) -> MergeArgs {
    MergeArgs {
        index: index.to_string(),
        inputs,
        output: None,
        pretty: false,
        delimiter: b',',
    }
}

fn people(dir: &TempDir) -> PathBuf {
    write(
        dir,
        "people.csv",
        "name,id,email\ntangoman,1,a@x.io\nfoobar,2,b@x.io\n",
    )
}

// ── Argument parsing ─────────────────────────────────────────────

#[test]
fn parses_merge_command() {
    let cli = Cli::try_parse_from([
        "dtokit", "merge", "--index", "name", "a.csv", "b.json", "-o", "out.json", "--pretty",
    ])
    .unwrap();
    let Command::Merge(args) = cli.command else {
        panic!("expected merge");
    };
    assert_eq!(args.index, "name");
    assert_eq!(args.inputs, vec![PathBuf::from("a.csv"), PathBuf::from("b.json")]);
    assert_eq!(args.output, Some(PathBuf::from("out.json")));
    assert!(args.pretty);
    assert_eq!(args.delimiter, b',');
    assert!(!cli.verbose);
}

#[test]
fn parses_inspect_with_verbose_and_delimiter() {
    let cli = Cli::try_parse_from(["dtokit", "inspect", "-v", "--delimiter", ";", "a.csv"]).unwrap();
    assert!(cli.verbose);
    let Command::Inspect(args) = cli.command else {
        panic!("expected inspect");
    };
    assert_eq!(args.delimiter, b';');
}

#[test]
fn rejects_missing_inputs_and_bad_delimiter() {
    assert!(Cli::try_parse_from(["dtokit", "merge", "--index", "name"]).is_err());
    assert!(Cli::try_parse_from(["dtokit", "inspect", "--delimiter", "::", "a.csv"]).is_err());
}

// ── Schema derivation ────────────────────────────────────────────

#[test]
fn derived_schema_uses_first_seen_key_order() {
    let records: Vec<Mapping> = [json!({"b": 1, "a": 2}), json!({"c": 3, "a": 4})]
        .into_iter()
        .map(|v| match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        })
        .collect();
    let schema = derive_schema(&records).unwrap();
    assert_eq!(schema.fields(), vec!["b", "a", "c"]);
}

#[test]
fn derived_schema_needs_fields() {
    assert!(derive_schema(&[]).is_err());
}

// ── Merge ────────────────────────────────────────────────────────

#[test]
fn merge_fills_in_and_overrides() {
    let dir = TempDir::new().unwrap();
    let updates = write(
        &dir,
        "updates.json",
        r#"[{"name": "foobar", "id": "666"}, {"name": "pingpong"}]"#,
    );
    let report = run_merge(&merge_args("name", vec![people(&dir), updates])).unwrap();

    assert_eq!(report.read, 4);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.merged.len(), 3);
    let foobar = report.merged.get("foobar").unwrap();
    assert_eq!(foobar.get("id").unwrap(), json!("666"));
    assert_eq!(foobar.get("email").unwrap(), json!("b@x.io"));
    assert_eq!(
        report.rendered(),
        vec![
            r#"{"name":"tangoman","id":"1","email":"a@x.io"}"#,
            r#"{"name":"foobar","id":"666","email":"b@x.io"}"#,
            r#"{"name":"pingpong","id":null,"email":null}"#,
        ]
    );
}

#[test]
fn merge_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("merged.json");
    let args = MergeArgs {
        output: Some(output.clone()),
        ..merge_args("name", vec![people(&dir)])
    };
    run_merge(&args).unwrap();

    let written: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(
        written,
        json!([
            {"name": "tangoman", "id": "1", "email": "a@x.io"},
            {"name": "foobar", "id": "2", "email": "b@x.io"},
        ])
    );
}

#[test]
fn merge_skips_records_without_index_value() {
    let dir = TempDir::new().unwrap();
    let input = write(
        &dir,
        "sparse.json",
        r#"[{"name": "a", "id": 1}, {"id": 2}, {}]"#,
    );
    let report = run_merge(&merge_args("name", vec![input])).unwrap();
    assert_eq!(report.read, 3);
    assert_eq!(report.skipped, 2);
    assert_eq!(report.merged.len(), 1);
}

#[test]
fn merge_treats_blank_csv_cells_as_unset() {
    let dir = TempDir::new().unwrap();
    let base = write(
        &dir,
        "base.csv",
        "name,email,id\nfoobar,b@x.io,2\n,orphan@x.io,9\n",
    );
    let updates = write(&dir, "updates.csv", "name,email,id\nfoobar,,666\n");
    let report = run_merge(&merge_args("name", vec![base, updates])).unwrap();

    assert_eq!(report.read, 3);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.merged.len(), 1);
    assert!(!report.merged.contains(""));
    assert_eq!(
        report.rendered(),
        vec![r#"{"name":"foobar","email":"b@x.io","id":"666"}"#]
    );
}

#[test]
fn merge_keeps_empty_json_strings() {
    let dir = TempDir::new().unwrap();
    let input = write(
        &dir,
        "people.json",
        r#"[{"name": "foobar", "email": "b@x.io"}, {"name": "foobar", "email": ""}]"#,
    );
    let report = run_merge(&merge_args("name", vec![input])).unwrap();
    let foobar = report.merged.get("foobar").unwrap();
    assert_eq!(foobar.get("email").unwrap(), json!(""));
}

#[test]
fn merge_rejects_unknown_index_field() {
    let dir = TempDir::new().unwrap();
    let err = run_merge(&merge_args("nickname", vec![people(&dir)])).unwrap_err();
    assert!(err.to_string().contains("nickname"));
}

#[test]
fn merge_reports_unreadable_input() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.csv");
    let err = run_merge(&merge_args("name", vec![missing])).unwrap_err();
    assert!(err.to_string().starts_with("Failed to read"));
}

// ── Inspect ──────────────────────────────────────────────────────

#[test]
fn inspect_counts_records() {
    let dir = TempDir::new().unwrap();
    let input = write(
        &dir,
        "people.json",
        r#"[
            {"name": "a", "id": 1},
            {"name": "a", "id": 1},
            {"name": "b"}
        ]"#,
    );
    let report = run_inspect(&InspectArgs {
        inputs: vec![input],
        delimiter: b',',
    })
    .unwrap();
    assert_eq!(report.fields, vec!["name", "id"]);
    assert_eq!(report.records, 3);
    assert_eq!(report.complete, 2);
    assert_eq!(report.distinct, 2);
    assert_eq!(
        report.to_string(),
        "fields:   name, id\nrecords:  3\ncomplete: 2\ndistinct: 2"
    );
}
