use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::{CliTest, stderr, stdout};

const FIELD: &str = "src/a.ts@A.items";

const COMPONENT: &str = r#"import { Component, QueryList, ViewChildren } from '@angular/core';

@Component({
  selector: 'app-a',
  host: { '[title]': 'items.get(0)' },
})
export class A {
  @ViewChildren('b') items!: QueryList<unknown>;

  first() {
    return this.items.get(0);
  }
}
"#;

fn offset(text: &str, needle: &str) -> u32 {
    text.find(needle).unwrap() as u32
}

fn span(start: u32, end: u32) -> Value {
    json!({ "start": start, "end": end })
}

/// `items.get(0)` with `items` starting at `base`.
fn items_get_call(base: u32) -> Value {
    json!({
        "type": "call",
        "span": span(base, base + 12),
        "receiver": {
            "type": "propertyRead",
            "span": span(base, base + 9),
            "nameSpan": span(base + 6, base + 9),
            "name": "get",
            "receiver": {
                "type": "propertyRead",
                "span": span(base, base + 5),
                "nameSpan": span(base, base + 5),
                "name": "items",
                "receiver": { "type": "implicitReceiver", "span": span(base, base) }
            }
        },
        "args": [
            { "type": "literalPrimitive", "span": span(base + 10, base + 11), "value": 0 }
        ]
    })
}

fn ts_reference(file: &str, start: u32) -> Value {
    json!({ "kind": "ts", "target": { "key": FIELD }, "file": file, "start": start, "end": start + 5 })
}

fn manifest(is_multi: bool, references: Vec<Value>) -> Value {
    json!({
        "knownQueryFields": { FIELD: { "isMulti": is_multi } },
        "references": references
    })
}

fn setup_component(test: &CliTest) -> Result<u32> {
    test.write_file("src/a.ts", COMPONENT)?;
    Ok(offset(COMPONENT, "items.get(0);"))
}

#[test]
fn test_plan_ts_reference() -> Result<()> {
    let test = CliTest::new()?;
    let start = setup_component(&test)?;
    test.write_manifest(&manifest(true, vec![ts_reference("src/a.ts", start)]))?;

    let output = test.plan_command().output()?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("rewrite: get() -> at()"), "stdout: {}", out);
    assert!(out.contains("--> src/a.ts:11:23"), "stdout: {}", out);
    assert!(out.contains("    return this.items.get(0);"));
    assert!(out.contains("^^^ help: replace with `at`"));
    assert!(out.contains("Would rewrite 1 `get` call(s) in 1 file(s)."));
    assert_eq!(stderr(&output), "");

    Ok(())
}

#[test]
fn test_plan_json_covers_all_reference_kinds() -> Result<()> {
    let test = CliTest::new()?;
    let ts_start = setup_component(&test)?;
    let host_start = offset(COMPONENT, "'items.get(0)'");
    let template = "<p>{{ items.get(0) }}</p>\n";
    test.write_file("src/a.html", template)?;
    let template_base = offset(template, "items");

    test.write_manifest(&manifest(
        true,
        vec![
            ts_reference("src/a.ts", ts_start),
            json!({
                "kind": "template",
                "target": { "key": FIELD },
                "templateFile": "src/a.html",
                "read": span(template_base, template_base + 5),
                "expression": items_get_call(template_base)
            }),
            json!({
                "kind": "hostBinding",
                "target": { "key": FIELD },
                "file": "src/a.ts",
                "hostPropertyStart": host_start,
                "read": span(0, 5),
                "expression": items_get_call(0)
            }),
        ],
    ))?;

    let output = test.plan_command().args(["--format", "json"]).output()?;
    assert_eq!(output.status.code(), Some(1), "stderr: {}", stderr(&output));

    let report: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(report["referencesChecked"], 3);
    assert_eq!(
        report["replacements"],
        json!([
            { "file": "src/a.ts", "update": { "position": ts_start + 6, "end": ts_start + 9, "toInsert": "at" } },
            { "file": "src/a.html", "update": { "position": template_base + 6, "end": template_base + 9, "toInsert": "at" } },
            { "file": "src/a.ts", "update": { "position": host_start + 7, "end": host_start + 10, "toInsert": "at" } }
        ])
    );
    assert_eq!(report["loadIssues"], json!([]));
    assert_eq!(report["skippedReferences"], json!([]));

    let position = report["replacements"][2]["update"]["position"].as_u64().unwrap() as usize;
    assert_eq!(&COMPONENT[position..position + 3], "get");

    Ok(())
}

#[test]
fn test_plan_skips_non_multi_query() -> Result<()> {
    let test = CliTest::new()?;
    let start = setup_component(&test)?;
    test.write_manifest(&manifest(false, vec![ts_reference("src/a.ts", start)]))?;

    let output = test.plan_command().output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "\u{2713} Checked 1 reference in 1 file - nothing to migrate\n"
    );

    Ok(())
}

#[test]
fn test_plan_ignores_configured_files() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/legacy/a.ts", COMPONENT)?;
    test.write_file(".queryshiftrc.json", r#"{ "ignores": ["src/legacy/**"] }"#)?;
    let start = offset(COMPONENT, "items.get(0);");
    test.write_manifest(&manifest(
        true,
        vec![ts_reference("src/legacy/a.ts", start)],
    ))?;

    let output = test.plan_command().output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Checked 0 references in 0 files"));

    Ok(())
}

#[test]
fn test_plan_ignores_match_normalized_paths() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/legacy/a.ts", COMPONENT)?;
    test.write_file(".queryshiftrc.json", r#"{ "ignores": ["**/legacy/**"] }"#)?;
    let start = offset(COMPONENT, "items.get(0);");
    test.write_manifest(&manifest(
        true,
        vec![ts_reference("./src/legacy/a.ts", start)],
    ))?;

    let output = test.plan_command().output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Checked 0 references in 0 files"));

    Ok(())
}

#[test]
fn test_plan_unknown_kind_does_not_abort() -> Result<()> {
    let test = CliTest::new()?;
    let start = setup_component(&test)?;
    test.write_manifest(&manifest(
        true,
        vec![
            json!({ "kind": "inputBinding", "target": { "key": FIELD }, "file": "src/a.html", "span": [3, 8] }),
            ts_reference("src/a.ts", start),
        ],
    ))?;

    let output = test.plan_command().args(["--format", "json"]).output()?;
    assert_eq!(output.status.code(), Some(1), "stderr: {}", stderr(&output));

    let report: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(report["referencesChecked"], 1);
    assert_eq!(report["replacements"][0]["update"]["position"], start + 6);
    assert_eq!(report["skippedReferences"], json!([]));

    let verbose = test.plan_command().arg("-v").output()?;
    assert!(stderr(&verbose).contains("1 reference(s) of an unsupported kind"));

    Ok(())
}

#[test]
fn test_plan_host_expression_outside_literal_is_skipped() -> Result<()> {
    let test = CliTest::new()?;
    setup_component(&test)?;
    let host_start = offset(COMPONENT, "'items.get(0)'");
    // `get` claimed 20 bytes into a 12 byte expression.
    let mut expression = items_get_call(0);
    expression["receiver"]["nameSpan"] = span(20, 23);
    test.write_manifest(&manifest(
        true,
        vec![json!({
            "kind": "hostBinding",
            "target": { "key": FIELD },
            "file": "src/a.ts",
            "hostPropertyStart": host_start,
            "read": span(0, 5),
            "expression": expression
        })],
    ))?;

    let output = test.plan_command().args(["--format", "json"]).output()?;
    assert_eq!(output.status.code(), Some(0));

    let report: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(report["replacements"], json!([]));
    assert_eq!(report["skippedReferences"][0]["filePath"], "src/a.ts");
    assert!(
        report["skippedReferences"][0]["reason"]
            .as_str()
            .unwrap()
            .contains("does not fit inside the literal")
    );
    assert_eq!(test.read_file("src/a.ts")?, COMPONENT);

    Ok(())
}

#[test]
fn test_plan_manifest_flag_overrides_config() -> Result<()> {
    let test = CliTest::new()?;
    let start = setup_component(&test)?;
    test.write_file(
        "build/refs.json",
        &manifest(true, vec![ts_reference("src/a.ts", start)]).to_string(),
    )?;

    let output = test
        .plan_command()
        .args(["--manifest", "build/refs.json"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Would rewrite 1 `get` call(s)"));

    Ok(())
}

#[test]
fn test_plan_missing_source_is_load_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_manifest(&manifest(true, vec![ts_reference("src/missing.ts", 0)]))?;

    let output = test.plan_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(
        stderr(&output).contains("could not load source file src/missing.ts"),
        "stderr: {}",
        stderr(&output)
    );

    Ok(())
}

#[test]
fn test_plan_out_of_range_reference_is_skipped() -> Result<()> {
    let test = CliTest::new()?;
    setup_component(&test)?;
    test.write_manifest(&manifest(true, vec![ts_reference("src/a.ts", 100_000)]))?;

    let output = test.plan_command().output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stderr(&output).contains("1 reference(s) were skipped (use -v for details)"));

    let verbose = test.plan_command().arg("-v").output()?;
    assert!(stderr(&verbose).contains("out of range"));
    assert!(!stderr(&verbose).contains("were skipped"));

    Ok(())
}

#[test]
fn test_plan_missing_manifest() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.plan_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to read reference manifest"));

    Ok(())
}
