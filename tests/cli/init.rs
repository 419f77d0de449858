use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("Created .queryshiftrc.json"));
    assert!(
        out.contains("reading references from queryshift.refs.json"),
        "stdout: {}",
        out
    );

    let content = test.read_file(".queryshiftrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["manifest"], "queryshift.refs.json");
    assert!(parsed["ignores"].is_array());
    assert!(
        content.contains("\n  \""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".queryshiftrc.json", "{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains(".queryshiftrc.json already exists"));
    assert_eq!(test.read_file(".queryshiftrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;
    test.write_file("queryshift.refs.json", "{}")?;

    let output = test.plan_command().output()?;

    assert!(
        output.status.success(),
        "Plan should work with initialized config. stderr: {}",
        stderr(&output)
    );
    assert!(test.root().join(".queryshiftrc.json").exists());

    Ok(())
}
