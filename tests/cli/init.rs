use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::CliTest;

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .medlayerrc.json

    ----- stderr -----
    ");

    assert!(test.root().join(".medlayerrc.json").exists());

    let content = test.read_file(".medlayerrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["fusionScope"], "global");
    assert_eq!(parsed["resolveStrategy"], "greedy");
    assert_eq!(parsed["collapseSemanticGroups"], false);
    assert!(parsed["ignores"].as_array().unwrap().is_empty());
    assert!(content.contains("\n  \""), "Config should use 2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".medlayerrc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    Error: .medlayerrc.json already exists
    ");

    assert_eq!(test.read_file(".medlayerrc.json")?, "{}");

    Ok(())
}
