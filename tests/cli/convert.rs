use anyhow::Result;
use serde_json::Value;

use crate::CliTest;

const TABLE: &str = "\
Document Text|Semantic Group|Span|Negated|Uncertain|CUI
pressure|Vital Sign|16,24|false|false|C0039606
blood pressure|Vital Sign|29,43|false|false|C0005823
pressure|Vital Sign|35,43|true|false|C0039606
";

#[test]
fn test_convert_to_stdout() -> Result<()> {
    let test = CliTest::with_file("note.bsv", TABLE)?;

    let output = test.command().args(["convert", "note.bsv"]).output()?;
    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout)?;
    let terms: Vec<&String> = value.as_object().unwrap().keys().collect();
    assert_eq!(terms, vec!["pressure", "blood pressure"]);

    let second = &value["pressure"][1];
    assert_eq!(second["cui"][0], "C0039606");
    assert_eq!(second["negated"], true);
    assert_eq!(second["spans"][0]["start"], 35);
    assert_eq!(second["semanticGroup"], "Vital Sign");

    Ok(())
}

#[test]
fn test_converted_output_annotates() -> Result<()> {
    let test = CliTest::with_file("note.bsv", TABLE)?;

    let output = test
        .command()
        .args(["convert", "note.bsv", "-o", "note.json"])
        .output()?;
    assert!(output.status.success());
    assert!(String::from_utf8(output.stderr)?.contains("Wrote note.json"));

    let output = test
        .annotate_command()
        .args(["--text", crate::NOTE, "-m", "note.json", "--format", "json"])
        .output()?;
    assert!(output.status.success());

    let layer: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(layer["resolved"].as_array().unwrap().len(), 2);
    assert!(test.read_file("note.json")?.contains("\"blood pressure\""));

    Ok(())
}

#[test]
fn test_convert_malformed_table() -> Result<()> {
    let test = CliTest::with_file("note.bsv", "Document Text|Span|CUI\npain|0,4|C0030193\n")?;

    let output = test.command().args(["convert", "note.bsv"]).output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(
        String::from_utf8(output.stderr)?
            .contains("BSV header is missing the \"Semantic Group\" column")
    );

    Ok(())
}
