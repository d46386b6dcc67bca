use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::{CliTest, NOTE, NOTE_MATCHES};

#[test]
fn test_annotate_text_report() -> Result<()> {
    let test = CliTest::with_file("matches.json", NOTE_MATCHES)?;

    assert_cmd_snapshot!(
        test.annotate_command().args(["--text", NOTE, "--matches", "matches.json"]),
        @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    annotation: "pressure"  Vital Sign
      --> <text>:1:17
      |
    1 | Patient reports pressure and blood pressure issues.
      |                 ^^^^^^^^
      = meaning: Vital Sign C0039606

    annotation: "blood pressure"  Vital Sign
      --> <text>:1:30
      |
    1 | Patient reports pressure and blood pressure issues.
      |                              ^^^^^^^^^^^^^^
      = meaning: Vital Sign C0005823
      = note: also matched "pressure" [35, 43)

    ✓ 2 annotations (0 ambiguous), 1 suppressed match

    ----- stderr -----
    "#
    );

    Ok(())
}

#[test]
fn test_annotate_input_file_json() -> Result<()> {
    let test = CliTest::with_file("notes/n1.txt", NOTE)?;
    test.write_file("notes/n1.matches.json", NOTE_MATCHES)?;

    let output = test
        .annotate_command()
        .args([
            "-i",
            "notes/n1.txt",
            "-m",
            "notes/n1.matches.json",
            "--format",
            "json",
        ])
        .output()?;
    assert!(output.status.success());

    let layer: Value = serde_json::from_slice(&output.stdout)?;
    let fused = layer["fused"].as_array().unwrap();
    let resolved = layer["resolved"].as_array().unwrap();
    assert_eq!(fused.len(), 3);
    assert_eq!(resolved.len(), 2);

    assert_eq!(resolved[0]["text"], "pressure");
    assert_eq!(resolved[0]["start"], 16);
    assert_eq!(resolved[1]["text"], "blood pressure");
    assert_eq!(resolved[1]["id"], 2);
    assert_eq!(resolved[1]["meanings"][0]["cuis"][0], "C0005823");

    Ok(())
}

#[test]
fn test_annotate_reads_stdin() -> Result<()> {
    let test = CliTest::with_file("matches.json", NOTE_MATCHES)?;
    test.write_file("note.txt", NOTE)?;

    let output = test
        .annotate_command()
        .args(["-i", "-", "-m", "matches.json"])
        .stdin(std::fs::File::open(test.root().join("note.txt"))?)
        .output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("--> <stdin>:1:17"));

    Ok(())
}

#[test]
fn test_annotate_per_term_keeps_unfused_duplicates() -> Result<()> {
    let matches = r#"{
      "febre": [{"start": 0, "end": 5, "cuis": ["C0015967"], "semanticGroup": "Finding"}],
      "Febre": [{"start": 0, "end": 5, "cuis": ["C0015967"], "semanticGroup": "Finding"}]
    }"#;
    let test = CliTest::with_file("matches.json", matches)?;

    let run = |scope: &str| -> Result<Value> {
        let output = test
            .annotate_command()
            .args(["--text", "febre alta", "-m", "matches.json", "--format", "json"])
            .args(["--fusion-scope", scope])
            .output()?;
        assert!(output.status.success());
        Ok(serde_json::from_slice(&output.stdout)?)
    };

    let global = run("global")?;
    assert_eq!(global["fused"].as_array().unwrap().len(), 1);
    assert_eq!(global["fused"][0]["terms"].as_array().unwrap().len(), 2);

    let per_term = run("per-term")?;
    assert_eq!(per_term["fused"].as_array().unwrap().len(), 2);
    assert_eq!(per_term["resolved"].as_array().unwrap().len(), 1);

    Ok(())
}

#[test]
fn test_annotate_config_strategy() -> Result<()> {
    // Greedy trades "0123" for the longer "34567", which then blocks "789X".
    let matches = r#"{
      "0123": [{"start": 0, "end": 4, "cuis": ["C1"], "semanticGroup": "Finding"}],
      "34567": [{"start": 3, "end": 8, "cuis": ["C2"], "semanticGroup": "Finding"}],
      "789X": [{"start": 7, "end": 11, "cuis": ["C3"], "semanticGroup": "Finding"}]
    }"#;
    let test = CliTest::with_file("matches.json", matches)?;

    let resolved_texts = |test: &CliTest| -> Result<Vec<String>> {
        let output = test
            .annotate_command()
            .args(["--text", "0123456789X", "-m", "matches.json", "--format", "json"])
            .output()?;
        assert!(output.status.success());
        let layer: Value = serde_json::from_slice(&output.stdout)?;
        Ok(layer["resolved"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["text"].as_str().unwrap().to_string())
            .collect())
    };

    assert_eq!(resolved_texts(&test)?, vec!["34567"]);

    test.write_file(".medlayerrc.json", r#"{ "resolveStrategy": "maxCoverage" }"#)?;
    assert_eq!(resolved_texts(&test)?, vec!["0123", "789X"]);

    Ok(())
}

#[test]
fn test_annotate_bsv_matches() -> Result<()> {
    let bsv = "Document|Document Text|Semantic Group|Span|Negated|Uncertain|CUI\n\
               n1|pressure|Vital Sign|16,24|false|false|C0039606\n";
    let test = CliTest::with_file("matches.bsv", bsv)?;

    let output = test
        .annotate_command()
        .args(["--text", NOTE, "-m", "matches.bsv", "--format", "json"])
        .output()?;
    assert!(output.status.success());

    let layer: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(layer["resolved"][0]["text"], "pressure");

    Ok(())
}

#[test]
fn test_annotate_rejects_span_past_end() -> Result<()> {
    let matches = r#"{"fever": [{"start": 3, "end": 80, "cuis": ["C0015967"], "semanticGroup": "Finding"}]}"#;
    let test = CliTest::with_file("matches.json", matches)?;

    let output = test
        .annotate_command()
        .args(["--text", "no fever", "-m", "matches.json"])
        .output()?;
    assert_eq!(output.status.code(), Some(2));

    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains(
        "Error: invalid span [3, 80) for term \"fever\" (text has 8 characters)"
    ));

    Ok(())
}

#[test]
fn test_annotate_missing_matches_file() -> Result<()> {
    let test = CliTest::new()?;

    let output = test
        .annotate_command()
        .args(["--text", NOTE, "-m", "missing.json"])
        .output()?;
    assert_eq!(output.status.code(), Some(2));

    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("Failed to read matches file missing.json"));

    Ok(())
}
