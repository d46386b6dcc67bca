use anyhow::Result;
use serde_json::Value;

use crate::{CliTest, note_document};

#[test]
fn test_batch_all_annotated() -> Result<()> {
    let test = CliTest::with_file("notes/a.json", &note_document("note-a"))?;
    test.write_file("notes/b.json", r#"{"text": "sem achados", "matches": {}}"#)?;

    let output = test.batch_command().arg("notes").output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    assert_eq!(
        stdout,
        "✓ note-a: 2 annotations (0 ambiguous), 1 suppressed match\n\
         ✓ b.json: 0 annotations (0 ambiguous), 0 suppressed matches\n\
         \n\
         Processed 2 documents: 2 annotated, 0 rejected\n"
    );

    Ok(())
}

#[test]
fn test_batch_rejected_document_fails() -> Result<()> {
    let test = CliTest::with_file("notes/a.json", &note_document("note-a"))?;
    test.write_file(
        "notes/b.json",
        r#"{"text": "dor", "matches": {"dor": [{"start": 0, "end": 9, "cuis": ["C0030193"], "semanticGroup": "Finding"}]}}"#,
    )?;
    test.write_file("notes/c.json", "not json")?;

    let output = test.batch_command().args(["notes", "--format", "json"]).output()?;
    assert_eq!(output.status.code(), Some(1));

    let summary: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(summary["annotated"], 1);
    assert_eq!(summary["rejected"], 2);

    let documents = summary["documents"].as_array().unwrap();
    assert_eq!(documents[0]["document"], "note-a");
    assert_eq!(documents[0]["annotations"].as_array().unwrap().len(), 2);
    assert_eq!(documents[1]["document"], "b.json");
    assert!(
        documents[1]["error"]
            .as_str()
            .unwrap()
            .starts_with("invalid span [0, 9)")
    );
    assert_eq!(documents[2]["document"], "c.json");
    assert!(documents[2]["error"].as_str().unwrap().starts_with("Not a document"));

    Ok(())
}

#[test]
fn test_batch_config_ignores() -> Result<()> {
    let test = CliTest::with_file("notes/a.json", &note_document("note-a"))?;
    test.write_file("notes/draft/b.json", &note_document("note-b"))?;
    test.write_file("notes/.medlayerrc.json", r#"{ "ignores": ["draft/*"] }"#)?;

    let output = test.batch_command().arg("notes").output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("note-a"));
    assert!(!stdout.contains("note-b"));
    assert!(stdout.ends_with("Processed 1 document: 1 annotated, 0 rejected, 1 ignored\n"));

    Ok(())
}

#[test]
fn test_batch_not_a_directory() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.batch_command().arg("missing").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8(output.stderr)?.contains("Error: Not a directory: missing"));

    Ok(())
}
