use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod annotate;
mod batch;
mod convert;
mod init;

const BIN_NAME: &str = "medlayer";

/// Sentence shared by the command tests.
pub const NOTE: &str = "Patient reports pressure and blood pressure issues.";

/// Matcher output for [`NOTE`]: "pressure" twice, once inside "blood pressure".
pub const NOTE_MATCHES: &str = r#"{
  "pressure": [
    {"start": 16, "end": 24, "cuis": ["C0039606"], "semanticGroup": "Vital Sign"},
    {"start": 35, "end": 43, "cuis": ["C0039606"], "semanticGroup": "Vital Sign"}
  ],
  "blood pressure": [
    {"start": 29, "end": 43, "cuis": ["C0005823"], "semanticGroup": "Vital Sign"}
  ]
}"#;

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        // Stop config lookup from escaping into the enclosing directories
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn with_file(path: &str, content: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(path, content)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn annotate_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("annotate");
        cmd
    }

    pub fn batch_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("batch");
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

/// A batch document holding [`NOTE`] and its matches.
pub fn note_document(id: &str) -> String {
    format!(
        r#"{{"id": "{}", "text": "{}", "matches": {}}}"#,
        id, NOTE, NOTE_MATCHES
    )
}
