use std::{
    fs,
    io::{IsTerminal, Read},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};

/// Document text from `--text`, `--input FILE`, `--input -`, or piped stdin.
pub fn read_input_text(text: Option<&String>, input: Option<&PathBuf>) -> Result<String> {
    if let Some(literal) = text {
        return Ok(literal.to_string());
    }

    match input {
        Some(path) if path.as_path() == Path::new("-") => read_stdin(),
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display())),
        None => {
            if std::io::stdin().is_terminal() {
                bail!("No input provided. Use --text, --input, or pipe text via stdin.");
            }
            read_stdin()
        }
    }
}

fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read stdin")?;
    if buffer.trim().is_empty() {
        bail!("No input provided via stdin.");
    }
    Ok(buffer)
}

/// Write to `output` if given, otherwise print to stdout.
pub fn write_output(content: &str, output: Option<&PathBuf>) -> Result<()> {
    match output {
        Some(path) => fs::write(path, content)
            .with_context(|| format!("Failed to write output to {}", path.display())),
        None => {
            println!("{}", content);
            Ok(())
        }
    }
}
