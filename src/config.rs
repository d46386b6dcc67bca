use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::{AnnotateOptions, FusionScope, ResolveStrategy};

pub const CONFIG_FILE_NAME: &str = ".medlayerrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub fusion_scope: FusionScope,
    #[serde(default)]
    pub resolve_strategy: ResolveStrategy,
    #[serde(default)]
    pub collapse_semantic_groups: bool,
    /// Glob patterns (relative to the batch directory) of documents to skip.
    #[serde(default)]
    pub ignores: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fusion_scope: FusionScope::default(),
            resolve_strategy: ResolveStrategy::default(),
            collapse_semantic_groups: false,
            ignores: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` is invalid.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }
        Ok(())
    }

    pub fn annotate_options(&self) -> AnnotateOptions {
        AnnotateOptions {
            fusion_scope: self.fusion_scope,
            resolve_strategy: self.resolve_strategy,
            collapse_semantic_groups: self.collapse_semantic_groups,
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
