//! Configuration module
//!
//! This module handles shell settings: prompts, line history and colour.
//! Settings come from an optional TOML file (see [`storage`]); every key has a
//! default so an empty or missing file is valid.

pub mod storage;

use crate::cli::repl::{Prompts, CONTINUATION_PROMPT, PRIMARY_PROMPT};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

/// When to colour output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Colour when writing to a terminal and `NO_COLOR` is unset
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Resolve against the current environment
    pub fn enabled(&self) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                std::env::var_os("NO_COLOR").is_none()
                    && std::io::stdout().is_terminal()
                    && std::io::stderr().is_terminal()
            }
        }
    }
}

/// Prompt settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    pub primary: String,
    pub continuation: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            primary: PRIMARY_PROMPT.to_string(),
            continuation: CONTINUATION_PROMPT.to_string(),
        }
    }
}

/// Line history settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub enabled: bool,
    /// Overrides the default history location
    pub file: Option<PathBuf>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            file: None,
        }
    }
}

impl HistoryConfig {
    /// History file to use, if history is enabled and a location is known
    pub fn path(&self) -> Option<PathBuf> {
        if !self.enabled {
            return None;
        }
        self.file.clone().or_else(default_history_path)
    }
}

fn default_history_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(storage::APP_DIR).join("history"))
}

/// Shell settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub color: ColorChoice,
    pub prompt: PromptConfig,
    pub history: HistoryConfig,
}

impl ShellConfig {
    pub fn prompts(&self) -> Prompts {
        Prompts {
            primary: self.prompt.primary.clone(),
            continuation: self.prompt.continuation.clone(),
        }
    }
}
