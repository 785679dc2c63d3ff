// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jason Ish

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dirs::home_dir;
use serde::{Deserialize, Serialize};

use crate::api::types::{Country, Language};
use crate::error::{Error, Result};

const CONFIG_DIR_NAME: &str = ".eircode-kit";
const CONFIG_FILE_NAME: &str = "config.toml";

pub const ENV_DEVELOPER_KEY: &str = "EIRCODE_DEVELOPER_KEY";
pub const ENV_BASE_URL: &str = "EIRCODE_BASE_URL";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Developer key issued by Autoaddress.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<Country>,
    /// Where to write the transaction log. Logging is enabled when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_log: Option<PathBuf>,
}

impl Config {
    pub fn config_dir() -> Result<PathBuf> {
        // Check for local .eircode-kit directory first
        let current_dir = env::current_dir()?;
        let local = current_dir.join(CONFIG_DIR_NAME);

        if local.is_dir() {
            return Ok(local);
        }

        let home =
            home_dir().ok_or_else(|| Error::Config("Could not find home directory".to_string()))?;
        Ok(home.join(CONFIG_DIR_NAME))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load from the default location. A missing file yields defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Apply environment variable overrides on top of file values.
    pub fn apply_env(&mut self) {
        self.apply_overrides(env::var(ENV_DEVELOPER_KEY).ok(), env::var(ENV_BASE_URL).ok());
    }

    fn apply_overrides(&mut self, developer_key: Option<String>, base_url: Option<String>) {
        if let Some(key) = developer_key.filter(|k| !k.trim().is_empty()) {
            self.developer_key = Some(key);
        }
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.base_url = Some(url);
        }
    }

    pub fn developer_key(&self) -> Result<&str> {
        match self.developer_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(Error::Config(format!(
                "No developer key configured. Set {} or run `eircode config set-key`.",
                ENV_DEVELOPER_KEY
            ))),
        }
    }

    pub fn set_developer_key(&mut self, key: String) {
        self.developer_key = Some(key);
    }
}
