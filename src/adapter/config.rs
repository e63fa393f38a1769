//! Configuration
//!
//! JSON設定ファイルの読み込み

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::services::enrollment_rules::CapacityRule;

pub const DEFAULT_CONFIG_PATH: &str = "./.coursereg/config.json";
pub const DEFAULT_STORE_PATH: &str = "./.coursereg/sessions.json";

fn default_store_path() -> String {
    DEFAULT_STORE_PATH.to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// セッションストア（JSON）のパス。`~` は展開される
    #[serde(default = "default_store_path")]
    pub store_path: String,

    /// 定員判定のルール
    #[serde(default)]
    pub capacity_rule: CapacityRule,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            capacity_rule: CapacityRule::default(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read config: {}", path))?;
        let mut config: Config =
            serde_json::from_str(&content).context("Failed to parse config JSON")?;
        config.store_path = shellexpand::tilde(&config.store_path).into_owned();
        Ok(config)
    }

    /// 設定ファイルが存在しなければデフォルト設定を返す
    pub fn load_or_default(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            info!("No config found at {}, using defaults", path);
            return Ok(Self::default());
        }
        Self::load(path)
    }
}
