//! Game configuration stored in `flipper.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::game::check_vertex_limit;

/// Default config file name, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "flipper.toml";

/// Settings for new games (TOML).
///
/// Missing fields fall back to the defaults of the original board: six
/// vertices, each pair joined with probability one half.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    /// Vertices per game, at most 500. Values below 3 are raised to 3 when a
    /// game starts.
    pub vertices: usize,

    /// Probability that any given pair of vertices starts out joined.
    pub edge_probability: f64,

    /// Seed for graph generation and runner placement. Unset means entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            vertices: 6,
            edge_probability: 0.5,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        check_vertex_limit(self.vertices).map_err(|message| anyhow!(message))?;
        if !self.edge_probability.is_finite() || !(0.0..=1.0).contains(&self.edge_probability) {
            return Err(anyhow!(
                "edge_probability must be within [0, 1], got {}",
                self.edge_probability
            ));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `GameConfig::default()`.
pub fn load_config(path: &Path) -> Result<GameConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "config missing, using defaults");
        let cfg = GameConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: GameConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    debug!(
        path = %path.display(),
        vertices = cfg.vertices,
        edge_probability = cfg.edge_probability,
        "config loaded"
    );
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &GameConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
