//! TOML configuration accepted by `--config`.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use ghost_catcher_core::GameConfig;
use serde::Deserialize;

/// Complete shell configuration: game tunables plus the mock ad flow.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct ShellConfig {
    /// Overrides for the session.
    pub(crate) game: GameConfig,
    /// When the shell shows ads.
    pub(crate) ads: AdsConfig,
}

impl ShellConfig {
    /// Reads and parses a configuration file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub(crate) fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Mock ad flow settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct AdsConfig {
    /// Master switch; no ad is loaded or shown when false.
    pub(crate) enabled: bool,
    /// Show an interstitial after every completed level.
    pub(crate) show_interstitial_after_level: bool,
    /// Offer a rewarded ad after every failed level.
    pub(crate) show_rewarded_on_failure: bool,
}

impl Default for AdsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            show_interstitial_after_level: true,
            show_rewarded_on_failure: true,
        }
    }
}
