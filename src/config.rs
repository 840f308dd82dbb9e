use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Runtime settings. Every field has a default; `config.toml` is optional
/// and partial files are fine. Empty-string filters mean "no filter",
/// matching how CLI overrides are treated elsewhere.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub player: String,       // tracked player; must be set before any run mode
    pub opponent: String,     // opponent of interest; "" counts every opponent
    pub time_class: String,   // "daily", "rapid", ...; "" counts every time class
    pub api_base: String,     // chess.com pub player API
    pub request_delay_ms: u64, // courtesy pause between HTTP calls
    pub since_year: Option<u16>, // drop archive months before this year
    pub archive_file: PathBuf,
    pub games_file: PathBuf,
    pub charts_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            player: String::new(),
            opponent: String::new(),
            time_class: "daily".to_string(),
            api_base: "https://api.chess.com/pub/player/".to_string(),
            request_delay_ms: 500,
            since_year: None,
            archive_file: PathBuf::from("date_archive.json"),
            games_file: PathBuf::from("games_list.json"),
            charts_dir: PathBuf::from("charts"),
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

impl Config {
    /// Load from `path`, falling back to defaults when the file is absent.
    /// A file that exists but does not parse is an error, not a silent
    /// default. RIVALRY_PLAYER / RIVALRY_OPPONENT override the file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut cfg: Self = match std::fs::read_to_string(path) {
            Ok(s) => toml::from_str(&s).with_context(|| format!("parsing {}", path.display()))?,
            Err(_) => Self::default(),
        };
        if let Some(p) = env_var("RIVALRY_PLAYER") {
            cfg.player = p;
        }
        if let Some(o) = env_var("RIVALRY_OPPONENT") {
            cfg.opponent = o;
        }
        Ok(cfg)
    }

    /// The tracked player, or an error when nothing configured one.
    pub fn player(&self) -> anyhow::Result<&str> {
        if self.player.is_empty() {
            anyhow::bail!(
                "no tracked player: set `player` in config.toml, RIVALRY_PLAYER, or --player"
            );
        }
        Ok(&self.player)
    }
}
