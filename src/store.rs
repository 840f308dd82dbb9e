use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::model::{ArchiveIndex, GamesByPeriod};

// Files are pretty-printed so they stay hand-inspectable between runs.

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("decoding {}", path.display()))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("serializing")?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

pub fn load_archive_index(path: &Path) -> anyhow::Result<ArchiveIndex> {
    read_json(path)
}

pub fn save_archive_index(path: &Path, index: &ArchiveIndex) -> anyhow::Result<()> {
    write_json(path, index)
}

pub fn load_games(path: &Path) -> anyhow::Result<GamesByPeriod> {
    read_json(path)
}

pub fn save_games(path: &Path, games: &GamesByPeriod) -> anyhow::Result<()> {
    write_json(path, games)
}
