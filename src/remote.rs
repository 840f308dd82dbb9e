use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use regex::Regex;
use serde::Deserialize;

use crate::config::Config;
use crate::model::{ArchiveIndex, GameRecord};

#[derive(Deserialize)]
struct ArchiveList {
    archives: Vec<String>,
}

#[derive(Deserialize)]
struct MonthGames {
    games: Vec<GameRecord>,
}

/// Blocking chess.com client. Calls run one at a time, each followed by a
/// courtesy delay; any non-success status fails the run.
pub struct Api {
    client: reqwest::blocking::Client,
    base: String,
    delay: Duration,
}

impl Api {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("rivalry/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            client,
            base: cfg.api_base.clone(),
            delay: Duration::from_millis(cfg.request_delay_ms),
        })
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> anyhow::Result<T> {
        vprintln!("remote: GET {}", url);
        let t0 = Instant::now();
        let resp = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .and_then(|r| r.error_for_status())
            .with_context(|| format!("GET {url}"))?;
        let body = resp
            .json::<T>()
            .with_context(|| format!("decoding {url}"))?;
        vprintln!("remote: done in {:.3}s", t0.elapsed().as_secs_f64());
        thread::sleep(self.delay);
        Ok(body)
    }

    /// Every archive month available for `player`, grouped by year.
    pub fn fetch_archive_index(
        &self,
        player: &str,
        since_year: Option<u16>,
    ) -> anyhow::Result<ArchiveIndex> {
        let url = format!("{}{}/games/archives", self.base, player.to_ascii_lowercase());
        let list: ArchiveList = self.get_json(&url)?;
        vprintln!("remote: {} archive months listed", list.archives.len());
        index_from_urls(&list.archives, since_year)
    }

    /// All games `player` finished in `year`/`month`.
    pub fn fetch_month(
        &self,
        player: &str,
        year: &str,
        month: &str,
    ) -> anyhow::Result<Vec<GameRecord>> {
        let url = format!(
            "{}{}/games/{}/{}",
            self.base,
            player.to_ascii_lowercase(),
            year,
            month
        );
        let body: MonthGames = self.get_json(&url)?;
        Ok(body.games)
    }
}

/// Group `/YYYY/MM`-suffixed archive URLs into the index. A URL without
/// that suffix means the listing endpoint changed shape, which is fatal.
fn index_from_urls(urls: &[String], since_year: Option<u16>) -> anyhow::Result<ArchiveIndex> {
    let re = Regex::new(r"/(\d{4})/(\d{2})$").unwrap();
    let mut index = ArchiveIndex::new();
    for url in urls {
        let url = url.trim();
        if url.is_empty() {
            continue;
        }
        let caps = re
            .captures(url)
            .with_context(|| format!("unrecognized archive url {url:?}"))?;
        let year = caps[1].to_string();
        if let Some(floor) = since_year {
            if year.parse::<u16>().map_or(false, |y| y < floor) {
                continue;
            }
        }
        index.entry(year).or_insert_with(Vec::new).push(caps[2].to_string());
    }
    for months in index.values_mut() {
        months.sort();
        months.dedup();
    }
    Ok(index)
}
