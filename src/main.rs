#[macro_use]
mod verbose;

mod aggregator;
mod chart;
mod classify;
mod cli;
mod config;
mod model;
mod remote;
mod store;

use std::path::PathBuf;

use anyhow::Context;

use crate::config::Config;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = cli::parse();
    if args.help {
        cli::print_help();
        return Ok(());
    }
    verbose::set(args.verbose);

    let cfg_path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("config.toml"));
    let mut cfg = Config::load(&cfg_path)?;

    // CLI overrides beat env and config.toml.
    if let Some(p) = args.player {
        cfg.player = p;
    }
    if let Some(o) = args.opponent {
        cfg.opponent = o;
    }
    if let Some(tc) = args.time_class {
        cfg.time_class = tc;
    }
    if let Some(u) = args.api_url {
        cfg.api_base = u;
    }
    if let Some(dir) = args.out {
        cfg.charts_dir = dir;
    }

    if !(args.archives || args.fetch || args.chart) {
        cli::print_help();
        anyhow::bail!("nothing to do: pass --archives, --fetch, and/or --chart");
    }

    if args.archives {
        run_archives(&cfg)?;
    }
    if args.fetch {
        run_fetch(&cfg)?;
    }
    if args.chart {
        run_chart(&cfg)?;
    }
    Ok(())
}

/// Refresh the archive index file from the remote listing.
fn run_archives(cfg: &Config) -> anyhow::Result<()> {
    let player = cfg.player()?;
    let api = remote::Api::new(cfg)?;
    let index = api.fetch_archive_index(player, cfg.since_year)?;
    store::save_archive_index(&cfg.archive_file, &index)?;
    eprintln!(
        "{}: {} months across {} years",
        cfg.archive_file.display(),
        index.values().map(Vec::len).sum::<usize>(),
        index.len()
    );
    Ok(())
}

/// Fetch every cached period, classify, write the games file.
fn run_fetch(cfg: &Config) -> anyhow::Result<()> {
    let player = cfg.player()?;
    let api = remote::Api::new(cfg)?;
    let index = store::load_archive_index(&cfg.archive_file)?;

    let mut out = model::GamesByPeriod::new();
    let mut kept = 0usize;
    for (year, months) in &index {
        for month in months {
            let games = api.fetch_month(player, year, month)?;
            let classified = classify::classify_month(&games, cfg)?;
            vprintln!(
                "{}-{}: {} fetched, {} kept",
                year,
                month,
                games.len(),
                classified.len()
            );
            kept += classified.len();
            // Months with nothing qualifying stay out of the file.
            if !classified.is_empty() {
                out.entry(year.clone())
                    .or_default()
                    .insert(month.clone(), classified);
            }
        }
    }

    store::save_games(&cfg.games_file, &out)?;
    eprintln!("{}: {} games kept", cfg.games_file.display(), kept);
    Ok(())
}

/// Aggregate the games file and render one chart per year.
fn run_chart(cfg: &Config) -> anyhow::Result<()> {
    let player = cfg.player()?;
    let games = store::load_games(&cfg.games_file)?;
    let tallies = aggregator::tally_all(&games, player)?;

    std::fs::create_dir_all(&cfg.charts_dir)
        .with_context(|| format!("creating {}", cfg.charts_dir.display()))?;
    for (year, months) in &tallies {
        let path = cfg.charts_dir.join(format!("{year}.svg"));
        chart::render_year(&path, year, months)?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}
