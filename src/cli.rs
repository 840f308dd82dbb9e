use std::path::PathBuf;

pub struct Cli {
    pub archives: bool,
    pub fetch: bool,
    pub chart: bool,
    pub player: Option<String>,
    pub opponent: Option<String>,
    pub time_class: Option<String>,
    pub api_url: Option<String>,
    pub out: Option<PathBuf>,   // chart output directory
    pub config: Option<PathBuf>,
    pub verbose: bool,
    pub help: bool,
}

pub fn parse() -> Cli {
    let mut archives = false;
    let mut fetch = false;
    let mut chart = false;
    let mut player: Option<String> = None;
    let mut opponent: Option<String> = None;
    let mut time_class: Option<String> = None;
    let mut api_url: Option<String> = None;
    let mut out: Option<PathBuf> = None;
    let mut config: Option<PathBuf> = None;
    let mut verbose = false;
    let mut help = false;

    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--archives" | "--list" => archives = true,
            "--fetch" => fetch = true,
            "--chart" | "--charts" => chart = true,
            "--player" | "-p" => {
                if let Some(v) = it.next() { player = Some(v); }
            }
            "--opponent" => {
                if let Some(v) = it.next() { opponent = Some(v); }
            }
            "--time-class" => {
                if let Some(v) = it.next() { time_class = Some(v); }
            }
            "--api-url" => {
                if let Some(v) = it.next() { api_url = Some(v); }
            }
            "--out" | "-o" => {
                if let Some(v) = it.next() { out = Some(PathBuf::from(v)); }
            }
            "--config" | "-c" => {
                if let Some(v) = it.next() { config = Some(PathBuf::from(v)); }
            }
            "--verbose" | "-v" => verbose = true,
            "--help" | "-h" => help = true,
            _ => {}
        }
    }

    Cli {
        archives,
        fetch,
        chart,
        player,
        opponent,
        time_class,
        api_url,
        out,
        config,
        verbose,
        help,
    }
}

pub fn print_help() {
    eprintln!(
r#"Rivalry — chess.com win/loss/draw charts

Usage:
  rivalry --archives [options]    Refresh the archive index from chess.com
  rivalry --fetch    [options]    Fetch + classify every cached month
  rivalry --chart    [options]    Render one SVG per year from the games file

Modes combine and always run in the order above.

Options:
  --player, -p NAME    Tracked player (or RIVALRY_PLAYER / config.toml)
  --opponent NAME      Only count games against NAME ("" = everyone)
  --time-class CLASS   Only count games of this time class ("" = all)
  --api-url URL        Override the player API base URL
  --out, -o DIR        Chart output directory (default charts/)
  --config, -c PATH    Config file (default config.toml)
  -v, --verbose        Detailed request/progress logs on stderr
  -h, --help           Show this help.

Notes:
  • --fetch reads the index written by --archives; it never regenerates a
    missing index on its own.
  • Requests run one at a time with a courtesy delay between calls
    (request_delay_ms in config.toml).
"#);
}
