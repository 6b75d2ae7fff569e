//! CLI argument parsing tests.
//!
//! These tests verify that command-line arguments are parsed correctly
//! without reading a replay or touching the network.

use std::path::PathBuf;

use clap::Parser;

// Re-create Args structure for testing since it's not publicly exported.
// Env fallbacks are left out so the host environment can't leak in.
#[derive(Parser)]
#[command(name = "osr")]
struct Args {
    file: PathBuf,
    #[arg(short, long, default_value_t = 2)]
    decimals: usize,
    #[arg(long)]
    api_key: Option<String>,
    #[arg(long, default_value = osr_core::config::api::DEFAULT_BASE_URL)]
    api_url: String,
    #[arg(long)]
    songs_dir: Option<PathBuf>,
    #[arg(long, default_value = osr_core::config::api::DEFAULT_MIRROR_URL)]
    mirror_url: String,
    #[arg(long)]
    json: bool,
    #[arg(long)]
    offline: bool,
    #[arg(long)]
    events: Option<usize>,
}

#[test]
fn test_parse_file_only() {
    let args = Args::try_parse_from(["osr", "play.osr"]).unwrap();
    assert_eq!(args.file, PathBuf::from("play.osr"));
    assert_eq!(args.decimals, 2);
    assert_eq!(args.api_url, "https://osu.ppy.sh/api");
    assert!(args.api_key.is_none());
    assert!(args.songs_dir.is_none());
    assert_eq!(args.mirror_url, "https://catboy.best");
    assert!(!args.json);
    assert!(!args.offline);
    assert!(args.events.is_none());
}

#[test]
fn test_parse_missing_file() {
    assert!(Args::try_parse_from(["osr"]).is_err());
}

#[test]
fn test_parse_decimals_short_and_long() {
    let args = Args::try_parse_from(["osr", "-d", "4", "play.osr"]).unwrap();
    assert_eq!(args.decimals, 4);

    let args = Args::try_parse_from(["osr", "play.osr", "--decimals", "0"]).unwrap();
    assert_eq!(args.decimals, 0);
}

#[test]
fn test_parse_invalid_decimals() {
    assert!(Args::try_parse_from(["osr", "-d", "two", "play.osr"]).is_err());
    assert!(Args::try_parse_from(["osr", "-d", "-1", "play.osr"]).is_err());
}

#[test]
fn test_parse_online_options() {
    let args = Args::try_parse_from([
        "osr",
        "play.osr",
        "--api-key",
        "secret",
        "--api-url",
        "http://localhost:8080/api",
        "--songs-dir",
        "/games/osu/Songs",
        "--mirror-url",
        "http://localhost:9000",
        "--json",
    ])
    .unwrap();
    assert_eq!(args.api_key.as_deref(), Some("secret"));
    assert_eq!(args.api_url, "http://localhost:8080/api");
    assert_eq!(args.songs_dir, Some(PathBuf::from("/games/osu/Songs")));
    assert_eq!(args.mirror_url, "http://localhost:9000");
    assert!(args.json);
}

#[test]
fn test_parse_offline_with_events() {
    let args = Args::try_parse_from(["osr", "play.osr", "--offline", "--events", "20"]).unwrap();
    assert!(args.offline);
    assert_eq!(args.events, Some(20));
}

#[test]
fn test_parse_unknown_flag() {
    assert!(Args::try_parse_from(["osr", "play.osr", "--verbose"]).is_err());
}
