//! CLI argument definitions for osr.

use std::path::PathBuf;

use clap::Parser;
use osr_core::config::api::{DEFAULT_BASE_URL, DEFAULT_MIRROR_URL};

#[derive(Parser)]
#[command(name = "osr")]
#[command(about = "osu!mania replay analyzer", version)]
pub struct Args {
    /// osu! replay file to parse
    pub file: PathBuf,

    /// Number of decimals in the output
    #[arg(short, long, value_name = "INT", default_value_t = 2)]
    pub decimals: usize,

    /// osu! API key
    #[arg(long, env = "OSR_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// osu! API base URL
    #[arg(long, env = "OSR_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// osu! Songs directory, searched before downloading a beatmapset
    #[arg(long, env = "OSR_SONGS_DIR", value_name = "DIR")]
    pub songs_dir: Option<PathBuf>,

    /// Beatmap mirror serving .osz archives at /d/{beatmapset_id}
    #[arg(long, env = "OSR_MIRROR_URL", default_value = DEFAULT_MIRROR_URL)]
    pub mirror_url: String,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Only print decoded replay data (no beatmap lookup or PP)
    #[arg(long)]
    pub offline: bool,

    /// Print the first N action events
    #[arg(long, value_name = "N")]
    pub events: Option<usize>,
}
