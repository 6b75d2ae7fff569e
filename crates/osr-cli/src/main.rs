mod api;
mod cli;
mod mirror;
mod output;
mod pp;
mod songs;

use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Args;
use osr_core::{Analyzer, decode_replay};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::api::OsuApiClient;
use crate::mirror::{BeatmapMirror, LocalFirst};
use crate::pp::RosuCalculator;
use crate::songs::SongsDirectory;

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging (warn unless RUST_LOG says otherwise)
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("osr_cli=warn,osr_core=warn"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    run(args)
}

fn run(args: Args) -> Result<()> {
    let bytes = fs::read(&args.file)
        .with_context(|| format!("Failed to read replay file {}", args.file.display()))?;
    let record = decode_replay(&bytes)
        .with_context(|| format!("Failed to decode {}", args.file.display()))?;
    info!(
        player = record.player_name.as_deref().unwrap_or_default(),
        score = record.score,
        "decoded replay"
    );

    if let Some(limit) = args.events {
        for line in output::format_events(&record.actions(), limit) {
            println!("{line}");
        }
    }

    if args.offline {
        if args.json {
            println!("{}", serde_json::to_string_pretty(&record)?);
        } else {
            for line in output::format_offline(&record, args.decimals)? {
                println!("{line}");
            }
        }
        return Ok(());
    }

    let api_key = args
        .api_key
        .context("No API key specified. Use --api-key or set OSR_API_KEY")?;

    let lookup = OsuApiClient::new(&args.api_url, api_key);
    // Extracted downloads are removed when `source` is dropped
    let source = LocalFirst::new(
        args.songs_dir.map(SongsDirectory::new),
        BeatmapMirror::new(&args.mirror_url).context("Failed to create download directory")?,
    );
    let calculator = RosuCalculator;

    let report = Analyzer::new(&lookup, &source, &calculator)
        .analyze(&record)
        .context("Failed to analyze replay")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for line in output::format_report(&report, args.decimals) {
            println!("{line}");
        }
    }

    Ok(())
}
