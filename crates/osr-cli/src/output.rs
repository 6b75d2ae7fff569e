//! Text rendering of replay reports.

use osr_core::{ActionEvent, ReplayRecord, ReplayReport, Result, Timeline, format_mods};

/// Lines printed for a fully analyzed replay.
pub fn format_report(report: &ReplayReport, decimals: usize) -> Vec<String> {
    let mods = mods_suffix(&report.mods.concat());
    let beatmap = &report.beatmap;

    vec![
        format!(
            "{} | {} - {} [{}]{} ({:.prec$}★)",
            report.player,
            beatmap.artist,
            beatmap.title,
            beatmap.version,
            mods,
            report.performance.stars,
            prec = decimals
        ),
        format!("Score: {}", group_thousands(u64::from(report.score))),
        format!("Accuracy: {:.prec$}%", report.accuracy, prec = decimals),
        format_ma_ratio(report.ma_ratio, decimals),
        format!("PP: {:.prec$}", report.performance.pp, prec = decimals),
    ]
}

/// Lines printed with `--offline`, derived from the replay alone.
pub fn format_offline(record: &ReplayRecord, decimals: usize) -> Result<Vec<String>> {
    let mods = mods_suffix(&format_mods(&record.mod_list()?));
    let ma_ratio = record.ma_ratio().ok();
    let keys = record
        .key_count()?
        .map(|k| format!(" {k}K"))
        .unwrap_or_default();

    let mut lines = vec![
        format!(
            "{} | {}{}{}",
            record.player_name.as_deref().unwrap_or("<unknown>"),
            record
                .mode()
                .map(|m| m.display_name())
                .unwrap_or("unknown mode"),
            keys,
            mods
        ),
        format!(
            "Beatmap hash: {}",
            record.beatmap_hash.as_deref().unwrap_or("<none>")
        ),
        format!("Score: {}", group_thousands(u64::from(record.score))),
        format!("Max combo: {}", record.max_combo),
        format!("Accuracy: {:.prec$}%", record.accuracy()?, prec = decimals),
        format_ma_ratio(ma_ratio, decimals),
    ];

    if let Some(at) = record.recorded_at_utc() {
        lines.push(format!("Played: {}", at.format("%Y-%m-%d %H:%M:%S UTC")));
    }
    Ok(lines)
}

/// One line per event with absolute time, up to `limit` events.
pub fn format_events(events: &[ActionEvent], limit: usize) -> Vec<String> {
    Timeline::new(events)
        .absolute()
        .take(limit)
        .map(|(time, event)| {
            format!(
                "{time:>8} ms  +{:<6} keys {:#010b}",
                event.time_delta, event.input_state
            )
        })
        .collect()
}

fn format_ma_ratio(ratio: Option<f64>, decimals: usize) -> String {
    match ratio {
        Some(r) => format!("MA Ratio: {r:.prec$}:1", prec = decimals),
        None => "MA Ratio: undefined (no 300s)".to_string(),
    }
}

fn mods_suffix(tokens: &str) -> String {
    if tokens.is_empty() {
        String::new()
    } else {
        format!(" +{tokens}")
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
