use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use chrono::{Datelike, Utc};
use serde::Serialize;

use nflverse_ingest::models::{SeasonType, StatType};
use nflverse_ingest::table::FeedTable;
use nflverse_ingest::{play_feed, roster_feed, schedule_feed, stats_feed, tracking_feed};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FeedKind {
    PlayByPlay,
    Rosters,
    WeeklyRosters,
    SeasonStats,
    WeeklyStats,
    Schedules,
    Tracking,
}

fn main() -> Result<()> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        print_usage();
        return Ok(());
    }

    let feed = flag_value(&args, "--feed").context("--feed <kind> is required")?;
    let feed = parse_feed_kind(&feed)?;
    let file = PathBuf::from(flag_value(&args, "--file").context("--file <path> is required")?);

    let season = parse_flag::<i64>(&args, "--season")?.unwrap_or_else(current_season);
    let season_type = parse_flag::<SeasonType>(&args, "--season-type")?.unwrap_or(SeasonType::Reg);
    let stat_type = parse_flag::<StatType>(&args, "--stat-type")?;
    // Week the ingest runs in; bounds the games-played estimate.
    let current_week = parse_flag::<i64>(&args, "--current-week")?.unwrap_or(19);

    let data = fs::read(&file).with_context(|| format!("read {}", file.display()))?;
    println!("{} ({} bytes)", file.display(), data.len());

    let table = FeedTable::decode_with(&data, Some(&print_schema))?;
    println!("rows: {}", table.num_rows());

    match feed {
        FeedKind::PlayByPlay => summarize("plays", &play_feed::map_plays(&table, season)),
        FeedKind::Rosters => summarize(
            "roster entries",
            &roster_feed::map_seasonal_rosters(&table, season),
        ),
        FeedKind::WeeklyRosters => summarize(
            "weekly roster entries",
            &roster_feed::map_weekly_rosters(&table, season),
        ),
        FeedKind::SeasonStats => summarize(
            "season stat lines",
            &stats_feed::map_season_stats(&table, season, season_type, current_week),
        ),
        FeedKind::WeeklyStats => summarize(
            "weekly stat lines",
            &stats_feed::map_weekly_stats(&table, season),
        ),
        FeedKind::Schedules => summarize("games", &schedule_feed::map_schedules(&table, Utc::now())),
        FeedKind::Tracking => {
            let stat_type = stat_type.context("--stat-type is required for tracking feeds")?;
            summarize(
                "tracking stats",
                &tracking_feed::map_tracking_stats(&table, stat_type),
            )
        }
    }
}

fn summarize<T: Serialize>(label: &str, records: &[T]) -> Result<()> {
    println!("{label}: {}", records.len());
    if let Some(first) = records.first() {
        let sample = serde_json::to_string_pretty(first).context("serialize sample record")?;
        println!("sample record:\n{sample}");
    }
    Ok(())
}

fn print_schema(names: &[String]) {
    println!("columns ({}): {}", names.len(), names.join(", "));
}

fn parse_feed_kind(raw: &str) -> Result<FeedKind> {
    match raw.to_lowercase().as_str() {
        "play_by_play" | "pbp" => Ok(FeedKind::PlayByPlay),
        "rosters" => Ok(FeedKind::Rosters),
        "weekly_rosters" => Ok(FeedKind::WeeklyRosters),
        "season_stats" => Ok(FeedKind::SeasonStats),
        "weekly_stats" => Ok(FeedKind::WeeklyStats),
        "schedules" => Ok(FeedKind::Schedules),
        "tracking" | "ngs" => Ok(FeedKind::Tracking),
        other => Err(anyhow!("unknown feed kind {other:?}")),
    }
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&format!("{flag}=")) {
            if !value.trim().is_empty() {
                return Some(value.trim().to_string());
            }
        }
        if arg == flag {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(next.trim().to_string());
            }
        }
    }
    None
}

fn parse_flag<T>(args: &[String], flag: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: Into<anyhow::Error>,
{
    let Some(raw) = flag_value(args, flag) else {
        return Ok(None);
    };
    match raw.parse::<T>() {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            let err: anyhow::Error = err.into();
            Err(err.context(format!("parse {flag} {raw:?}")))
        }
    }
}

fn current_season() -> i64 {
    i64::from(Utc::now().year())
}

fn print_usage() {
    println!("usage: feed_ingest --feed <kind> --file <path> [options]");
    println!();
    println!("feed kinds: play_by_play, rosters, weekly_rosters, season_stats,");
    println!("            weekly_stats, schedules, tracking");
    println!();
    println!("options:");
    println!("  --season <year>         season the file covers (default: current year)");
    println!("  --season-type <type>    REG, POST or REGPOST (default: REG)");
    println!("  --current-week <week>   ingestion week, bounds games-played (default: 19)");
    println!("  --stat-type <type>      passing, rushing or receiving (tracking only)");
}
