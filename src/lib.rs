//! Decodes nflverse Parquet feed files into typed domain records: plays,
//! roster entries, season/weekly player stats, schedule entries and Next
//! Gen Stats tracking metrics. Pure and synchronous; fetching the bytes and
//! persisting the records are the caller's business.

pub mod models;
pub mod play_feed;
pub mod roster_feed;
pub mod schedule_feed;
pub mod scoring;
pub mod stats_feed;
pub mod status;
pub mod table;
pub mod tracking_feed;

pub use models::{
    Game, GameStatus, Play, RosterEntry, SeasonStats, SeasonType, StatType, TrackingStat,
    WeeklyStats,
};
pub use play_feed::parse_play_by_play;
pub use roster_feed::{parse_seasonal_rosters, parse_weekly_rosters};
pub use schedule_feed::parse_schedules;
pub use stats_feed::{parse_season_stats, parse_weekly_stats};
pub use table::FeedTable;
pub use tracking_feed::parse_tracking_stats;
