use std::str::FromStr;

use anyhow::{Error, anyhow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status;

/// One play from one game, keyed by (game_id, play_id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Play {
    pub game_id: String,
    pub play_id: String,
    pub season: i64,
    pub week: i64,
    pub quarter: i64,
    pub down: i64,
    pub yards_to_go: i64,
    // Distance from the opponent goal line, so 100 is a team's own goal line.
    pub yard_line: i64,
    pub game_seconds_remaining: i64,
    pub description: String,
    pub play_type: String,
    pub possession_team: String,
    pub defense_team: String,
    pub passer_id: String,
    pub passer_name: String,
    pub receiver_id: String,
    pub rusher_id: String,
    pub yards_gained: i64,
    pub touchdown: bool,
    pub interception: bool,
    pub fumble: bool,
    pub sack: bool,
    pub epa: f64,
    pub wpa: f64,
    pub success: bool,
    pub air_yards: i64,
    pub yards_after_catch: i64,
}

/// A player's roster entry for one season. Weekly roster files refresh the
/// status fields; the store keeps whichever row it saw last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub player_id: String,
    pub season: i64,
    pub name: String,
    pub team: String,
    pub position: String,
    // Raw roster status (ACT, INA, ...) and the short code behind it
    // (R01, P02, ...). Use the helpers below for the normalized view.
    pub status: String,
    pub status_description_abbr: String,
    // Latest week this status was observed. 0 for seasonal roster files.
    pub week: i64,
}

impl RosterEntry {
    pub fn is_status_affected(&self) -> bool {
        status::is_status_affected(&self.status, &self.status_description_abbr)
    }

    pub fn status_description(&self) -> &'static str {
        status::status_description(&self.status, &self.status_description_abbr)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeasonType {
    #[serde(rename = "REG")]
    Reg,
    #[serde(rename = "POST")]
    Post,
    #[serde(rename = "REGPOST")]
    RegPost,
}

impl SeasonType {
    pub fn as_str(self) -> &'static str {
        match self {
            SeasonType::Reg => "REG",
            SeasonType::Post => "POST",
            SeasonType::RegPost => "REGPOST",
        }
    }
}

impl FromStr for SeasonType {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_uppercase().as_str() {
            "REG" => Ok(SeasonType::Reg),
            "POST" => Ok(SeasonType::Post),
            "REGPOST" => Ok(SeasonType::RegPost),
            other => Err(anyhow!("unknown season type {other:?}")),
        }
    }
}

/// Cumulative player stats for one season, keyed by
/// (player_id, season, season_type).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonStats {
    pub player_id: String,
    pub season: i64,
    pub season_type: SeasonType,

    pub passing_yards: i64,
    pub passing_tds: i64,
    pub interceptions: i64,
    pub rushing_yards: i64,
    pub rushing_tds: i64,
    pub receptions: i64,
    pub receiving_yards: i64,
    pub receiving_tds: i64,
    pub targets: i64,

    pub tackles: i64,
    pub tackles_solo: i64,
    pub tackle_assists: i64,
    pub tackles_for_loss: f64,
    pub sacks: f64,
    pub sack_yards: f64,
    pub def_interceptions: i64,
    pub passes_defended: i64,
    pub forced_fumbles: i64,
    pub fumble_recoveries: i64,
    pub def_touchdowns: i64,
    pub safeties: i64,

    // Passing, rushing and receiving EPA summed into one number.
    pub epa: f64,
    // Attempts/carries/targets over the categories with nonzero EPA.
    pub play_count: i64,
    // From the file's games column when present, estimated otherwise.
    pub games_played: i64,

    pub fantasy_points: f64,
    pub fantasy_points_ppr: f64,
}

/// One player's stat line for one week, keyed by (player_id, season, week).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyStats {
    pub player_id: String,
    pub season: i64,
    pub week: i64,
    pub opponent: String,

    pub passing_yards: i64,
    pub passing_tds: i64,
    pub interceptions: i64,
    pub carries: i64,
    pub rushing_yards: i64,
    pub rushing_tds: i64,
    pub receptions: i64,
    pub targets: i64,
    pub receiving_yards: i64,
    pub receiving_tds: i64,

    pub epa: f64,
    pub fantasy_points: f64,
    pub fantasy_points_ppr: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Scheduled,
    Final,
}

/// One schedule entry, keyed by game_id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub game_id: String,
    pub season: i64,
    pub week: i64,
    pub home_team: String,
    pub away_team: String,
    // Resolved from the gameday/gametime columns; None when no date parses.
    pub kickoff: Option<DateTime<Utc>>,
    pub spread_line: f64,
    pub total_line: f64,
    pub home_score: i64,
    pub away_score: i64,
    pub status: GameStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatType {
    Passing,
    Rushing,
    Receiving,
}

impl StatType {
    pub fn as_str(self) -> &'static str {
        match self {
            StatType::Passing => "passing",
            StatType::Rushing => "rushing",
            StatType::Receiving => "receiving",
        }
    }
}

impl FromStr for StatType {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_lowercase().as_str() {
            "passing" => Ok(StatType::Passing),
            "rushing" => Ok(StatType::Rushing),
            "receiving" => Ok(StatType::Receiving),
            other => Err(anyhow!("unknown tracking stat type {other:?}")),
        }
    }
}

/// A Next Gen Stats tracking record, keyed by
/// (player_id, season, week, stat type). Week 0 rows are season totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingStat {
    pub player_id: String,
    pub season: i64,
    pub week: i64,
    pub player_name: String,
    pub team: String,
    pub position: String,
    #[serde(flatten)]
    pub metrics: TrackingMetrics,
}

impl TrackingStat {
    pub fn stat_type(&self) -> StatType {
        match self.metrics {
            TrackingMetrics::Passing(_) => StatType::Passing,
            TrackingMetrics::Rushing(_) => StatType::Rushing,
            TrackingMetrics::Receiving(_) => StatType::Receiving,
        }
    }
}

/// The three tracking categories carry disjoint metric sets, so each one is
/// its own variant rather than a sparse flat record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stat_type", rename_all = "lowercase")]
pub enum TrackingMetrics {
    Passing(PassingTracking),
    Rushing(RushingTracking),
    Receiving(ReceivingTracking),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassingTracking {
    pub attempts: i64,
    pub completions: i64,
    pub pass_yards: i64,
    pub pass_touchdowns: i64,
    pub interceptions: i64,
    pub completion_percentage_above_expectation: f64,
    pub avg_time_to_throw: f64,
    pub avg_completed_air_yards: f64,
    pub avg_intended_air_yards: f64,
    pub avg_air_yards_differential: f64,
    pub max_completed_air_distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RushingTracking {
    pub carries: i64,
    pub rush_yards: i64,
    pub rush_touchdowns: i64,
    pub expected_rush_yards: f64,
    pub rush_yards_over_expected: f64,
    pub avg_time_to_los: f64,
    pub efficiency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceivingTracking {
    pub receptions: i64,
    pub targets: i64,
    pub receiving_yards: i64,
    pub receiving_touchdowns: i64,
    pub avg_cushion: f64,
    pub avg_separation: f64,
    pub avg_intended_air_yards: f64,
    pub share_of_intended_air_yards: f64,
    pub avg_yac: f64,
    pub avg_expected_yac: f64,
    pub avg_yac_above_expectation: f64,
}
