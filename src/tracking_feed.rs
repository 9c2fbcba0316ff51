use anyhow::Result;

use crate::models::{
    PassingTracking, ReceivingTracking, RushingTracking, StatType, TrackingMetrics, TrackingStat,
};
use crate::table::FeedTable;

/// Decode a Next Gen Stats file. The three categories ship as separate files
/// with disjoint columns, so the caller names the category and only that
/// branch's columns are read.
pub fn parse_tracking_stats(data: &[u8], stat_type: StatType) -> Result<Vec<TrackingStat>> {
    let table = FeedTable::decode(data)?;
    Ok(map_tracking_stats(&table, stat_type))
}

pub fn map_tracking_stats(table: &FeedTable, stat_type: StatType) -> Vec<TrackingStat> {
    let mut stats = Vec::with_capacity(table.num_rows());

    for row in 0..table.num_rows() {
        let player_id = table.get_string("player_gsis_id", row);
        if player_id.is_empty() {
            continue;
        }

        let metrics = match stat_type {
            StatType::Passing => TrackingMetrics::Passing(PassingTracking {
                attempts: table.get_int("attempts", row),
                completions: table.get_int("completions", row),
                pass_yards: table.get_int("pass_yards", row),
                pass_touchdowns: table.get_int("pass_touchdowns", row),
                interceptions: table.get_int("interceptions", row),
                completion_percentage_above_expectation: table
                    .get_float("completion_percentage_above_expectation", row),
                avg_time_to_throw: table.get_float("avg_time_to_throw", row),
                avg_completed_air_yards: table.get_float("avg_completed_air_yards", row),
                avg_intended_air_yards: table.get_float("avg_intended_air_yards", row),
                avg_air_yards_differential: table.get_float("avg_air_yards_differential", row),
                max_completed_air_distance: table.get_float("max_completed_air_distance", row),
            }),
            StatType::Rushing => TrackingMetrics::Rushing(RushingTracking {
                carries: table.get_int("carries", row),
                rush_yards: table.get_int("rush_yards", row),
                rush_touchdowns: table.get_int("rush_touchdowns", row),
                expected_rush_yards: table.get_float("expected_rush_yards", row),
                rush_yards_over_expected: table.get_float("rush_yards_over_expected", row),
                avg_time_to_los: table.get_float("avg_time_to_los", row),
                efficiency: table.get_float("efficiency", row),
            }),
            StatType::Receiving => TrackingMetrics::Receiving(ReceivingTracking {
                receptions: table.get_int("receptions", row),
                targets: table.get_int("targets", row),
                receiving_yards: table.get_int("yards", row),
                receiving_touchdowns: table.get_int("rec_touchdowns", row),
                avg_cushion: table.get_float("avg_cushion", row),
                avg_separation: table.get_float("avg_separation", row),
                avg_intended_air_yards: table.get_float("avg_intended_air_yards", row),
                share_of_intended_air_yards: table
                    .get_float("percent_share_of_intended_air_yards", row),
                avg_yac: table.get_float("avg_yac", row),
                avg_expected_yac: table.get_float("avg_expected_yac", row),
                avg_yac_above_expectation: table.get_float("avg_yac_above_expectation", row),
            }),
        };

        stats.push(TrackingStat {
            player_id,
            season: table.get_int("season", row),
            week: table.get_int("week", row),
            player_name: table.get_string("player_display_name", row),
            team: table.get_string("team_abbr", row),
            position: table.get_string("player_position", row),
            metrics,
        });
    }

    stats
}
