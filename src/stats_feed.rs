use anyhow::Result;

use crate::models::{SeasonStats, SeasonType, WeeklyStats};
use crate::scoring::{self, ScoringLine};
use crate::table::FeedTable;

/// Decode a season-level player stats file. `current_week` is the ingestion
/// week, used only to bound the games-played estimate for an in-progress
/// season; pass 19 or higher for completed seasons.
pub fn parse_season_stats(
    data: &[u8],
    season: i64,
    season_type: SeasonType,
    current_week: i64,
) -> Result<Vec<SeasonStats>> {
    let table = FeedTable::decode(data)?;
    Ok(map_season_stats(&table, season, season_type, current_week))
}

pub fn map_season_stats(
    table: &FeedTable,
    season: i64,
    season_type: SeasonType,
    current_week: i64,
) -> Vec<SeasonStats> {
    let mut stats = Vec::with_capacity(table.num_rows());

    for row in 0..table.num_rows() {
        let player_id = table.get_string("player_id", row);
        if player_id.is_empty() {
            continue;
        }

        let passing_epa = table.get_float("passing_epa", row);
        let rushing_epa = table.get_float("rushing_epa", row);
        let receiving_epa = table.get_float("receiving_epa", row);

        // Attempts only count toward the denominator for categories the
        // player actually produced EPA in.
        let mut play_count = 0;
        if passing_epa != 0.0 {
            play_count += table.get_int("attempts", row);
        }
        if rushing_epa != 0.0 {
            play_count += table.get_int("carries", row);
        }
        if receiving_epa != 0.0 {
            play_count += table.get_int("targets", row);
        }

        let line = ScoringLine {
            passing_yards: table.get_int("passing_yards", row),
            passing_tds: table.get_int("passing_tds", row),
            interceptions: table.get_int("passing_interceptions", row),
            rushing_yards: table.get_int("rushing_yards", row),
            rushing_tds: table.get_int("rushing_tds", row),
            receiving_yards: table.get_int("receiving_yards", row),
            receiving_tds: table.get_int("receiving_tds", row),
            receptions: table.get_int("receptions", row),
        };

        let mut games_played = table.get_int("games", row);
        if games_played == 0 {
            games_played = scoring::estimate_games_played(
                line.passing_yards,
                line.rushing_yards,
                line.receiving_yards,
                current_week,
            );
        }

        let mut fantasy_points_ppr = table.get_float("fantasy_points_ppr", row);
        if fantasy_points_ppr == 0.0 {
            fantasy_points_ppr = scoring::ppr_points(&line);
        }

        stats.push(SeasonStats {
            player_id,
            season,
            season_type,

            passing_yards: line.passing_yards,
            passing_tds: line.passing_tds,
            interceptions: line.interceptions,
            rushing_yards: line.rushing_yards,
            rushing_tds: line.rushing_tds,
            receptions: line.receptions,
            receiving_yards: line.receiving_yards,
            receiving_tds: line.receiving_tds,
            targets: table.get_int("targets", row),

            tackles: table.get_int("def_tackles_with_assist", row),
            tackles_solo: table.get_int("def_tackles_solo", row),
            tackle_assists: table.get_int("def_tackle_assists", row),
            tackles_for_loss: table.get_float("def_tackles_for_loss", row),
            sacks: table.get_float("def_sacks", row),
            sack_yards: table.get_float("def_sack_yards", row),
            def_interceptions: table.get_int("def_interceptions", row),
            passes_defended: table.get_int("def_pass_defended", row),
            forced_fumbles: table.get_int("def_fumbles_forced", row),
            fumble_recoveries: table.get_int("fumble_recovery_opp", row),
            def_touchdowns: table.get_int("def_tds", row),
            safeties: table.get_int("def_safeties", row),

            epa: scoring::combined_epa(passing_epa, rushing_epa, receiving_epa),
            play_count,
            games_played,

            fantasy_points: table.get_float("fantasy_points", row),
            fantasy_points_ppr,
        });
    }

    stats
}

/// Decode a weekly player stats file. Rows need a player id and a positive
/// week to be usable.
pub fn parse_weekly_stats(data: &[u8], season: i64) -> Result<Vec<WeeklyStats>> {
    let table = FeedTable::decode(data)?;
    Ok(map_weekly_stats(&table, season))
}

pub fn map_weekly_stats(table: &FeedTable, season: i64) -> Vec<WeeklyStats> {
    let mut stats = Vec::with_capacity(table.num_rows());

    for row in 0..table.num_rows() {
        let player_id = table.get_string("player_id", row);
        let week = table.get_int("week", row);
        if player_id.is_empty() || week <= 0 {
            continue;
        }

        let line = ScoringLine {
            passing_yards: table.get_int("passing_yards", row),
            passing_tds: table.get_int("passing_tds", row),
            interceptions: table.get_int("passing_interceptions", row),
            rushing_yards: table.get_int("rushing_yards", row),
            rushing_tds: table.get_int("rushing_tds", row),
            receiving_yards: table.get_int("receiving_yards", row),
            receiving_tds: table.get_int("receiving_tds", row),
            receptions: table.get_int("receptions", row),
        };

        let mut fantasy_points_ppr = table.get_float("fantasy_points_ppr", row);
        if fantasy_points_ppr == 0.0 {
            fantasy_points_ppr = scoring::ppr_points(&line);
        }

        stats.push(WeeklyStats {
            player_id,
            season,
            week,
            opponent: table.get_string("opponent_team", row),

            passing_yards: line.passing_yards,
            passing_tds: line.passing_tds,
            interceptions: line.interceptions,
            carries: table.get_int("carries", row),
            rushing_yards: line.rushing_yards,
            rushing_tds: line.rushing_tds,
            receptions: line.receptions,
            targets: table.get_int("targets", row),
            receiving_yards: line.receiving_yards,
            receiving_tds: line.receiving_tds,

            epa: scoring::combined_epa(
                table.get_float("passing_epa", row),
                table.get_float("rushing_epa", row),
                table.get_float("receiving_epa", row),
            ),
            fantasy_points: table.get_float("fantasy_points", row),
            fantasy_points_ppr,
        });
    }

    stats
}
