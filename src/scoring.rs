// Rough per-game production rates used when a stats file carries no games
// column.
const PASSING_YARDS_PER_GAME: i64 = 250;
const SCRIMMAGE_YARDS_PER_GAME: i64 = 60;

/// Upstream splits expected-points contribution across the three roles a
/// player can fill; one number per record reflects all of them.
pub fn combined_epa(passing: f64, rushing: f64, receiving: f64) -> f64 {
    passing + rushing + receiving
}

/// The counting stats that score fantasy points.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringLine {
    pub passing_yards: i64,
    pub passing_tds: i64,
    pub interceptions: i64,
    pub rushing_yards: i64,
    pub rushing_tds: i64,
    pub receiving_yards: i64,
    pub receiving_tds: i64,
    pub receptions: i64,
}

/// PPR scoring total. Only used when the file ships no precomputed total.
pub fn ppr_points(line: &ScoringLine) -> f64 {
    line.passing_yards as f64 * 0.04
        + line.passing_tds as f64 * 4.0
        - line.interceptions as f64 * 2.0
        + line.rushing_yards as f64 * 0.1
        + line.rushing_tds as f64 * 6.0
        + line.receiving_yards as f64 * 0.1
        + line.receiving_tds as f64 * 6.0
        + line.receptions as f64
}

/// Estimate games played from cumulative yardage: roughly 250 passing yards
/// or 60 scrimmage yards per game, capped at the weeks already played and
/// floored to one game for anyone with production at all.
pub fn estimate_games_played(
    passing_yards: i64,
    rushing_yards: i64,
    receiving_yards: i64,
    current_week: i64,
) -> i64 {
    let mut games = 0;

    if passing_yards > 0 {
        games = passing_yards / PASSING_YARDS_PER_GAME;
        if games == 0 {
            games = 1;
        }
    } else if rushing_yards > 0 || receiving_yards > 0 {
        let scrimmage_yards = rushing_yards + receiving_yards;
        games = scrimmage_yards / SCRIMMAGE_YARDS_PER_GAME;
        if games == 0 && scrimmage_yards > 0 {
            games = 1;
        }
    }

    if games > current_week - 1 {
        games = current_week - 1;
    }

    if games < 1 && (passing_yards > 0 || rushing_yards > 0 || receiving_yards > 0) {
        games = 1;
    }

    games
}
