use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::America::New_York;

use crate::models::Game;
use crate::status;
use crate::table::FeedTable;

// League kickoff times are published in Eastern time; early-window games
// default to 1pm when the file carries no time.
const DEFAULT_KICKOFF_ET: &str = "13:00";

/// Decode a schedules file covering one or more seasons.
pub fn parse_schedules(data: &[u8]) -> Result<Vec<Game>> {
    let table = FeedTable::decode(data)?;
    Ok(map_schedules(&table, Utc::now()))
}

/// `now` feeds the scheduled-vs-final inference; production callers pass
/// the wall clock.
pub fn map_schedules(table: &FeedTable, now: DateTime<Utc>) -> Vec<Game> {
    let mut games = Vec::with_capacity(table.num_rows());

    for row in 0..table.num_rows() {
        let game_id = table.get_string("game_id", row);
        if game_id.is_empty() {
            continue;
        }

        let home_score = table.get_int("home_score", row);
        let away_score = table.get_int("away_score", row);
        let kickoff = parse_kickoff(
            &table.get_string("gameday", row),
            &table.get_string("gametime", row),
        );

        games.push(Game {
            game_id,
            season: table.get_int("season", row),
            week: table.get_int("week", row),
            home_team: table.get_string("home_team", row),
            away_team: table.get_string("away_team", row),
            kickoff,
            spread_line: table.get_float("spread_line", row),
            total_line: table.get_float("total_line", row),
            home_score,
            away_score,
            status: status::infer_game_status(home_score, away_score, kickoff, now),
        });
    }

    games
}

/// Combine the date and optional time strings into a UTC kickoff, reading
/// them as Eastern time. Time strings drift across releases, so a combined
/// parse failure falls back to the bare date at UTC midnight.
fn parse_kickoff(gameday: &str, gametime: &str) -> Option<DateTime<Utc>> {
    if gameday.is_empty() {
        return None;
    }

    let time = if gametime.is_empty() {
        DEFAULT_KICKOFF_ET
    } else {
        gametime
    };
    let combined = format!("{gameday} {time}");
    if let Ok(local) = NaiveDateTime::parse_from_str(&combined, "%Y-%m-%d %H:%M") {
        if let Some(kickoff) = New_York.from_local_datetime(&local).earliest() {
            return Some(kickoff.with_timezone(&Utc));
        }
    }

    let date = NaiveDate::parse_from_str(gameday, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight))
}
