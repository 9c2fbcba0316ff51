use anyhow::Result;

use crate::models::Play;
use crate::table::FeedTable;

/// Decode a play-by-play file for one season. Rows with no usable play
/// identifier (a sizable minority of some releases) are skipped.
pub fn parse_play_by_play(data: &[u8], season: i64) -> Result<Vec<Play>> {
    let table = FeedTable::decode(data)?;
    Ok(map_plays(&table, season))
}

pub fn map_plays(table: &FeedTable, season: i64) -> Vec<Play> {
    let mut plays = Vec::with_capacity(table.num_rows());

    for row in 0..table.num_rows() {
        // Newer releases name the column play_id; older ones shipped a bare id.
        let mut play_id = table.get_string("play_id", row);
        if play_id.is_empty() {
            play_id = table.get_string("id", row);
        }
        if play_id.is_empty() {
            continue;
        }

        plays.push(Play {
            game_id: table.get_string("game_id", row),
            play_id,
            season,
            week: table.get_int("week", row),
            quarter: table.get_int("qtr", row),
            down: table.get_int("down", row),
            yards_to_go: table.get_int("ydstogo", row),
            yard_line: table.get_int("yardline_100", row),
            game_seconds_remaining: table.get_int("game_seconds_remaining", row),
            description: table.get_string("desc", row),
            play_type: table.get_string("play_type", row),
            possession_team: table.get_string("posteam", row),
            defense_team: table.get_string("defteam", row),
            passer_id: table.get_string("passer_player_id", row),
            passer_name: table.get_string("passer_player_name", row),
            receiver_id: table.get_string("receiver_player_id", row),
            rusher_id: table.get_string("rusher_player_id", row),
            yards_gained: table.get_int("yards_gained", row),
            touchdown: table.get_bool("touchdown", row),
            interception: table.get_bool("interception", row),
            fumble: table.get_bool("fumble", row),
            sack: table.get_bool("sack", row),
            epa: table.get_float("epa", row),
            wpa: table.get_float("wpa", row),
            success: table.get_bool("success", row),
            air_yards: table.get_int("air_yards", row),
            yards_after_catch: table.get_int("yards_after_catch", row),
        });
    }

    plays
}
