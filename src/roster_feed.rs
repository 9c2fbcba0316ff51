use anyhow::Result;

use crate::models::RosterEntry;
use crate::table::FeedTable;

/// Decode a seasonal roster file. One row per player; the season comes from
/// the caller because the files are published one per season.
pub fn parse_seasonal_rosters(data: &[u8], season: i64) -> Result<Vec<RosterEntry>> {
    let table = FeedTable::decode(data)?;
    Ok(map_seasonal_rosters(&table, season))
}

pub fn map_seasonal_rosters(table: &FeedTable, season: i64) -> Vec<RosterEntry> {
    let mut entries = Vec::with_capacity(table.num_rows());
    for row in 0..table.num_rows() {
        let Some(entry) = roster_entry_at(table, row, season) else {
            continue;
        };
        entries.push(entry);
    }
    entries
}

/// Decode a weekly roster file. The same player appears once per published
/// week; each row carries that week's status, and the store keeps the latest
/// row it sees per (player, season).
pub fn parse_weekly_rosters(data: &[u8], season: i64) -> Result<Vec<RosterEntry>> {
    let table = FeedTable::decode(data)?;
    Ok(map_weekly_rosters(&table, season))
}

pub fn map_weekly_rosters(table: &FeedTable, season: i64) -> Vec<RosterEntry> {
    let mut entries = Vec::with_capacity(table.num_rows());
    for row in 0..table.num_rows() {
        let Some(mut entry) = roster_entry_at(table, row, season) else {
            continue;
        };
        entry.week = table.get_int("week", row);
        entries.push(entry);
    }
    entries
}

fn roster_entry_at(table: &FeedTable, row: usize, season: i64) -> Option<RosterEntry> {
    let player_id = table.get_string("gsis_id", row);
    if player_id.is_empty() {
        return None;
    }

    Some(RosterEntry {
        player_id,
        season,
        name: table.get_string("full_name", row),
        team: table.get_string("team", row),
        position: table.get_string("position", row),
        status: table.get_string("status", row),
        status_description_abbr: table.get_string("status_description_abbr", row),
        week: 0,
    })
}
