use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use once_cell::sync::Lazy;

use crate::models::GameStatus;

/// Roster status codes that keep a player off the field, with the
/// descriptions shown to users. Codes outside this table only matter when
/// the raw status also says inactive.
static STATUS_DESCRIPTIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("R01", "Reserve/Injured"),
        ("R04", "Reserve/PUP"),
        ("R48", "Reserve/Injured; DFR"),
        ("P02", "Practice Squad; Injured"),
    ])
});

const INACTIVE_STATUS: &str = "INA";

// A 0-0 game this long past kickoff is assumed to have finished.
const RESULT_LOOKBACK_HOURS: i64 = 4;

pub fn is_status_affected(status: &str, status_abbr: &str) -> bool {
    status == INACTIVE_STATUS || STATUS_DESCRIPTIONS.contains_key(status_abbr)
}

pub fn status_description(status: &str, status_abbr: &str) -> &'static str {
    if let Some(description) = STATUS_DESCRIPTIONS.get(status_abbr) {
        return description;
    }
    if status == INACTIVE_STATUS {
        return "Inactive";
    }
    "Active"
}

/// Classify a schedule entry from its scores and kickoff time. The feed has
/// no live state, so everything is final unless the game is still scoreless
/// and kickoff is not safely in the past.
pub fn infer_game_status(
    home_score: i64,
    away_score: i64,
    kickoff: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> GameStatus {
    if home_score == 0 && away_score == 0 {
        if let Some(kickoff) = kickoff {
            if kickoff > now - Duration::hours(RESULT_LOOKBACK_HOURS) {
                return GameStatus::Scheduled;
            }
        }
    }
    GameStatus::Final
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn reserve_injured_code_is_affected() {
        assert!(is_status_affected("ACT", "R01"));
        assert_eq!(status_description("ACT", "R01"), "Reserve/Injured");
    }

    #[test]
    fn active_player_without_code_is_unaffected() {
        assert!(!is_status_affected("ACT", ""));
        assert_eq!(status_description("ACT", ""), "Active");
    }

    #[test]
    fn inactive_without_known_code_still_flags() {
        assert!(is_status_affected("INA", ""));
        assert_eq!(status_description("INA", ""), "Inactive");
        // Unknown code, but the raw status wins.
        assert!(is_status_affected("INA", "R99"));
        assert_eq!(status_description("INA", "R99"), "Inactive");
    }

    #[test]
    fn every_table_code_maps() {
        for (code, want) in [
            ("R01", "Reserve/Injured"),
            ("R04", "Reserve/PUP"),
            ("R48", "Reserve/Injured; DFR"),
            ("P02", "Practice Squad; Injured"),
        ] {
            assert!(is_status_affected("ACT", code));
            assert_eq!(status_description("ACT", code), want);
        }
    }

    #[test]
    fn scoreless_future_kickoff_is_scheduled() {
        let now = Utc.with_ymd_and_hms(2024, 11, 3, 15, 0, 0).unwrap();
        let kickoff = Some(now + Duration::hours(2));
        assert_eq!(
            infer_game_status(0, 0, kickoff, now),
            GameStatus::Scheduled
        );
    }

    #[test]
    fn scoreless_old_kickoff_is_final() {
        let now = Utc.with_ymd_and_hms(2024, 11, 3, 15, 0, 0).unwrap();
        let kickoff = Some(now - Duration::hours(6));
        assert_eq!(infer_game_status(0, 0, kickoff, now), GameStatus::Final);
    }

    #[test]
    fn recent_scoreless_kickoff_stays_scheduled() {
        // Inside the lookback buffer a 0-0 game could still be in progress,
        // but the feed cannot say so; it stays scheduled until the buffer
        // elapses.
        let now = Utc.with_ymd_and_hms(2024, 11, 3, 15, 0, 0).unwrap();
        let kickoff = Some(now - Duration::hours(2));
        assert_eq!(
            infer_game_status(0, 0, kickoff, now),
            GameStatus::Scheduled
        );
    }

    #[test]
    fn any_points_means_final() {
        let now = Utc.with_ymd_and_hms(2024, 11, 3, 15, 0, 0).unwrap();
        let kickoff = Some(now + Duration::hours(2));
        assert_eq!(infer_game_status(21, 17, kickoff, now), GameStatus::Final);
    }

    #[test]
    fn unresolved_kickoff_is_final() {
        let now = Utc.with_ymd_and_hms(2024, 11, 3, 15, 0, 0).unwrap();
        assert_eq!(infer_game_status(0, 0, None, now), GameStatus::Final);
    }
}
