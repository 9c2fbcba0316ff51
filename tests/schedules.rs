use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{TimeZone, Utc};
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;

use nflverse_ingest::models::GameStatus;
use nflverse_ingest::schedule_feed;
use nflverse_ingest::table::FeedTable;

fn feed_bytes(columns: Vec<(&str, ArrayRef)>) -> Vec<u8> {
    let fields = columns
        .iter()
        .map(|(name, array)| Field::new(*name, array.data_type().clone(), true))
        .collect::<Vec<_>>();
    let schema = Arc::new(Schema::new(fields));
    let arrays = columns
        .into_iter()
        .map(|(_, array)| array)
        .collect::<Vec<_>>();
    let batch = RecordBatch::try_new(schema.clone(), arrays).expect("batch should build");

    let mut buf = Vec::new();
    let props = WriterProperties::builder().build();
    let mut writer =
        ArrowWriter::try_new(&mut buf, schema, Some(props)).expect("writer should open");
    writer.write(&batch).expect("batch should write");
    writer.close().expect("writer should close");
    buf
}

fn schedule_table() -> FeedTable {
    let data = feed_bytes(vec![
        (
            "game_id",
            Arc::new(StringArray::from(vec![
                "2024_02_BUF_MIA",
                "2024_01_NYJ_NE",
                "2024_01_KC_BAL",
                "",
            ])) as ArrayRef,
        ),
        (
            "season",
            Arc::new(Int64Array::from(vec![2024i64, 2024, 2024, 2024])),
        ),
        ("week", Arc::new(Int64Array::from(vec![2i64, 1, 1, 1]))),
        (
            "home_team",
            Arc::new(StringArray::from(vec!["MIA", "NE", "BAL", "X"])),
        ),
        (
            "away_team",
            Arc::new(StringArray::from(vec!["BUF", "NYJ", "KC", "Y"])),
        ),
        (
            "gameday",
            Arc::new(StringArray::from(vec![
                "2024-09-08",
                "2024-09-01",
                "2024-09-05",
                "2024-09-08",
            ])),
        ),
        (
            "gametime",
            Arc::new(StringArray::from(vec!["13:00", "13:00", "20:20", "13:00"])),
        ),
        (
            "home_score",
            Arc::new(Int64Array::from(vec![0i64, 0, 27, 0])),
        ),
        (
            "away_score",
            Arc::new(Int64Array::from(vec![0i64, 0, 20, 0])),
        ),
        (
            "spread_line",
            Arc::new(Float64Array::from(vec![-2.5f64, 3.0, -3.5, 0.0])),
        ),
        (
            "total_line",
            Arc::new(Float64Array::from(vec![47.5f64, 41.0, 46.5, 0.0])),
        ),
    ]);
    FeedTable::decode(&data).expect("schedule should decode")
}

#[test]
fn scoreless_games_split_on_kickoff_time() {
    let table = schedule_table();
    // Two hours before the first game's 17:00Z kickoff.
    let now = Utc.with_ymd_and_hms(2024, 9, 8, 15, 0, 0).unwrap();
    let games = schedule_feed::map_schedules(&table, now);

    assert_eq!(games.len(), 3, "the row without a game_id must drop");
    // 0-0 with kickoff still ahead: scheduled.
    assert_eq!(games[0].status, GameStatus::Scheduled);
    // 0-0 but kicked off a week ago: assumed final.
    assert_eq!(games[1].status, GameStatus::Final);
    // Points on the board: final regardless of clock.
    assert_eq!(games[2].status, GameStatus::Final);
}

#[test]
fn kickoff_resolves_in_eastern_time() {
    let table = schedule_table();
    let now = Utc.with_ymd_and_hms(2024, 9, 8, 15, 0, 0).unwrap();
    let games = schedule_feed::map_schedules(&table, now);

    // 13:00 EDT is 17:00 UTC; 20:20 EDT crosses midnight UTC.
    assert_eq!(
        games[0].kickoff,
        Some(Utc.with_ymd_and_hms(2024, 9, 8, 17, 0, 0).unwrap())
    );
    assert_eq!(
        games[2].kickoff,
        Some(Utc.with_ymd_and_hms(2024, 9, 6, 0, 20, 0).unwrap())
    );
}

#[test]
fn market_lines_and_scores_read_back() {
    let table = schedule_table();
    let now = Utc.with_ymd_and_hms(2024, 9, 8, 15, 0, 0).unwrap();
    let games = schedule_feed::map_schedules(&table, now);

    assert_eq!(games[0].spread_line, -2.5);
    assert_eq!(games[0].total_line, 47.5);
    assert_eq!(games[2].home_score, 27);
    assert_eq!(games[2].away_score, 20);
    assert_eq!(games[2].home_team, "BAL");
    assert_eq!(games[2].season, 2024);
    assert_eq!(games[2].week, 1);
}

#[test]
fn missing_kickoff_columns_leave_games_final() {
    let data = feed_bytes(vec![
        (
            "game_id",
            Arc::new(StringArray::from(vec!["2024_03_DEN_LV"])) as ArrayRef,
        ),
        ("home_score", Arc::new(Int64Array::from(vec![0i64]))),
        ("away_score", Arc::new(Int64Array::from(vec![0i64]))),
    ]);
    let table = FeedTable::decode(&data).expect("schedule should decode");
    let now = Utc.with_ymd_and_hms(2024, 9, 8, 15, 0, 0).unwrap();
    let games = schedule_feed::map_schedules(&table, now);

    assert_eq!(games.len(), 1);
    assert_eq!(games[0].kickoff, None);
    assert_eq!(games[0].status, GameStatus::Final);
}
