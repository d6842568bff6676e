//! Event log written through the real file path.

use std::fs;
use std::path::PathBuf;

use pocket_tetris::core::{GameState, Tetromino};
use pocket_tetris::event_log::{EventLog, LogRecord};
use pocket_tetris::types::{GameAction, PieceKind};

fn temp_log(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("pocket-tetris-{}-{}.jsonl", name, std::process::id()));
    let _ = fs::remove_file(&path);
    path
}

#[test]
fn lock_events_are_appended_as_json_lines() {
    let path = temp_log("locks");
    let mut log = EventLog::open(Some(path.as_path())).unwrap();
    assert!(log.is_enabled());

    let mut game = GameState::new(11);
    game.set_current_piece(Tetromino::new(PieceKind::O, 0));
    log.record(&LogRecord::Start { seed: 11 }).unwrap();

    let mut locks = 0;
    while locks < 2 {
        game.tick(0, Some(GameAction::Drop));
        if let Some(ev) = game.take_last_event() {
            log.record(&LogRecord::from(&ev)).unwrap();
            locks += 1;
        }
    }
    drop(log);

    // Reopening appends instead of truncating.
    let mut log = EventLog::open(Some(path.as_path())).unwrap();
    log.record(&LogRecord::Reset { score: game.score(), rows: game.rows() })
        .unwrap();
    drop(log);

    let text = fs::read_to_string(&path).unwrap();
    let records: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    let _ = fs::remove_file(&path);

    assert_eq!(records.len(), 4);
    assert_eq!(records[0]["event"], "start");
    assert_eq!(records[1]["event"], "lock");
    assert_eq!(records[1]["kind"], "o");
    assert_eq!(records[1]["score"], 10);
    assert_eq!(records[2]["score"], 20);
    assert_eq!(records[3]["event"], "reset");
    assert_eq!(records[3]["score"], 20);
}

#[test]
fn missing_path_means_disabled() {
    let mut log = EventLog::open(None).unwrap();
    assert!(!log.is_enabled());
    log.record(&LogRecord::GameOver { score: 0, rows: 0 }).unwrap();
}
