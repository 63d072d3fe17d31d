use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use ghost_catcher_core::{
    CellState, Command, Event, GameConfig, GameState, GenerationError, LevelLayout, Position,
};
use ghost_catcher_session::Session;

fn seeded(seed: u64) -> Session {
    Session::new(GameConfig::default(), Some(seed))
}

fn corner_level(level: u32) -> LevelLayout {
    LevelLayout {
        level,
        attempt: 0,
        columns: 3,
        rows: 3,
        pots: vec![Position::new(2, 2)],
        obstacles: Vec::new(),
        ghost_start: Position::new(0, 0),
        max_talismans: 10,
    }
}

fn win_corner_level(session: &mut Session) -> Vec<Event> {
    let mut log = Vec::new();
    for (column, row) in [(1, 1), (0, 0), (0, 1), (0, 2)] {
        log.extend(
            session
                .place_talisman(Position::new(column, row))
                .expect("placements never generate levels"),
        );
    }
    log
}

#[test]
fn start_loads_the_first_level() {
    let mut session = seeded(7);

    let events = session.start_game().expect("level 1 fits the default grid");

    assert_eq!(events[0], Event::LevelRequested { level: 1, attempt: 0 });
    assert!(events.contains(&Event::StateChanged {
        from: GameState::Menu,
        to: GameState::Playing,
    }));
    assert_eq!(session.state(), GameState::Playing);

    let snapshot = session.snapshot().expect("level installed");
    assert_eq!(snapshot.level, 1);
    assert_eq!(snapshot.attempt, 0);
    assert_eq!((snapshot.columns, snapshot.rows), (20, 22));
    assert_eq!(snapshot.pots.len(), 5);
    assert_eq!(snapshot.obstacles.len(), 8);
    assert_eq!(snapshot.max_talismans, 22);
    assert_eq!(snapshot.talismans_used, 0);
    for pot in &snapshot.pots {
        assert_eq!(snapshot.cell(*pot), CellState::Pot);
    }
    assert_eq!(snapshot.cell(snapshot.ghost), CellState::Empty);
}

#[test]
fn start_is_ignored_outside_the_menu() {
    let mut session = seeded(7);
    let _ = session.start_game().expect("level 1");

    assert!(session.start_game().expect("ignored").is_empty());
    assert!(session.resume().expect("ignored").is_empty());
    assert!(session.retry_level().expect("ignored").is_empty());
    assert!(session.advance_level().expect("ignored").is_empty());
    assert_eq!(session.state(), GameState::Playing);
}

#[test]
fn pause_blocks_placements_until_resumed() {
    let mut session = seeded(3);
    let _ = session.submit(Command::LoadLevel {
        layout: corner_level(1),
    });

    let _ = session.pause().expect("pause");
    assert_eq!(session.state(), GameState::Paused);
    assert!(session
        .place_talisman(Position::new(1, 1))
        .expect("ignored")
        .is_empty());

    let _ = session.resume().expect("resume");
    assert_eq!(session.state(), GameState::Playing);
    assert!(!session
        .place_talisman(Position::new(1, 1))
        .expect("placement")
        .is_empty());
}

#[test]
fn completing_a_level_scores_once_and_advances() {
    let mut session = seeded(3);
    let _ = session.submit(Command::LoadLevel {
        layout: corner_level(1),
    });

    let events = win_corner_level(&mut session);
    assert!(events.contains(&Event::LevelCompleted {
        level: 1,
        awarded: 6,
        score: 6,
    }));
    assert_eq!(session.state(), GameState::LevelComplete);

    assert!(session
        .place_talisman(Position::new(2, 0))
        .expect("ignored")
        .is_empty());
    assert_eq!(session.score(), 6);

    let events = session.advance_level().expect("level 2 fits the default grid");
    assert_eq!(events[0], Event::LevelRequested { level: 2, attempt: 0 });
    assert_eq!(session.state(), GameState::Playing);
    assert_eq!(session.level_number(), 2);
    assert_eq!(session.score(), 6);
}

#[test]
fn advancing_past_the_last_level_ends_the_game() {
    let config = GameConfig {
        total_levels: 1,
        ..GameConfig::default()
    };
    let mut session = Session::new(config, Some(1));
    let _ = session.submit(Command::LoadLevel {
        layout: corner_level(1),
    });
    let _ = win_corner_level(&mut session);

    let events = session.advance_level().expect("no generation needed");

    assert_eq!(
        events,
        vec![Event::StateChanged {
            from: GameState::LevelComplete,
            to: GameState::GameOver,
        }]
    );

    let _ = session.return_to_menu().expect("menu");
    assert_eq!(session.state(), GameState::Menu);
}

#[test]
fn retry_after_failure_regenerates_the_same_level() {
    let mut session = seeded(21);
    let _ = session.submit(Command::LoadLevel {
        layout: LevelLayout {
            max_talismans: 1,
            ..corner_level(4)
        },
    });
    let _ = session.place_talisman(Position::new(1, 1)).expect("placement");
    assert_eq!(session.state(), GameState::LevelFailed);

    let events = session.retry_level().expect("level 4 fits the default grid");

    assert_eq!(events[0], Event::LevelRequested { level: 4, attempt: 1 });
    let snapshot = session.snapshot().expect("level installed");
    assert_eq!(snapshot.level, 4);
    assert_eq!(snapshot.attempt, 1);
    assert_eq!(snapshot.talismans_used, 0);
    assert_eq!(session.state(), GameState::Playing);
}

#[test]
fn reset_draws_a_fresh_layout_for_the_same_level() {
    let mut session = seeded(99);
    let _ = session.start_game().expect("level 1");
    let first = session.snapshot().expect("level installed");

    let _ = session.reset_level().expect("level 1");
    let second = session.snapshot().expect("level installed");

    assert_eq!(second.level, 1);
    assert_eq!(second.attempt, first.attempt + 1);
    assert_ne!(
        (first.pots, first.obstacles, first.ghost),
        (second.pots, second.obstacles, second.ghost)
    );
}

#[test]
fn unsatisfiable_grid_reports_an_error_and_keeps_state() {
    let config = GameConfig {
        columns: 2,
        rows: 2,
        ..GameConfig::default()
    };
    let mut session = Session::new(config, Some(5));

    let error = session.start_game().expect_err("five pots cannot fit a 2x2 grid");

    assert!(matches!(error, GenerationError::InsufficientCells { level: 1, .. }));
    assert_eq!(session.state(), GameState::Menu);
    assert!(session.snapshot().is_none());
}

#[test]
fn same_seed_and_script_replay_identically() {
    let first = replay(0xdead_beef);
    let second = replay(0xdead_beef);

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(fingerprint(&first), fingerprint(&second));
}

fn replay(seed: u64) -> Vec<Event> {
    let mut session = seeded(seed);
    let mut log = session.start_game().expect("level 1");

    for row in 0..22 {
        for column in [3, 9, 15] {
            log.extend(
                session
                    .place_talisman(Position::new(column, row))
                    .expect("placements never generate levels"),
            );
        }
    }

    log.extend(session.reset_level().expect("level reload"));
    log
}

fn fingerprint(events: &[Event]) -> u64 {
    let mut hasher = DefaultHasher::new();
    events.hash(&mut hasher);
    hasher.finish()
}
