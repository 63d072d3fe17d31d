use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use ghost_catcher_core::{Command, Event, GameState, LevelLayout, Position};
use ghost_catcher_system_movement::Movement;
use ghost_catcher_world::{self as world, query, World};

#[test]
fn deterministic_replay_produces_identical_outcomes() {
    let first = replay(scripted_commands());
    let second = replay(scripted_commands());

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.fingerprint(), second.fingerprint());
    assert!(
        first
            .events
            .iter()
            .any(|event| matches!(event, Event::GhostMoved { .. })),
        "expected the ghost to move during the replay"
    );
}

fn replay(commands: Vec<Command>) -> ReplayOutcome {
    let mut world = World::new();
    let mut movement = Movement::default();
    let mut log = Vec::new();

    for command in commands {
        let mut events = Vec::new();
        world::apply(&mut world, command, &mut events);
        process_movement(&mut world, &mut movement, events, &mut log);
    }

    ReplayOutcome {
        state: query::state(&world),
        ghost: query::ghost_position(&world),
        score: query::score(&world),
        events: log,
    }
}

fn process_movement(
    world: &mut World,
    movement: &mut Movement,
    pending_events: Vec<Event>,
    log: &mut Vec<Event>,
) {
    let mut events = pending_events;

    loop {
        if events.is_empty() {
            break;
        }
        log.extend(events.iter().cloned());

        let Some(grid) = query::grid_view(world) else {
            break;
        };
        let mut commands = Vec::new();
        movement.handle(
            &events,
            grid,
            query::ghost_position(world),
            query::pots(world),
            &mut commands,
        );

        if commands.is_empty() {
            break;
        }

        events.clear();
        for command in commands {
            world::apply(world, command, &mut events);
        }
    }
}

fn scripted_commands() -> Vec<Command> {
    let mut commands = vec![Command::LoadLevel {
        layout: LevelLayout {
            level: 7,
            attempt: 0,
            columns: 8,
            rows: 6,
            pots: vec![Position::new(1, 1), Position::new(6, 4), Position::new(3, 5)],
            obstacles: vec![Position::new(4, 2), Position::new(2, 3)],
            ghost_start: Position::new(4, 3),
            max_talismans: 34,
        },
    }];

    commands.extend(
        [(4, 4), (5, 3), (3, 3), (4, 1), (0, 3), (7, 2), (6, 0)]
            .into_iter()
            .map(|(column, row)| Command::PlaceTalisman {
                position: Position::new(column, row),
            }),
    );
    commands.push(Command::Pause);
    commands.push(Command::PlaceTalisman {
        position: Position::new(0, 0),
    });
    commands.push(Command::Resume);
    commands
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ReplayOutcome {
    state: GameState,
    ghost: Option<Position>,
    score: u32,
    events: Vec<Event>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}
