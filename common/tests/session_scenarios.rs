use std::collections::HashSet;
use std::time::Duration;

use common::games::ScriptedRandom;
use common::games::snake::{
    Direction, InMemoryHighScoreStore, Point, PowerUpKind, SessionEvent, SessionPhase,
    SnakeSession, SnakeSessionSettings,
};

/// Foods are drawn as (x, y) index pairs; power-up rolls never succeed.
fn session_with_foods(foods: &[(usize, usize)]) -> SnakeSession<ScriptedRandom> {
    let indices = foods.iter().flat_map(|&(x, y)| [x, y]).collect();
    SnakeSession::new(
        SnakeSessionSettings::default(),
        ScriptedRandom::new(indices, vec![1.0]),
        Box::new(InMemoryHighScoreStore::default()),
    )
}

fn assert_distinct(cells: &[Point]) {
    let unique: HashSet<&Point> = cells.iter().collect();
    assert_eq!(unique.len(), cells.len());
}

#[test]
fn test_first_tick_without_food() {
    let mut session = session_with_foods(&[(0, 0)]);
    session.begin().unwrap();
    assert_eq!(
        session.snapshot().snake,
        vec![Point::new(10, 10), Point::new(9, 10), Point::new(8, 10)]
    );

    session.step().unwrap();
    assert_eq!(
        session.snapshot().snake,
        vec![Point::new(11, 10), Point::new(10, 10), Point::new(9, 10)]
    );
}

#[test]
fn test_eating_food() {
    let mut session = session_with_foods(&[(11, 10), (0, 0)]);
    session.begin().unwrap();

    let events = session.step().unwrap();
    let snapshot = session.snapshot();
    assert_eq!(
        events,
        vec![SessionEvent::Ate {
            position: Point::new(11, 10),
            score: 10
        }]
    );
    assert_eq!(snapshot.score, 10);
    assert_eq!(snapshot.snake.len(), 4);
    assert_eq!(snapshot.food, Some(Point::new(0, 0)));
    assert!(!snapshot.is_snake_at(Point::new(0, 0)));
}

#[test]
fn test_fifth_food_levels_up() {
    let mut session =
        session_with_foods(&[(11, 10), (12, 10), (13, 10), (14, 10), (15, 10), (0, 0)]);
    session.begin().unwrap();

    let mut events = Vec::new();
    for _ in 0..5 {
        let before = session.snapshot().snake.len();
        events.extend(session.step().unwrap());
        let snapshot = session.snapshot();
        assert_eq!(snapshot.snake.len(), before + 1);
        assert_distinct(&snapshot.snake);
    }

    let snapshot = session.snapshot();
    assert_eq!(snapshot.score, 50);
    assert_eq!(snapshot.level, 2);
    assert_eq!(snapshot.speed_ms, 130);
    assert_eq!(session.tick_interval(), Duration::from_millis(130));
    let level_ups: Vec<_> = events
        .iter()
        .filter(|event| matches!(event, SessionEvent::LevelUp { .. }))
        .collect();
    assert_eq!(
        level_ups,
        vec![&SessionEvent::LevelUp {
            level: 2,
            speed_ms: 130
        }]
    );
}

#[test]
fn test_reverse_is_rejected() {
    let mut session = session_with_foods(&[(0, 0)]);
    session.begin().unwrap();
    assert!(!session.post_direction(Direction::Left));
    session.step().unwrap();
    assert_eq!(session.snapshot().direction, Direction::Right);
    assert_eq!(session.snapshot().head, Some(Point::new(11, 10)));
}

#[test]
fn test_pause_freezes_power_up_time() {
    // food ahead, then food parked at the origin and an invincibility power-up one cell further
    let rng = ScriptedRandom::new(vec![11, 10, 0, 0, 12, 10, 2], vec![0.0]);
    let mut session = SnakeSession::new(
        SnakeSessionSettings::default(),
        rng,
        Box::new(InMemoryHighScoreStore::default()),
    );
    session.begin().unwrap();

    let events = session.step().unwrap();
    assert!(events.contains(&SessionEvent::PowerUpSpawned {
        position: Point::new(12, 10),
        kind: PowerUpKind::Invincibility
    }));
    let events = session.step().unwrap();
    assert!(events.contains(&SessionEvent::PowerUpActivated(PowerUpKind::Invincibility)));

    let before = session.snapshot().active_effect.unwrap();
    assert_eq!(before.remaining_ms, 8000);

    session.pause().unwrap();
    for _ in 0..100 {
        session.advance(Duration::from_secs(60)).unwrap();
    }
    assert_eq!(session.phase(), SessionPhase::Paused);
    assert_eq!(session.snapshot().active_effect, Some(before));

    session.resume().unwrap();
    assert_eq!(session.snapshot().active_effect, Some(before));
    session.step().unwrap();
    assert_eq!(session.snapshot().active_effect.unwrap().remaining_ms, 8000 - 150);
}

#[test]
fn test_invincible_snake_wraps_through_wall() {
    let rng = ScriptedRandom::new(vec![11, 10, 0, 0, 12, 10, 2], vec![0.0]);
    let mut session = SnakeSession::new(
        SnakeSessionSettings::default(),
        rng,
        Box::new(InMemoryHighScoreStore::default()),
    );
    session.begin().unwrap();
    session.step().unwrap();
    session.step().unwrap();

    for _ in 0..8 {
        session.step().unwrap();
    }
    assert_eq!(session.phase(), SessionPhase::Playing);
    assert_eq!(session.snapshot().head, Some(Point::new(0, 10)));
}
