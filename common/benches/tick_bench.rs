use criterion::{criterion_group, criterion_main, Criterion, SamplingMode};
use std::collections::HashSet;
use std::time::Duration;
use common::games::SessionRng;
use common::games::snake::{
    Direction, FieldSize, InMemoryHighScoreStore, Point, SessionPhase, SnakeSession,
    SnakeSessionSettings, SpawnPolicy,
};

const TURNS: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

fn bench_play_until_game_over() {
    let mut session = SnakeSession::new(
        SnakeSessionSettings::default(),
        SessionRng::new(7),
        Box::new(InMemoryHighScoreStore::default()),
    );
    if session.begin().is_err() {
        return;
    }

    let mut turn_rng = SessionRng::from_random();
    for _ in 0..10_000 {
        if session.phase() != SessionPhase::Playing {
            break;
        }
        if turn_rng.random_range(0..4) == 0 {
            session.post_direction(TURNS[turn_rng.random_range(0..TURNS.len())]);
        }
        if session.step().is_err() {
            break;
        }
    }
}

fn bench_spawn_on_crowded_grid() {
    let field_size = FieldSize::square(25);
    let occupied: HashSet<Point> = (0..25)
        .flat_map(|y| (0..24).map(move |x| Point::new(x, y)))
        .collect();
    let policy = SpawnPolicy::new(field_size, 10_000);
    let mut session_rng = SessionRng::from_random();
    let _ = policy.place_food(&occupied, &mut session_rng);
}

fn tick_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("snake");

    group
        .sampling_mode(SamplingMode::Flat)
        .sample_size(50)
        .measurement_time(Duration::from_secs(20));

    group.bench_function("play_until_game_over", |b| {
        b.iter(bench_play_until_game_over)
    });

    group.bench_function("spawn_on_crowded_grid", |b| {
        b.iter(bench_spawn_on_crowded_grid)
    });

    group.finish();
}

criterion_group!(benches, tick_bench);
criterion_main!(benches);
