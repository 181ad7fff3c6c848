use criterion::{black_box, criterion_group, criterion_main, Criterion};
use uiplayable_core::{ClipData, Config, State, StatePlayer, Track};

fn build_player() -> StatePlayer {
    let mut player = StatePlayer::new("bench", Config::default());
    let mut ids = Vec::new();
    for i in 0..8 {
        let mut clip = ClipData::new(format!("clip{i}"), 500 + i * 100);
        for ch in ["alpha", "scale.x", "scale.y", "translation.y"] {
            clip = clip.with_track(Track::new(ch, &[(0.0, 0.0), (0.5, 1.0), (1.0, 0.5)]));
        }
        ids.push(player.load_clip(clip).expect("valid clip"));
    }
    for (i, pair) in ids.chunks(2).enumerate() {
        let state = State::new(format!("S{i}"))
            .with_enter(pair[0])
            .with_loop(pair[1]);
        player.add_state(state).expect("unique name");
    }
    player.activate();
    player
}

fn bench_tick(c: &mut Criterion) {
    let mut player = build_player();
    player.play_by_name("S0").expect("state exists");
    c.bench_function("tick_60hz", |b| {
        b.iter(|| {
            let out = player.tick(black_box(1.0 / 60.0));
            black_box(out.changes.len());
        })
    });
}

fn bench_switch(c: &mut Criterion) {
    let mut player = build_player();
    let mut i = 0usize;
    c.bench_function("play_switch", |b| {
        b.iter(|| {
            i = (i + 1) % 4;
            player
                .play_by_name(&format!("S{i}"))
                .expect("state exists");
            black_box(player.tick(0.0).events.len());
        })
    });
}

criterion_group!(benches, bench_tick, bench_switch);
criterion_main!(benches);
