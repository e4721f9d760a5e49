use std::io;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use dicey_dungeon::{
    DiceResults, DungeonConfig, DungeonRuntime, LayoutEngine, LayoutPolicy, Logger, NullSink,
    PlanRenderer, RollTables, RuntimeEvent, Size,
};
use std::time::Duration;

fn layout_compute(c: &mut Criterion) {
    let engine = LayoutEngine::default();
    let dice = DiceResults {
        d4: Some(3),
        d6: Some(5),
        d10: Some(8),
        d100: Some(77),
        ..DiceResults::default()
    };

    c.bench_function("layout_compute", |b| {
        b.iter(|| engine.compute(black_box(&dice), black_box(960)))
    });
}

fn runtime_roll_script(c: &mut Criterion) {
    let script = scripted_events();
    c.bench_function("runtime_roll_script", |b| {
        b.iter(|| {
            let mut runtime = build_runtime();
            let mut sink = io::sink();
            runtime
                .run_scripted(&mut sink, black_box(script.clone()))
                .expect("scripted run");
        });
    });
}

fn build_runtime() -> DungeonRuntime {
    let app_config = DungeonConfig {
        generate_plan: true,
        layout: LayoutPolicy::terminal(),
        ..DungeonConfig::default()
    };
    let mut runtime = DungeonRuntime::new(
        app_config,
        RollTables::builtin(),
        PlanRenderer::with_default(),
        Size::new(120, 40),
    );

    let config = runtime.config_mut();
    config.logger = Some(Logger::new(NullSink));
    config.metrics_interval = Duration::from_millis(0);
    config.enable_metrics();
    runtime
}

fn scripted_events() -> Vec<RuntimeEvent> {
    let mut events = Vec::with_capacity(24);
    for round in 0u16..10 {
        events.push(RuntimeEvent::Roll(DiceResults {
            d4: Some(round % 4 + 1),
            d6: Some(round % 6 + 1),
            d8: Some(round % 8 + 1),
            d10: Some(round % 10 + 1),
            d12: Some(round % 12 + 1),
            d20: Some(round % 20 + 1),
            d100: Some(round * 9 + 7),
        }));
        if round % 3 == 0 {
            events.push(RuntimeEvent::Resize(Size::new(60 + round * 4, 40)));
        }
    }
    events
}

criterion_group!(benches, layout_compute, runtime_roll_script);
criterion_main!(benches);
