//! Print one generated room to stdout without touching terminal state.

use std::io;

use dicey_dungeon::{
    DiceResults, DungeonConfig, DungeonRuntime, LayoutPolicy, PlanRenderer, Result, RollTables,
    RuntimeEvent, Size,
};

fn main() -> Result<()> {
    let config = DungeonConfig {
        generate_plan: true,
        layout: LayoutPolicy::terminal(),
        ..DungeonConfig::default()
    };
    let mut runtime = DungeonRuntime::new(
        config,
        RollTables::builtin(),
        PlanRenderer::with_default(),
        Size::new(100, 40),
    );

    let dice = DiceResults {
        d4: Some(2),
        d6: Some(4),
        d8: Some(3),
        d10: Some(6),
        d12: Some(5),
        d20: Some(12),
        d100: Some(64),
    };
    runtime.run_scripted(&mut io::stdout(), vec![RuntimeEvent::Roll(dice)])
}
