//! Interactive dice roller: press `r` to generate a room, `p` to toggle the
//! floor plan, `q` or Esc to quit.

use dicey_dungeon::{
    CliDriver, DriverResult, DungeonConfig, DungeonRuntime, LayoutPolicy, PlanRenderer, RollTables,
    Size,
};

fn main() -> DriverResult<()> {
    let config = DungeonConfig {
        generate_plan: true,
        layout: LayoutPolicy::terminal(),
        ..DungeonConfig::default()
    };
    let runtime = DungeonRuntime::new(
        config,
        RollTables::builtin(),
        PlanRenderer::with_default(),
        Size::new(80, 24),
    );
    CliDriver::new(runtime).run()
}
