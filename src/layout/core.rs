use serde::{Deserialize, Serialize};

use crate::dice::{DiceResults, Die};
use crate::geometry::{PixelRect, Size};

/// Width in cells substituted when the D10 was not thrown.
pub const DEFAULT_WIDTH_CELLS: u16 = 5;
/// D100 face value substituted when the D100 was not thrown.
pub const DEFAULT_LENGTH_ROLL: u16 = 50;
/// Scale used for the human-readable footprint read-out.
pub const FEET_PER_CELL: u16 = 5;

/// Walls that can carry a secondary exit. The entrance always sits on the
/// remaining (south) wall and is never part of the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wall {
    Top,
    Left,
    Right,
}

const WALL_CYCLE: [Wall; 3] = [Wall::Top, Wall::Left, Wall::Right];

/// A secondary exit placed at the midpoint cell of its wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitMarker {
    pub wall: Wall,
    pub cell_index: u16,
}

/// The single entrance, centred on the south edge.
///
/// `y` equals the room's length in cells, the coordinate one cell past the
/// last row; renderers draw the marker on the south wall itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entrance {
    pub x: u16,
    pub y: u16,
}

/// Corridor segment attached flush to the entrance wall, sharing the
/// entrance's horizontal cell index and extending away from the room.
/// A zero length is valid and means no visible segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hallway {
    pub length_cells: u16,
}

/// How the D100 roll becomes a cell count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthPolicy {
    /// `ceil(D100 / 10)`, the majority behaviour.
    #[default]
    Div10Ceil,
    /// The roll is the cell count.
    Direct,
}

/// How (and whether) the D4 roll becomes a hallway.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HallwayPolicy {
    /// `ceil(D4 / 2)` cells.
    #[default]
    Half,
    /// The roll is the cell count, defaulting to 1 when the D4 is absent.
    Full,
    /// No hallway is modelled at all.
    Disabled,
}

/// Knobs the source variants disagreed on, lifted into one explicit value
/// instead of a per-variant fork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutPolicy {
    pub length: LengthPolicy,
    pub hallway: HallwayPolicy,
    /// Upper bound for one cell's edge, in pixels.
    pub max_cell_size: u16,
    /// Horizontal padding the surrounding UI reserves inside the container.
    pub padding_px: u16,
    /// Hard cap on the drawable strip regardless of container size.
    pub max_plan_width_px: u16,
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self {
            length: LengthPolicy::default(),
            hallway: HallwayPolicy::default(),
            max_cell_size: 32,
            padding_px: 40,
            max_plan_width_px: 800,
        }
    }
}

impl LayoutPolicy {
    /// Profile for character-cell surfaces, where one "pixel" is one
    /// terminal column: two-column cells, a small gutter, and a cap that
    /// keeps wide rooms inside an 80-column frame.
    pub fn terminal() -> Self {
        Self {
            max_cell_size: 2,
            padding_px: 4,
            max_plan_width_px: 80,
            ..Self::default()
        }
    }
}

/// Cell-count dimensions derived from a throw, before any pixel scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomDimensions {
    pub width_cells: u16,
    pub length_cells: u16,
    pub exit_count: u16,
}

/// Complete geometry for one room, in cell units plus the derived pixel
/// scale. Built fresh on every throw and every viewport change, never
/// mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomLayout {
    pub width_cells: u16,
    pub length_cells: u16,
    /// Edge length of one square cell in pixels. Zero means the container
    /// has not been measured yet; callers keep their previous plan.
    pub cell_size_px: u16,
    pub exits: Vec<ExitMarker>,
    pub entrance: Entrance,
    pub hallway: Option<Hallway>,
}

impl RoomLayout {
    pub fn exit_count(&self) -> usize {
        self.exits.len()
    }

    /// Project a cell coordinate onto the pixel grid.
    pub fn cell_to_px(&self, cell: u16) -> u16 {
        cell.saturating_mul(self.cell_size_px)
    }

    /// Pixel extent of the room body, hallway excluded.
    pub fn plan_size_px(&self) -> Size {
        Size::new(
            self.cell_to_px(self.width_cells),
            self.cell_to_px(self.length_cells),
        )
    }

    /// The `(width, length)` footprint in feet shown above the plan.
    pub fn footprint_feet(&self) -> (u16, u16) {
        (
            self.width_cells.saturating_mul(FEET_PER_CELL),
            self.length_cells.saturating_mul(FEET_PER_CELL),
        )
    }

    /// Pixel-space box for an exit marker, one cell on a side. Side-wall
    /// markers sit on the wall line itself; pixel renderers typically
    /// centre the glyph on the box.
    pub fn exit_rect(&self, exit: &ExitMarker) -> PixelRect {
        let (x, y) = match exit.wall {
            Wall::Top => (self.cell_to_px(exit.cell_index), 0),
            Wall::Left => (0, self.cell_to_px(exit.cell_index)),
            Wall::Right => (
                self.cell_to_px(self.width_cells),
                self.cell_to_px(exit.cell_index),
            ),
        };
        PixelRect::new(x, y, self.cell_size_px, self.cell_size_px)
    }

    /// Pixel-space box for the entrance marker on the south wall.
    pub fn entrance_rect(&self) -> PixelRect {
        PixelRect::new(
            self.cell_to_px(self.entrance.x),
            self.cell_to_px(self.entrance.y),
            self.cell_size_px,
            self.cell_size_px,
        )
    }
}

/// Pure transform from a dice throw plus a viewport constraint to renderable
/// room geometry. Owns no state beyond its policy; every call receives all
/// inputs and returns a fresh value, so repeated or out-of-order calls are
/// harmless.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutEngine {
    policy: LayoutPolicy,
}

impl LayoutEngine {
    pub fn new(policy: LayoutPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &LayoutPolicy {
        &self.policy
    }

    /// Cell-count dimensions for a throw. Total for every input: absent dice
    /// fall back to documented defaults, and out-of-contract zero rolls are
    /// clamped so the room never degenerates below one cell.
    pub fn dimensions(&self, dice: &DiceResults) -> RoomDimensions {
        let width_cells = dice
            .get(Die::D10)
            .map(|v| v.max(1))
            .unwrap_or(DEFAULT_WIDTH_CELLS);
        let length_roll = dice
            .get(Die::D100)
            .map(|v| v.max(1))
            .unwrap_or(DEFAULT_LENGTH_ROLL);
        let length_cells = match self.policy.length {
            LengthPolicy::Div10Ceil => length_roll.div_ceil(10),
            LengthPolicy::Direct => length_roll,
        };
        let exit_count = dice.get(Die::D6).map(|v| v.div_ceil(2)).unwrap_or(0);

        RoomDimensions {
            width_cells,
            length_cells,
            exit_count,
        }
    }

    /// Largest cell edge that fits the container, capped by policy.
    ///
    /// Returns 0 when the container is unmeasured or narrower than its
    /// padding; callers treat that as "not yet renderable" and keep the
    /// previous value rather than drawing a zero-area plan.
    pub fn cell_size(&self, width_cells: u16, container_width_px: u16) -> u16 {
        let width_cells = width_cells.max(1);
        let available = self
            .policy
            .max_plan_width_px
            .min(container_width_px.saturating_sub(self.policy.padding_px));
        (available / width_cells).min(self.policy.max_cell_size)
    }

    /// Secondary exits in roll order. The wall assignment cycles
    /// `top, left, right` and each marker sits at the midpoint cell of its
    /// wall, so the sequence depends only on the inputs. A fourth exit lands
    /// back on `top` at the same midpoint; stacking is accepted behaviour.
    pub fn exits(&self, width_cells: u16, length_cells: u16, exit_count: u16) -> Vec<ExitMarker> {
        (0..exit_count)
            .map(|i| {
                let wall = WALL_CYCLE[i as usize % WALL_CYCLE.len()];
                let cell_index = match wall {
                    Wall::Top => width_cells / 2,
                    Wall::Left | Wall::Right => length_cells / 2,
                };
                ExitMarker { wall, cell_index }
            })
            .collect()
    }

    /// The entrance: midpoint of the wall opposite the grid origin.
    pub fn entrance(&self, width_cells: u16, length_cells: u16) -> Entrance {
        Entrance {
            x: width_cells / 2,
            y: length_cells,
        }
    }

    /// Hallway geometry per policy, `None` when hallways are not modelled.
    pub fn hallway(&self, dice: &DiceResults) -> Option<Hallway> {
        let length_cells = match self.policy.hallway {
            HallwayPolicy::Half => dice.get(Die::D4).unwrap_or(0).div_ceil(2),
            HallwayPolicy::Full => dice.get(Die::D4).unwrap_or(1),
            HallwayPolicy::Disabled => return None,
        };
        Some(Hallway { length_cells })
    }

    /// Full layout for a throw under a viewport constraint.
    pub fn compute(&self, dice: &DiceResults, container_width_px: u16) -> RoomLayout {
        let dims = self.dimensions(dice);
        RoomLayout {
            width_cells: dims.width_cells,
            length_cells: dims.length_cells,
            cell_size_px: self.cell_size(dims.width_cells, container_width_px),
            exits: self.exits(dims.width_cells, dims.length_cells, dims.exit_count),
            entrance: self.entrance(dims.width_cells, dims.length_cells),
            hallway: self.hallway(dice),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn throw(d4: u16, d6: u16, d10: u16, d100: u16) -> DiceResults {
        DiceResults {
            d4: Some(d4),
            d6: Some(d6),
            d10: Some(d10),
            d100: Some(d100),
            ..DiceResults::default()
        }
    }

    #[test]
    fn empty_throw_uses_defaults() {
        let engine = LayoutEngine::default();
        let dims = engine.dimensions(&DiceResults::default());
        assert_eq!(dims.width_cells, 5);
        assert_eq!(dims.length_cells, 5);
        assert_eq!(dims.exit_count, 0);
    }

    #[test]
    fn empty_throw_produces_no_exits() {
        let engine = LayoutEngine::default();
        let layout = engine.compute(&DiceResults::default(), 1000);
        assert!(layout.exits.is_empty());
        assert_eq!(layout.exit_count(), 0);
    }

    #[test]
    fn length_policies_disagree_on_the_same_roll() {
        let dice = throw(1, 1, 5, 42);
        let canonical = LayoutEngine::default();
        assert_eq!(canonical.dimensions(&dice).length_cells, 5);

        let direct = LayoutEngine::new(LayoutPolicy {
            length: LengthPolicy::Direct,
            ..LayoutPolicy::default()
        });
        assert_eq!(direct.dimensions(&dice).length_cells, 42);
    }

    #[test]
    fn zero_rolls_clamp_to_one_cell() {
        let engine = LayoutEngine::default();
        let dims = engine.dimensions(&throw(0, 0, 0, 0));
        assert_eq!(dims.width_cells, 1);
        assert_eq!(dims.length_cells, 1);
        assert_eq!(dims.exit_count, 0);
    }

    #[test]
    fn cell_size_caps_at_policy_maximum() {
        let engine = LayoutEngine::default();
        // min(800, 1000 - 40) = 800, 800 / 5 = 160, capped at 32.
        assert_eq!(engine.cell_size(5, 1000), 32);
    }

    #[test]
    fn cell_size_shrinks_to_fit_narrow_containers() {
        let engine = LayoutEngine::default();
        // min(800, 100 - 40) = 60, 60 / 5 = 12.
        assert_eq!(engine.cell_size(5, 100), 12);
    }

    #[test]
    fn unmeasured_container_yields_zero() {
        let engine = LayoutEngine::default();
        assert_eq!(engine.cell_size(5, 0), 0);
        assert_eq!(engine.cell_size(5, 40), 0);
    }

    #[test]
    fn exit_walls_cycle_top_left_right() {
        let engine = LayoutEngine::default();
        let walls: Vec<Wall> = engine.exits(5, 5, 4).iter().map(|e| e.wall).collect();
        assert_eq!(walls, vec![Wall::Top, Wall::Left, Wall::Right, Wall::Top]);
    }

    #[test]
    fn stacked_exits_share_the_wall_midpoint() {
        let engine = LayoutEngine::default();
        let exits = engine.exits(7, 9, 4);
        assert_eq!(exits[0].cell_index, 3);
        assert_eq!(exits[3], exits[0]);
        assert_eq!(exits[1].cell_index, 4);
        assert_eq!(exits[2].cell_index, 4);
    }

    #[test]
    fn entrance_stays_inside_the_grid_for_all_small_rooms() {
        let engine = LayoutEngine::default();
        for width in 1..=20 {
            for length in 1..=20 {
                let entrance = engine.entrance(width, length);
                assert_eq!(entrance.x, width / 2);
                assert_eq!(entrance.y, length);
                assert!(entrance.x < width);
            }
        }
    }

    #[test]
    fn hallway_policies() {
        let dice = throw(3, 1, 5, 50);
        let half = LayoutEngine::default();
        assert_eq!(half.hallway(&dice), Some(Hallway { length_cells: 2 }));

        let full = LayoutEngine::new(LayoutPolicy {
            hallway: HallwayPolicy::Full,
            ..LayoutPolicy::default()
        });
        assert_eq!(full.hallway(&dice), Some(Hallway { length_cells: 3 }));
        assert_eq!(
            full.hallway(&DiceResults::default()),
            Some(Hallway { length_cells: 1 })
        );

        let disabled = LayoutEngine::new(LayoutPolicy {
            hallway: HallwayPolicy::Disabled,
            ..LayoutPolicy::default()
        });
        assert_eq!(disabled.hallway(&dice), None);
    }

    #[test]
    fn absent_d4_under_half_policy_is_a_zero_length_hallway() {
        let engine = LayoutEngine::default();
        assert_eq!(
            engine.hallway(&DiceResults::default()),
            Some(Hallway { length_cells: 0 })
        );
    }

    #[test]
    fn compute_is_deterministic() {
        let engine = LayoutEngine::default();
        let dice = throw(2, 5, 7, 63);
        assert_eq!(engine.compute(&dice, 640), engine.compute(&dice, 640));
    }

    #[test]
    fn resize_changes_only_the_pixel_scale() {
        let engine = LayoutEngine::default();
        let dice = throw(2, 5, 7, 63);
        let wide = engine.compute(&dice, 1000);
        let narrow = engine.compute(&dice, 200);

        assert_eq!(wide.width_cells, narrow.width_cells);
        assert_eq!(wide.length_cells, narrow.length_cells);
        assert_eq!(wide.exits, narrow.exits);
        assert_eq!(wide.entrance, narrow.entrance);
        assert_eq!(wide.hallway, narrow.hallway);
        assert_ne!(wide.cell_size_px, narrow.cell_size_px);
    }

    #[test]
    fn worked_scenario_from_the_dice_tables() {
        let engine = LayoutEngine::default();
        let layout = engine.compute(&throw(2, 4, 5, 50), 1000);

        assert_eq!(layout.width_cells, 5);
        assert_eq!(layout.length_cells, 5);
        assert_eq!(layout.exit_count(), 2);
        assert_eq!(
            layout.exits,
            vec![
                ExitMarker {
                    wall: Wall::Top,
                    cell_index: 2
                },
                ExitMarker {
                    wall: Wall::Left,
                    cell_index: 2
                },
            ]
        );
        assert_eq!(layout.entrance, Entrance { x: 2, y: 5 });
        assert_eq!(layout.hallway, Some(Hallway { length_cells: 1 }));
    }

    #[test]
    fn pixel_projection_helpers() {
        let engine = LayoutEngine::default();
        let layout = engine.compute(&throw(1, 1, 5, 50), 1000);
        assert_eq!(layout.cell_size_px, 32);
        assert_eq!(layout.cell_to_px(2), 64);
        assert_eq!(layout.plan_size_px(), Size::new(160, 160));
        assert_eq!(layout.footprint_feet(), (25, 25));
    }

    #[test]
    fn marker_rects_follow_their_walls() {
        let engine = LayoutEngine::default();
        let layout = engine.compute(&throw(1, 6, 5, 50), 1000);
        let rects: Vec<PixelRect> = layout.exits.iter().map(|e| layout.exit_rect(e)).collect();

        assert_eq!(rects[0], PixelRect::new(64, 0, 32, 32));
        assert_eq!(rects[1], PixelRect::new(0, 64, 32, 32));
        assert_eq!(rects[2], PixelRect::new(160, 64, 32, 32));
        assert_eq!(layout.entrance_rect(), PixelRect::new(64, 160, 32, 32));
    }
}
