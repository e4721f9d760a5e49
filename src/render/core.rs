use std::io::Write;

use crate::error::Result;
use crate::layout::{RoomLayout, Wall};
use crate::width::display_width;

const ENTRANCE_MARK: char = '^';
const EXIT_MARK: char = '#';

/// Renderer runtime parameters.
#[derive(Debug, Clone)]
pub struct PlanRendererSettings {
    pub show_header: bool,
    pub show_legend: bool,
}

impl Default for PlanRendererSettings {
    fn default() -> Self {
        Self {
            show_header: true,
            show_legend: true,
        }
    }
}

/// Text renderer drawing a schematic top-down floor plan.
///
/// Every coordinate comes straight from the layout: exit markers land on
/// the midpoint cell of their wall, the entrance on the south edge, and
/// the hallway shaft directly below the entrance. Rows are one character
/// tall per cell (terminal glyphs are taller than wide); columns span
/// `cell_size_px` characters per cell.
pub struct PlanRenderer {
    settings: PlanRendererSettings,
}

impl PlanRenderer {
    pub fn new(settings: PlanRendererSettings) -> Self {
        Self { settings }
    }

    pub fn with_default() -> Self {
        Self::new(PlanRendererSettings::default())
    }

    pub fn settings_mut(&mut self) -> &mut PlanRendererSettings {
        &mut self.settings
    }

    pub fn render(&self, writer: &mut impl Write, layout: &RoomLayout) -> Result<()> {
        let frame = self.frame(layout);
        if !frame.is_empty() {
            writer.write_all(frame.as_bytes())?;
            writer.flush()?;
        }
        Ok(())
    }

    /// Build the complete frame. Empty when the layout is not renderable
    /// yet (unmeasured viewport or degenerate dimensions).
    pub fn frame(&self, layout: &RoomLayout) -> String {
        let span = layout.cell_size_px as usize;
        if span == 0 || layout.width_cells == 0 || layout.length_cells == 0 {
            return String::new();
        }

        let mut lines = Vec::new();
        if self.settings.show_header {
            let (width_ft, length_ft) = layout.footprint_feet();
            lines.push(format!("Room Size: {width_ft}ft x {length_ft}ft"));
            lines.push(String::new());
        }

        self.push_room(&mut lines, layout, span);
        self.push_hallway(&mut lines, layout, span);

        if self.settings.show_legend {
            lines.push(String::new());
            lines.push(format!("{ENTRANCE_MARK} entrance   {EXIT_MARK} exit"));
        }

        let frame_width = lines.iter().map(|l| display_width(l)).max().unwrap_or(0);
        let mut frame = String::new();
        for mut line in lines {
            pad_line(&mut line, frame_width);
            frame.push_str(&line);
            frame.push('\n');
        }
        frame
    }

    fn push_room(&self, lines: &mut Vec<String>, layout: &RoomLayout, span: usize) {
        let width = layout.width_cells as usize;
        let top_cells = exit_cells(layout, Wall::Top);
        let left_rows = exit_cells(layout, Wall::Left);
        let right_rows = exit_cells(layout, Wall::Right);

        lines.push(edge_line(width, span, &top_cells, EXIT_MARK));
        for row in 0..layout.length_cells {
            if row > 0 {
                lines.push(edge_line(width, span, &[], EXIT_MARK));
            }
            lines.push(interior_line(
                width,
                span,
                left_rows.contains(&row),
                right_rows.contains(&row),
            ));
        }
        lines.push(edge_line(width, span, &[layout.entrance.x], ENTRANCE_MARK));
    }

    fn push_hallway(&self, lines: &mut Vec<String>, layout: &RoomLayout, span: usize) {
        let Some(hallway) = layout.hallway else {
            return;
        };
        if hallway.length_cells == 0 {
            return;
        }

        let indent = " ".repeat(layout.entrance.x as usize * (span + 1));
        let separator = format!("{indent}+{}+", "-".repeat(span));
        for row in 0..hallway.length_cells {
            if row > 0 {
                lines.push(separator.clone());
            }
            lines.push(format!("{indent}|{}|", " ".repeat(span)));
        }
        lines.push(separator);
    }
}

/// Horizontal wall: `+` posts with `span` fill characters per cell. Cells
/// listed in `marked` carry the marker instead of wall fill.
fn edge_line(width: usize, span: usize, marked: &[u16], mark: char) -> String {
    let mut line = String::with_capacity(width * (span + 1) + 1);
    line.push('+');
    for cell in 0..width {
        let fill = if marked.contains(&(cell as u16)) {
            mark
        } else {
            '-'
        };
        for _ in 0..span {
            line.push(fill);
        }
        line.push('+');
    }
    line
}

/// One row of cell interiors with its vertical walls. Side exits replace
/// the outer wall character on their row.
fn interior_line(width: usize, span: usize, left_exit: bool, right_exit: bool) -> String {
    let mut line = String::with_capacity(width * (span + 1) + 1);
    line.push(if left_exit { EXIT_MARK } else { '|' });
    for cell in 0..width {
        for _ in 0..span {
            line.push(' ');
        }
        let last = cell + 1 == width;
        line.push(match (last, right_exit) {
            (true, true) => EXIT_MARK,
            _ => '|',
        });
    }
    line
}

fn exit_cells(layout: &RoomLayout, wall: Wall) -> Vec<u16> {
    layout
        .exits
        .iter()
        .filter(|exit| exit.wall == wall)
        .map(|exit| exit.cell_index)
        .collect()
}

fn pad_line(line: &mut String, width: usize) {
    let mut current = display_width(line);
    while current < width {
        line.push(' ');
        current += 1;
    }
}
