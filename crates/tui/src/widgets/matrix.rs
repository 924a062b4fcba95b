//! Priority matrix widget.
//!
//! Draws the 13 × 7 grid with its labels and one chip per open task, and
//! answers which chip sits under a terminal cell. Rendering and hit-testing
//! both go through [`matrix_areas`] and [`chips`], so a click always lands on
//! what was drawn.
//!
//! # Geometry
//!
//! The grid area is split into 13 slot columns and 7 slot rows. The engine's
//! [`GridRect`] covers the first 12 × 6 of them; the most urgent column and
//! the least important row sit half a cell past its edges and use the last
//! slot. A terminal cell maps to the point at its centre.
//!
//! ```text
//! ╭ Priority Matrix ─────────────────────────────╮
//! │7★ Important, Not Urgent   │ Important & Urgent│
//! │6★ ·   ·   ·   ·   ·   ·   │   ·   · F ·   ·   │
//! │5★ ·   ·   R   ·   ·   ·   │ B ·   ·   ·   ·   │
//! │4★ ────────────────────────┼───────────────────│
//! │3★ ·   ·   ·   ·   ·   ·   │   ·   ·   ·   ·   │
//! │2★ ·   ·   ·   ·   ·   ·   │   ·   · R ·   ·   │
//! │1★ Neither                 │ Urgent, Not Import│
//! │   1 year  3 months  1 week  1 day  4 hours  15│
//! ╰──────────────────────────────────────────────╯
//! ```

use eisen_matrix::{
    GridRect, IMPORTANCE_CELLS, Point, Quadrant, Rgb, TaskColor, URGENCY_CELLS, axis_lines,
    opacity_for, palette_color, render_task,
};
use eisen_protocol::{Coordinate, Importance, Task, TaskId, Urgency, category_name};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Widget},
};
use tracing::warn;

use crate::interaction::DragState;
use crate::state::AppState;

/// Width of the importance label gutter, e.g. `"7★ "`.
const IMPORTANCE_LABEL_WIDTH: u16 = 3;

/// Height of the urgency label row under the grid.
const URGENCY_LABEL_HEIGHT: u16 = 1;

/// Columns a chip extends on each side of its anchor cell.
const CHIP_REACH: u16 = 1;

/// Perceived brightness above which chip text is drawn in black.
const LIGHT_FILL_LUMA: f64 = 140.0;

/// Regions of the matrix page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixAreas {
    /// Where chips and grid lines are drawn.
    pub grid: Rect,
    /// Left gutter with the star labels.
    pub importance_labels: Rect,
    /// Bottom row with the urgency labels.
    pub urgency_labels: Rect,
}

/// Splits the content area into the grid and its label gutters.
#[must_use]
pub fn matrix_areas(content: Rect) -> MatrixAreas {
    let inner = Block::default().borders(Borders::ALL).inner(content);
    let [body, bottom] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(URGENCY_LABEL_HEIGHT),
    ])
    .areas(inner);
    let columns = [
        Constraint::Length(IMPORTANCE_LABEL_WIDTH),
        Constraint::Min(0),
    ];
    let [importance_labels, grid] = Layout::horizontal(columns).areas(body);
    let [_, urgency_labels] = Layout::horizontal(columns).areas(bottom);
    MatrixAreas {
        grid,
        importance_labels,
        urgency_labels,
    }
}

/// Returns the engine rectangle for a grid area, or `None` while the area
/// is empty.
#[must_use]
pub fn grid_rect_for(grid: Rect) -> Option<GridRect> {
    let width = f64::from(grid.width) * URGENCY_CELLS / (URGENCY_CELLS + 1.0);
    let height = f64::from(grid.height) * IMPORTANCE_CELLS / (IMPORTANCE_CELLS + 1.0);
    GridRect::new(width, height).ok()
}

/// Returns the grid point at the centre of a terminal cell.
///
/// Cells outside the grid give points outside the rectangle; the engine
/// clamps those.
#[must_use]
pub fn point_for_cell(grid: Rect, column: u16, row: u16) -> Point {
    Point::new(
        f64::from(column) - f64::from(grid.x) + 0.5,
        f64::from(row) - f64::from(grid.y) + 0.5,
    )
}

/// Returns the terminal cell containing a grid point, clamped into the grid.
#[must_use]
pub fn cell_for_point(grid: Rect, point: Point) -> Option<(u16, u16)> {
    if grid.is_empty() {
        return None;
    }
    let clamp = |offset: f64, origin: u16, len: u16| {
        let steps = offset.floor().clamp(0.0, f64::from(len - 1));
        origin + steps as u16
    };
    Some((
        clamp(point.x, grid.x, grid.width),
        clamp(point.y, grid.y, grid.height),
    ))
}

/// Returns `true` if a terminal cell is inside the grid.
#[must_use]
pub fn is_over_grid(grid: Rect, column: u16, row: u16) -> bool {
    grid.contains(Position::new(column, row))
}

/// A task chip as drawn on the terminal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chip {
    /// The task drawn.
    pub task_id: TaskId,
    /// Column of the label.
    pub column: u16,
    /// Row of the chip.
    pub row: u16,
    /// Glyph in the middle of the chip.
    pub label: char,
    /// Fill colour before blending.
    pub color: TaskColor,
}

impl Chip {
    fn covers(&self, column: u16, row: u16) -> bool {
        row == self.row && column.abs_diff(self.column) <= CHIP_REACH
    }
}

/// Lays out the chips for every open task, in stacking order.
///
/// A dragged chip follows the pointer and is moved to the end so it is
/// drawn on top. Layout failures are logged and leave the grid empty.
#[must_use]
pub fn chips(tasks: &[Task], drag: DragState, grid: Rect) -> Vec<Chip> {
    let Some(rect) = grid_rect_for(grid) else {
        return Vec::new();
    };
    let mut chips = Vec::with_capacity(tasks.len());
    let mut dragged = None;
    for task in tasks.iter().filter(|t| !t.completed) {
        let placement = match render_task(task, rect) {
            Ok(placement) => placement,
            Err(err) => {
                warn!(task_id = task.id, error = %err, "cannot lay out task");
                continue;
            }
        };
        let (position, is_dragged) = match drag {
            DragState::Dragging { task_id, pointer } if task_id == placement.task_id => {
                (pointer, true)
            }
            _ => (placement.position, false),
        };
        let Some((column, row)) = cell_for_point(grid, position) else {
            continue;
        };
        let chip = Chip {
            task_id: placement.task_id,
            column,
            row,
            label: placement.label,
            color: placement.color,
        };
        if is_dragged {
            dragged = Some(chip);
        } else {
            chips.push(chip);
        }
    }
    chips.extend(dragged);
    chips
}

/// Returns the topmost chip covering a terminal cell.
#[must_use]
pub fn task_at(chips: &[Chip], column: u16, row: u16) -> Option<TaskId> {
    chips
        .iter()
        .rev()
        .find(|chip| chip.covers(column, row))
        .map(|chip| chip.task_id)
}

/// Returns the chip for a task.
#[must_use]
pub fn chip_for(chips: &[Chip], task_id: TaskId) -> Option<&Chip> {
    chips.iter().find(|chip| chip.task_id == task_id)
}

/// Renders the matrix page.
///
/// Chip fills are translucent colours composited over `background`.
///
/// # Examples
///
/// ```
/// use eisen_matrix::Rgb;
/// use eisen_protocol::dummy::demo_tasks;
/// use eisen_tui::AppState;
/// use eisen_tui::widgets::render_matrix;
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
///
/// let mut state = AppState::new("demo data");
/// state.replace_tasks(demo_tasks());
///
/// let area = Rect::new(0, 0, 80, 20);
/// let mut buf = Buffer::empty(area);
/// render_matrix(&state, Rgb::default(), area, &mut buf);
/// ```
pub fn render_matrix(state: &AppState, background: Rgb, area: Rect, buf: &mut Buffer) {
    Block::default()
        .title(Span::styled(
            " Priority Matrix ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
        .render(area, buf);

    let areas = matrix_areas(area);
    let Some(rect) = grid_rect_for(areas.grid) else {
        return;
    };

    render_grid_lines(rect, areas.grid, buf);
    render_quadrant_titles(areas.grid, buf);
    render_importance_labels(rect, &areas, buf);
    render_urgency_labels(rect, &areas, buf);

    let chips = chips(&state.tasks, state.interaction.drag(), areas.grid);
    let focused = focused_task(state, &chips, areas.grid);
    for chip in &chips {
        render_chip(chip, background, focused == Some(chip.task_id), areas.grid, buf);
    }
    render_add_marker(state, &chips, areas.grid, buf);

    let Some(task) = focused.and_then(|id| state.task(id)) else {
        return;
    };
    let Some(chip) = chip_for(&chips, task.id) else {
        return;
    };
    let coordinate = match state.interaction.drag() {
        DragState::Dragging { pointer, .. } => rect.position_to_coordinate(pointer),
        DragState::Idle => task.coordinate(),
    };
    render_tooltip(task, coordinate, chip, area, buf);
}

/// Picks the task the tooltip describes: the dragged one, else the one under
/// the pointer, else the keyboard selection.
fn focused_task(state: &AppState, chips: &[Chip], grid: Rect) -> Option<TaskId> {
    if let Some(id) = state.interaction.dragged_task() {
        return Some(id);
    }
    state
        .interaction
        .hover_anchor()
        .and_then(|point| cell_for_point(grid, point))
        .and_then(|(column, row)| task_at(chips, column, row))
        .or_else(|| state.selected_task().map(|task| task.id))
}

fn set_cell(buf: &mut Buffer, column: u16, row: u16, symbol: char, style: Style) {
    if let Some(cell) = buf.cell_mut((column, row)) {
        cell.set_char(symbol).set_style(style);
    }
}

/// Dots where grid lines cross, and the two centre axes.
fn render_grid_lines(rect: GridRect, grid: Rect, buf: &mut Buffer) {
    let lines = axis_lines(rect);
    let dot_style = Style::default().fg(Color::DarkGray);
    for y in lines.horizontal {
        for x in lines.vertical {
            if let Some((column, row)) = cell_for_point(grid, Point::new(x, y)) {
                set_cell(buf, column, row, '·', dot_style);
            }
        }
    }

    let centre = rect.coordinate_to_position(Coordinate::CENTER);
    let Some((centre_column, centre_row)) = cell_for_point(grid, centre) else {
        return;
    };
    let axis_style = Style::default().fg(Color::Gray);
    for column in grid.left()..grid.right() {
        set_cell(buf, column, centre_row, '─', axis_style);
    }
    for row in grid.top()..grid.bottom() {
        set_cell(buf, centre_column, row, '│', axis_style);
    }
    set_cell(buf, centre_column, centre_row, '┼', axis_style);
}

/// Quadrant captions in the four corners, skipped when they do not fit.
fn render_quadrant_titles(grid: Rect, buf: &mut Buffer) {
    let style = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC);
    let half = grid.width / 2;
    for quadrant in Quadrant::all() {
        let title = quadrant.title();
        let width = title.chars().count() as u16;
        if width + 1 > half {
            continue;
        }
        let column = if quadrant.is_urgent() {
            grid.right() - width
        } else {
            grid.left()
        };
        let row = if quadrant.is_important() {
            grid.top()
        } else {
            grid.bottom() - 1
        };
        buf.set_string(column, row, title, style);
    }
}

/// Star labels, each coloured with its palette colour.
fn render_importance_labels(rect: GridRect, areas: &MatrixAreas, buf: &mut Buffer) {
    let labels = areas.importance_labels;
    if labels.is_empty() {
        return;
    }
    for importance in Importance::all() {
        let position = rect.coordinate_to_position(Coordinate::new(Urgency::MIN, importance));
        let Some((_, row)) = cell_for_point(areas.grid, position) else {
            continue;
        };
        let color = palette_color(importance);
        buf.set_string(
            labels.x,
            row,
            importance.label(),
            Style::default().fg(Color::Rgb(color.r, color.g, color.b)),
        );
    }
}

/// Urgency labels under their columns, fading in with urgency.
///
/// Labels are placed left to right and skipped when they would overlap the
/// previous one.
fn render_urgency_labels(rect: GridRect, areas: &MatrixAreas, buf: &mut Buffer) {
    let labels = areas.urgency_labels;
    if labels.is_empty() {
        return;
    }
    let mut next_free = labels.left();
    for urgency in Urgency::all() {
        let position = rect.coordinate_to_position(Coordinate::new(urgency, Importance::MIN));
        let Some((column, _)) = cell_for_point(areas.grid, position) else {
            continue;
        };
        let text = urgency.label();
        let width = text.chars().count() as u16;
        if width > labels.width {
            continue;
        }
        let start = column
            .saturating_sub(width / 2)
            .max(labels.left())
            .min(labels.right() - width);
        if start < next_free {
            continue;
        }
        let level = (opacity_for(urgency) * 255.0).round() as u8;
        buf.set_string(
            start,
            labels.y,
            text,
            Style::default().fg(Color::Rgb(level, level, level)),
        );
        next_free = start + width + 1;
    }
}

/// Picks black or white text for legibility on a fill.
fn text_color_on(fill: Rgb) -> Color {
    let luma = 0.299 * f64::from(fill.r) + 0.587 * f64::from(fill.g) + 0.114 * f64::from(fill.b);
    if luma > LIGHT_FILL_LUMA {
        Color::Black
    } else {
        Color::White
    }
}

fn render_chip(chip: &Chip, background: Rgb, focused: bool, grid: Rect, buf: &mut Buffer) {
    let fill = chip.color.blend_over(background);
    let mut style = Style::default()
        .bg(Color::Rgb(fill.r, fill.g, fill.b))
        .fg(text_color_on(fill));
    if focused {
        style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    }

    let first = chip.column.saturating_sub(CHIP_REACH).max(grid.left());
    let last = (chip.column + CHIP_REACH).min(grid.right() - 1);
    for column in first..=last {
        let symbol = if column == chip.column { chip.label } else { ' ' };
        set_cell(buf, column, chip.row, symbol, style);
    }
}

/// The "+" affordance at the hover anchor, over empty grid space only.
fn render_add_marker(state: &AppState, chips: &[Chip], grid: Rect, buf: &mut Buffer) {
    if state.interaction.is_dragging() || state.interaction.modal().is_some() {
        return;
    }
    let Some((column, row)) = state
        .interaction
        .hover_anchor()
        .and_then(|point| cell_for_point(grid, point))
    else {
        return;
    };
    if task_at(chips, column, row).is_some() {
        return;
    }
    set_cell(
        buf,
        column,
        row,
        '+',
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    );
}

fn tooltip_lines(task: &Task, coordinate: Coordinate) -> Vec<Line<'_>> {
    let key_style = Style::default().fg(Color::DarkGray);
    let value_style = Style::default().fg(Color::White);
    vec![
        Line::from(Span::styled(
            task.title.as_str(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("Importance  ", key_style),
            Span::styled(coordinate.importance.label(), value_style),
        ]),
        Line::from(vec![
            Span::styled("Urgency     ", key_style),
            Span::styled(coordinate.urgency.label(), value_style),
        ]),
        Line::from(vec![
            Span::styled("Category    ", key_style),
            Span::styled(category_name(task.category), value_style),
        ]),
    ]
}

/// Draws the task tooltip beside its chip, flipping left at the right edge.
fn render_tooltip(task: &Task, coordinate: Coordinate, chip: &Chip, area: Rect, buf: &mut Buffer) {
    let lines = tooltip_lines(task, coordinate);
    let content_width = lines.iter().map(Line::width).max().unwrap_or(0) as u16;
    let width = (content_width + 4).min(area.width);
    let height = (lines.len() as u16 + 2).min(area.height);

    let right_of_chip = chip.column + CHIP_REACH + 2;
    let x = if right_of_chip + width <= area.right() {
        right_of_chip
    } else {
        chip.column
            .saturating_sub(CHIP_REACH + 1 + width)
            .max(area.left())
    };
    let y = chip
        .row
        .min(area.bottom().saturating_sub(height))
        .max(area.top());
    let popup = Rect::new(x, y, width, height).intersection(area);

    Clear.render(popup, buf);
    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Gray))
                .padding(Padding::horizontal(1)),
        )
        .render(popup, buf);
}
