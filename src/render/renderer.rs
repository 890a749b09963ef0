use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::sprite::{BodySprite, Sprite};
use super::surface::{DrawSurface, Rgb};
use crate::game::Direction as Heading;

/// Terminal columns per grid cell
const CELL_COLUMNS: usize = 2;

const APPLE_COLOR: Rgb = Rgb(231, 71, 29);
const SNAKE_COLOR: Rgb = Rgb(78, 124, 246);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CanvasCell {
    glyph: [char; CELL_COLUMNS],
    fg: Option<Rgb>,
    bg: Option<Rgb>,
}

impl CanvasCell {
    const BLANK: CanvasCell = CanvasCell {
        glyph: [' '; CELL_COLUMNS],
        fg: None,
        bg: None,
    };
}

/// A character-cell drawing surface. Pixel coordinates are divided by the
/// cell size; each grid cell is two terminal columns wide.
#[derive(Debug, Clone)]
pub struct CellCanvas {
    cell_size: i32,
    cols: usize,
    rows: usize,
    cells: Vec<CanvasCell>,
}

impl CellCanvas {
    pub fn new(cell_size: i32, canvas_width: i32, canvas_height: i32) -> Self {
        let cell_size = cell_size.max(1);
        let cols = (canvas_width / cell_size).max(0) as usize;
        let rows = (canvas_height / cell_size).max(0) as usize;
        Self {
            cell_size,
            cols,
            rows,
            cells: vec![CanvasCell::BLANK; cols * rows],
        }
    }

    /// Size in grid cells
    pub fn size(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    /// Glyph pair at a grid cell, for inspection
    pub fn glyph_at(&self, col: usize, row: usize) -> Option<String> {
        self.cell(col, row).map(|cell| cell.glyph.iter().collect())
    }

    pub fn background_at(&self, col: usize, row: usize) -> Option<Rgb> {
        self.cell(col, row).and_then(|cell| cell.bg)
    }

    fn cell(&self, col: usize, row: usize) -> Option<&CanvasCell> {
        (col < self.cols && row < self.rows).then(|| &self.cells[row * self.cols + col])
    }

    fn cell_mut(&mut self, col: i32, row: i32) -> Option<&mut CanvasCell> {
        if col < 0 || row < 0 || col as usize >= self.cols || row as usize >= self.rows {
            return None;
        }
        Some(&mut self.cells[row as usize * self.cols + col as usize])
    }

    fn to_cell(&self, px: i32) -> i32 {
        px.div_euclid(self.cell_size)
    }

    pub fn to_paragraph(&self) -> Paragraph<'static> {
        let mut lines = Vec::with_capacity(self.rows);

        for row in self.cells.chunks(self.cols.max(1)).take(self.rows) {
            let spans: Vec<Span<'static>> = row
                .iter()
                .map(|cell| {
                    let mut style = Style::default();
                    if let Some(Rgb(r, g, b)) = cell.fg {
                        style = style.fg(Color::Rgb(r, g, b)).add_modifier(Modifier::BOLD);
                    }
                    if let Some(Rgb(r, g, b)) = cell.bg {
                        style = style.bg(Color::Rgb(r, g, b));
                    }
                    Span::styled(cell.glyph.iter().collect::<String>(), style)
                })
                .collect();
            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
    }
}

impl DrawSurface for CellCanvas {
    fn clear(&mut self) {
        self.cells.fill(CanvasCell::BLANK);
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Rgb) {
        if width <= 0 || height <= 0 {
            return;
        }
        let last_col = self.cols as i32 - 1;
        let last_row = self.rows as i32 - 1;
        let col0 = self.to_cell(x).max(0);
        let row0 = self.to_cell(y).max(0);
        let col1 = self.to_cell(x.saturating_add(width - 1)).min(last_col);
        let row1 = self.to_cell(y.saturating_add(height - 1)).min(last_row);

        for row in row0..=row1 {
            for col in col0..=col1 {
                if let Some(cell) = self.cell_mut(col, row) {
                    *cell = CanvasCell {
                        bg: Some(color),
                        ..CanvasCell::BLANK
                    };
                }
            }
        }
    }

    fn draw_sprite(&mut self, sprite: Sprite, x: i32, y: i32) {
        let (col, row) = (self.to_cell(x), self.to_cell(y));
        if let Some(cell) = self.cell_mut(col, row) {
            cell.glyph = glyph(sprite);
            cell.fg = Some(sprite_color(sprite));
        }
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, size_px: i32, color: Rgb) {
        // Text hangs above its baseline
        let row = self.to_cell((y - size_px).max(0));
        let mut col = self.to_cell(x);
        let chars: Vec<char> = text.chars().collect();

        for pair in chars.chunks(CELL_COLUMNS) {
            if let Some(cell) = self.cell_mut(col, row) {
                cell.glyph = [' '; CELL_COLUMNS];
                cell.glyph[..pair.len()].copy_from_slice(pair);
                cell.fg = Some(color);
            }
            col += 1;
        }
    }
}

fn glyph(sprite: Sprite) -> [char; CELL_COLUMNS] {
    match sprite {
        Sprite::Apple => ['●', ' '],
        Sprite::Head(Heading::Up) => ['▲', ' '],
        Sprite::Head(Heading::Down) => ['▼', ' '],
        Sprite::Head(Heading::Left) => ['◀', ' '],
        Sprite::Head(Heading::Right) => ['▶', ' '],
        Sprite::Tail(Heading::Up) => ['╹', ' '],
        Sprite::Tail(Heading::Down) => ['╻', ' '],
        Sprite::Tail(Heading::Left) => ['╺', '━'],
        Sprite::Tail(Heading::Right) => ['╸', ' '],
        Sprite::Body(BodySprite::Vertical) => ['┃', ' '],
        Sprite::Body(BodySprite::Horizontal) => ['━', '━'],
        Sprite::Body(BodySprite::TopLeft) => ['┛', ' '],
        Sprite::Body(BodySprite::BottomLeft) => ['┓', ' '],
        Sprite::Body(BodySprite::TopRight) => ['┗', '━'],
        Sprite::Body(BodySprite::BottomRight) => ['┏', '━'],
    }
}

fn sprite_color(sprite: Sprite) -> Rgb {
    match sprite {
        Sprite::Apple => APPLE_COLOR,
        _ => SNAKE_COLOR,
    }
}

/// What the terminal should show this frame
pub enum Screen<'a> {
    /// Start overlay, optionally with the instructions popup
    Start { show_instructions: bool },
    Playing { canvas: &'a CellCanvas, score: usize },
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, screen: &Screen) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let header = self.render_header(screen);
        frame.render_widget(header, chunks[0]);

        match screen {
            Screen::Playing { canvas, .. } => {
                let area = self.centered_board(chunks[1], canvas);
                let board = canvas.to_paragraph().block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Double)
                        .border_style(Style::default().fg(Color::White))
                        .title(" Snake "),
                );
                frame.render_widget(board, area);
            }
            Screen::Start { show_instructions } => {
                frame.render_widget(self.render_start(), chunks[1]);
                if *show_instructions {
                    let popup = centered_rect(60, 60, chunks[1]);
                    frame.render_widget(Clear, popup);
                    frame.render_widget(self.render_instructions(), popup);
                }
            }
        }

        let controls = self.render_controls(screen);
        frame.render_widget(controls, chunks[2]);
    }

    /// Board rectangle including its border, centered in `area`
    fn centered_board(&self, area: Rect, canvas: &CellCanvas) -> Rect {
        let (cols, rows) = canvas.size();
        let width = u16::try_from(cols * CELL_COLUMNS + 2)
            .unwrap_or(u16::MAX)
            .min(area.width);
        let height = u16::try_from(rows + 2).unwrap_or(u16::MAX).min(area.height);
        Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        }
    }

    fn render_header(&self, screen: &Screen) -> Paragraph<'_> {
        let text = match screen {
            Screen::Playing { score, .. } => Line::from(vec![
                Span::styled("Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Screen::Start { .. } => Line::from(vec![Span::styled(
                "SNAKE",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )]),
        };

        Paragraph::new(vec![text]).alignment(Alignment::Center)
    }

    fn render_start(&self) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to start", Style::default().fg(Color::Gray)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "H",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" for instructions", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
    }

    fn render_instructions(&self) -> Paragraph<'_> {
        let text = vec![
            Line::from("Eat the apples to grow."),
            Line::from("Hitting a wall or your own body sends you back to the start."),
            Line::from(""),
            Line::from("Steer with the arrow keys or WASD,"),
            Line::from("or drag with the mouse."),
            Line::from("You cannot turn straight back on yourself."),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" Instructions "),
        )
    }

    fn render_controls(&self, screen: &Screen) -> Paragraph<'_> {
        let text = match screen {
            Screen::Playing { .. } => vec![Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("Enter", Style::default().fg(Color::Green)),
                Span::raw(" to stop | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ])],
            Screen::Start { .. } => vec![Line::from(vec![
                Span::styled("H", Style::default().fg(Color::Cyan)),
                Span::raw(" instructions | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ])],
        };

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A rectangle taking the given percentages of `area`, centered
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
