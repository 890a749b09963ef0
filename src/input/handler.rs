use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::game::{Direction, Vector2};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Steer(Direction),
    /// Start a session, or stop the running one
    Toggle,
    Instructions,
    Quit,
    None,
}

/// Direction of a swipe from `start` to `end`, if it travelled far enough.
///
/// The axis with the larger displacement decides; equal displacements count
/// as vertical. Movement must exceed `threshold` along that axis.
pub fn swipe_direction(start: Vector2, end: Vector2, threshold: i32) -> Option<Direction> {
    let delta = end - start;

    if delta.x.abs() > delta.y.abs() {
        if delta.x > threshold {
            Some(Direction::Right)
        } else if delta.x < -threshold {
            Some(Direction::Left)
        } else {
            None
        }
    } else if delta.y > threshold {
        Some(Direction::Down)
    } else if delta.y < -threshold {
        Some(Direction::Up)
    } else {
        None
    }
}

/// Translates terminal events into game actions
pub struct InputHandler {
    swipe_threshold: i32,
    cell_size: i32,
    swipe_start: Option<Vector2>,
}

impl InputHandler {
    pub fn new(swipe_threshold: i32, cell_size: i32) -> Self {
        Self {
            swipe_threshold,
            cell_size,
            swipe_start: None,
        }
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Steer(Direction::Up),
            KeyCode::Down => KeyAction::Steer(Direction::Down),
            KeyCode::Left => KeyAction::Steer(Direction::Left),
            KeyCode::Right => KeyAction::Steer(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Steer(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Steer(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Steer(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Steer(Direction::Right),

            // Controls
            KeyCode::Enter | KeyCode::Char(' ') => KeyAction::Toggle,
            KeyCode::Char('h') | KeyCode::Char('H') => KeyAction::Instructions,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }

    /// A left-button drag acts as a swipe. Terminal columns are half a grid
    /// cell wide, rows a full one.
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) -> KeyAction {
        let point = Vector2::new(
            mouse.column as i32 * self.cell_size / 2,
            mouse.row as i32 * self.cell_size,
        );

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.swipe_start = Some(point);
                KeyAction::None
            }
            MouseEventKind::Up(MouseButton::Left) => match self.swipe_start.take() {
                Some(start) => swipe_direction(start, point, self.swipe_threshold)
                    .map(KeyAction::Steer)
                    .unwrap_or(KeyAction::None),
                None => KeyAction::None,
            },
            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(50, 40)
    }
}
