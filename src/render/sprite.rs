//! Sprite orientation for snake segments.
//!
//! Head and tail sprites face away from the neighbouring segment, so they are
//! derived from the vector pointing from that neighbour back to the end cell.
//! Interior segments look at both neighbours and pick a straight or corner
//! piece.

use crate::game::{Direction, Snake, Vector2};

/// Straight and corner pieces for interior segments. Corners are named after
/// the two sides of the cell they connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodySprite {
    Vertical,
    Horizontal,
    TopLeft,
    BottomLeft,
    TopRight,
    BottomRight,
}

/// Every image the scene can blit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Apple,
    /// Head facing the given way
    Head(Direction),
    /// Tail tip pointing the given way
    Tail(Direction),
    Body(BodySprite),
}

/// Facing of an end segment whose neighbour lies at `end + offset`.
/// Only the four unit offsets have a facing.
pub fn facing_away(offset: Vector2) -> Option<Direction> {
    Direction::from_vector(offset).map(|towards_neighbour| towards_neighbour.opposite())
}

/// Head facing from `body[1] - body[0]`
pub fn head_facing(snake: &Snake) -> Option<Direction> {
    let neck = *snake.body.get(1)?;
    facing_away(neck - snake.head())
}

/// Tail facing from `body[len - 2] - body[len - 1]`
pub fn tail_facing(snake: &Snake) -> Option<Direction> {
    let len = snake.len();
    if len < 2 {
        return None;
    }
    facing_away(snake.body[len - 2] - snake.body[len - 1])
}

/// Piece for an interior segment given the offsets to its tail-side (`prev`)
/// and head-side (`next`) neighbours.
pub fn body_sprite(prev: Vector2, next: Vector2) -> Option<BodySprite> {
    if prev.x == next.x {
        return Some(BodySprite::Vertical);
    }
    if prev.y == next.y {
        return Some(BodySprite::Horizontal);
    }
    corner_sprite(prev, next)
}

/// First matching corner wins; either neighbour may supply either side.
pub fn corner_sprite(prev: Vector2, next: Vector2) -> Option<BodySprite> {
    match (prev.x, prev.y, next.x, next.y) {
        (-1, _, _, -1) | (_, -1, -1, _) => Some(BodySprite::TopLeft),
        (-1, _, _, 1) | (_, 1, -1, _) => Some(BodySprite::BottomLeft),
        (1, _, _, -1) | (_, -1, 1, _) => Some(BodySprite::TopRight),
        (1, _, _, 1) | (_, 1, 1, _) => Some(BodySprite::BottomRight),
        _ => None,
    }
}

/// Last head and tail sprites chosen.
///
/// When an end segment has no unit-vector neighbour (the snake standing on
/// its own head before the first input) the previous choice is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpriteMemory {
    pub head: Option<Direction>,
    pub tail: Option<Direction>,
}

impl SpriteMemory {
    pub fn update(&mut self, snake: &Snake) {
        if let Some(facing) = head_facing(snake) {
            self.head = Some(facing);
        }
        if let Some(facing) = tail_facing(snake) {
            self.tail = Some(facing);
        }
    }

    /// Sprite for segment `index`, or `None` when nothing should be drawn
    pub fn segment_sprite(&self, snake: &Snake, index: usize) -> Option<Sprite> {
        let last = snake.len() - 1;
        if index == 0 {
            return self.head.map(Sprite::Head);
        }
        if index == last {
            return self.tail.map(Sprite::Tail);
        }

        let here = snake.body[index];
        let prev = snake.body[index + 1] - here;
        let next = snake.body[index - 1] - here;
        body_sprite(prev, next).map(Sprite::Body)
    }
}
