use std::ops::{Add, Mul, Neg, Sub};

use super::action::Direction;

/// An integer coordinate on the game grid, also used for headings and deltas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vector2 {
    pub x: i32,
    pub y: i32,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

/// Grid to surface scaling
impl Mul<i32> for Vector2 {
    type Output = Vector2;

    fn mul(self, factor: i32) -> Vector2 {
        Vector2::new(self.x * factor, self.y * factor)
    }
}

/// Where every snake (re)spawns, head first
pub const SPAWN_BODY: [Vector2; 3] = [
    Vector2::new(5, 10),
    Vector2::new(4, 10),
    Vector2::new(3, 10),
];

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Vector2>,
    /// Current heading; zero until the first input
    pub direction: Vector2,
    /// Set by a meal, consumed by the next move
    pub should_grow: bool,
}

impl Default for Snake {
    fn default() -> Self {
        Self::new()
    }
}

impl Snake {
    /// A motionless snake at the spawn cells
    pub fn new() -> Self {
        Self {
            body: SPAWN_BODY.to_vec(),
            direction: Vector2::ZERO,
            should_grow: false,
        }
    }

    /// Build a snake from explicit segments. Panics on an empty body.
    pub fn with_body(body: Vec<Vector2>, direction: Vector2) -> Self {
        assert!(!body.is_empty(), "a snake needs at least a head");
        Self {
            body,
            direction,
            should_grow: false,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Vector2 {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Vector2 {
        self.body[self.body.len() - 1]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Vector2] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Vector2) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Advance one cell along the heading, consuming a pending growth
    pub fn move_step(&mut self) {
        let new_head = self.head() + self.direction;
        self.body.insert(0, new_head);

        if !self.should_grow {
            self.body.pop();
        }
        self.should_grow = false;
    }

    /// Latch one segment of growth for the next move
    pub fn grow(&mut self) {
        self.should_grow = true;
    }

    /// Back to the spawn cells, standing still
    pub fn reset(&mut self) {
        self.body = SPAWN_BODY.to_vec();
        self.direction = Vector2::ZERO;
    }

    /// Not yet steered since spawn
    pub fn is_idle(&self) -> bool {
        self.direction.is_zero()
    }

    /// Turn towards `dir` unless that reverses the current heading.
    /// Returns whether the heading changed.
    pub fn steer(&mut self, dir: Direction) -> bool {
        let reverses = Direction::from_vector(self.direction)
            .is_some_and(|current| current.is_opposite(dir));
        if reverses {
            return false;
        }
        self.direction = dir.vector();
        true
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}
