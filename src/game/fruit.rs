use rand::Rng;

use super::state::Vector2;

/// The single piece of fruit on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fruit {
    pub position: Vector2,
}

impl Fruit {
    /// Place a fruit at a random cell of the fruit region
    pub fn spawn<R: Rng>(rng: &mut R, grid_size: i32, fruit_max: i32) -> Self {
        let mut fruit = Fruit {
            position: Vector2::ZERO,
        };
        fruit.randomize_position(rng, grid_size, fruit_max);
        fruit
    }

    pub fn at(position: Vector2) -> Self {
        Fruit { position }
    }

    /// Draw each coordinate from the whole grid, then clamp it into
    /// `0..=fruit_max`. Every draw past `fruit_max` lands on the edge, so the
    /// far row and column of the region are far more likely than the rest.
    pub fn randomize_position<R: Rng>(
        &mut self,
        rng: &mut R,
        grid_size: i32,
        fruit_max: i32,
    ) {
        let mut coord = || rng.gen_range(0..grid_size).clamp(0, fruit_max);
        let x = coord();
        let y = coord();
        self.position = Vector2::new(x, y);
    }
}
