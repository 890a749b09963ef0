use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{
    config::GameConfig,
    fruit::Fruit,
    state::{CollisionType, Snake, Vector2, SPAWN_BODY},
};
use crate::audio::AudioCue;

/// Information about a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepInfo {
    /// Whether the head reached the fruit this step
    pub ate_fruit: bool,
    /// Whether the fruit was moved because it sat under the body
    pub fruit_relocated: bool,
    /// Collision that sent the snake back to spawn, if any
    pub collision: Option<CollisionType>,
    /// The snake had no heading yet; its reset is the normal idle loop
    pub idle: bool,
}

/// One session: a snake, a fruit and the rules tying them together
pub struct Game {
    pub snake: Snake,
    pub fruit: Fruit,
    config: GameConfig,
    rng: StdRng,
}

impl Game {
    /// Create a new game with an entropy-seeded fruit sequence
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a game whose fruit sequence is reproducible
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Self {
        let fruit = Fruit::spawn(&mut rng, config.grid_size, config.fruit_max);
        Self {
            snake: Snake::new(),
            fruit,
            config,
            rng,
        }
    }

    /// Segments grown since spawn
    pub fn score(&self) -> usize {
        self.snake.len().saturating_sub(SPAWN_BODY.len())
    }

    /// Execute one tick of the game
    pub fn update(&mut self, cue: &mut impl AudioCue) -> StepInfo {
        let idle = self.snake.is_idle();
        self.snake.move_step();

        let mut info = self.check_fruit_collision(cue);
        info.idle = idle;

        if let Some(collision) = self.check_game_over() {
            // Standing still collides every tick until the first input
            if !idle {
                tracing::debug!(
                    ?collision,
                    head = ?self.snake.head(),
                    score = self.score(),
                    "snake crashed, resetting"
                );
            }
            self.reset();
            info.collision = Some(collision);
        }

        info
    }

    /// Both checks may fire in the same tick: the body check runs against
    /// the fruit's new position when the head just ate it.
    fn check_fruit_collision(&mut self, cue: &mut impl AudioCue) -> StepInfo {
        let mut info = StepInfo::default();

        if self.snake.head() == self.fruit.position {
            self.relocate_fruit();
            self.snake.grow();
            cue.play();
            info.ate_fruit = true;
            tracing::debug!(score = self.score() + 1, "fruit eaten");
        }

        for i in 1..self.snake.len() {
            if self.snake.body[i] == self.fruit.position {
                self.relocate_fruit();
                info.fruit_relocated = true;
            }
        }

        info
    }

    fn check_game_over(&self) -> Option<CollisionType> {
        let head = self.snake.head();

        if !self.is_in_field(head) {
            return Some(CollisionType::Wall);
        }

        if self.snake.collides_with_body(head) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Check if a position is within the playable field
    pub fn is_in_field(&self, pos: Vector2) -> bool {
        pos.x >= 0
            && pos.x < self.config.field_width
            && pos.y >= 0
            && pos.y < self.config.field_height
    }

    /// Only the snake starts over; the fruit keeps its cell
    pub fn reset(&mut self) {
        self.snake.reset();
    }

    fn relocate_fruit(&mut self) {
        self.fruit
            .randomize_position(&mut self.rng, self.config.grid_size, self.config.fruit_max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{CountingCue, Muted};

    fn game_with(body: &[(i32, i32)], direction: (i32, i32), fruit: (i32, i32)) -> Game {
        let mut game = Game::seeded(GameConfig::default(), 3);
        game.snake = Snake::with_body(
            body.iter().map(|&(x, y)| Vector2::new(x, y)).collect(),
            Vector2::new(direction.0, direction.1),
        );
        game.fruit = Fruit::at(Vector2::new(fruit.0, fruit.1));
        game
    }

    #[test]
    fn test_new_game() {
        let game = Game::seeded(GameConfig::default(), 9);
        assert_eq!(game.snake.body, SPAWN_BODY.to_vec());
        assert_eq!(game.score(), 0);
        assert!(game.fruit.position.x <= 8 && game.fruit.position.y <= 8);
    }

    #[test]
    fn test_basic_movement() {
        let mut game = game_with(&[(5, 10), (4, 10), (3, 10)], (1, 0), (0, 0));

        let info = game.update(&mut Muted);

        assert_eq!(info, StepInfo::default());
        assert_eq!(
            game.snake.body,
            vec![Vector2::new(6, 10), Vector2::new(5, 10), Vector2::new(4, 10)]
        );
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_fruit_consumption() {
        let mut game = game_with(&[(5, 5), (4, 5), (3, 5)], (1, 0), (6, 5));
        let mut cue = CountingCue::default();

        let info = game.update(&mut cue);

        assert!(info.ate_fruit);
        assert_eq!(cue.plays, 1);
        assert!(game.snake.should_grow);
        assert_eq!(game.snake.len(), 3);

        game.fruit = Fruit::at(Vector2::new(0, 0));
        game.update(&mut cue);
        assert_eq!(game.snake.len(), 4);
        assert_eq!(game.score(), 1);
        assert_eq!(cue.plays, 1);
    }

    #[test]
    fn test_fruit_under_body_is_relocated() {
        let mut game = game_with(&[(5, 5), (4, 5), (3, 5)], (1, 0), (4, 5));
        let mut cue = CountingCue::default();

        let info = game.update(&mut cue);

        assert!(!info.ate_fruit);
        assert_eq!(cue.plays, 0);
        assert!(!game.snake.should_grow);
        // Moved from (4,5) which is still a body cell after the move
        assert!(info.fruit_relocated);
    }

    #[test]
    fn test_wall_collisions_reset() {
        let cases = [
            ((0, 5), (-1, 0)),
            ((17, 5), (1, 0)),
            ((5, 0), (0, -1)),
            ((5, 11), (0, 1)),
        ];

        for ((x, y), (dx, dy)) in cases {
            let tail = (x - dx, y - dy);
            let tail2 = (x - 2 * dx, y - 2 * dy);
            let mut game = game_with(&[(x, y), tail, tail2], (dx, dy), (8, 8));

            let info = game.update(&mut Muted);

            assert_eq!(info.collision, Some(CollisionType::Wall), "head from ({x},{y})");
            assert_eq!(game.snake.body, SPAWN_BODY.to_vec());
            assert_eq!(game.snake.direction, Vector2::ZERO);
        }
    }

    #[test]
    fn test_inside_field_survives() {
        let mut game = game_with(&[(4, 5), (3, 5), (2, 5)], (1, 0), (8, 8));

        let info = game.update(&mut Muted);

        assert_eq!(info.collision, None);
        assert_eq!(game.snake.head(), Vector2::new(5, 5));
    }

    #[test]
    fn test_field_edges() {
        let game = Game::seeded(GameConfig::default(), 0);
        assert!(game.is_in_field(Vector2::new(0, 0)));
        assert!(game.is_in_field(Vector2::new(17, 11)));
        assert!(!game.is_in_field(Vector2::new(-1, 5)));
        assert!(!game.is_in_field(Vector2::new(18, 5)));
        assert!(!game.is_in_field(Vector2::new(5, -1)));
        assert!(!game.is_in_field(Vector2::new(5, 12)));
    }

    #[test]
    fn test_self_collision() {
        // Head turns up into the segment at (5,5)
        let mut game = game_with(&[(5, 6), (6, 6), (6, 5), (5, 5), (4, 5)], (0, -1), (8, 8));

        let info = game.update(&mut Muted);

        assert_eq!(info.collision, Some(CollisionType::SelfCollision));
        assert_eq!(game.snake.body, SPAWN_BODY.to_vec());
    }

    #[test]
    fn test_reset_keeps_fruit_and_score_returns_to_zero() {
        let mut game = game_with(&[(17, 5), (16, 5), (15, 5), (14, 5)], (1, 0), (2, 2));
        assert_eq!(game.score(), 1);

        game.update(&mut Muted);

        assert_eq!(game.fruit.position, Vector2::new(2, 2));
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_idle_snake_resets_every_tick() {
        let mut game = Game::seeded(GameConfig::default(), 5);
        game.fruit = Fruit::at(Vector2::new(8, 8));

        let info = game.update(&mut Muted);

        assert!(info.idle);
        assert_eq!(info.collision, Some(CollisionType::SelfCollision));
        assert_eq!(game.snake.body, SPAWN_BODY.to_vec());
        assert!(game.snake.is_idle());
    }

    #[test]
    fn test_eating_and_body_relocation_in_one_tick() {
        // The head eats at (6,8); the new fruit lands on the bend about
        // two times in five, mostly at (8,8)
        let mut both_fired = false;

        for seed in 0..200 {
            let mut game = Game::seeded(GameConfig::default(), seed);
            game.snake = Snake::with_body(
                vec![
                    Vector2::new(7, 8),
                    Vector2::new(8, 8),
                    Vector2::new(8, 7),
                    Vector2::new(7, 7),
                    Vector2::new(6, 7),
                ],
                Vector2::new(-1, 0),
            );
            game.fruit = Fruit::at(Vector2::new(6, 8));
            let mut cue = CountingCue::default();

            let info = game.update(&mut cue);

            assert!(info.ate_fruit, "seed {seed}");
            assert_eq!(cue.plays, 1, "seed {seed}");
            assert_eq!(info.collision, None, "seed {seed}");
            both_fired |= info.fruit_relocated;
        }

        assert!(both_fired);
    }

    #[test]
    fn test_seeded_games_agree() {
        let a = Game::seeded(GameConfig::default(), 1234);
        let b = Game::seeded(GameConfig::default(), 1234);
        assert_eq!(a.fruit, b.fruit);
    }
}
