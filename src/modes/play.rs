use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::{MissedTickBehavior, interval};

use crate::audio::AudioCue;
use crate::game::{Game, GameConfig};
use crate::input::{InputHandler, KeyAction};
use crate::render::{present, CellCanvas, DrawSurface, RenderContext, Renderer, SceneRenderer, Screen};
use crate::ticker::FrameGate;

/// How often the loop wakes up to check the frame gate, like an animation frame
const FRAME_POLL: Duration = Duration::from_millis(16);

/// Interactive terminal session with a start/stop toggle
pub struct PlayMode {
    config: GameConfig,
    seed: Option<u64>,
    sessions_started: u64,
    game: Option<Game>,
    scene: SceneRenderer,
    canvas: CellCanvas,
    renderer: Renderer,
    input_handler: InputHandler,
    gate: FrameGate,
    audio: Box<dyn AudioCue>,
    show_instructions: bool,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(config: GameConfig, audio: Box<dyn AudioCue>, seed: Option<u64>) -> Self {
        let canvas = CellCanvas::new(config.cell_size, config.canvas_width, config.canvas_height);
        let input_handler = InputHandler::new(config.swipe_threshold, config.cell_size);
        let gate = FrameGate::new(config.tick_interval());

        Self {
            config,
            seed,
            sessions_started: 0,
            game: None,
            scene: SceneRenderer::new(),
            canvas,
            renderer: Renderer::new(),
            input_handler,
            gate,
            audio,
            show_instructions: false,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut frame_timer = interval(FRAME_POLL);
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let clock = Instant::now();

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Animation frame: tick if due, then draw
                _ = frame_timer.tick() => {
                    self.on_frame(clock.elapsed());
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.screen());
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        tracing::info!("quitting");
        Ok(())
    }

    fn screen(&self) -> Screen<'_> {
        match &self.game {
            Some(game) => Screen::Playing {
                canvas: &self.canvas,
                score: game.score(),
            },
            None => Screen::Start {
                show_instructions: self.show_instructions,
            },
        }
    }

    fn handle_event(&mut self, event: Event) {
        let action = match event {
            // Only process key press events, not release
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.input_handler.handle_key_event(key)
            }
            Event::Mouse(mouse) => self.input_handler.handle_mouse_event(mouse),
            _ => KeyAction::None,
        };

        self.apply(action);
    }

    fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Steer(dir) => {
                // Checked against the heading right now, not at the next tick
                if let Some(game) = self.game.as_mut() {
                    if game.snake.steer(dir) {
                        tracing::trace!(?dir, "heading changed");
                    }
                }
            }
            KeyAction::Toggle => {
                if self.game.is_some() {
                    self.stop();
                } else {
                    self.start();
                }
            }
            KeyAction::Instructions => {
                if self.game.is_none() {
                    self.show_instructions = !self.show_instructions;
                }
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    /// One animation frame at `now` since the loop started
    fn on_frame(&mut self, now: Duration) {
        let Some(game) = self.game.as_mut() else {
            return;
        };
        if !self.gate.ready(now) {
            return;
        }

        let info = game.update(&mut self.audio);
        if let Some(collision) = info.collision.filter(|_| !info.idle) {
            tracing::info!(?collision, "snake reset");
        }

        let ctx = RenderContext::from_config(&self.config);
        let frame = self.scene.render(game, &ctx);
        present(&frame, &mut self.canvas);
    }

    fn start(&mut self) {
        let game = match self.seed {
            Some(seed) => Game::seeded(self.config.clone(), seed.wrapping_add(self.sessions_started)),
            None => Game::new(self.config.clone()),
        };
        self.sessions_started += 1;
        self.show_instructions = false;
        self.scene.reset();
        self.game = Some(game);
        tracing::info!(session = self.sessions_started, "game started");
    }

    fn stop(&mut self) {
        if let Some(game) = self.game.take() {
            tracing::info!(score = game.score(), "game stopped");
        }
        self.canvas.clear();
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
