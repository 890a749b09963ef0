//! Fire-and-forget sound cues

use std::io::{self, Write};

/// Something that can make a short noise when the snake eats
pub trait AudioCue {
    /// Trigger the cue. Must not block and must tolerate overlapping calls.
    fn play(&mut self);
}

/// Rings the terminal bell
#[derive(Debug, Default)]
pub struct TerminalBell;

impl AudioCue for TerminalBell {
    fn play(&mut self) {
        let mut out = io::stdout();
        if let Err(err) = out.write_all(b"\x07").and_then(|_| out.flush()) {
            tracing::warn!("Failed to ring terminal bell: {}", err);
        }
    }
}

/// Swallows every cue
#[derive(Debug, Default)]
pub struct Muted;

impl AudioCue for Muted {
    fn play(&mut self) {}
}

impl<T: AudioCue + ?Sized> AudioCue for Box<T> {
    fn play(&mut self) {
        (**self).play();
    }
}

/// Counts cues instead of playing them
#[cfg(test)]
#[derive(Debug, Default)]
pub struct CountingCue {
    pub plays: usize,
}

#[cfg(test)]
impl AudioCue for CountingCue {
    fn play(&mut self) {
        self.plays += 1;
    }
}
