//! The frame loop and the playing → game-over → restart state machine.
//!
//! The host hands in its collaborators (renderer, input source, game-over
//! overlay) and calls [`Game::run`], or drives [`Game::step`] itself from
//! whatever scheduler it has.

use std::io;
use std::thread;
use std::time::{Duration, Instant};

use rand::Rng;
use tracing::info;

use crate::compute::{resize, restart, tick, GameState};
use crate::entities::GameStatus;
use crate::input::InputSnapshot;

/// Draws a complete frame. Must not change the state it is given.
pub trait RenderAdapter {
    fn draw(&mut self, state: &GameState) -> io::Result<()>;
}

/// Source of per-frame input.
pub trait InputAdapter {
    /// Input as of the start of this frame. One-shot requests (restart,
    /// quit) are consumed by the call.
    fn snapshot(&mut self) -> InputSnapshot;

    /// New play-field size in pixels, if the host viewport changed since the
    /// last call.
    fn take_resize(&mut self) -> Option<(f32, f32)>;
}

/// The "game over" screen and its restart affordance.
pub trait OverlayController {
    /// Called right after a frame is drawn while the game is over: once on
    /// the fatal frame, and again if a resize forces a repaint.
    fn show_game_over(&mut self, score: u32) -> io::Result<()>;
    /// Called once when a restart takes effect.
    fn hide_game_over(&mut self) -> io::Result<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Game<R, I, O, G> {
    state: GameState,
    renderer: R,
    input: I,
    overlay: O,
    rng: G,
}

impl<R, I, O, G> Game<R, I, O, G>
where
    R: RenderAdapter,
    I: InputAdapter,
    O: OverlayController,
    G: Rng,
{
    pub fn new(state: GameState, renderer: R, input: I, overlay: O, rng: G) -> Self {
        Self {
            state,
            renderer,
            input,
            overlay,
            rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    /// One display tick: read input, update if playing, draw if anything
    /// changed.
    ///
    /// A restart request only counts when the frame starts in the game-over
    /// state, so a click that lands on the fatal frame is not taken as one.
    pub fn step(&mut self) -> io::Result<Flow> {
        let input = self.input.snapshot();
        if input.quit_requested {
            info!(score = self.state.score, "quit requested");
            return Ok(Flow::Quit);
        }

        let mut repaint = false;
        if let Some((width, height)) = self.input.take_resize() {
            self.state = resize(&self.state, width, height);
            repaint = true;
        }

        match self.state.status {
            GameStatus::Playing => {
                self.state = tick(&self.state, &input, &mut self.rng);
                if self.state.is_game_over() {
                    info!(score = self.state.score, "game over");
                }
                repaint = true;
            }
            GameStatus::GameOver => {
                if input.restart_requested {
                    self.state = restart(&self.state);
                    self.overlay.hide_game_over()?;
                    repaint = true;
                }
            }
        }

        // A finished game is frozen: leave the screen and its overlay alone.
        if repaint {
            self.renderer.draw(&self.state)?;
            if self.state.is_game_over() {
                self.overlay.show_game_over(self.state.score)?;
            }
        }
        Ok(Flow::Continue)
    }

    /// Step once per `frame` until the input asks to quit.
    pub fn run(&mut self, frame: Duration) -> io::Result<()> {
        loop {
            let frame_start = Instant::now();
            if self.step()? == Flow::Quit {
                return Ok(());
            }
            let elapsed = frame_start.elapsed();
            if elapsed < frame {
                thread::sleep(frame - elapsed);
            }
        }
    }
}
