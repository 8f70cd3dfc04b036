//! Frame loop
//!
//! Awaits the next display frame, ticks the game and hands the renderer a
//! snapshot. The loop only asks for another frame while a run is live, so
//! leaving `Playing` is all it takes to stop it.

use std::cell::RefCell;
use std::future::Future;

use crate::game::{FrameOutcome, Game, RunSummary};
use crate::persistence::BestScoreStore;
use crate::snapshot::Renderer;

/// Source of display frame timestamps (ms, monotonically increasing)
pub trait FrameClock {
    /// Wait for the next frame. `None` once the clock has stopped.
    fn next_frame(&mut self) -> impl Future<Output = Option<f64>>;
}

/// Why the loop returned
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoopExit {
    /// The run ended; offer a retry
    GameOver(RunSummary),
    /// The game was not playing when a frame arrived (run ended elsewhere or never started)
    NotPlaying,
    /// The clock stopped producing frames mid-run
    ClockStopped,
}

/// Drive the game until the current run ends.
///
/// The game sits in a `RefCell` so input handlers can reach it between
/// frames; no borrow is held across the await.
pub async fn run_loop<S, C, R>(game: &RefCell<Game<S>>, clock: &mut C, renderer: &mut R) -> LoopExit
where
    S: BestScoreStore,
    C: FrameClock,
    R: Renderer,
{
    loop {
        if !game.borrow().is_playing() {
            return LoopExit::NotPlaying;
        }

        let Some(now_ms) = clock.next_frame().await else {
            return LoopExit::ClockStopped;
        };

        let mut game = game.borrow_mut();
        let outcome = game.frame(now_ms);
        if outcome == FrameOutcome::NotPlaying {
            // Run ended while we were waiting; discard this frame
            return LoopExit::NotPlaying;
        }

        renderer.render(&game.snapshot());

        if let FrameOutcome::GameOver(summary) = outcome {
            return LoopExit::GameOver(summary);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::RunState;
    use crate::persistence::MemoryStore;
    use crate::platform::time::SimulatedClock;
    use crate::snapshot::RecordingRenderer;
    use crate::tuning::Tuning;

    fn new_game() -> RefCell<Game<MemoryStore>> {
        RefCell::new(Game::new(Tuning::default(), MemoryStore::new(), 99))
    }

    #[test]
    fn test_idle_game_does_not_loop() {
        let game = new_game();
        let mut clock = SimulatedClock::sixty_hz(0.0, 10);
        let mut renderer = RecordingRenderer::default();

        let exit = pollster::block_on(run_loop(&game, &mut clock, &mut renderer));
        assert_eq!(exit, LoopExit::NotPlaying);
        assert!(renderer.frames.is_empty());
        // No frame was requested
        assert_eq!(clock.remaining(), 10);
    }

    #[test]
    fn test_loop_runs_until_game_over() {
        let game = new_game();
        game.borrow_mut().activate(0.0);
        let mut clock = SimulatedClock::sixty_hz(0.0, 60 * 300);
        let mut renderer = RecordingRenderer::default();

        let exit = pollster::block_on(run_loop(&game, &mut clock, &mut renderer));
        let LoopExit::GameOver(summary) = exit else {
            panic!("expected game over, got {exit:?}");
        };

        assert_eq!(game.borrow().state(), RunState::GameOver);
        let last = renderer.frames.last().unwrap();
        assert_eq!(last.run_state, RunState::GameOver);
        assert_eq!(last.current_score, summary.score);
        // Every earlier frame was rendered while playing
        let playing = &renderer.frames[..renderer.frames.len() - 1];
        assert!(playing.iter().all(|f| f.run_state == RunState::Playing));
        // Clock is not polled after the run ends
        assert_eq!(
            clock.remaining() as usize,
            60 * 300 - renderer.frames.len()
        );
    }

    #[test]
    fn test_clock_stop_leaves_run_live() {
        let game = new_game();
        game.borrow_mut().set_autopilot(true);
        game.borrow_mut().activate(0.0);
        let mut clock = SimulatedClock::sixty_hz(0.0, 120);
        let mut renderer = RecordingRenderer::default();

        let exit = pollster::block_on(run_loop(&game, &mut clock, &mut renderer));
        assert_eq!(exit, LoopExit::ClockStopped);
        assert_eq!(renderer.frames.len(), 120);
        assert!(game.borrow().is_playing());
    }

    #[test]
    fn test_stalled_clock_frame_is_rendered_but_not_simulated() {
        let game = new_game();
        game.borrow_mut().activate(0.0);
        let mut clock = SimulatedClock::sixty_hz(0.0, 1);
        clock.stall(2000.0);
        let mut renderer = RecordingRenderer::default();

        let exit = pollster::block_on(run_loop(&game, &mut clock, &mut renderer));
        assert_eq!(exit, LoopExit::ClockStopped);
        assert_eq!(renderer.frames.len(), 1);
        assert_eq!(game.borrow().session().unwrap().elapsed_ms, 0.0);
    }
}
