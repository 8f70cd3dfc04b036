//! Run lifecycle
//!
//! `Idle` → `Playing` on the first activation, `Playing` → `GameOver` on a
//! color mismatch, `GameOver` → `Playing` on the next activation. While a run
//! is live, activations become debounced color toggles.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::persistence::BestScoreStore;
use crate::score::ScoreTracker;
use crate::sim::autopilot;
use crate::sim::{Color, Field, Gate, Player, RunSession, TickOutcome, accepts_delta, tick};
use crate::snapshot::{GateView, PlayerView, Snapshot};
use crate::tuning::Tuning;

/// Externally visible lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Nothing started yet
    Idle,
    /// A run is live
    Playing,
    /// Last run ended; waiting for a retry
    GameOver,
}

/// Diagnostic counters (not gameplay-affecting)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub deaths: u32,
    pub retries: u32,
}

/// Summary of a finished run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub score: u32,
    /// Best score after this run
    pub best: u32,
    pub new_best: bool,
    /// Wall-clock duration from start to game over (ms)
    pub duration_ms: f64,
    /// Simulated play time (ms); excludes dropped frames
    pub play_ms: f64,
    /// Speed at the moment the run ended (units/s)
    pub final_speed: f32,
    pub deaths: u32,
    pub retries: u32,
}

/// What an activation did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// A new run started; `retry` when it followed a game over
    Started { retry: bool },
    /// Player switched to the given color
    Toggled(Color),
    /// Too soon after the last toggle; ignored
    Debounced,
}

/// What a frame did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// No run is live; the frame was discarded
    NotPlaying,
    /// Frame delta was out of bounds; nothing simulated
    Skipped,
    /// Run continues
    Advanced { cleared: u32 },
    /// The run ended on this frame; the caller should offer a retry
    GameOver(RunSummary),
}

enum Phase {
    Idle,
    Playing(RunSession),
    GameOver {
        summary: RunSummary,
        /// Gates on screen when the run ended, kept for the final frame
        wreckage: Vec<Gate>,
    },
}

pub struct Game<S: BestScoreStore> {
    tuning: Tuning,
    field: Field,
    player: Player,
    phase: Phase,
    score: ScoreTracker<S>,
    stats: Stats,
    rng: Pcg32,
    autopilot: bool,
}

impl<S: BestScoreStore> Game<S> {
    /// Create an idle game. The best score is read from `store` here, once.
    pub fn new(tuning: Tuning, store: S, seed: u64) -> Self {
        let field = Field::new(tuning.field_width, tuning.field_height);
        let player = Player::new(field, &tuning);
        Self {
            field,
            player,
            phase: Phase::Idle,
            score: ScoreTracker::load(store),
            stats: Stats::default(),
            rng: Pcg32::seed_from_u64(seed),
            autopilot: false,
            tuning,
        }
    }

    pub fn state(&self) -> RunState {
        match self.phase {
            Phase::Idle => RunState::Idle,
            Phase::Playing(_) => RunState::Playing,
            Phase::GameOver { .. } => RunState::GameOver,
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        matches!(self.phase, Phase::Playing(_))
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn scores(&self) -> &ScoreTracker<S> {
        &self.score
    }

    /// The live run, if any
    pub fn session(&self) -> Option<&RunSession> {
        match &self.phase {
            Phase::Playing(session) => Some(session),
            _ => None,
        }
    }

    /// Summary of the last finished run while in `GameOver`
    pub fn last_summary(&self) -> Option<&RunSummary> {
        match &self.phase {
            Phase::GameOver { summary, .. } => Some(summary),
            _ => None,
        }
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        if self.autopilot != enabled {
            log::info!("Autopilot: {}", enabled);
        }
        self.autopilot = enabled;
    }

    /// Resize the play field and re-anchor the player. Gates in flight keep their positions.
    pub fn resize(&mut self, width: f32, height: f32) {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            log::warn!("Ignoring invalid field size {}x{}", width, height);
            return;
        }
        self.field = Field::new(width, height);
        self.player.pos = Player::anchor(self.field, &self.tuning);
    }

    /// Handle a tap/click/key at timestamp `now_ms`
    pub fn activate(&mut self, now_ms: f64) -> Activation {
        match &mut self.phase {
            Phase::Playing(session) => {
                if session.debounce.accept(now_ms) {
                    self.player.toggle_color();
                    Activation::Toggled(self.player.color)
                } else {
                    Activation::Debounced
                }
            }
            Phase::Idle => self.start_run(now_ms, false),
            Phase::GameOver { .. } => self.start_run(now_ms, true),
        }
    }

    fn start_run(&mut self, now_ms: f64, retry: bool) -> Activation {
        if retry {
            self.stats.retries += 1;
        }
        self.player.color = Color::Red;
        self.score.start_run();
        self.phase = Phase::Playing(RunSession::new(&self.tuning, now_ms));
        log::info!(
            "Run started (retry: {}, best: {})",
            retry,
            self.score.best()
        );
        Activation::Started { retry }
    }

    /// Advance the live run to the frame at `now_ms`
    pub fn frame(&mut self, now_ms: f64) -> FrameOutcome {
        let Phase::Playing(session) = &mut self.phase else {
            return FrameOutcome::NotPlaying;
        };

        let delta_ms = (now_ms - session.last_frame_ms) as f32;
        session.last_frame_ms = now_ms;

        if !accepts_delta(delta_ms, &self.tuning) {
            log::debug!("Dropped frame ({:.1} ms)", delta_ms);
            return FrameOutcome::Skipped;
        }

        if self.autopilot
            && autopilot::wants_toggle(&session.gates, &self.player)
            && session.debounce.accept(now_ms)
        {
            self.player.toggle_color();
        }

        let outcome = tick(
            session,
            &self.player,
            self.field,
            &self.tuning,
            &mut self.rng,
            delta_ms,
        );

        match outcome {
            TickOutcome::Skipped => FrameOutcome::Skipped,
            TickOutcome::Advanced { cleared, .. } => {
                for _ in 0..cleared {
                    self.score.record_clear();
                }
                FrameOutcome::Advanced { cleared }
            }
            TickOutcome::Mismatch { gate_id, cleared } => {
                for _ in 0..cleared {
                    self.score.record_clear();
                }
                log::debug!("Gate {} mismatched {}", gate_id, self.player.color.as_str());
                // Only a live run reaches the tick above
                let Phase::Playing(session) = std::mem::replace(&mut self.phase, Phase::Idle)
                else {
                    unreachable!("mismatch outside a live run");
                };
                FrameOutcome::GameOver(self.end_run(session, now_ms))
            }
        }
    }

    fn end_run(&mut self, mut session: RunSession, now_ms: f64) -> RunSummary {
        debug_assert_eq!(session.score, self.score.current());

        self.stats.deaths += 1;
        let outcome = self.score.on_run_end();

        let summary = RunSummary {
            score: outcome.score,
            best: outcome.best,
            new_best: outcome.new_best,
            duration_ms: now_ms - session.started_ms,
            play_ms: session.elapsed_ms,
            final_speed: session.speed(),
            deaths: self.stats.deaths,
            retries: self.stats.retries,
        };

        log::info!("Laser Switch session summary");
        log::info!("  Duration (s): {:.2}", summary.duration_ms / 1000.0);
        log::info!("  Gates cleared: {}", summary.score);
        log::info!("  Deaths: {}", summary.deaths);
        log::info!("  Retries: {}", summary.retries);
        if summary.new_best {
            log::info!("  New best score: {}", summary.best);
        }

        self.phase = Phase::GameOver {
            summary,
            wreckage: std::mem::take(&mut session.gates),
        };
        summary
    }

    /// Immutable view of the current frame
    pub fn snapshot(&self) -> Snapshot {
        let gates: &[Gate] = match &self.phase {
            Phase::Idle => &[],
            Phase::Playing(session) => &session.gates,
            Phase::GameOver { wreckage, .. } => wreckage,
        };
        Snapshot {
            field_width: self.field.width,
            field_height: self.field.height,
            player: PlayerView::from(&self.player),
            gates: gates.iter().map(GateView::from).collect(),
            current_score: self.score.current(),
            best_score: self.score.best(),
            run_state: self.state(),
        }
    }
}
