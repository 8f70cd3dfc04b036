//! Score tracking
//!
//! Keeps the live run score and the best score. The best score is read from
//! the store once, only ever grows, and is written back when a run beats it.

use crate::persistence::BestScoreStore;

/// Result of closing a run's score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreOutcome {
    /// Final score of the run
    pub score: u32,
    /// Best score after the run
    pub best: u32,
    /// The run set a new best
    pub new_best: bool,
}

#[derive(Debug)]
pub struct ScoreTracker<S: BestScoreStore> {
    store: S,
    best: u32,
    current: u32,
}

impl<S: BestScoreStore> ScoreTracker<S> {
    /// Load the best score; an unreadable store counts as no best yet
    pub fn load(store: S) -> Self {
        let best = match store.get_best() {
            Ok(best) => {
                log::info!("Loaded best score: {}", best);
                best
            }
            Err(err) => {
                log::warn!("Failed to load best score: {}; starting from 0", err);
                0
            }
        };
        Self {
            store,
            best,
            current: 0,
        }
    }

    #[inline]
    pub fn current(&self) -> u32 {
        self.current
    }

    #[inline]
    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reset the live score for a new run
    pub fn start_run(&mut self) {
        self.current = 0;
    }

    /// One gate cleared
    pub fn record_clear(&mut self) {
        self.current += 1;
    }

    /// Compare the finished run against the best score, persisting a new best.
    ///
    /// A failed write is logged; the in-memory best stays authoritative.
    pub fn on_run_end(&mut self) -> ScoreOutcome {
        let new_best = self.current > self.best;
        if new_best {
            self.best = self.current;
            if let Err(err) = self.store.set_best(self.best) {
                log::warn!("Failed to persist best score {}: {}", self.best, err);
            }
        }
        ScoreOutcome {
            score: self.current,
            best: self.best,
            new_best,
        }
    }
}
