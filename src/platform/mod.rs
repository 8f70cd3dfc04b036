//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing (requestAnimationFrame on web, simulated clock natively)
//! - Best score storage (LocalStorage on web, JSON file natively)

pub mod storage;
pub mod time;
