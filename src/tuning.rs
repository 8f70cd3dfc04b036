//! Data-driven game balance
//!
//! Every gameplay constant lives here so a run can be retuned without a rebuild.
//! Native builds read overrides from the JSON file named by `LASER_SWITCH_TUNING`.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Speed ===
    /// Gate speed at run start (units/s)
    pub start_speed: f32,
    /// Gate speed ceiling (units/s)
    pub speed_cap: f32,
    /// Play time between ramp steps (ms)
    pub ramp_interval_ms: f32,
    /// Multiplier per ramp step
    pub ramp_factor: f32,

    // === Timing ===
    /// Minimum gap between accepted toggles (ms)
    pub debounce_ms: f64,
    /// Gate spawn cadence (ms)
    pub spawn_interval_ms: f32,
    /// Larger frame deltas skip the tick (ms)
    pub max_frame_delta_ms: f32,

    // === Geometry ===
    pub player_radius: f32,
    /// Player x as a fraction of field width
    pub player_x_ratio: f32,
    pub gate_width: f32,
    pub gate_height: f32,
    pub cleanup_margin: f32,
    pub field_width: f32,
    pub field_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            start_speed: START_SPEED,
            speed_cap: SPEED_CAP,
            ramp_interval_ms: SPEED_RAMP_INTERVAL_MS,
            ramp_factor: SPEED_RAMP_FACTOR,

            debounce_ms: TOGGLE_DEBOUNCE_MS,
            spawn_interval_ms: GATE_INTERVAL_MS,
            max_frame_delta_ms: MAX_FRAME_DELTA_MS,

            player_radius: PLAYER_RADIUS,
            player_x_ratio: PLAYER_X_RATIO,
            gate_width: GATE_WIDTH,
            gate_height: GATE_HEIGHT,
            cleanup_margin: GATE_CLEANUP_MARGIN,
            field_width: DEFAULT_FIELD_WIDTH,
            field_height: DEFAULT_FIELD_HEIGHT,
        }
    }
}

impl Tuning {
    /// Environment variable naming a JSON tuning file
    pub const ENV_PATH: &'static str = "LASER_SWITCH_TUNING";

    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load tuning from the file named by [`Tuning::ENV_PATH`] (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(Self::ENV_PATH).filter(|p| !p.is_empty()) else {
            log::info!("Using default tuning");
            return Self::default();
        };
        let path = std::path::PathBuf::from(path);

        match std::fs::read_to_string(&path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(err) => {
                    log::warn!(
                        "Failed to parse tuning {}: {}; using defaults",
                        path.display(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "Failed to read tuning {}: {}; using defaults",
                    path.display(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Browser builds always use the compiled-in balance
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        Self::default()
    }
}
