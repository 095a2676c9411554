use serde::{Deserialize, Serialize};

use crate::collision::HitboxMargin;

/// Downward acceleration (px/s^2).
pub const GRAVITY: f32 = 2880.0;
/// Horizontal move speed (px/s).
pub const MOVE_SPEED: f32 = 240.0;
/// Jump impulse magnitude (px/s, applied upward as a negative velocity).
pub const JUMP_SPEED: f32 = 840.0;
/// Logical viewport size.
pub const SCREEN_WIDTH: f32 = 816.0;
pub const SCREEN_HEIGHT: f32 = 480.0;
/// Fixed simulation rate.
pub const TICK_RATE_HZ: f32 = 60.0;
/// Delay between level completion and the scheduled reset.
pub const RESET_DELAY_SECS: f32 = 2.0;

/// Physics tuning, loadable from TOML.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    pub move_speed: f32,
    pub jump_speed: f32,
    /// Hard world-top bound; upward motion stops here.
    pub ceiling_y: f32,
    pub margin: HitboxMargin,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            move_speed: MOVE_SPEED,
            jump_speed: JUMP_SPEED,
            ceiling_y: 0.0,
            margin: HitboxMargin::default(),
        }
    }
}

/// Player sprite dimensions and spawn point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    pub spawn_x: f32,
    pub spawn_y: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 59.0,
            spawn_x: 140.0,
            // One tile above the screen bottom, standing height.
            spawn_y: SCREEN_HEIGHT - 32.0 - 59.0,
        }
    }
}

/// Horizontal level-bound tolerances. The collision box overhangs the
/// sprite, so both ends carry slack rather than clamping to exact zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundsConfig {
    /// How far past the left boundary the position may drift.
    pub left_tolerance: f32,
    /// Rightmost position is the level width minus this inset (sprite
    /// width plus the hitbox widening).
    pub right_inset: f32,
    /// Positions within this margin of the right boundary count as
    /// having reached the level exit.
    pub exit_margin: f32,
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            left_tolerance: 5.0,
            right_inset: 150.0,
            exit_margin: 160.0,
        }
    }
}

/// Top-level session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub physics: PhysicsConfig,
    pub player: PlayerConfig,
    pub bounds: BoundsConfig,
    pub screen_width: f32,
    pub screen_height: f32,
    pub tick_rate_hz: f32,
    pub reset_delay_secs: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            player: PlayerConfig::default(),
            bounds: BoundsConfig::default(),
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            tick_rate_hz: TICK_RATE_HZ,
            reset_delay_secs: RESET_DELAY_SECS,
        }
    }
}

impl SessionConfig {
    /// Load config from a TOML file. Falls back to defaults if the file
    /// is missing or unparseable.
    pub fn load() -> Self {
        let path = std::env::var("WATERLINE_CONFIG")
            .unwrap_or_else(|_| "config/waterline.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<SessionConfig>(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    SessionConfig::default()
                },
            },
            Err(_) => SessionConfig::default(),
        }
    }

    /// Fixed frame interval in seconds.
    pub fn tick_interval(&self) -> f32 {
        1.0 / self.tick_rate_hz
    }
}
