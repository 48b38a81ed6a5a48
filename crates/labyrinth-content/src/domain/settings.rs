//! Tuning settings shared by the orchestration services.

use serde::{Deserialize, Serialize};

/// Campaign-wide tuning. Every field has a default so campaigns only spell
/// out what they change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Size of the life pool at the start of a run.
    pub max_lives: u32,
    /// Lives lost per wrong answer.
    pub damage_per_wrong_answer: u32,
    /// Typewriter reveal speed.
    pub chars_per_second: f32,
    /// Default camera transition duration.
    pub camera_seconds: f32,
    /// Duration of the gate key flourish.
    pub flourish_seconds: f32,
    /// How long wrong-answer feedback stays visible.
    pub feedback_seconds: f32,
    /// Delay between a chest reward and the chapter completion check.
    pub completion_check_delay: f32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            max_lives: 3,
            damage_per_wrong_answer: 1,
            chars_per_second: 40.0,
            camera_seconds: 1.0,
            flourish_seconds: 1.5,
            feedback_seconds: 2.0,
            completion_check_delay: 1.0,
        }
    }
}
