//! Application-level configuration constants.

// Default values for the counter attributes
pub const DEFAULT_VALUE: i64 = 0;
pub const DEFAULT_MIN: i64 = 0;
pub const DEFAULT_MAX: i64 = 10;

// Values with their own styling
pub const SPECIAL_VALUE: i64 = 21;
pub const HIGHLIGHT_VALUE: i64 = 18;

// Fallback pulse when the confetti effect is unavailable
pub const PULSE_MS: u32 = 160;
pub const PULSE_SCALE: f64 = 1.18;
pub const PULSE_TRANSITION: &str = "transform 0.12s ease, color 0.2s ease";

// DOM ids and attribute names
pub const MOUNT_ID: &str = "counter-app";
pub const CONFETTI_ID: &str = "confetti";
pub const POPPED_ATTR: &str = "popped";
pub const CONFIG_ATTR: &str = "data-config";
