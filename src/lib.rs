use log::debug;
use std::fmt;
use std::rc::Rc;
use yew::Reducible;

pub mod celebration;
pub mod components;
pub mod config;
pub mod hooks;
pub mod utils;

use config::{DEFAULT_MAX, DEFAULT_MIN, DEFAULT_VALUE, HIGHLIGHT_VALUE, SPECIAL_VALUE};

/// Bounded counter state. `min <= max` is left to whoever configures it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterState {
    pub value: i64,
    pub min: i64,
    pub max: i64,
}

impl Default for CounterState {
    fn default() -> Self {
        Self {
            value: DEFAULT_VALUE,
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
        }
    }
}

impl CounterState {
    pub fn new(value: i64, min: i64, max: i64) -> Self {
        Self { value, min, max }
    }

    /// Step up by one unless already at `max`. Returns whether the value moved.
    pub fn increment(&mut self) -> bool {
        if self.value < self.max {
            self.value += 1;
            true
        } else {
            false
        }
    }

    /// Step down by one unless already at `min`. Returns whether the value moved.
    pub fn decrement(&mut self) -> bool {
        if self.value > self.min {
            self.value -= 1;
            true
        } else {
            false
        }
    }

    /// Decrease control is disabled exactly here.
    pub fn at_min(&self) -> bool {
        self.value == self.min
    }

    /// Increase control is disabled exactly here.
    pub fn at_max(&self) -> bool {
        self.value == self.max
    }

    pub fn classification(&self) -> Classification {
        classify(self.value, self.min, self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterAction {
    Increment,
    Decrement,
}

impl Reducible for CounterState {
    type Action = CounterAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = *self;
        let moved = match action {
            CounterAction::Increment => next.increment(),
            CounterAction::Decrement => next.decrement(),
        };
        if moved {
            debug!("{:?}: {} -> {}", action, self.value, next.value);
            Rc::new(next)
        } else {
            // Same Rc, so no re-render is scheduled.
            self
        }
    }
}

/// Presentational color category for the current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Classification {
    #[default]
    None,
    AtMin,
    AtMax,
    Special18,
    Special21,
}

impl Classification {
    /// CSS class applied to the number, empty for the default color.
    pub fn css_class(self) -> &'static str {
        match self {
            Classification::None => "",
            Classification::AtMin => "minColor",
            Classification::AtMax => "maxColor",
            Classification::Special18 => "color18",
            Classification::Special21 => "color21",
        }
    }
}

/// Classify `value` in priority order: 21, 18, min, max.
pub fn classify(value: i64, min: i64, max: i64) -> Classification {
    if value == SPECIAL_VALUE {
        Classification::Special21
    } else if value == HIGHLIGHT_VALUE {
        Classification::Special18
    } else if value == min {
        Classification::AtMin
    } else if value == max {
        Classification::AtMax
    } else {
        Classification::None
    }
}

/// Edge detector for the celebration: fires when the observed value becomes
/// `SPECIAL_VALUE` after being anything else (or nothing yet).
#[derive(Debug, Default)]
pub struct CelebrationEdge {
    last: Option<i64>,
}

impl CelebrationEdge {
    pub fn observe(&mut self, value: i64) -> bool {
        let fire = value == SPECIAL_VALUE && self.last != Some(SPECIAL_VALUE);
        self.last = Some(value);
        fire
    }
}

/// Problems with text supplied as counter configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NotANumber { field: String, text: String },
    NotAnInteger { field: String, text: String },
    InvalidJson(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotANumber { field, text } => {
                write!(f, "{} must be a valid number, got {:?}", field, text)
            }
            ConfigError::NotAnInteger { field, text } => {
                write!(f, "{} must be a whole number, got {:?}", field, text)
            }
            ConfigError::InvalidJson(msg) => write!(f, "Invalid counter config JSON: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
