use std::path::PathBuf;

use thiserror::Error;

use crate::stepwise::{CarType, WheelRange};

// =============================================================================
// Validation errors raised while building
// =============================================================================

/// Rejection of a wizard step whose legal values depend on an earlier choice.
///
/// The in-progress value is dropped together with the stage that failed, so
/// the caller restarts from the first step.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Wheel size {size} is not allowed for {car_type} (allowed: {allowed})")]
    WheelSize {
        car_type: CarType,
        size: u32,
        allowed: WheelRange,
    },

    #[error("No wheel size rule configured for {car_type} (requested size {size})")]
    NoRule { car_type: CarType, size: u32 },
}

impl ValidationError {
    pub fn wheel_size(car_type: CarType, size: u32, allowed: WheelRange) -> Self {
        Self::WheelSize {
            car_type,
            size,
            allowed,
        }
    }

    pub fn no_rule(car_type: CarType, size: u32) -> Self {
        Self::NoRule { car_type, size }
    }

    /// The car type whose rule rejected the value.
    pub fn car_type(&self) -> CarType {
        match self {
            Self::WheelSize { car_type, .. } | Self::NoRule { car_type, .. } => *car_type,
        }
    }
}

// =============================================================================
// Rule table loading errors
// =============================================================================

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read rule file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse rule table: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Unknown car type '{name}' in rule table")]
    UnknownCarType { name: String },

    #[error("Wheel size range for {car_type} is inverted (min: {min}, max: {max})")]
    InvertedRange { car_type: CarType, min: u32, max: u32 },

    #[error("Missing wheel size rule for {car_type}")]
    MissingRule { car_type: CarType },

    #[error("Wheel size rule for {car_type} is given more than once")]
    DuplicateRule { car_type: CarType },
}
