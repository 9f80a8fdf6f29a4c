#![forbid(unsafe_code)]

//! Policy-as-data configuration for the drag engine.
//!
//! [`DragConfig`] captures every tunable of the engine (momentum, sampling,
//! settle motion) in one struct that can be loaded from TOML or JSON with the
//! `config-file` feature.
//!
//! ```toml
//! # plangrid.toml
//! momentum_factor = 0.05
//! max_axis_velocity = 1000.0
//!
//! [settle]
//! max_duration_ms = 350
//! ```
//!
//! ```rust,ignore
//! let config = DragConfig::from_toml_file("plangrid.toml")?;
//! ```
//!
//! # Defaults
//!
//! `DragConfig::default()` equals the component defaults in
//! `plangrid-core`, so an empty file changes nothing.

#[cfg(feature = "config-file")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "config-file")]
use serde::{Deserialize, Serialize};

use plangrid_core::animation::SettleConfig;
use plangrid_core::momentum::{
    DEFAULT_MAX_AXIS_VELOCITY, DEFAULT_MOMENTUM_FACTOR, MomentumProjector,
};
use plangrid_core::sampler::{DEFAULT_MIN_DT_MS, PointerSampler};

// ---------------------------------------------------------------------------
// DragConfig
// ---------------------------------------------------------------------------

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct DragConfig {
    /// Velocity (units/s) to projected displacement (units) scale.
    pub momentum_factor: f64,
    /// Per-axis velocity clamp before scaling (units/s).
    pub max_axis_velocity: f64,
    /// Floor for the interval between two pointer samples (ms).
    pub min_sample_dt_ms: f64,
    /// Settle and revert motion.
    pub settle: SettlePolicy,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            momentum_factor: DEFAULT_MOMENTUM_FACTOR,
            max_axis_velocity: DEFAULT_MAX_AXIS_VELOCITY,
            min_sample_dt_ms: DEFAULT_MIN_DT_MS,
            settle: SettlePolicy::default(),
        }
    }
}

/// Settle motion parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct SettlePolicy {
    pub stiffness: f64,
    pub damping: f64,
    /// Hard cap on settle/revert duration (ms). Zero settles instantly.
    pub max_duration_ms: u64,
    /// Scale of the lifted item while dragging.
    pub lift_scale: f64,
}

impl Default for SettlePolicy {
    fn default() -> Self {
        let base = SettleConfig::default();
        Self {
            stiffness: base.stiffness,
            damping: base.damping,
            max_duration_ms: base.max_duration.as_millis() as u64,
            lift_scale: base.lift_scale,
        }
    }
}

impl DragConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config-file")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.validated()
    }

    /// Serialize to a TOML string.
    #[cfg(feature = "config-file")]
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(ConfigError::TomlSerialize)
    }

    /// Return `self` if [`validate`](Self::validate) finds nothing.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Check all parameters are within acceptable ranges.
    ///
    /// An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.momentum_factor.is_finite() || self.momentum_factor < 0.0 {
            errors.push(format!(
                "momentum_factor must be finite and >= 0, got {}",
                self.momentum_factor
            ));
        }
        if !self.max_axis_velocity.is_finite() || self.max_axis_velocity < 0.0 {
            errors.push(format!(
                "max_axis_velocity must be finite and >= 0, got {}",
                self.max_axis_velocity
            ));
        }
        if !self.min_sample_dt_ms.is_finite() || self.min_sample_dt_ms <= 0.0 {
            errors.push(format!(
                "min_sample_dt_ms must be finite and > 0, got {}",
                self.min_sample_dt_ms
            ));
        }
        if !self.settle.stiffness.is_finite() || self.settle.stiffness <= 0.0 {
            errors.push(format!(
                "settle.stiffness must be finite and > 0, got {}",
                self.settle.stiffness
            ));
        }
        if !self.settle.damping.is_finite() || self.settle.damping < 0.0 {
            errors.push(format!(
                "settle.damping must be finite and >= 0, got {}",
                self.settle.damping
            ));
        }
        if !self.settle.lift_scale.is_finite() || self.settle.lift_scale <= 0.0 {
            errors.push(format!(
                "settle.lift_scale must be finite and > 0, got {}",
                self.settle.lift_scale
            ));
        }

        errors
    }

    /// Build a [`MomentumProjector`] from this config.
    #[must_use]
    pub fn to_projector(&self) -> MomentumProjector {
        MomentumProjector::new(self.momentum_factor).with_max_axis_velocity(self.max_axis_velocity)
    }

    /// Build an empty [`PointerSampler`] from this config.
    #[must_use]
    pub fn to_sampler(&self) -> PointerSampler {
        PointerSampler::with_min_dt_ms(self.min_sample_dt_ms)
    }

    /// Build a [`SettleConfig`] from this config.
    #[must_use]
    pub fn to_settle_config(&self) -> SettleConfig {
        SettleConfig {
            stiffness: self.settle.stiffness,
            damping: self.settle.damping,
            max_duration: Duration::from_millis(self.settle.max_duration_ms),
            lift_scale: self.settle.lift_scale,
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from loading or validating a [`DragConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config-file")]
    Toml(toml::de::Error),
    /// TOML serialization error.
    #[cfg(feature = "config-file")]
    TomlSerialize(toml::ser::Error),
    /// JSON parse error.
    #[cfg(feature = "config-file")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config-file")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config-file")]
            Self::TomlSerialize(e) => write!(f, "TOML serialize error: {e}"),
            #[cfg(feature = "config-file")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config-file")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config-file")]
            Self::TomlSerialize(e) => Some(e),
            #[cfg(feature = "config-file")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
