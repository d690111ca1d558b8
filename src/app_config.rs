use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the engine configuration including loading,
/// validating and saving configuration settings.
/// Represents the engine configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Snippet selection policy
    #[serde(default)]
    pub selection_policy: SelectionPolicy,

    /// Marker rendering settings
    #[serde(default)]
    pub marker: MarkerConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Snippet selection policy
///
/// Two variants of the selector exist: the richer same-line-aware policy is
/// current behavior, the plain next-anchor-boundary policy is kept for hosts
/// that depended on it.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    // @policy: Nearest non-empty line, same-line adjacency decides
    #[default]
    LineProximity,
    // @policy: Everything up to the next anchor
    AnchorBoundary,
}

impl SelectionPolicy {
    // @returns: Lowercase policy identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::LineProximity => "line_proximity".to_string(),
            Self::AnchorBoundary => "anchor_boundary".to_string(),
        }
    }
}

// Implement Display trait for SelectionPolicy
impl std::fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for SelectionPolicy
impl std::str::FromStr for SelectionPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "line_proximity" => Ok(Self::LineProximity),
            "anchor_boundary" => Ok(Self::AnchorBoundary),
            _ => Err(anyhow!("Invalid selection policy: {}", s)),
        }
    }
}

/// Marker rendering settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MarkerConfig {
    /// Duplicate suppression window, in percent of the timeline. Two markers
    /// closer together than this render as one.
    #[serde(default = "default_dedup_threshold_percent")]
    pub dedup_threshold_percent: f64,

    /// Maximum tooltip length in characters, 0 for unlimited
    #[serde(default)]
    pub max_tooltip_chars: usize,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            dedup_threshold_percent: default_dedup_threshold_percent(),
            max_tooltip_chars: 0,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_dedup_threshold_percent() -> f64 {
    // Markers within 0.2% of the seek bar are indistinguishable
    0.2
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if !self.marker.dedup_threshold_percent.is_finite() || self.marker.dedup_threshold_percent < 0.0 {
            return Err(anyhow!(
                "Marker dedup threshold must be a non-negative percentage, got {}",
                self.marker.dedup_threshold_percent
            ));
        }
        if self.marker.dedup_threshold_percent > 100.0 {
            return Err(anyhow!(
                "Marker dedup threshold above 100% would suppress every marker"
            ));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            selection_policy: SelectionPolicy::default(),
            marker: MarkerConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
