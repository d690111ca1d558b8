/*!
 * Error types for the ytcm engine.
 *
 * This module contains custom error types for different parts of the engine,
 * using the thiserror crate for ergonomic error definitions.
 *
 * Parse failures for individual timestamp candidates are deliberately NOT
 * errors - they are `Option::None` results that drop the candidate and let
 * processing continue. The enums here cover the few conditions that cross a
 * component boundary.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur while extracting snippet text around an anchor
#[derive(Error, Debug)]
pub enum SnippetError {
    /// The anchor index does not exist in the comment's anchor list
    #[error("Anchor index {0} is out of bounds")]
    AnchorOutOfBounds(usize),

    /// The requested text range is malformed (reversed or off a character boundary)
    #[error("Invalid text range: {0}")]
    InvalidRange(String),
}

/// Errors that can occur when rendering markers onto a timeline
#[derive(Error, Debug)]
pub enum MarkerError {
    /// The timeline has no usable duration, so positions cannot be computed
    #[error("Timeline duration is missing or zero")]
    MissingDuration,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from configuration handling
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from snippet extraction
    #[error("Snippet error: {0}")]
    Snippet(#[from] SnippetError),

    /// Error from marker rendering
    #[error("Marker error: {0}")]
    Marker(#[from] MarkerError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
