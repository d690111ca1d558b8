use std::fmt;
use log::debug;
use crate::app_config::MarkerConfig;
use crate::errors::MarkerError;
use crate::time_utils;

// @module: Seek-bar marker emission boundary

// @struct: Marker request emitted by the engine for one occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerRequest {
    // @field: Seek position in seconds
    pub seconds: u64,

    // @field: Tooltip text chosen by the snippet selector
    pub tooltip: String,

    // @field: Source anchor index, None for bare-text detections
    pub anchor: Option<usize>,
}

// @struct: Marker placed on the timeline
#[derive(Debug, Clone)]
pub struct MarkerRecord {
    // @field: Position on the seek bar, percent of the timeline
    pub position_percent: f64,

    // @field: Tooltip text
    pub tooltip: String,

    // @field: Source anchor index
    pub anchor: Option<usize>,
}

/// Thin stand-in for the seek-bar rendering collaborator.
///
/// Owns the duplicate-suppression policy: two markers whose positions are
/// within the dedup window (0.2 % of the timeline by default) are treated as
/// the same marker and the second one is dropped. The engine itself never
/// dedups occurrences.
#[derive(Debug)]
pub struct MarkerBoard {
    duration_secs: f64,
    dedup_threshold_percent: f64,
    max_tooltip_chars: usize,
    markers: Vec<MarkerRecord>,
}

impl MarkerBoard {
    /// Create a board for a timeline of the given duration, with default limits
    pub fn new(duration_secs: f64) -> Self {
        Self::with_config(duration_secs, &MarkerConfig::default())
    }

    /// Create a board with configured dedup window and tooltip length cap
    pub fn with_config(duration_secs: f64, config: &MarkerConfig) -> Self {
        MarkerBoard {
            duration_secs,
            dedup_threshold_percent: config.dedup_threshold_percent,
            max_tooltip_chars: config.max_tooltip_chars,
            markers: Vec::new(),
        }
    }

    /// Render one marker request onto the board.
    ///
    /// Returns `Ok(true)` when a marker was placed, `Ok(false)` when the
    /// request was skipped (past the end of the timeline, or a duplicate of
    /// an existing marker). A missing or zero duration is the only error.
    pub fn render(&mut self, request: MarkerRequest) -> Result<bool, MarkerError> {
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(MarkerError::MissingDuration);
        }

        let seconds = request.seconds as f64;
        if seconds > self.duration_secs {
            debug!(
                "Marker at {} skipped: past timeline end ({:.0}s)",
                time_utils::format_timestamp(request.seconds),
                self.duration_secs
            );
            return Ok(false);
        }

        let percent = (seconds / self.duration_secs) * 100.0;

        // Markers within the dedup window count as the same position
        let duplicate = self
            .markers
            .iter()
            .any(|existing| (existing.position_percent - percent).abs() < self.dedup_threshold_percent);
        if duplicate {
            debug!("Marker at {:.2}% skipped: duplicate position", percent);
            return Ok(false);
        }

        let tooltip = if self.max_tooltip_chars > 0 {
            request.tooltip.chars().take(self.max_tooltip_chars).collect()
        } else {
            request.tooltip
        };

        debug!(
            "Marker added at {:.2}% ({}): {:?}",
            percent,
            time_utils::format_timestamp(request.seconds),
            tooltip
        );

        self.markers.push(MarkerRecord {
            position_percent: percent,
            tooltip,
            anchor: request.anchor,
        });

        Ok(true)
    }

    /// Markers placed so far, in render order
    pub fn markers(&self) -> &[MarkerRecord] {
        &self.markers
    }

    /// Number of markers on the board
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Whether the board holds no markers
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Remove all markers, e.g. when the host navigates to a new video
    pub fn clear(&mut self) {
        self.markers.clear();
    }
}

impl fmt::Display for MarkerBoard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Marker board ({:.0}s timeline, {} markers)", self.duration_secs, self.markers.len())?;
        for marker in &self.markers {
            writeln!(f, "  {:6.2}%  {}", marker.position_percent, marker.tooltip)?;
        }
        Ok(())
    }
}
