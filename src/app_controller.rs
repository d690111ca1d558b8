use std::collections::HashSet;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use crate::app_config::{Config, SelectionPolicy};
use crate::comment_processor::{self, Anchor, CommentSource, PlainComment};
use crate::marker_renderer::{MarkerBoard, MarkerRecord, MarkerRequest};
use crate::snippet_selector;

// @module: Scan orchestration over a batch of comments

/// One comment as delivered by the host (or a JSON fixture), before anchors
/// are located in its text
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CommentRecord {
    /// Opaque comment identity, used for processed-once tracking
    pub id: String,

    /// Rendered plain-text content
    pub text: String,

    /// Embedded links in document order; when absent, timestamp tokens in
    /// the text are linkified automatically
    #[serde(default)]
    pub anchors: Vec<AnchorRecord>,
}

/// One link element inside a comment
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AnchorRecord {
    /// Visible label text
    pub label: String,

    /// Link target
    pub href: String,
}

/// Run the engine over one comment: detect occurrences, select a snippet
/// for each, and emit marker requests in document order.
pub fn emit_markers<S: CommentSource + ?Sized>(source: &S, policy: SelectionPolicy) -> Vec<MarkerRequest> {
    let occurrences = comment_processor::detect_occurrences(source);

    occurrences
        .iter()
        .enumerate()
        .map(|(index, occurrence)| {
            let tooltip = snippet_selector::select_snippet(source, &occurrences, index, policy);
            MarkerRequest {
                seconds: occurrence.seconds,
                tooltip,
                anchor: occurrence.anchor,
            }
        })
        .collect()
}

/// Scan controller: owns the configuration, the processed-comment identity
/// set, and the marker board for the current timeline.
///
/// Each comment is processed at most once per lifecycle; `reset` starts a
/// new lifecycle when the host navigates to another video.
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Identities of comments already processed this lifecycle
    processed: HashSet<String>,

    // @field: Seek-bar marker collaborator
    board: MarkerBoard,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test(duration_secs: f64) -> Result<Self> {
        Self::with_config(Config::default(), duration_secs)
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config, duration_secs: f64) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        let board = MarkerBoard::with_config(duration_secs, &config.marker);
        Ok(Self {
            config,
            processed: HashSet::new(),
            board,
        })
    }

    /// Markers rendered so far, in render order
    pub fn markers(&self) -> &[MarkerRecord] {
        self.board.markers()
    }

    /// Process one comment, rendering a marker per detected timestamp.
    ///
    /// Idempotent per comment id: a comment seen before in this lifecycle is
    /// skipped entirely. Returns the number of markers actually rendered.
    pub fn process_comment<S: CommentSource + ?Sized>(&mut self, id: &str, source: &S) -> Result<usize> {
        if !self.processed.insert(id.to_string()) {
            debug!("Comment {} already processed, skipping", id);
            return Ok(0);
        }

        let requests = emit_markers(source, self.config.selection_policy);
        if requests.is_empty() {
            // No timestamps is not an error
            return Ok(0);
        }

        let mut rendered = 0;
        for request in requests {
            debug!(
                "Timestamp found in comment {}: {}s, tooltip {:?}",
                id,
                request.seconds,
                truncate_preview(&request.tooltip)
            );
            if self.board.render(request)? {
                rendered += 1;
            }
        }

        Ok(rendered)
    }

    /// Scan a batch of comment records, e.g. everything visible at page
    /// load. Returns the total number of markers rendered.
    pub fn scan(&mut self, comments: &[CommentRecord]) -> Result<usize> {
        info!("Scanning {} comments", comments.len());

        let mut rendered = 0;
        for record in comments {
            let comment = Self::build_comment(record)?;
            rendered += self.process_comment(&record.id, &comment)?;
        }

        info!("Scan complete: {} markers rendered", rendered);
        Ok(rendered)
    }

    /// Start a new lifecycle for a new timeline: drop all markers and forget
    /// which comments were processed
    pub fn reset(&mut self, duration_secs: f64) {
        info!("Resetting scan state for new {:.0}s timeline", duration_secs);
        self.processed.clear();
        self.board = MarkerBoard::with_config(duration_secs, &self.config.marker);
    }

    /// Turn a comment record into a `PlainComment`, locating each declared
    /// anchor label in the text. Records without declared anchors get their
    /// timestamp tokens linkified automatically.
    fn build_comment(record: &CommentRecord) -> Result<PlainComment> {
        if record.anchors.is_empty() {
            return Ok(PlainComment::auto_anchor(record.text.clone()));
        }

        let mut anchors = Vec::with_capacity(record.anchors.len());
        let mut cursor = 0;
        for anchor in &record.anchors {
            match record.text[cursor..].find(&anchor.label) {
                Some(offset) if !anchor.label.is_empty() => {
                    let start = cursor + offset;
                    let end = start + anchor.label.len();
                    cursor = end;
                    anchors.push(Anchor::new(anchor.label.clone(), anchor.href.clone(), start..end));
                }
                _ => {
                    warn!(
                        "Anchor label {:?} not found in comment {}, dropping anchor",
                        anchor.label, record.id
                    );
                }
            }
        }

        PlainComment::with_anchors(record.text.clone(), anchors)
    }
}

/// First 50 characters of a tooltip for log output
fn truncate_preview(text: &str) -> &str {
    let mut end = text.len().min(50);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
