use std::fmt;
use std::ops::Range;
use anyhow::{Result, anyhow};
use log::debug;
use crate::errors::SnippetError;
use crate::time_utils;

// @module: Comment model and timestamp detection

// @struct: Hyperlink embedded in a comment
#[derive(Debug, Clone)]
pub struct Anchor {
    // @field: Visible label text
    pub label: String,

    // @field: Link target (absolute or watch-page relative)
    pub link_target: String,

    // @field: Byte span of the label within the comment text
    pub span: Range<usize>,
}

impl Anchor {
    /// Creates a new anchor - span validity is checked when the anchor is
    /// attached to a comment
    pub fn new(label: impl Into<String>, link_target: impl Into<String>, span: Range<usize>) -> Self {
        Anchor {
            label: label.into(),
            link_target: link_target.into(),
            span,
        }
    }

    /// Resolve this anchor's seconds value. The visible label is tried first
    /// as a timestamp token; when that fails or is absent, the link target's
    /// `t`/`start` parameter is consulted.
    pub fn seconds(&self) -> Option<u64> {
        time_utils::parse_timestamp_token(&self.label)
            .or_else(|| time_utils::time_param_from_link(&self.link_target))
    }

    /// Whether this anchor is a timestamp candidate at all: either its label
    /// looks like a timestamp or its link target carries a time parameter.
    pub fn qualifies(&self) -> bool {
        time_utils::parse_timestamp_token(&self.label).is_some()
            || time_utils::link_has_time_param(&self.link_target)
    }
}

// @struct: One detected timestamp within a comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampOccurrence {
    // @field: Parsed seconds (non-negative by construction)
    pub seconds: u64,

    // @field: Index of the source anchor, None for bare-text detection
    pub anchor: Option<usize>,
}

impl fmt::Display for TimestampOccurrence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.anchor {
            Some(index) => write!(f, "{} (anchor {})", time_utils::format_timestamp(self.seconds), index),
            None => write!(f, "{} (bare text)", time_utils::format_timestamp(self.seconds)),
        }
    }
}

/// Capability a comment host must provide to the engine: the rendered text,
/// the embedded links in document order, and raw-text extraction between two
/// anchor boundaries.
pub trait CommentSource {
    /// Rendered plain-text content of the comment
    fn text(&self) -> &str;

    /// Link elements found within the comment, in document order
    fn anchors(&self) -> &[Anchor];

    /// Raw text strictly between two anchors (both exclusive). `None` for
    /// the start means the comment beginning, `None` for the end means the
    /// comment end.
    fn extract_between(&self, start: Option<usize>, end: Option<usize>) -> Result<String, SnippetError>;
}

/// Comment backed by a plain string, with anchors located by byte span.
///
/// This is the concrete source used by the CLI and tests; a browser host
/// would implement `CommentSource` over live DOM ranges instead.
#[derive(Debug, Clone)]
pub struct PlainComment {
    text: String,
    anchors: Vec<Anchor>,
}

impl PlainComment {
    /// Create a comment with no embedded links
    pub fn new(text: impl Into<String>) -> Self {
        PlainComment {
            text: text.into(),
            anchors: Vec::new(),
        }
    }

    // @creates: Validated comment with explicit anchors
    // @validates: Spans in bounds, on character boundaries, ascending
    pub fn with_anchors(text: impl Into<String>, anchors: Vec<Anchor>) -> Result<Self> {
        let text = text.into();

        let mut previous_end = 0;
        for anchor in &anchors {
            if anchor.span.start > anchor.span.end || anchor.span.end > text.len() {
                return Err(anyhow!(
                    "Anchor span {}..{} is out of bounds for comment of {} bytes",
                    anchor.span.start, anchor.span.end, text.len()
                ));
            }
            if !text.is_char_boundary(anchor.span.start) || !text.is_char_boundary(anchor.span.end) {
                return Err(anyhow!(
                    "Anchor span {}..{} is not on a character boundary",
                    anchor.span.start, anchor.span.end
                ));
            }
            if anchor.span.start < previous_end {
                return Err(anyhow!("Anchor spans must be in document order and non-overlapping"));
            }
            previous_end = anchor.span.end;
        }

        Ok(PlainComment { text, anchors })
    }

    /// Build a comment from plain text, turning every timestamp token into
    /// an anchor the way the watch page linkifies them.
    pub fn auto_anchor(text: impl Into<String>) -> Self {
        let text = text.into();

        let anchors = time_utils::find_all_timestamp_tokens(&text)
            .into_iter()
            .map(|(span, seconds)| {
                let label = text[span.clone()].to_string();
                let link_target = format!("/watch?t={}s", seconds);
                Anchor::new(label, link_target, span)
            })
            .collect();

        PlainComment { text, anchors }
    }

    fn anchor_span(&self, index: usize) -> Result<&Range<usize>, SnippetError> {
        self.anchors
            .get(index)
            .map(|anchor| &anchor.span)
            .ok_or(SnippetError::AnchorOutOfBounds(index))
    }
}

impl CommentSource for PlainComment {
    fn text(&self) -> &str {
        &self.text
    }

    fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    fn extract_between(&self, start: Option<usize>, end: Option<usize>) -> Result<String, SnippetError> {
        let from = match start {
            Some(index) => self.anchor_span(index)?.end,
            None => 0,
        };
        let to = match end {
            Some(index) => self.anchor_span(index)?.start,
            None => self.text.len(),
        };

        if from > to {
            return Err(SnippetError::InvalidRange(format!("{}..{}", from, to)));
        }

        Ok(self.text[from..to].to_string())
    }
}

/// Detect every timestamp occurrence in a comment, in document order.
///
/// Anchor mode runs when at least one anchor qualifies: each qualifying
/// anchor resolves its seconds (label first, then URL parameter) or is
/// silently excluded. When no anchor qualifies, bare-text mode applies the
/// token pattern once against the full text - first match wins and the
/// occurrence carries no anchor.
pub fn detect_occurrences<S: CommentSource + ?Sized>(source: &S) -> Vec<TimestampOccurrence> {
    let mut occurrences = Vec::new();
    let mut any_qualified = false;

    for (index, anchor) in source.anchors().iter().enumerate() {
        if !anchor.qualifies() {
            continue;
        }
        any_qualified = true;

        match anchor.seconds() {
            Some(seconds) => {
                debug!("Anchor {} resolved to {}s (label: {:?})", index, seconds, anchor.label);
                occurrences.push(TimestampOccurrence { seconds, anchor: Some(index) });
            }
            None => {
                // Qualified via a t/start parameter that turned out malformed
                debug!("Anchor {} excluded: no parseable time value", index);
            }
        }
    }

    if !any_qualified {
        if let Some((_, seconds)) = time_utils::find_timestamp_token(source.text()) {
            debug!("Bare-text timestamp found: {}s", seconds);
            occurrences.push(TimestampOccurrence { seconds, anchor: None });
        }
    }

    occurrences
}
