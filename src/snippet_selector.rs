use log::{debug, warn};
use crate::app_config::SelectionPolicy;
use crate::comment_processor::{CommentSource, TimestampOccurrence};

/// Snippet selection for timestamp tooltips
///
/// Given one occurrence within a comment that may contain several
/// timestamps, this module decides which fragment of the surrounding text
/// best describes it. The canonical policy looks at the nearest non-empty
/// line on each side of the anchor and uses same-line adjacency as the
/// deciding signal: a timestamp is usually typed immediately before or after
/// its description on one physical line.
/// Nearest non-empty line of a raw text span. `before` takes the last line
/// (closest to an anchor that follows the span), `after` takes the first.
fn nearest_line(snippet: &str, side: Side) -> String {
    let mut lines = snippet
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty());

    let line = match side {
        Side::Before => lines.last(),
        Side::After => lines.next(),
    };

    line.unwrap_or("").to_string()
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Before,
    After,
}

/// Whether the text immediately preceding the anchor, on the anchor's own
/// line, is non-empty.
fn has_same_line_text_before(raw_before: &str) -> bool {
    let segment = raw_before.rsplit('\n').next().unwrap_or("");
    !segment.trim().is_empty()
}

/// Whether the text immediately following the anchor, on the anchor's own
/// line, is non-empty.
fn has_same_line_text_after(raw_after: &str) -> bool {
    let segment = raw_after.split('\n').next().unwrap_or("");
    !segment.trim().is_empty()
}

/// Choose between the before/after candidate lines, with same-line adjacency
/// deciding first and `after` winning every tie.
fn pick_snippet(before_line: &str, after_line: &str, same_before: bool, same_after: bool) -> String {
    if same_after && !same_before {
        debug!("pick_snippet: choose after (same line)");
        return after_line.to_string();
    }
    if same_before && !same_after {
        debug!("pick_snippet: choose before (same line)");
        return before_line.to_string();
    }
    if same_before && same_after {
        // Same-line text on both sides: after wins
        debug!("pick_snippet: choose after (both same line)");
        return after_line.to_string();
    }

    // No same-line text at all: fall back to whichever nearest line exists
    if !after_line.is_empty() && before_line.is_empty() {
        debug!("pick_snippet: choose after (fallback, before empty)");
        return after_line.to_string();
    }
    if !before_line.is_empty() && after_line.is_empty() {
        debug!("pick_snippet: choose before (fallback, after empty)");
        return before_line.to_string();
    }

    debug!("pick_snippet: choose after (fallback)");
    after_line.to_string()
}

/// Select the tooltip text for one occurrence of a comment.
///
/// `occurrences` is the comment's full ordered occurrence list, `index` the
/// occurrence being described. Extraction failures and empty picks degrade
/// to the full trimmed comment text rather than failing the comment.
pub fn select_snippet<S: CommentSource + ?Sized>(
    source: &S,
    occurrences: &[TimestampOccurrence],
    index: usize,
    policy: SelectionPolicy,
) -> String {
    let full_text = source.text().trim().to_string();

    let Some(occurrence) = occurrences.get(index) else {
        return full_text;
    };

    // Bare-text occurrences have no position to scope by
    let Some(current) = occurrence.anchor else {
        return full_text;
    };

    let previous = index.checked_sub(1).and_then(|i| occurrences[i].anchor);
    let next = occurrences.get(index + 1).and_then(|o| o.anchor);

    let before_raw = match source.extract_between(previous, Some(current)) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Snippet extraction failed before anchor {}: {}", current, e);
            return full_text;
        }
    };
    let after_raw = match source.extract_between(Some(current), next) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Snippet extraction failed after anchor {}: {}", current, e);
            return full_text;
        }
    };

    let chosen = match policy {
        SelectionPolicy::LineProximity => {
            let before_line = nearest_line(&before_raw, Side::Before);
            let after_line = nearest_line(&after_raw, Side::After);
            let same_before = has_same_line_text_before(&before_raw);
            let same_after = has_same_line_text_after(&after_raw);

            pick_snippet(&before_line, &after_line, same_before, same_after)
        }
        // Legacy policy: everything from the anchor to the next one
        SelectionPolicy::AnchorBoundary => after_raw.trim().to_string(),
    };

    if chosen.is_empty() {
        full_text
    } else {
        chosen
    }
}
