/*!
 * Tests for the comment model and timestamp detector
 */

use ytcm::comment_processor::{detect_occurrences, Anchor, CommentSource, PlainComment};
use ytcm::errors::SnippetError;
use crate::common;

/// Test anchor seconds resolution precedence
#[test]
fn test_anchor_seconds_withTimestampLabel_shouldPreferLabelOverUrl() {
    let anchor = Anchor::new("1:23", "/watch?v=abc&t=999", 0..4);
    assert_eq!(anchor.seconds(), Some(83));
}

#[test]
fn test_anchor_seconds_withPlainLabel_shouldFallBackToUrlParam() {
    let anchor = Anchor::new("this moment", "/watch?v=abc&t=90", 0..11);
    assert_eq!(anchor.seconds(), Some(90));
}

#[test]
fn test_anchor_seconds_withNeitherEncoding_shouldYieldNone() {
    let anchor = Anchor::new("channel link", "https://example.com/about", 0..12);
    assert_eq!(anchor.seconds(), None);
    assert!(!anchor.qualifies());
}

/// Test detection over anchored comments
#[test]
fn test_detect_occurrences_withMultipleAnchors_shouldKeepDocumentOrder() {
    let comment = common::linkified_comment("1:23 intro\n1:45 the drop\n1:02:03 finale");
    let occurrences = detect_occurrences(&comment);

    let seconds: Vec<u64> = occurrences.iter().map(|o| o.seconds).collect();
    assert_eq!(seconds, vec![83, 105, 3723]);

    let anchors: Vec<Option<usize>> = occurrences.iter().map(|o| o.anchor).collect();
    assert_eq!(anchors, vec![Some(0), Some(1), Some(2)]);
}

#[test]
fn test_detect_occurrences_withUrlOnlyAnchor_shouldUseTimeParam() {
    let comment = common::comment_with_links(
        "the best part is this moment right here",
        &[("this moment", "https://www.youtube.com/watch?v=abc&t=90")],
    );

    let occurrences = detect_occurrences(&comment);
    assert_eq!(occurrences.len(), 1);
    assert_eq!(occurrences[0].seconds, 90);
    assert_eq!(occurrences[0].anchor, Some(0));
}

#[test]
fn test_detect_occurrences_withOneBadAnchor_shouldKeepTheOthers() {
    // Middle anchor qualifies via t= but its value is malformed
    let comment = common::comment_with_links(
        "first 1:23 then broken then 2:34 last",
        &[
            ("1:23", "/watch?v=abc&t=83s"),
            ("broken", "/watch?v=abc&t=xyz"),
            ("2:34", "/watch?v=abc&t=154s"),
        ],
    );

    let occurrences = detect_occurrences(&comment);
    let seconds: Vec<u64> = occurrences.iter().map(|o| o.seconds).collect();
    assert_eq!(seconds, vec![83, 154]);
    assert_eq!(occurrences[1].anchor, Some(2));
}

/// Test bare-text fallback mode
#[test]
fn test_detect_occurrences_withNoAnchors_shouldMatchFirstBareToken() {
    let comment = PlainComment::new("great moment at 1:23 and again at 2:34");
    let occurrences = detect_occurrences(&comment);

    assert_eq!(occurrences.len(), 1);
    assert_eq!(occurrences[0].seconds, 83);
    assert_eq!(occurrences[0].anchor, None);
}

#[test]
fn test_detect_occurrences_withQualifyingButUnparseableAnchor_shouldNotFallBackToText() {
    // The anchor qualifies (t= present), so bare-text mode stays off even
    // though the text holds a token
    let comment = common::comment_with_links(
        "see 5:00 for the broken link",
        &[("broken link", "/watch?t=zzz")],
    );

    assert!(detect_occurrences(&comment).is_empty());
}

#[test]
fn test_detect_occurrences_withNoTimestampsAtAll_shouldYieldNothing() {
    let comment = PlainComment::new("nice video, loved the editing");
    assert!(detect_occurrences(&comment).is_empty());
}

/// Test anchor span validation
#[test]
fn test_with_anchors_withOutOfBoundsSpan_shouldFail() {
    let result = PlainComment::with_anchors("short", vec![Anchor::new("1:23", "/watch?t=83", 2..40)]);
    assert!(result.is_err());
}

#[test]
fn test_with_anchors_withOverlappingSpans_shouldFail() {
    let result = PlainComment::with_anchors(
        "1:23 1:45",
        vec![
            Anchor::new("1:23", "/watch?t=83", 0..4),
            Anchor::new("1:45", "/watch?t=105", 2..9),
        ],
    );
    assert!(result.is_err());
}

/// Test the text extraction capability
#[test]
fn test_extract_between_withAnchorBounds_shouldReturnExclusiveSpans() {
    let comment = common::linkified_comment("before 1:23 middle 1:45 after");

    assert_eq!(comment.extract_between(None, Some(0)).unwrap(), "before ");
    assert_eq!(comment.extract_between(Some(0), Some(1)).unwrap(), " middle ");
    assert_eq!(comment.extract_between(Some(1), None).unwrap(), " after");
    assert_eq!(comment.extract_between(None, None).unwrap(), "before 1:23 middle 1:45 after");
}

#[test]
fn test_extract_between_withUnknownAnchor_shouldFail() {
    let comment = common::linkified_comment("only 1:23 here");
    let result = comment.extract_between(Some(5), None);

    assert!(matches!(result, Err(SnippetError::AnchorOutOfBounds(5))));
}
