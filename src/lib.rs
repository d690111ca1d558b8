/*!
 * # YTCM - YouTube Comment Timestamp Markers
 *
 * A Rust library for extracting timestamp references from video-page
 * comments and annotating a seek bar with tooltip-carrying markers.
 *
 * ## Features
 *
 * - Detect timestamp tokens in comment text (MM:SS and H:MM:SS)
 * - Resolve link-embedded times from `t`/`start` URL parameters
 *   (`1h2m3s` composite durations and bare second counts)
 * - Select the best-fit tooltip snippet when one comment carries
 *   several timestamps, using same-line adjacency as the deciding signal
 * - Duplicate-suppressing marker rendering boundary
 * - Idempotent per-comment processing across re-scans
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `time_utils`: Timestamp token and URL time-parameter parsing
 * - `comment_processor`: Comment model and the timestamp detector
 * - `snippet_selector`: Tooltip snippet selection
 * - `marker_renderer`: Seek-bar marker emission boundary
 * - `app_controller`: Scan orchestration and processed-once tracking
 * - `errors`: Custom error types for the engine
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod time_utils;
pub mod comment_processor;
pub mod snippet_selector;
pub mod marker_renderer;
pub mod app_controller;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::{Config, SelectionPolicy};
pub use app_controller::{emit_markers, CommentRecord, Controller};
pub use comment_processor::{detect_occurrences, Anchor, CommentSource, PlainComment, TimestampOccurrence};
pub use marker_renderer::{MarkerBoard, MarkerRecord, MarkerRequest};
pub use snippet_selector::select_snippet;
pub use time_utils::{format_timestamp, parse_time_param, parse_timestamp};
pub use errors::{AppError, MarkerError, SnippetError};
