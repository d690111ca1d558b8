/*!
 * Common test utilities for the ytcm test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use tempfile::TempDir;
use ytcm::app_controller::{AnchorRecord, CommentRecord};
use ytcm::{Anchor, PlainComment};

/// Initializes logging for tests that want log output; safe to call more
/// than once
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Builds a comment whose timestamp tokens are linkified, the way the watch
/// page renders them
pub fn linkified_comment(text: &str) -> PlainComment {
    PlainComment::auto_anchor(text)
}

/// Builds a comment with explicit anchors, locating each label in the text
/// left to right
pub fn comment_with_links(text: &str, links: &[(&str, &str)]) -> PlainComment {
    let mut anchors = Vec::new();
    let mut cursor = 0;

    for (label, href) in links {
        let offset = text[cursor..]
            .find(label)
            .unwrap_or_else(|| panic!("label {:?} not found in test comment", label));
        let start = cursor + offset;
        let end = start + label.len();
        cursor = end;
        anchors.push(Anchor::new(*label, *href, start..end));
    }

    PlainComment::with_anchors(text, anchors).expect("valid test anchors")
}

/// Builds a comment record for batch-scan tests
pub fn comment_record(id: &str, text: &str) -> CommentRecord {
    CommentRecord {
        id: id.to_string(),
        text: text.to_string(),
        anchors: Vec::new(),
    }
}

/// Builds a comment record with explicit anchor declarations
pub fn comment_record_with_links(id: &str, text: &str, links: &[(&str, &str)]) -> CommentRecord {
    CommentRecord {
        id: id.to_string(),
        text: text.to_string(),
        anchors: links
            .iter()
            .map(|(label, href)| AnchorRecord {
                label: label.to_string(),
                href: href.to_string(),
            })
            .collect(),
    }
}
