use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Time utilities for comment timestamp handling
///
/// This module provides functions for locating timestamp tokens in comment
/// text, converting the two time encodings found in the wild (MM:SS / H:MM:SS
/// literals and YouTube-style `t`/`start` URL parameters) to seconds, and
/// formatting seconds back to a timestamp literal.
// @const: Timestamp token regex - matches 00:12, 1:23 and 1:23:45 bounded by whitespace or string edges
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|\s)(\d{1,2}:\d{2}(?::\d{2})?)(?:\s|$)").unwrap()
});

// @const: Composite URL time parameter regex - 1h2m3s style, or a bare second count
static TIME_PARAM_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?:([0-9]+)h)?(?:([0-9]+)m)?(?:([0-9]+)s)?|([0-9]+))$").unwrap()
});

// Relative hrefs in comment markup (e.g. "/watch?v=...&t=90") resolve against
// the watch page origin.
static WATCH_BASE_URL: Lazy<Url> = Lazy::new(|| {
    Url::parse("https://www.youtube.com/").unwrap()
});

/// Parse a timestamp literal like "1:23" or "1:02:03" to seconds.
///
/// Two numeric components are read as MM:SS, three as H:MM:SS. A component
/// that fails to parse as a number, or any other component count, yields
/// `None` rather than an error - malformed candidates are simply dropped.
pub fn parse_timestamp(ts: &str) -> Option<u64> {
    if ts.is_empty() {
        return None;
    }

    let mut parts = Vec::new();
    for part in ts.split(':') {
        parts.push(part.trim().parse::<u64>().ok()?);
    }

    match parts.as_slice() {
        // MM:SS
        [minutes, seconds] => Some(minutes * 60 + seconds),
        // H:MM:SS
        [hours, minutes, seconds] => Some(hours * 3600 + minutes * 60 + seconds),
        _ => None,
    }
}

/// Parse a YouTube `t`/`start` URL parameter value to seconds.
///
/// Accepts the composite duration form (`1h2m3s`, each segment optional but
/// in fixed order) and the bare-integer form (`123`). Anything else,
/// including an empty value, yields `None`.
pub fn parse_time_param(value: &str) -> Option<u64> {
    if value.is_empty() {
        return None;
    }

    let caps = TIME_PARAM_REGEX.captures(value)?;

    // Bare integer of seconds
    if let Some(raw) = caps.get(4) {
        return raw.as_str().parse::<u64>().ok();
    }

    let hours: u64 = caps.get(1).map_or(Some(0), |m| m.as_str().parse().ok())?;
    let minutes: u64 = caps.get(2).map_or(Some(0), |m| m.as_str().parse().ok())?;
    let seconds: u64 = caps.get(3).map_or(Some(0), |m| m.as_str().parse().ok())?;

    Some(hours * 3600 + minutes * 60 + seconds)
}

/// Find the first timestamp token in a block of text.
///
/// Returns the token's byte span and parsed seconds. The token pattern is
/// strict (two-digit minutes), so "12:3" is not a token even though
/// `parse_timestamp` would accept it when handed the string directly.
pub fn find_timestamp_token(text: &str) -> Option<(std::ops::Range<usize>, u64)> {
    let caps = TIMESTAMP_REGEX.captures(text)?;
    let token = caps.get(1)?;
    let seconds = parse_timestamp(token.as_str())?;
    Some((token.range(), seconds))
}

/// Find every timestamp token in a block of text, in order.
///
/// The search resumes right after each token so that tokens separated by a
/// single whitespace character are all found (the boundary character is
/// shared between neighbours).
pub fn find_all_timestamp_tokens(text: &str) -> Vec<(std::ops::Range<usize>, u64)> {
    let mut found = Vec::new();
    let mut offset = 0;

    while let Some((range, seconds)) = find_timestamp_token(&text[offset..]) {
        let absolute = (offset + range.start)..(offset + range.end);
        offset = absolute.end;
        found.push((absolute, seconds));
    }

    found
}

/// Check whether a string is exactly one timestamp token (ignoring
/// surrounding whitespace) and parse it.
pub fn parse_timestamp_token(label: &str) -> Option<u64> {
    let caps = TIMESTAMP_REGEX.captures(label)?;
    let token = caps.get(1)?;
    parse_timestamp(token.as_str())
}

fn parse_href(href: &str) -> Option<Url> {
    Url::parse(href).or_else(|_| WATCH_BASE_URL.join(href)).ok()
}

/// First `t` value when non-empty, otherwise the first non-empty `start`
/// value. A non-empty but malformed `t` still shadows `start`.
fn time_param_value(url: &Url) -> Option<String> {
    let first = |name: &str| {
        url.query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    };

    first("t")
        .filter(|value| !value.is_empty())
        .or_else(|| first("start").filter(|value| !value.is_empty()))
}

/// Extract seconds from a link target's `t` or `start` query parameter,
/// with `t` taking precedence.
///
/// The href may be absolute or relative to the watch page. URL parse
/// failures and missing/malformed parameters all yield `None`.
pub fn time_param_from_link(href: &str) -> Option<u64> {
    let url = parse_href(href)?;
    let value = time_param_value(&url)?;
    parse_time_param(&value)
}

/// Check whether a link target carries a `t`/`start` query parameter at all,
/// regardless of whether its value parses.
pub fn link_has_time_param(href: &str) -> bool {
    let Some(url) = parse_href(href) else {
        return false;
    };

    url.query_pairs().any(|(key, _)| key == "t" || key == "start")
}

/// Format seconds as a timestamp literal, MM:SS below one hour and H:MM:SS
/// from one hour up. Round-trips through `parse_timestamp`.
pub fn format_timestamp(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}
