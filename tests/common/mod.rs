#![allow(dead_code)]

use vitae_pdf::{Assets, Resume, render};

/// Build a resume straight from a JSON value.
pub fn resume(value: serde_json::Value) -> Resume {
    Resume::from_json(&value.to_string()).expect("valid resume document")
}

/// Render with no artwork on disk, so tests never depend on asset files.
pub fn render_bytes(resume: &Resume, show_contact: bool) -> Vec<u8> {
    render(resume, show_contact, &Assets::default()).expect("render")
}

pub fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

pub fn contains(haystack: &[u8], needle: &str) -> bool {
    find(haystack, needle.as_bytes()).is_some()
}

/// Position of `needle`, panicking with context when absent.
pub fn position(haystack: &[u8], needle: &str) -> usize {
    find(haystack, needle.as_bytes()).unwrap_or_else(|| panic!("missing {needle:?} in output"))
}

/// The page content streams in page order. pdf-writer emits them
/// uncompressed, so text drawn with `Str` shows up as literal parenthesized
/// strings inside.
pub fn content_streams(bytes: &[u8]) -> Vec<Vec<u8>> {
    let mut streams = Vec::new();
    let mut i = 0;
    while let Some(pos) = find(&bytes[i..], b"stream\n") {
        let abs = i + pos;
        // Skip matches inside the "endstream" keyword.
        if abs >= 3 && &bytes[abs - 3..abs] == b"end" {
            i = abs + "stream\n".len();
            continue;
        }
        let body_start = abs + "stream\n".len();
        let Some(end) = find(&bytes[body_start..], b"endstream") else {
            break;
        };
        streams.push(bytes[body_start..body_start + end].to_vec());
        i = body_start + end + "endstream".len();
    }
    streams
}

/// Non-overlapping occurrences of `needle`.
pub fn count(haystack: &[u8], needle: &str) -> usize {
    let mut total = 0;
    let mut i = 0;
    while let Some(pos) = find(&haystack[i..], needle.as_bytes()) {
        total += 1;
        i += pos + needle.len();
    }
    total
}

/// Page count via the per-page /Parent entry.
pub fn page_count(bytes: &[u8]) -> usize {
    let mut count = 0;
    let mut i = 0;
    while let Some(pos) = find(&bytes[i..], b"/Parent") {
        count += 1;
        i += pos + "/Parent".len();
    }
    count
}

/// How many of the given streams contain `needle`.
pub fn streams_containing(streams: &[Vec<u8>], needle: &str) -> Vec<usize> {
    streams
        .iter()
        .enumerate()
        .filter(|(_, s)| contains(s, needle))
        .map(|(i, _)| i)
        .collect()
}
