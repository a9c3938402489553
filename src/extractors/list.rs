// src/extractors/list.rs

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum number of items returned for one list field.
pub const MAX_LIST_ITEMS: usize = 10;

/// Lines shorter than this (in chars) are dropped by the line-split fallback.
const MIN_ITEM_CHARS: usize = 6;

// Structural patterns tried in order; the first one with at least one match
// wins. Hyphen bullets, numbered lines, then their line-anchored variants.
static LIST_ITEM_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?m)-\s*(.+?)\s*$",
        r"(?m)\d+\.\s*(.+?)\s*$",
        r"(?m)^\s*-\s*(.+?)\s*$",
        r"(?m)^\s*\d+\.\s*(.+?)\s*$",
    ]
    .iter()
    .filter_map(|pat| Regex::new(pat).ok())
    .collect()
});

// Leading bullet/enumeration noise stripped in the fallback path.
static ITEM_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-\d.\s]+").expect("Failed to compile ITEM_PREFIX_RE"));

/// Extracts an ordered, deduplicated list of items from a section body.
///
/// Structural bullet/number patterns are tried first; if none match, the
/// text is split into lines, short lines are discarded, and leading
/// hyphen/numeral prefixes are stripped. Items keep first-seen order and
/// the result is capped at MAX_LIST_ITEMS.
pub fn extract_list_items(text: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();

    for re in LIST_ITEM_RES.iter() {
        let matched: Vec<String> = re
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|item| !item.is_empty())
            .collect();
        if !matched.is_empty() {
            items = matched;
            break;
        }
    }

    // No structural pattern matched: fall back to plain lines.
    if items.is_empty() {
        for line in text.lines() {
            let line = line.trim();
            if line.chars().count() < MIN_ITEM_CHARS {
                continue;
            }
            let stripped = ITEM_PREFIX_RE.replace(line, "");
            if !stripped.is_empty() {
                items.push(stripped.trim().to_string());
            }
        }
    }

    dedup_preserving_order(items)
}

fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();
    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
        if unique.len() == MAX_LIST_ITEMS {
            break;
        }
    }
    unique
}
