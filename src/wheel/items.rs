//! Item list parsing
//!
//! Raw list text is kept verbatim in storage; every read goes through here.

use crate::settings::ItemSeparators;

/// Split raw text into trimmed, non-empty items, one per line
pub fn parse_items(raw: &str) -> Vec<String> {
    parse_items_with(raw, ItemSeparators::Lines)
}

/// Split raw text into trimmed, non-empty items
///
/// Order is preserved and duplicates are kept.
pub fn parse_items_with(raw: &str, separators: ItemSeparators) -> Vec<String> {
    let commas = separators == ItemSeparators::LinesAndCommas;

    raw.lines()
        .flat_map(|line| line.split(move |c: char| commas && c == ','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}
