//! Reconstruct message text around cleaned URLs.
//!
//! Literal URLs are spliced in place. Masked links cannot be, because the
//! body only shows their label, so their cleaned targets are appended as a
//! trailing list instead.

use std::collections::HashMap;
use std::ops::Range;

use crate::clean::clean_url;
use crate::extract::ExtractedUrl;

/// Separator and label in front of the cleaned masked-link list.
pub const CLEANED_LINKS_HEADER: &str = "\n\nCleaned links:\n";

/// Original URL text → cleaned URL, holding only entries that changed.
pub type CleanedMapping<'a> = HashMap<&'a str, String>;

/// Clean every extracted URL once and keep the ones that changed.
pub fn cleaned_mapping<'a>(urls: &[ExtractedUrl<'a>]) -> CleanedMapping<'a> {
    let mut mapping = CleanedMapping::new();
    for extracted in urls {
        if mapping.contains_key(extracted.url) {
            continue;
        }
        let cleaned = clean_url(extracted.url);
        if cleaned != extracted.url {
            mapping.insert(extracted.url, cleaned);
        }
    }
    mapping
}

/// Message text after cleaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rebuilt {
    /// Original text with literal URLs replaced in place.
    pub body: String,
    /// Cleaned masked-link targets, in entity order.
    pub appended: Vec<String>,
}

impl Rebuilt {
    /// Body followed by the cleaned-links block, if there is one.
    pub fn render(&self) -> String {
        if self.appended.is_empty() {
            return self.body.clone();
        }
        format!("{}{}{}", self.body, CLEANED_LINKS_HEADER, self.appended.join("\n"))
    }
}

/// Apply `mapping` to `text`.
///
/// Returns `None` when nothing visibly changed: no splice altered the body
/// and no masked link needs appending. This is the one place the pipeline
/// decides whether there is anything worth posting.
pub fn rebuild(text: &str, urls: &[ExtractedUrl<'_>], mapping: &CleanedMapping<'_>) -> Option<Rebuilt> {
    let mut splices: Vec<(Range<usize>, &str)> = urls
        .iter()
        .filter(|u| u.is_literal())
        .filter_map(|u| {
            mapping
                .get(u.url)
                .map(|cleaned| (u.entity.range(), cleaned.as_str()))
        })
        .collect();

    // Right to left, so earlier offsets stay valid after each splice.
    splices.sort_by(|a, b| b.0.start.cmp(&a.0.start));

    let mut body = text.to_string();
    let mut floor = text.len();
    for (range, cleaned) in splices {
        if range.end > floor {
            tracing::debug!(start = range.start, end = range.end, "skipping overlapping url entity");
            continue;
        }
        floor = range.start;
        body.replace_range(range, cleaned);
    }

    let appended: Vec<String> = urls
        .iter()
        .filter(|u| !u.is_literal())
        .filter_map(|u| mapping.get(u.url).cloned())
        .collect();

    if body == text && appended.is_empty() {
        return None;
    }
    Some(Rebuilt { body, appended })
}
