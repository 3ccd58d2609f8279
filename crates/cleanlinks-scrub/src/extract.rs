//! URL extraction from message entities.

use cleanlinks_core::types::{EntityKind, MessageEntity};

/// A URL found in a message, with the entity it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractedUrl<'a> {
    pub url: &'a str,
    pub entity: &'a MessageEntity,
}

impl ExtractedUrl<'_> {
    /// `true` when the URL text is visible in the body and can be spliced in place.
    pub fn is_literal(&self) -> bool {
        matches!(self.entity.kind, EntityKind::Url)
    }
}

/// Collect URLs from `entities` in the order given.
///
/// Literal URL entities are sliced out of `text`; masked links contribute
/// their out-of-band target. An entity whose range does not land on valid
/// char boundaries inside `text` is skipped.
pub fn extract_urls<'a>(text: &'a str, entities: &'a [MessageEntity]) -> Vec<ExtractedUrl<'a>> {
    entities
        .iter()
        .filter_map(|entity| {
            let url = match &entity.kind {
                EntityKind::Url => text.get(entity.range())?,
                EntityKind::TextLink { url } if !url.is_empty() => url.as_str(),
                _ => return None,
            };
            Some(ExtractedUrl { url, entity })
        })
        .collect()
}
