//! Free-text field parsing into typed input sources.
//!
//! Each field is split on a single fixed separator; tokens that are
//! empty after whitespace trimming vanish, surviving tokens are kept
//! verbatim. The emission order below is a contract the engine relies
//! on for deterministic processing.

use crate::source::{InputSource, LinkMapper};

/// Separator for all free-text fields.
pub const FIELD_SEPARATOR: char = ',';

/// Raw free-text fields plus the two parameterless requests, exactly as
/// the presentation surface returns them.
#[derive(Debug, Default, Clone)]
pub struct RawFields {
    pub urls: String,
    pub ids: String,
    pub lists: String,
    pub channels: String,
    pub tags: String,
    pub searches: String,
    pub communities: String,
    pub stories: String,
    pub hot_section: bool,
    /// Number of independent random-category batches to request.
    pub random_count: u32,
}

/// Splits one field, discarding tokens that are empty after trimming.
/// Surviving tokens keep their original spelling.
pub fn split_field(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(FIELD_SEPARATOR).filter(|t| !t.trim().is_empty())
}

/// Parses all fields into sources in the fixed precedence order:
/// urls, ids, lists, channels, tags, searches, communities, stories,
/// the hot-section flag, then one entry per random-category repetition.
pub fn collect_sources(fields: &RawFields, mapper: &dyn LinkMapper) -> Vec<InputSource> {
    let mut sources = Vec::new();

    sources.extend(split_field(&fields.urls).map(|t| mapper.map(t)));
    sources.extend(split_field(&fields.ids).map(|t| InputSource::Id(t.to_string())));
    sources.extend(split_field(&fields.lists).map(|t| InputSource::LinkList(t.to_string())));
    sources.extend(split_field(&fields.channels).map(|t| InputSource::Channel(t.to_string())));
    sources.extend(split_field(&fields.tags).map(|t| InputSource::Tag(t.to_string())));
    sources.extend(split_field(&fields.searches).map(|t| InputSource::Search(t.to_string())));
    sources.extend(
        split_field(&fields.communities).map(|t| InputSource::Community(t.to_string())),
    );
    sources.extend(split_field(&fields.stories).map(|t| InputSource::Story(t.to_string())));
    if fields.hot_section {
        sources.push(InputSource::HotSection);
    }
    sources.extend((0..fields.random_count).map(|_| InputSource::RandomCategory));

    tracing::debug!("collected {} input sources", sources.len());
    sources
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::PassthroughMapper;

    #[test]
    fn empty_and_whitespace_tokens_vanish() {
        let tokens: Vec<&str> = split_field("a,,b, ,c").collect();
        assert_eq!(tokens, vec!["a", "b", "c"]);
    }

    #[test]
    fn surviving_tokens_are_kept_verbatim() {
        // No implicit trimming: only fully-blank tokens are discarded.
        let tokens: Vec<&str> = split_field(" a , b").collect();
        assert_eq!(tokens, vec![" a ", " b"]);
    }

    #[test]
    fn separator_only_field_yields_nothing() {
        assert_eq!(split_field(",, , ").count(), 0);
        assert_eq!(split_field("").count(), 0);
    }

    #[test]
    fn sources_follow_field_precedence() {
        let fields = RawFields {
            urls: "https://coub.com/view/abc".into(),
            ids: "id1,id2".into(),
            lists: "links.txt".into(),
            channels: "chan".into(),
            tags: "cats".into(),
            searches: "slow motion".into(),
            communities: "animals".into(),
            stories: "weekly".into(),
            hot_section: true,
            random_count: 2,
        };

        let sources = collect_sources(&fields, &PassthroughMapper);
        let kinds: Vec<&str> = sources.iter().map(|s| s.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                "url",
                "id",
                "id",
                "list",
                "channel",
                "tag",
                "search",
                "community",
                "story",
                "hot section",
                "random",
                "random",
            ]
        );
    }

    #[test]
    fn random_repetitions_are_independent_entries() {
        let fields = RawFields {
            random_count: 3,
            ..RawFields::default()
        };
        let sources = collect_sources(&fields, &PassthroughMapper);
        assert_eq!(sources, vec![InputSource::RandomCategory; 3]);
    }

    #[test]
    fn all_blank_fields_yield_no_sources() {
        let fields = RawFields {
            urls: ", ,".into(),
            tags: "   ".into(),
            ..RawFields::default()
        };
        assert!(collect_sources(&fields, &PassthroughMapper).is_empty());
    }
}
