//! Host-aware URL interpretation.
//!
//! Recovers the specific source kind from well-known URL shapes so a
//! pasted link behaves like the equivalent typed-in item. A URL that
//! denotes a single item collapses to its identifier; everything the
//! mapper does not recognize passes through as a direct URL.

use crate::source::{InputSource, LinkMapper};
use std::path::Path;
use url::Url;

/// Host whose URL shapes the default mapper understands.
pub const DEFAULT_HOST: &str = "coub.com";

/// Maps URLs of a single loop-video host onto typed sources.
pub struct HostLinkMapper {
    host: String,
}

impl HostLinkMapper {
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }
}

impl Default for HostLinkMapper {
    fn default() -> Self {
        Self::new(DEFAULT_HOST)
    }
}

impl LinkMapper for HostLinkMapper {
    fn map(&self, raw: &str) -> InputSource {
        // An existing local path is a link list, not a URL. Without this
        // check the path would be forced into a link-like form.
        if Path::new(raw).exists() {
            return InputSource::LinkList(raw.to_string());
        }

        let Ok(url) = Url::parse(raw) else {
            return InputSource::DirectUrl(raw.to_string());
        };
        if url.host_str() != Some(self.host.as_str()) {
            return InputSource::DirectUrl(raw.to_string());
        }

        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|p| !p.is_empty()).collect())
            .unwrap_or_default();

        // Listings carry optional section suffixes ("/coubs" on a
        // channel, "/fresh" on a tag) that narrow the sort order, not
        // the kind. The base shape decides; the suffix is dropped.
        match segments.as_slice() {
            ["view", id] => InputSource::Id((*id).to_string()),
            ["tags", name] | ["tags", name, "likes" | "views" | "fresh"] => {
                InputSource::Tag((*name).to_string())
            }
            ["search"] => match url.query_pairs().find(|(k, _)| k == "q") {
                Some((_, term)) => InputSource::Search(term.into_owned()),
                None => InputSource::DirectUrl(raw.to_string()),
            },
            ["community", name]
            | ["community", name, "rising" | "fresh" | "top" | "views" | "random"] => {
                InputSource::Community((*name).to_string())
            }
            ["stories", name] => InputSource::Story((*name).to_string()),
            // The featured pages are a community in disguise.
            ["featured", ..] => InputSource::Community("featured".to_string()),
            ["random"] | ["random", "top"] => InputSource::RandomCategory,
            ["hot"] | ["rising"] | ["fresh"] | [] => InputSource::HotSection,
            // Channel URLs have no distinguishing shape; a single
            // unrecognized segment is the fallthrough type.
            [name] | [name, "coubs" | "reposts" | "stories"] => {
                InputSource::Channel((*name).to_string())
            }
            _ => InputSource::DirectUrl(raw.to_string()),
        }
    }
}
