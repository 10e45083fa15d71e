//! Typed input-source descriptors handed to the download engine.
//!
//! The engine matches exhaustively on [`InputSource`], so adding a kind
//! here forces every consumer to handle it instead of silently dropping
//! input.

use serde::Serialize;

/// One input source and its payload. Created once at resolution time,
/// consumed by the engine in declaration order, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum InputSource {
    /// A URL the mapper could not (or did not need to) reinterpret.
    DirectUrl(String),
    /// A single item identifier.
    Id(String),
    /// Path to a newline-delimited list of links.
    LinkList(String),
    Channel(String),
    Tag(String),
    Search(String),
    Community(String),
    Story(String),
    /// The site-wide hot section; carries no payload.
    HotSection,
    /// One batch of randomly chosen items. Requested repetitions are
    /// independent entries, each contributing its own batch.
    RandomCategory,
}

impl InputSource {
    /// Kind name used for logging and list views.
    pub fn kind(&self) -> &'static str {
        match self {
            InputSource::DirectUrl(_) => "url",
            InputSource::Id(_) => "id",
            InputSource::LinkList(_) => "list",
            InputSource::Channel(_) => "channel",
            InputSource::Tag(_) => "tag",
            InputSource::Search(_) => "search",
            InputSource::Community(_) => "community",
            InputSource::Story(_) => "story",
            InputSource::HotSection => "hot section",
            InputSource::RandomCategory => "random",
        }
    }

    pub fn payload(&self) -> Option<&str> {
        match self {
            InputSource::DirectUrl(s)
            | InputSource::Id(s)
            | InputSource::LinkList(s)
            | InputSource::Channel(s)
            | InputSource::Tag(s)
            | InputSource::Search(s)
            | InputSource::Community(s)
            | InputSource::Story(s) => Some(s),
            InputSource::HotSection | InputSource::RandomCategory => None,
        }
    }
}

/// Reinterprets a raw URL token as a more specific source kind when its
/// shape identifies one. The field parser only depends on this trait;
/// host knowledge lives in the implementations.
pub trait LinkMapper {
    fn map(&self, raw: &str) -> InputSource;
}

/// Mapper that performs no reinterpretation.
pub struct PassthroughMapper;

impl LinkMapper for PassthroughMapper {
    fn map(&self, raw: &str) -> InputSource {
        InputSource::DirectUrl(raw.to_string())
    }
}
