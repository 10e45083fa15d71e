//! Raw option set to normalized command description.
//!
//! [`RawOptions`] holds values exactly as the presentation surface
//! returns them: label-valued fields still carry display labels and
//! sentinel keywords are not yet rewritten. [`resolve`] parses the
//! free-text fields, loads the archive, rewrites sentinels, and
//! translates every label through the tables. Translation runs last; a
//! label failing there is a pipeline invariant violation, not user
//! input to be defaulted.

use crate::archive::ArchiveSet;
use crate::config::{
    self, Defaults, OutputContainer, PromptAnswer, ResolutionCap, WriteMethod,
};
use crate::input::{collect_sources, RawFields};
use crate::labels::{AudioBias, LabelError, Quality, RecoubPolicy, SpecialFormat};
use crate::source::{InputSource, LinkMapper};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Template token the presentation shows when no override is requested.
/// An explicit user-chosen identical template is conflated with "unset";
/// see the normalizer tests.
pub const DEFAULT_TEMPLATE: &str = "%id%";

/// Keyword standing in for a bare space, which config storage cannot
/// hold unambiguously.
pub const SPACE_KEYWORD: &str = "space";

#[derive(Debug, Error)]
pub enum ResolveError {
    /// A display label that should have been validated at the
    /// presentation boundary reached translation.
    #[error(transparent)]
    Label(#[from] LabelError),
    #[error("minimum video resolution '{min}' exceeds maximum '{max}'")]
    ResolutionCapOrder {
        min: &'static str,
        max: &'static str,
    },
    #[error("failed to read archive '{path}'")]
    Archive {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Option values as returned by the presentation surface.
#[derive(Debug, Clone)]
pub struct RawOptions {
    pub fields: RawFields,
    pub video_quality: String,
    pub audio_quality: String,
    pub audio_bias: String,
    pub recoubs: String,
    pub special: String,
    pub video_max: ResolutionCap,
    pub video_min: ResolutionCap,
    pub prompt: PromptAnswer,
    pub path: String,
    pub keep_streams: bool,
    pub repeat: u32,
    pub duration: Option<String>,
    pub connections: u32,
    pub retries: i32,
    pub max_items: Option<u32>,
    pub preview: Option<String>,
    pub output_list: Option<String>,
    pub archive: Option<String>,
    pub container: OutputContainer,
    pub name_template: String,
    pub ffmpeg_path: String,
    pub tag_sep: String,
    pub fallback_char: Option<String>,
    pub write_method: WriteMethod,
    pub chunk_size: u32,
}

impl RawOptions {
    /// Seeds a presentation form from a resolved snapshot, rendering
    /// every code-valued default as its display label.
    pub fn from_defaults(defaults: &Defaults) -> Self {
        Self {
            fields: RawFields::default(),
            video_quality: defaults.video_quality.label().to_string(),
            audio_quality: defaults.audio_quality.label().to_string(),
            audio_bias: defaults.audio_bias.label().to_string(),
            recoubs: defaults.recoubs.label().to_string(),
            special: defaults.special.label().to_string(),
            video_max: defaults.video_max,
            video_min: defaults.video_min,
            prompt: defaults.prompt,
            path: defaults.path.display().to_string(),
            keep_streams: defaults.keep_streams,
            repeat: defaults.repeat,
            duration: defaults.duration.clone(),
            connections: defaults.connections,
            retries: defaults.retries,
            max_items: defaults.max_items,
            preview: defaults.preview.clone(),
            output_list: defaults
                .output_list
                .as_ref()
                .map(|p| p.display().to_string()),
            archive: defaults.archive.as_ref().map(|p| p.display().to_string()),
            container: defaults.container,
            name_template: defaults.name_template.clone(),
            ffmpeg_path: defaults.ffmpeg_path.clone(),
            tag_sep: defaults.tag_sep.clone(),
            fallback_char: defaults.fallback_char.clone(),
            write_method: defaults.write_method,
            chunk_size: defaults.chunk_size,
        }
    }
}

/// Final immutable command description handed to the download engine.
/// Every enum-valued field holds an internal code by this point; labels
/// never cross this boundary.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedCommand {
    pub sources: Vec<InputSource>,
    pub archive: ArchiveSet,
    pub prompt: PromptAnswer,
    pub path: PathBuf,
    pub keep_streams: bool,
    pub repeat: u32,
    pub duration: Option<String>,
    pub connections: u32,
    pub retries: i32,
    pub max_items: Option<u32>,
    pub video_quality: Quality,
    pub audio_quality: Quality,
    pub video_max: ResolutionCap,
    pub video_min: ResolutionCap,
    pub audio_bias: AudioBias,
    pub recoubs: RecoubPolicy,
    pub share: bool,
    pub video_only: bool,
    pub audio_only: bool,
    pub preview: Option<String>,
    pub output_list: Option<PathBuf>,
    pub archive_path: Option<PathBuf>,
    pub container: OutputContainer,
    pub name_template: Option<String>,
    pub ffmpeg_path: String,
    pub tag_sep: String,
    pub fallback_char: String,
    pub write_method: WriteMethod,
    pub chunk_size: u32,
}

/// Rewrites the default-token template to the internal "unset" value.
pub fn normalize_template(raw: &str) -> Option<String> {
    if raw == DEFAULT_TEMPLATE {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Rewrites the blank-character keyword to a literal space.
pub fn normalize_separator(raw: &str) -> String {
    if raw == SPACE_KEYWORD {
        " ".to_string()
    } else {
        raw.to_string()
    }
}

/// Unset becomes the empty string; the blank-character keyword becomes
/// a literal space.
pub fn normalize_fallback(raw: Option<&str>) -> String {
    match raw {
        None => String::new(),
        Some(SPACE_KEYWORD) => " ".to_string(),
        Some(other) => other.to_string(),
    }
}

/// Runs the full pipeline: field parsing, archive loading, sentinel
/// normalization, then label translation.
pub fn resolve(raw: &RawOptions, mapper: &dyn LinkMapper) -> Result<ResolvedCommand, ResolveError> {
    if raw.video_min > raw.video_max {
        return Err(ResolveError::ResolutionCapOrder {
            min: raw.video_min.as_str(),
            max: raw.video_max.as_str(),
        });
    }

    let sources = collect_sources(&raw.fields, mapper);

    let archive_path = raw.archive.as_deref().map(PathBuf::from);
    let archive =
        ArchiveSet::load(archive_path.as_deref()).map_err(|source| ResolveError::Archive {
            path: archive_path.clone().unwrap_or_default(),
            source,
        })?;

    // Sentinel rewrites are independent; no rule's output feeds another.
    let name_template = normalize_template(&raw.name_template);
    let tag_sep = normalize_separator(&raw.tag_sep);
    let fallback_char = normalize_fallback(raw.fallback_char.as_deref());
    let path = config::absolute_or_default(&raw.path);

    // Translation runs last, on already-validated labels.
    let video_quality = Quality::from_label(&raw.video_quality)?;
    let audio_quality = Quality::from_label(&raw.audio_quality)?;
    let audio_bias = AudioBias::from_label(&raw.audio_bias)?;
    let recoubs = RecoubPolicy::from_label(&raw.recoubs)?;
    let (share, video_only, audio_only) = SpecialFormat::from_label(&raw.special)?.flags();

    tracing::info!(
        sources = sources.len(),
        archived = archive.len(),
        "resolved command for engine handoff"
    );

    Ok(ResolvedCommand {
        sources,
        archive,
        prompt: raw.prompt,
        path,
        keep_streams: raw.keep_streams,
        repeat: raw.repeat,
        duration: raw.duration.clone(),
        connections: raw.connections,
        retries: raw.retries,
        max_items: raw.max_items,
        video_quality,
        audio_quality,
        video_max: raw.video_max,
        video_min: raw.video_min,
        audio_bias,
        recoubs,
        share,
        video_only,
        audio_only,
        preview: raw.preview.clone(),
        output_list: raw.output_list.as_deref().map(PathBuf::from),
        archive_path,
        container: raw.container,
        name_template,
        ffmpeg_path: raw.ffmpeg_path.clone(),
        tag_sep,
        fallback_char,
        write_method: raw.write_method,
        chunk_size: raw.chunk_size,
    })
}
