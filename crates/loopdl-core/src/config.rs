//! Layered default resolution.
//!
//! Built-in constants are overridden by TOML config sources tried in a
//! fixed priority order (the first source that defines a key wins, per
//! key, not per file), then context corrections narrow values that make
//! no sense in a non-interactive run. Malformed entries are recorded in
//! [`Defaults::errors`] instead of raised, so a dependent presentation
//! surface can still be built; callers must check the list afterwards
//! and abort with [`crate::exit::OPT`].

use crate::labels::{AudioBias, Quality, RecoubPolicy, SpecialFormat};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use toml::Value;

/// Answer applied to overwrite prompts. Interactive prompting is not
/// available in this context, so anything else resolves to `No`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptAnswer {
    Yes,
    No,
}

/// Video resolution cap understood by the engine, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionCap {
    Med,
    High,
    Higher,
}

impl ResolutionCap {
    pub fn as_str(self) -> &'static str {
        match self {
            ResolutionCap::Med => "med",
            ResolutionCap::High => "high",
            ResolutionCap::Higher => "higher",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "med" => Some(ResolutionCap::Med),
            "high" => Some(ResolutionCap::High),
            "higher" => Some(ResolutionCap::Higher),
            _ => None,
        }
    }
}

/// Container format for merged output files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputContainer {
    Mkv,
    Mp4,
    Asf,
    Avi,
    Flv,
    F4v,
    Mov,
}

impl OutputContainer {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputContainer::Mkv => "mkv",
            OutputContainer::Mp4 => "mp4",
            OutputContainer::Asf => "asf",
            OutputContainer::Avi => "avi",
            OutputContainer::Flv => "flv",
            OutputContainer::F4v => "f4v",
            OutputContainer::Mov => "mov",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "mkv" => Some(OutputContainer::Mkv),
            "mp4" => Some(OutputContainer::Mp4),
            "asf" => Some(OutputContainer::Asf),
            "avi" => Some(OutputContainer::Avi),
            "flv" => Some(OutputContainer::Flv),
            "f4v" => Some(OutputContainer::F4v),
            "mov" => Some(OutputContainer::Mov),
            _ => None,
        }
    }
}

/// How the engine writes finished files ("w" or "a" in config sources).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMethod {
    Overwrite,
    Append,
}

impl WriteMethod {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "w" => Some(WriteMethod::Overwrite),
            "a" => Some(WriteMethod::Append),
            _ => None,
        }
    }
}

/// Built-in constants, the lowest layer of the default stack.
mod builtin {
    use super::*;

    pub const PATH: &str = ".";
    pub const KEEP_STREAMS: bool = false;
    pub const REPEAT: u32 = 1000;
    pub const CONNECTIONS: u32 = 25;
    pub const RETRIES: i32 = 5;
    pub const VIDEO_QUALITY: Quality = Quality::Best;
    pub const AUDIO_QUALITY: Quality = Quality::Best;
    pub const VIDEO_MAX: ResolutionCap = ResolutionCap::Higher;
    pub const VIDEO_MIN: ResolutionCap = ResolutionCap::Med;
    pub const AUDIO_BIAS: AudioBias = AudioBias::NoBias;
    pub const SPECIAL: SpecialFormat = SpecialFormat::Regular;
    pub const RECOUBS: RecoubPolicy = RecoubPolicy::Include;
    pub const CONTAINER: OutputContainer = OutputContainer::Mkv;
    pub const NAME_TEMPLATE: &str = "%id%";
    pub const FFMPEG_PATH: &str = "ffmpeg";
    pub const TAG_SEP: &str = "_";
    pub const FALLBACK_CHAR: &str = "-";
    pub const WRITE_METHOD: WriteMethod = WriteMethod::Overwrite;
    pub const CHUNK_SIZE: u32 = 1024;
}

/// Immutable snapshot of the fully layered defaults. Built once per
/// process and passed explicitly through the later stages.
#[derive(Debug, Clone)]
pub struct Defaults {
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
    pub special: SpecialFormat,
    pub recoubs: RecoubPolicy,
    pub preview: Option<String>,
    pub output_list: Option<PathBuf>,
    pub archive: Option<PathBuf>,
    pub container: OutputContainer,
    /// Raw template; the default-token rewrite happens at resolve time.
    pub name_template: String,
    pub ffmpeg_path: String,
    pub tag_sep: String,
    pub fallback_char: Option<String>,
    pub write_method: WriteMethod,
    pub chunk_size: u32,
    /// Problems found while reading config sources. Resolution still
    /// completes with built-in values in the affected slots.
    pub errors: Vec<String>,
}

impl Defaults {
    /// Layers `sources` (highest priority first) over the built-ins and
    /// applies the non-interactive corrections.
    pub fn load(sources: &[PathBuf]) -> Defaults {
        let mut partial = PartialDefaults::default();
        let mut errors = Vec::new();

        for path in sources {
            if !path.exists() {
                continue;
            }
            let data = match fs::read_to_string(path) {
                Ok(data) => data,
                Err(err) => {
                    errors.push(format!(
                        "error reading config file '{}': {}",
                        path.display(),
                        err
                    ));
                    continue;
                }
            };
            match data.parse::<toml::Table>() {
                Ok(table) => {
                    partial.apply_source(&table, &mut errors);
                    tracing::debug!("applied config source {}", path.display());
                }
                Err(err) => errors.push(format!(
                    "error parsing config file '{}': {}",
                    path.display(),
                    err
                )),
            }
        }

        partial.finish(errors)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl Default for Defaults {
    /// Built-ins with corrections applied and no config source.
    fn default() -> Self {
        PartialDefaults::default().finish(Vec::new())
    }
}

/// Config source locations in priority order: a `loopdl.toml` next to
/// the invocation, then the XDG config file.
pub fn default_config_sources() -> Vec<PathBuf> {
    let mut sources = vec![PathBuf::from("loopdl.toml")];
    if let Ok(xdg_dirs) = xdg::BaseDirectories::with_prefix("loopdl") {
        sources.push(xdg_dirs.get_config_home().join("config.toml"));
    }
    sources
}

/// Fixed fallback directory for downloads when no usable path is set.
pub fn default_output_dir() -> PathBuf {
    let home = std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/"));
    home.join("loops")
}

/// Relative paths are ambiguous outside a working-directory-anchored
/// context, so anything non-absolute collapses to the fixed default.
pub fn absolute_or_default(path: &str) -> PathBuf {
    let candidate = Path::new(path);
    if !path.is_empty() && candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        default_output_dir()
    }
}

/// Accumulates the first-seen value per key across config sources.
#[derive(Debug, Default)]
struct PartialDefaults {
    prompt: Option<String>,
    path: Option<String>,
    keep_streams: Option<bool>,
    repeat: Option<i64>,
    duration: Option<String>,
    connections: Option<i64>,
    retries: Option<i64>,
    max_items: Option<i64>,
    video_quality: Option<i64>,
    audio_quality: Option<i64>,
    video_max: Option<String>,
    video_min: Option<String>,
    audio_bias: Option<i64>,
    share: Option<bool>,
    video_only: Option<bool>,
    audio_only: Option<bool>,
    recoubs: Option<i64>,
    preview: Option<String>,
    output_list: Option<String>,
    archive: Option<String>,
    container: Option<String>,
    name_template: Option<String>,
    ffmpeg_path: Option<String>,
    tag_sep: Option<String>,
    fallback_char: Option<String>,
    write_method: Option<String>,
    chunk_size: Option<i64>,
}

fn first_str(slot: &mut Option<String>, key: &str, value: &Value, errors: &mut Vec<String>) {
    match value.as_str() {
        Some(s) if slot.is_none() => *slot = Some(s.to_string()),
        Some(_) => {}
        None => errors.push(format!("{}: expected a string value", key)),
    }
}

fn first_int(slot: &mut Option<i64>, key: &str, value: &Value, errors: &mut Vec<String>) {
    match value.as_integer() {
        Some(i) if slot.is_none() => *slot = Some(i),
        Some(_) => {}
        None => errors.push(format!("{}: expected an integer value", key)),
    }
}

fn first_bool(slot: &mut Option<bool>, key: &str, value: &Value, errors: &mut Vec<String>) {
    match value.as_bool() {
        Some(b) if slot.is_none() => *slot = Some(b),
        Some(_) => {}
        None => errors.push(format!("{}: expected a boolean value", key)),
    }
}

impl PartialDefaults {
    fn apply_source(&mut self, table: &toml::Table, errors: &mut Vec<String>) {
        for (key, value) in table {
            match key.as_str() {
                "prompt" => first_str(&mut self.prompt, key, value, errors),
                "path" => first_str(&mut self.path, key, value, errors),
                "keep_streams" => first_bool(&mut self.keep_streams, key, value, errors),
                "repeat" => first_int(&mut self.repeat, key, value, errors),
                "duration" => first_str(&mut self.duration, key, value, errors),
                "connections" => first_int(&mut self.connections, key, value, errors),
                "retries" => first_int(&mut self.retries, key, value, errors),
                "max_items" => first_int(&mut self.max_items, key, value, errors),
                "video_quality" => first_int(&mut self.video_quality, key, value, errors),
                "audio_quality" => first_int(&mut self.audio_quality, key, value, errors),
                "video_max" => first_str(&mut self.video_max, key, value, errors),
                "video_min" => first_str(&mut self.video_min, key, value, errors),
                "audio_bias" => first_int(&mut self.audio_bias, key, value, errors),
                "share" => first_bool(&mut self.share, key, value, errors),
                "video_only" => first_bool(&mut self.video_only, key, value, errors),
                "audio_only" => first_bool(&mut self.audio_only, key, value, errors),
                "recoubs" => first_int(&mut self.recoubs, key, value, errors),
                "preview" => first_str(&mut self.preview, key, value, errors),
                "output_list" => first_str(&mut self.output_list, key, value, errors),
                "archive" => first_str(&mut self.archive, key, value, errors),
                "container" => first_str(&mut self.container, key, value, errors),
                "name_template" => first_str(&mut self.name_template, key, value, errors),
                "ffmpeg_path" => first_str(&mut self.ffmpeg_path, key, value, errors),
                "tag_sep" => first_str(&mut self.tag_sep, key, value, errors),
                "fallback_char" => first_str(&mut self.fallback_char, key, value, errors),
                "write_method" => first_str(&mut self.write_method, key, value, errors),
                "chunk_size" => first_int(&mut self.chunk_size, key, value, errors),
                unknown => errors.push(format!("unknown option in config file: {}", unknown)),
            }
        }
    }

    /// Validates every collected value, falling back to the built-in on
    /// a domain violation, then applies the context corrections.
    fn finish(self, mut errors: Vec<String>) -> Defaults {
        let repeat = positive_u32(self.repeat, "repeat", builtin::REPEAT, &mut errors);
        let connections = positive_u32(
            self.connections,
            "connections",
            builtin::CONNECTIONS,
            &mut errors,
        );
        let chunk_size = positive_u32(self.chunk_size, "chunk_size", builtin::CHUNK_SIZE, &mut errors);
        let retries = match self.retries {
            Some(r) if i32::try_from(r).is_ok() => r as i32,
            Some(r) => {
                errors.push(format!("retries: invalid default value '{}'", r));
                builtin::RETRIES
            }
            None => builtin::RETRIES,
        };
        let max_items = match self.max_items {
            Some(n) if n > 0 && n <= i64::from(u32::MAX) => Some(n as u32),
            Some(n) => {
                errors.push(format!("max_items: invalid default value '{}'", n));
                None
            }
            None => None,
        };

        let video_quality =
            quality_from_index(self.video_quality, "video_quality", builtin::VIDEO_QUALITY, &mut errors);
        let audio_quality =
            quality_from_index(self.audio_quality, "audio_quality", builtin::AUDIO_QUALITY, &mut errors);
        let video_max = cap_from_str(self.video_max, "video_max", builtin::VIDEO_MAX, &mut errors);
        let video_min = cap_from_str(self.video_min, "video_min", builtin::VIDEO_MIN, &mut errors);

        let audio_bias = match self.audio_bias {
            Some(ord) => AudioBias::from_ordinal(ord).unwrap_or_else(|| {
                errors.push(format!("audio_bias: invalid default value '{}'", ord));
                builtin::AUDIO_BIAS
            }),
            None => builtin::AUDIO_BIAS,
        };
        let recoubs = match self.recoubs {
            Some(ord) => RecoubPolicy::from_ordinal(ord).unwrap_or_else(|| {
                errors.push(format!("recoubs: invalid default value '{}'", ord));
                builtin::RECOUBS
            }),
            None => builtin::RECOUBS,
        };

        let share = self.share.unwrap_or(false);
        let video_only = self.video_only.unwrap_or(false);
        let audio_only = self.audio_only.unwrap_or(false);
        let special = SpecialFormat::from_flags(share, video_only, audio_only).unwrap_or_else(|| {
            errors.push(
                "share/video_only/audio_only: flags select more than one special format"
                    .to_string(),
            );
            builtin::SPECIAL
        });

        let container = match self.container.as_deref() {
            Some(value) => OutputContainer::parse(value).unwrap_or_else(|| {
                errors.push(format!("container: invalid default value '{}'", value));
                builtin::CONTAINER
            }),
            None => builtin::CONTAINER,
        };
        let write_method = match self.write_method.as_deref() {
            Some(value) => WriteMethod::parse(value).unwrap_or_else(|| {
                errors.push(format!("write_method: invalid default value '{}'", value));
                builtin::WRITE_METHOD
            }),
            None => builtin::WRITE_METHOD,
        };

        // Context corrections: never block on a prompt, never hand the
        // engine a relative path.
        let prompt = match self.prompt.as_deref() {
            Some("yes") => PromptAnswer::Yes,
            _ => PromptAnswer::No,
        };
        let path = absolute_or_default(self.path.as_deref().unwrap_or(builtin::PATH));

        Defaults {
            prompt,
            path,
            keep_streams: self.keep_streams.unwrap_or(builtin::KEEP_STREAMS),
            repeat,
            duration: self.duration,
            connections,
            retries,
            max_items,
            video_quality,
            audio_quality,
            video_max,
            video_min,
            audio_bias,
            special,
            recoubs,
            preview: self.preview,
            output_list: self.output_list.map(PathBuf::from),
            archive: self.archive.map(PathBuf::from),
            container,
            name_template: self
                .name_template
                .unwrap_or_else(|| builtin::NAME_TEMPLATE.to_string()),
            ffmpeg_path: self
                .ffmpeg_path
                .unwrap_or_else(|| builtin::FFMPEG_PATH.to_string()),
            tag_sep: self.tag_sep.unwrap_or_else(|| builtin::TAG_SEP.to_string()),
            fallback_char: Some(
                self.fallback_char
                    .unwrap_or_else(|| builtin::FALLBACK_CHAR.to_string()),
            ),
            write_method,
            chunk_size,
            errors,
        }
    }
}

fn positive_u32(slot: Option<i64>, key: &str, default: u32, errors: &mut Vec<String>) -> u32 {
    match slot {
        Some(n) if n > 0 && n <= i64::from(u32::MAX) => n as u32,
        Some(n) => {
            errors.push(format!("{}: invalid default value '{}'", key, n));
            default
        }
        None => default,
    }
}

fn quality_from_index(
    slot: Option<i64>,
    key: &str,
    default: Quality,
    errors: &mut Vec<String>,
) -> Quality {
    match slot {
        Some(-1) => Quality::Best,
        Some(0) => Quality::Worst,
        Some(n) => {
            errors.push(format!("{}: invalid default value '{}'", key, n));
            default
        }
        None => default,
    }
}

fn cap_from_str(
    slot: Option<String>,
    key: &str,
    default: ResolutionCap,
    errors: &mut Vec<String>,
) -> ResolutionCap {
    match slot.as_deref() {
        Some(value) => ResolutionCap::parse(value).unwrap_or_else(|| {
            errors.push(format!("{}: invalid default value '{}'", key, value));
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_source(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn builtin_defaults_survive_empty_source_list() {
        let defaults = Defaults::load(&[]);
        assert!(defaults.errors.is_empty());
        assert_eq!(defaults.connections, 25);
        assert_eq!(defaults.retries, 5);
        assert_eq!(defaults.repeat, 1000);
        assert_eq!(defaults.video_quality, Quality::Best);
        assert_eq!(defaults.audio_bias, AudioBias::NoBias);
        assert_eq!(defaults.recoubs, RecoubPolicy::Include);
        assert_eq!(defaults.special, SpecialFormat::Regular);
        assert_eq!(defaults.container, OutputContainer::Mkv);
        assert_eq!(defaults.name_template, "%id%");
        assert_eq!(defaults.tag_sep, "_");
        assert_eq!(defaults.fallback_char.as_deref(), Some("-"));
        assert_eq!(defaults.max_items, None);
        assert_eq!(defaults.duration, None);
    }

    #[test]
    fn first_source_wins_per_key_not_per_file() {
        let dir = tempdir().unwrap();
        let high = write_source(dir.path(), "high.toml", "connections = 10\n");
        let low = write_source(
            dir.path(),
            "low.toml",
            "connections = 99\nretries = 2\n",
        );

        let defaults = Defaults::load(&[high, low]);
        assert!(defaults.errors.is_empty(), "{:?}", defaults.errors);
        // The higher-priority tier wins for connections, but the lower
        // tier still contributes the key it alone defines.
        assert_eq!(defaults.connections, 10);
        assert_eq!(defaults.retries, 2);
    }

    #[test]
    fn missing_source_is_not_an_error() {
        let dir = tempdir().unwrap();
        let defaults = Defaults::load(&[dir.path().join("absent.toml")]);
        assert!(defaults.errors.is_empty());
    }

    #[test]
    fn out_of_domain_value_is_recorded_and_replaced() {
        let dir = tempdir().unwrap();
        let source = write_source(
            dir.path(),
            "bad.toml",
            "repeat = 0\nvideo_quality = 3\ncontainer = \"webm\"\n",
        );

        let defaults = Defaults::load(&[source]);
        assert_eq!(defaults.errors.len(), 3, "{:?}", defaults.errors);
        assert_eq!(defaults.repeat, 1000);
        assert_eq!(defaults.video_quality, Quality::Best);
        assert_eq!(defaults.container, OutputContainer::Mkv);
    }

    #[test]
    fn unknown_key_is_recorded() {
        let dir = tempdir().unwrap();
        let source = write_source(dir.path(), "unknown.toml", "verbosity = 1\n");

        let defaults = Defaults::load(&[source]);
        assert_eq!(defaults.errors.len(), 1);
        assert!(defaults.errors[0].contains("unknown option"));
    }

    #[test]
    fn malformed_source_is_recorded_and_skipped() {
        let dir = tempdir().unwrap();
        let bad = write_source(dir.path(), "bad.toml", "not toml at all [");
        let good = write_source(dir.path(), "good.toml", "connections = 7\n");

        let defaults = Defaults::load(&[bad, good]);
        assert_eq!(defaults.errors.len(), 1);
        assert_eq!(defaults.connections, 7);
    }

    #[test]
    fn prompt_is_forced_passive_outside_yes_no() {
        let dir = tempdir().unwrap();
        for (body, expected) in [
            ("prompt = \"yes\"\n", PromptAnswer::Yes),
            ("prompt = \"no\"\n", PromptAnswer::No),
            ("prompt = \"ask\"\n", PromptAnswer::No),
            ("", PromptAnswer::No),
        ] {
            let source = write_source(dir.path(), "prompt.toml", body);
            let defaults = Defaults::load(&[source]);
            assert_eq!(defaults.prompt, expected, "body: {:?}", body);
        }
    }

    #[test]
    fn relative_path_collapses_to_home_default() {
        let dir = tempdir().unwrap();
        let source = write_source(dir.path(), "path.toml", "path = \"./out\"\n");

        let defaults = Defaults::load(&[source]);
        assert_eq!(defaults.path, default_output_dir());
        assert!(defaults.path.is_absolute());
    }

    #[test]
    fn absolute_path_is_kept() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("media");
        let body = format!("path = \"{}\"\n", target.display());
        let source = write_source(dir.path(), "path.toml", &body);

        let defaults = Defaults::load(&[source]);
        assert_eq!(defaults.path, target);
    }

    #[test]
    fn conflicting_special_flags_are_an_error() {
        let dir = tempdir().unwrap();
        let source = write_source(
            dir.path(),
            "special.toml",
            "share = true\naudio_only = true\n",
        );

        let defaults = Defaults::load(&[source]);
        assert_eq!(defaults.errors.len(), 1);
        assert_eq!(defaults.special, SpecialFormat::Regular);
    }

    #[test]
    fn wrong_value_type_is_recorded_without_discarding_the_tier() {
        let dir = tempdir().unwrap();
        let source = write_source(
            dir.path(),
            "types.toml",
            "connections = \"many\"\nretries = 3\n",
        );

        let defaults = Defaults::load(&[source]);
        assert_eq!(defaults.errors.len(), 1);
        assert_eq!(defaults.connections, 25);
        assert_eq!(defaults.retries, 3);
    }
}
