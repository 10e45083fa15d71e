//! Display labels and their internal option codes.
//!
//! One authoritative bidirectional mapping per option. The presentation
//! surface renders labels produced here; resolution converts them back.
//! A label outside a table's domain is a configuration error and is
//! never silently replaced by a default.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// A display label outside its table's declared domain.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {table} label '{label}'")]
pub struct LabelError {
    pub table: &'static str,
    pub label: String,
}

impl LabelError {
    fn new(table: &'static str, label: &str) -> Self {
        Self {
            table,
            label: label.to_string(),
        }
    }
}

/// Stream quality pick, as a position in the engine's quality-ranked
/// stream list (not a numeric quality score).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quality {
    Worst,
    Best,
}

/// Serialized as [`Quality::stream_index`], the form the engine
/// consumes.
impl Serialize for Quality {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(self.stream_index())
    }
}

impl Quality {
    pub const LABELS: [&'static str; 2] = ["Worst quality", "Best quality"];

    pub fn label(self) -> &'static str {
        match self {
            Quality::Worst => "Worst quality",
            Quality::Best => "Best quality",
        }
    }

    pub fn from_label(label: &str) -> Result<Self, LabelError> {
        match label {
            "Worst quality" => Ok(Quality::Worst),
            "Best quality" => Ok(Quality::Best),
            other => Err(LabelError::new("quality", other)),
        }
    }

    /// Index into a worst-to-best sorted stream list: `0` selects the
    /// first entry, `-1` the last.
    pub fn stream_index(self) -> i8 {
        match self {
            Quality::Worst => 0,
            Quality::Best => -1,
        }
    }
}

/// How strongly to prefer AAC audio over MP3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioBias {
    Mp3Only,
    NoBias,
    PreferAac,
    AacOnly,
}

/// Serialized as [`AudioBias::ordinal`], the form the engine consumes.
impl Serialize for AudioBias {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.ordinal())
    }
}

impl AudioBias {
    pub const LABELS: [&'static str; 4] = ["Only MP3", "No Bias", "Prefer AAC", "Only AAC"];

    pub fn label(self) -> &'static str {
        match self {
            AudioBias::Mp3Only => "Only MP3",
            AudioBias::NoBias => "No Bias",
            AudioBias::PreferAac => "Prefer AAC",
            AudioBias::AacOnly => "Only AAC",
        }
    }

    pub fn from_label(label: &str) -> Result<Self, LabelError> {
        match label {
            "Only MP3" => Ok(AudioBias::Mp3Only),
            "No Bias" => Ok(AudioBias::NoBias),
            "Prefer AAC" => Ok(AudioBias::PreferAac),
            "Only AAC" => Ok(AudioBias::AacOnly),
            other => Err(LabelError::new("audio bias", other)),
        }
    }

    /// Ordinal code used by the engine (0 = MP3 only .. 3 = AAC only).
    pub fn ordinal(self) -> u8 {
        match self {
            AudioBias::Mp3Only => 0,
            AudioBias::NoBias => 1,
            AudioBias::PreferAac => 2,
            AudioBias::AacOnly => 3,
        }
    }

    pub fn from_ordinal(ordinal: i64) -> Option<Self> {
        match ordinal {
            0 => Some(AudioBias::Mp3Only),
            1 => Some(AudioBias::NoBias),
            2 => Some(AudioBias::PreferAac),
            3 => Some(AudioBias::AacOnly),
            _ => None,
        }
    }
}

/// How recoubs (reposts) are treated during channel downloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoubPolicy {
    Exclude,
    Include,
    Only,
}

impl RecoubPolicy {
    pub const LABELS: [&'static str; 3] = ["No Recoubs", "With Recoubs", "Only Recoubs"];

    pub fn label(self) -> &'static str {
        match self {
            RecoubPolicy::Exclude => "No Recoubs",
            RecoubPolicy::Include => "With Recoubs",
            RecoubPolicy::Only => "Only Recoubs",
        }
    }

    pub fn from_label(label: &str) -> Result<Self, LabelError> {
        match label {
            "No Recoubs" => Ok(RecoubPolicy::Exclude),
            "With Recoubs" => Ok(RecoubPolicy::Include),
            "Only Recoubs" => Ok(RecoubPolicy::Only),
            other => Err(LabelError::new("recoub policy", other)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RecoubPolicy::Exclude => "exclude",
            RecoubPolicy::Include => "include",
            RecoubPolicy::Only => "only",
        }
    }

    pub fn from_ordinal(ordinal: i64) -> Option<Self> {
        match ordinal {
            0 => Some(RecoubPolicy::Exclude),
            1 => Some(RecoubPolicy::Include),
            2 => Some(RecoubPolicy::Only),
            _ => None,
        }
    }
}

/// Special download format, shown as one combined choice.
///
/// The engine consumes three mutually exclusive flags. Only the four
/// combinations below are reachable through the display layer, so any
/// other flag triple must never be constructed internally either.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialFormat {
    Regular,
    Share,
    VideoOnly,
    AudioOnly,
}

impl SpecialFormat {
    pub const LABELS: [&'static str; 4] = ["None", "Share", "Video only", "Audio only"];

    pub fn label(self) -> &'static str {
        match self {
            SpecialFormat::Regular => "None",
            SpecialFormat::Share => "Share",
            SpecialFormat::VideoOnly => "Video only",
            SpecialFormat::AudioOnly => "Audio only",
        }
    }

    pub fn from_label(label: &str) -> Result<Self, LabelError> {
        match label {
            "None" => Ok(SpecialFormat::Regular),
            "Share" => Ok(SpecialFormat::Share),
            "Video only" => Ok(SpecialFormat::VideoOnly),
            "Audio only" => Ok(SpecialFormat::AudioOnly),
            other => Err(LabelError::new("special format", other)),
        }
    }

    /// Decomposes into the `(share, video_only, audio_only)` flags the
    /// engine expects.
    pub fn flags(self) -> (bool, bool, bool) {
        match self {
            SpecialFormat::Regular => (false, false, false),
            SpecialFormat::Share => (true, false, false),
            SpecialFormat::VideoOnly => (false, true, false),
            SpecialFormat::AudioOnly => (false, false, true),
        }
    }

    /// Recombines the flag triple; `None` for the unrepresentable
    /// combinations (more than one flag set).
    pub fn from_flags(share: bool, video_only: bool, audio_only: bool) -> Option<Self> {
        match (share, video_only, audio_only) {
            (false, false, false) => Some(SpecialFormat::Regular),
            (true, false, false) => Some(SpecialFormat::Share),
            (false, true, false) => Some(SpecialFormat::VideoOnly),
            (false, false, true) => Some(SpecialFormat::AudioOnly),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_labels_round_trip() {
        for label in Quality::LABELS {
            let code = Quality::from_label(label).unwrap();
            assert_eq!(code.label(), label);
        }
    }

    #[test]
    fn audio_bias_labels_round_trip() {
        for label in AudioBias::LABELS {
            let code = AudioBias::from_label(label).unwrap();
            assert_eq!(code.label(), label);
        }
    }

    #[test]
    fn recoub_policy_labels_round_trip() {
        for label in RecoubPolicy::LABELS {
            let code = RecoubPolicy::from_label(label).unwrap();
            assert_eq!(code.label(), label);
        }
    }

    #[test]
    fn special_format_labels_round_trip() {
        for label in SpecialFormat::LABELS {
            let code = SpecialFormat::from_label(label).unwrap();
            assert_eq!(code.label(), label);
        }
    }

    #[test]
    fn unknown_label_is_an_error() {
        let err = Quality::from_label("Medium quality").unwrap_err();
        assert_eq!(err.table, "quality");
        assert_eq!(err.label, "Medium quality");
        assert!(RecoubPolicy::from_label("").is_err());
        assert!(AudioBias::from_label("prefer aac").is_err());
        assert!(SpecialFormat::from_label("Audio Only").is_err());
    }

    #[test]
    fn quality_stream_indices() {
        assert_eq!(Quality::Best.stream_index(), -1);
        assert_eq!(Quality::Worst.stream_index(), 0);
    }

    #[test]
    fn special_format_flag_triples_are_exhaustive() {
        assert_eq!(SpecialFormat::Regular.flags(), (false, false, false));
        assert_eq!(SpecialFormat::Share.flags(), (true, false, false));
        assert_eq!(SpecialFormat::VideoOnly.flags(), (false, true, false));
        assert_eq!(SpecialFormat::AudioOnly.flags(), (false, false, true));

        for label in SpecialFormat::LABELS {
            let code = SpecialFormat::from_label(label).unwrap();
            let (share, video_only, audio_only) = code.flags();
            assert_eq!(
                SpecialFormat::from_flags(share, video_only, audio_only),
                Some(code)
            );
        }
    }

    #[test]
    fn conflicting_flag_triples_are_unrepresentable() {
        assert_eq!(SpecialFormat::from_flags(true, true, false), None);
        assert_eq!(SpecialFormat::from_flags(true, false, true), None);
        assert_eq!(SpecialFormat::from_flags(false, true, true), None);
        assert_eq!(SpecialFormat::from_flags(true, true, true), None);
    }
}
