//! Resolve command: raw option values into the engine command.

use anyhow::Result;
use clap::Args;
use loopdl_core::config::{self, Defaults};
use loopdl_core::exit;
use loopdl_core::link::HostLinkMapper;
use loopdl_core::resolve::{resolve, RawOptions, ResolveError};

use super::sources::FieldArgs;

#[derive(Debug, Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub fields: FieldArgs,

    /// Video quality label (e.g. "Best quality").
    #[arg(long, value_name = "LABEL")]
    pub video_quality: Option<String>,

    /// Audio quality label (e.g. "Worst quality").
    #[arg(long, value_name = "LABEL")]
    pub audio_quality: Option<String>,

    /// Audio format bias label (e.g. "Prefer AAC").
    #[arg(long, value_name = "LABEL")]
    pub audio_bias: Option<String>,

    /// Recoub policy label (e.g. "Only Recoubs").
    #[arg(long, value_name = "LABEL")]
    pub recoubs: Option<String>,

    /// Special format label (e.g. "Audio only").
    #[arg(long, value_name = "LABEL")]
    pub special: Option<String>,

    /// Output directory.
    #[arg(long)]
    pub path: Option<String>,

    /// Number of connections the engine may open.
    #[arg(long)]
    pub connections: Option<u32>,

    /// Reconnect attempts after connection loss (<0 for infinite).
    #[arg(long)]
    pub retries: Option<i32>,

    /// Maximum number of items to parse.
    #[arg(long, value_name = "N")]
    pub limit_num: Option<u32>,

    /// Maximum output duration (FFmpeg syntax).
    #[arg(long)]
    pub duration: Option<String>,

    /// Archive file for dedup across runs.
    #[arg(long)]
    pub archive: Option<String>,

    /// Output naming template.
    #[arg(long)]
    pub name_template: Option<String>,

    /// Print the full command description as JSON.
    #[arg(long)]
    pub json: bool,
}

impl ResolveArgs {
    fn apply(&self, raw: &mut RawOptions) {
        raw.fields = self.fields.to_fields();
        let overrides = [
            (&self.video_quality, &mut raw.video_quality),
            (&self.audio_quality, &mut raw.audio_quality),
            (&self.audio_bias, &mut raw.audio_bias),
            (&self.recoubs, &mut raw.recoubs),
            (&self.special, &mut raw.special),
            (&self.path, &mut raw.path),
            (&self.name_template, &mut raw.name_template),
        ];
        for (flag, slot) in overrides {
            if let Some(value) = flag {
                *slot = value.clone();
            }
        }
        if let Some(connections) = self.connections {
            raw.connections = connections;
        }
        if let Some(retries) = self.retries {
            raw.retries = retries;
        }
        if let Some(limit) = self.limit_num {
            raw.max_items = Some(limit);
        }
        if let Some(duration) = &self.duration {
            raw.duration = Some(duration.clone());
        }
        if let Some(archive) = &self.archive {
            raw.archive = Some(archive.clone());
        }
    }
}

/// Layer the defaults, apply the flag overrides, and run the pipeline.
pub fn run_resolve(args: &ResolveArgs) -> Result<i32> {
    let defaults = Defaults::load(&config::default_config_sources());
    tracing::debug!("loaded defaults: {:?}", defaults);

    // The raw option set is fully seeded before config errors abort:
    // the presentation surface must be constructible either way.
    let mut raw = RawOptions::from_defaults(&defaults);
    args.apply(&mut raw);

    if defaults.has_errors() {
        for error in &defaults.errors {
            eprintln!("loopdl: {}", error);
        }
        return Ok(exit::OPT);
    }

    let command = match resolve(&raw, &HostLinkMapper::default()) {
        Ok(command) => command,
        Err(err @ ResolveError::ResolutionCapOrder { .. }) => {
            eprintln!("loopdl: {}", err);
            return Ok(exit::OPT);
        }
        Err(err) => return Err(err.into()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&command)?);
        return Ok(0);
    }

    println!("sources ({}):", command.sources.len());
    for source in &command.sources {
        println!("  {:<12} {}", source.kind(), source.payload().unwrap_or(""));
    }
    println!("archive entries: {}", command.archive.len());
    println!("output dir: {}", command.path.display());
    println!(
        "video: {:?} (caps {}..{}), audio: {:?} ({:?})",
        command.video_quality,
        command.video_min.as_str(),
        command.video_max.as_str(),
        command.audio_quality,
        command.audio_bias,
    );
    println!(
        "recoubs: {}, share: {}, video only: {}, audio only: {}",
        command.recoubs.as_str(),
        command.share,
        command.video_only,
        command.audio_only,
    );
    println!(
        "container: {}, template: {}",
        command.container.as_str(),
        command.name_template.as_deref().unwrap_or("(engine default)"),
    );
    Ok(0)
}
