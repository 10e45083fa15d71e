//! Sources command: preview how free-text fields parse into sources.

use anyhow::Result;
use clap::Args;
use loopdl_core::input::{collect_sources, RawFields};
use loopdl_core::link::HostLinkMapper;

/// Free-text input fields, comma-separated per field.
#[derive(Debug, Default, Args)]
pub struct FieldArgs {
    /// Direct item URLs, comma-separated.
    #[arg(long, default_value = "")]
    pub urls: String,

    /// Item identifiers, comma-separated.
    #[arg(long, default_value = "")]
    pub ids: String,

    /// Link-list file paths, comma-separated.
    #[arg(long, default_value = "")]
    pub lists: String,

    /// Channel names, comma-separated.
    #[arg(long, default_value = "")]
    pub channels: String,

    /// Tag names, comma-separated.
    #[arg(long, default_value = "")]
    pub tags: String,

    /// Search terms, comma-separated.
    #[arg(long, default_value = "")]
    pub searches: String,

    /// Community names, comma-separated.
    #[arg(long, default_value = "")]
    pub communities: String,

    /// Story names, comma-separated.
    #[arg(long, default_value = "")]
    pub stories: String,

    /// Include the hot section.
    #[arg(long)]
    pub hot: bool,

    /// Number of independent random-category batches.
    #[arg(long, default_value = "0", value_name = "N")]
    pub random: u32,
}

impl FieldArgs {
    pub fn to_fields(&self) -> RawFields {
        RawFields {
            urls: self.urls.clone(),
            ids: self.ids.clone(),
            lists: self.lists.clone(),
            channels: self.channels.clone(),
            tags: self.tags.clone(),
            searches: self.searches.clone(),
            communities: self.communities.clone(),
            stories: self.stories.clone(),
            hot_section: self.hot,
            random_count: self.random,
        }
    }
}

#[derive(Debug, Args)]
pub struct SourceArgs {
    #[command(flatten)]
    pub fields: FieldArgs,
}

/// Parse the fields and print one line per resulting source.
pub fn run_sources(args: &SourceArgs) -> Result<i32> {
    let sources = collect_sources(&args.fields.to_fields(), &HostLinkMapper::default());
    if sources.is_empty() {
        println!("no input sources");
        return Ok(0);
    }
    for source in &sources {
        println!("{:<12} {}", source.kind(), source.payload().unwrap_or(""));
    }
    Ok(0)
}
