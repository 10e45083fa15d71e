//! Defaults command: show the effective layered snapshot.

use anyhow::Result;
use loopdl_core::config::{self, Defaults};

pub fn run_defaults() -> Result<i32> {
    let sources = config::default_config_sources();
    let defaults = Defaults::load(&sources);

    println!("config sources (first match wins per key):");
    for source in &sources {
        let note = if source.exists() { "" } else { " (absent)" };
        println!("  {}{}", source.display(), note);
    }

    println!("prompt: {:?}", defaults.prompt);
    println!("path: {}", defaults.path.display());
    println!("keep streams: {}", defaults.keep_streams);
    println!("repeat: {}", defaults.repeat);
    println!("duration: {}", defaults.duration.as_deref().unwrap_or("(none)"));
    println!("connections: {}", defaults.connections);
    println!("retries: {}", defaults.retries);
    match defaults.max_items {
        Some(n) => println!("max items: {}", n),
        None => println!("max items: (unlimited)"),
    }
    println!("video quality: {}", defaults.video_quality.label());
    println!("audio quality: {}", defaults.audio_quality.label());
    println!(
        "video caps: {}..{}",
        defaults.video_min.as_str(),
        defaults.video_max.as_str()
    );
    println!("audio bias: {}", defaults.audio_bias.label());
    println!("special format: {}", defaults.special.label());
    println!("recoubs: {}", defaults.recoubs.label());
    println!("container: {}", defaults.container.as_str());
    println!("name template: {}", defaults.name_template);
    println!("tag separator: {:?}", defaults.tag_sep);
    println!(
        "fallback char: {:?}",
        defaults.fallback_char.as_deref().unwrap_or("")
    );
    match &defaults.archive {
        Some(path) => println!("archive: {}", path.display()),
        None => println!("archive: (none)"),
    }

    if defaults.has_errors() {
        println!("errors:");
        for error in &defaults.errors {
            println!("  {}", error);
        }
    }
    Ok(0)
}
