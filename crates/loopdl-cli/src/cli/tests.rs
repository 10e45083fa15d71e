//! CLI parse tests.

use super::{Cli, CliCommand};
use clap::Parser;

fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}

#[test]
fn parse_resolve_with_fields_and_overrides() {
    let command = parse(&[
        "loopdl",
        "resolve",
        "--urls",
        "https://coub.com/view/abc,https://coub.com/tags/cats",
        "--random",
        "2",
        "--hot",
        "--recoubs",
        "Only Recoubs",
        "--connections",
        "8",
    ]);
    match command {
        CliCommand::Resolve(args) => {
            assert_eq!(
                args.fields.urls,
                "https://coub.com/view/abc,https://coub.com/tags/cats"
            );
            assert_eq!(args.fields.random, 2);
            assert!(args.fields.hot);
            assert_eq!(args.recoubs.as_deref(), Some("Only Recoubs"));
            assert_eq!(args.connections, Some(8));
            assert!(!args.json);
        }
        other => panic!("expected resolve, got {:?}", other),
    }
}

#[test]
fn parse_resolve_defaults_to_empty_fields() {
    match parse(&["loopdl", "resolve"]) {
        CliCommand::Resolve(args) => {
            assert_eq!(args.fields.urls, "");
            assert_eq!(args.fields.random, 0);
            assert!(!args.fields.hot);
            assert_eq!(args.video_quality, None);
        }
        other => panic!("expected resolve, got {:?}", other),
    }
}

#[test]
fn parse_sources() {
    match parse(&["loopdl", "sources", "--tags", "cats,dogs"]) {
        CliCommand::Sources(args) => assert_eq!(args.fields.tags, "cats,dogs"),
        other => panic!("expected sources, got {:?}", other),
    }
}

#[test]
fn parse_defaults() {
    assert!(matches!(parse(&["loopdl", "defaults"]), CliCommand::Defaults));
}

#[test]
fn unknown_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["loopdl", "download"]).is_err());
}
