use clap::Parser;
use tracing::level_filters::LevelFilter;

use super::Args;

#[test]
fn defaults_point_at_local_proxy() {
    let args = Args::try_parse_from(["bricklook"]).expect("parse");
    assert_eq!(args.api, "http://127.0.0.1:5000");
    assert_eq!(args.log_level, LevelFilter::INFO);
    assert!(!args.log_stdout);
}

#[test]
fn accepts_api_and_log_overrides() {
    let args = Args::try_parse_from([
        "bricklook",
        "--api",
        "https://bricks.example.com",
        "--log-level",
        "debug",
        "--log-file",
        "/tmp/bl.log",
        "--log-stdout",
    ])
    .expect("parse");

    assert_eq!(args.api, "https://bricks.example.com");
    assert_eq!(args.log_level, LevelFilter::DEBUG);
    assert_eq!(args.log_file.to_str(), Some("/tmp/bl.log"));
    assert!(args.log_stdout);
}

#[test]
fn rejects_unknown_log_level() {
    assert!(Args::try_parse_from(["bricklook", "--log-level", "loud"]).is_err());
}
