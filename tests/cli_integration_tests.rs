// tests/cli_integration_tests.rs
//! Command line flags flowing into a running viewer

use clap::Parser;
use fontview::viewer::FontViewer;
use fontview::CliArgs;
use std::ffi::OsStr;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_flags_select_app_dir_and_seed_fonts() {
    let app = TempDir::new().unwrap();
    let seeds = Path::new(env!("CARGO_MANIFEST_DIR")).join("default_fonts");

    let args = CliArgs::parse_from([
        OsStr::new("fontview"),
        OsStr::new("--app-dir"),
        app.path().as_os_str(),
        OsStr::new("--default-fonts"),
        seeds.as_os_str(),
    ]);
    args.validate().unwrap();

    let config = args.to_config().unwrap();
    let viewer = FontViewer::startup(&config);

    assert!(app.path().join("fonts").join("DejaVuSans.ttf").is_file());
    let names: Vec<&str> = viewer.entries().iter().map(|e| e.display_name()).collect();
    assert_eq!(names, vec!["DejaVuSans.ttf"]);
}

#[test]
fn test_app_dir_that_is_a_file_is_rejected() {
    let app = TempDir::new().unwrap();
    let file = app.path().join("not-a-dir");
    std::fs::write(&file, b"x").unwrap();

    let args = CliArgs::parse_from([OsStr::new("fontview"), OsStr::new("--app-dir"), file.as_os_str()]);
    assert!(args.validate().is_err());
}
