//! CLI integration tests
//!
//! Tests for command-line interface parsing and behavior.

use clap::Parser;
use cpf::ClearColor;
use cpf_viewer::{cli::Cli, painters::PainterKind};

#[test]
fn test_version_available() {
    let result = Cli::try_parse_from(["cpf-viewer", "--version"]);
    assert!(result.is_err());
    let err = result.unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
}

#[test]
fn test_help_available() {
    let result = Cli::try_parse_from(["cpf-viewer", "--help"]);
    assert!(result.is_err());
    let err = result.unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}

#[test]
fn test_help_lists_environment_variables() {
    let err = Cli::try_parse_from(["cpf-viewer", "--help"]).unwrap_err();
    let help = err.to_string();
    assert!(help.contains("CPF_PAINTER"));
    assert!(help.contains("CPF_LOG_DIR"));
}

#[test]
fn test_no_args_leaves_everything_unset() {
    let cli = Cli::try_parse_from(["cpf-viewer"]).unwrap();
    assert!(cli.config.is_none());
    assert!(cli.width.is_none());
    assert!(cli.height.is_none());
    assert!(cli.painter.is_none());
    assert!(cli.clear_color.is_none());
    assert!(cli.title.is_none());
    assert!(cli.image.is_none());
    assert!(!cli.no_vsync);
}

#[test]
fn test_painter_parsing() {
    let cli = Cli::try_parse_from(["cpf-viewer", "--painter", "bands"]).unwrap();
    assert_eq!(cli.painter, Some(PainterKind::Bands));

    let cli = Cli::try_parse_from(["cpf-viewer", "-p", "alignment"]).unwrap();
    assert_eq!(cli.painter, Some(PainterKind::Alignment));
}

#[test]
fn test_unknown_painter_rejected() {
    let err = Cli::try_parse_from(["cpf-viewer", "--painter", "plasma"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
}

#[test]
fn test_size_and_title_parsing() {
    let cli = Cli::try_parse_from([
        "cpf-viewer",
        "--width",
        "320",
        "--height",
        "240",
        "--title",
        "demo",
        "--no-vsync",
    ])
    .unwrap();
    assert_eq!(cli.width, Some(320));
    assert_eq!(cli.height, Some(240));
    assert_eq!(cli.title.as_deref(), Some("demo"));
    assert!(cli.no_vsync);
}

#[test]
fn test_negative_width_rejected() {
    let result = Cli::try_parse_from(["cpf-viewer", "--width", "-5"]);
    assert!(result.is_err());
}

#[test]
fn test_clear_color_parsing() {
    let cli = Cli::try_parse_from(["cpf-viewer", "--clear-color", "0,0.5,1"]).unwrap();
    let expected = ClearColor::new([0.0, 0.5, 1.0, 1.0]).unwrap();
    assert_eq!(cli.clear_color, Some(expected));

    let cli = Cli::try_parse_from(["cpf-viewer", "--clear-color", "0.1,0.2,0.3,0.4"]).unwrap();
    assert_eq!(cli.clear_color.unwrap().rgba(), [0.1, 0.2, 0.3, 0.4]);
}

#[test]
fn test_clear_color_out_of_range_rejected() {
    let err = Cli::try_parse_from(["cpf-viewer", "--clear-color", "2,0,0"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
}

#[test]
fn test_clear_color_wrong_arity_rejected() {
    assert!(Cli::try_parse_from(["cpf-viewer", "--clear-color", "0.5"]).is_err());
    assert!(Cli::try_parse_from(["cpf-viewer", "--clear-color", "0,0,0,0,0"]).is_err());
}

#[test]
fn test_config_and_image_paths() {
    let cli = Cli::try_parse_from([
        "cpf-viewer",
        "-c",
        "viewer.json",
        "--painter",
        "image",
        "--image",
        "photo.png",
    ])
    .unwrap();
    assert_eq!(cli.config.unwrap().to_str(), Some("viewer.json"));
    assert_eq!(cli.painter, Some(PainterKind::Image));
    assert_eq!(cli.image.unwrap().to_str(), Some("photo.png"));
}
