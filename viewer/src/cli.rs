//! CLI interface for cpf-viewer

use std::path::PathBuf;

use clap::Parser;
use cpf::ClearColor;

use crate::painters::PainterKind;

/// cpf viewer - paint test patterns into a CPU framebuffer window
#[derive(Parser, Debug)]
#[command(name = "cpf-viewer")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    CPF_WIDTH          Framebuffer width (default: 640)
    CPF_HEIGHT         Framebuffer height (default: 640)
    CPF_PAINTER        Demo painter (default: line)
    CPF_CLEAR_COLOR    Clear colour r,g,b[,a] (default: 0.3,0.4,0.7,1.0)
    CPF_TITLE          Window title (default: cpf)
    CPF_VSYNC          Sync swaps to the display (default: true)
    CPF_IMAGE          Image file for the image painter
    CPF_LOG_LEVEL      Log filter (default: info, falls back to RUST_LOG)
    CPF_LOG_DIR        Also write JSON-lines logs to this directory
"#)]
pub struct Cli {
    /// JSON config file
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Framebuffer width in pixels
    #[arg(long)]
    pub width: Option<usize>,

    /// Framebuffer height in pixels
    #[arg(long)]
    pub height: Option<usize>,

    /// Demo painter
    #[arg(long, short = 'p', value_enum)]
    pub painter: Option<PainterKind>,

    /// Clear colour as r,g,b[,a] in 0.0..=1.0
    #[arg(long)]
    pub clear_color: Option<ClearColor>,

    /// Window title
    #[arg(long)]
    pub title: Option<String>,

    /// Image file for the image painter
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Disable vsync
    #[arg(long)]
    pub no_vsync: bool,
}
