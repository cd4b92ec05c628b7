//! Layered viewer configuration
//!
//! Resolution order, later layers winning: built-in defaults, an optional
//! JSON file, `CPF_*` environment variables, command-line flags.

use std::{
    fs,
    path::{Path, PathBuf},
};

use cpf::{ClearColor, Dimensions, FramebufferOptions};
use cpf_common::{
    config::{get_env, get_env_flag, get_env_parse},
    CommonError, CommonResult,
};
use serde::{Deserialize, Serialize};

use crate::{cli::Cli, painters::PainterKind};

/// Framebuffer width (pixels)
pub const WIDTH_ENV: &str = "CPF_WIDTH";
/// Framebuffer height (pixels)
pub const HEIGHT_ENV: &str = "CPF_HEIGHT";
/// Demo painter
pub const PAINTER_ENV: &str = "CPF_PAINTER";
/// Clear colour (`r,g,b[,a]`)
pub const CLEAR_COLOR_ENV: &str = "CPF_CLEAR_COLOR";
/// Window title
pub const TITLE_ENV: &str = "CPF_TITLE";
/// Vsync flag
pub const VSYNC_ENV: &str = "CPF_VSYNC";
/// Image for the image painter
pub const IMAGE_ENV: &str = "CPF_IMAGE";

/// Viewer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Framebuffer width in pixels (default: 640)
    #[serde(default = "default_width")]
    pub width: usize,

    /// Framebuffer height in pixels (default: 640)
    #[serde(default = "default_height")]
    pub height: usize,

    /// Demo painter (default: line)
    #[serde(default)]
    pub painter: PainterKind,

    /// Clear colour (default: [0.3, 0.4, 0.7, 1.0])
    #[serde(default = "default_clear_color")]
    pub clear_color: ClearColor,

    /// Window title (default: "cpf")
    #[serde(default = "default_title")]
    pub title: String,

    /// Synchronise with the display refresh (default: true)
    #[serde(default = "default_vsync")]
    pub vsync: bool,

    /// Image file for the image painter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<PathBuf>,
}

fn default_width() -> usize {
    640
}

fn default_height() -> usize {
    640
}

fn default_clear_color() -> ClearColor {
    ClearColor::new([0.3, 0.4, 0.7, 1.0]).unwrap_or_default()
}

fn default_title() -> String {
    "cpf".to_string()
}

fn default_vsync() -> bool {
    true
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            painter: PainterKind::default(),
            clear_color: default_clear_color(),
            title: default_title(),
            vsync: default_vsync(),
            image: None,
        }
    }
}

impl ViewerConfig {
    /// Read a JSON config file; missing fields take their defaults.
    pub fn from_file(path: &Path) -> CommonResult<Self> {
        let content = fs::read_to_string(path).map_err(|err| {
            CommonError::Config(format!("failed to read {}: {err}", path.display()))
        })?;
        let config = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Apply `CPF_*` environment overrides.
    pub fn apply_env(&mut self) -> CommonResult<()> {
        if let Some(width) = get_env_parse(WIDTH_ENV)? {
            self.width = width;
        }
        if let Some(height) = get_env_parse(HEIGHT_ENV)? {
            self.height = height;
        }
        if let Some(painter) = get_env_parse(PAINTER_ENV)? {
            self.painter = painter;
        }
        if let Some(clear_color) = get_env_parse(CLEAR_COLOR_ENV)? {
            self.clear_color = clear_color;
        }
        if let Some(title) = get_env(TITLE_ENV) {
            self.title = title;
        }
        if let Some(vsync) = get_env_flag(VSYNC_ENV)? {
            self.vsync = vsync;
        }
        if let Some(image) = get_env(IMAGE_ENV) {
            self.image = Some(PathBuf::from(image));
        }
        Ok(())
    }

    /// Apply command-line overrides.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(width) = cli.width {
            self.width = width;
        }
        if let Some(height) = cli.height {
            self.height = height;
        }
        if let Some(painter) = cli.painter {
            self.painter = painter;
        }
        if let Some(clear_color) = cli.clear_color {
            self.clear_color = clear_color;
        }
        if let Some(title) = &cli.title {
            self.title = title.clone();
        }
        if cli.no_vsync {
            self.vsync = false;
        }
        if let Some(image) = &cli.image {
            self.image = Some(image.clone());
        }
    }

    /// Resolve every layer for `cli`.
    pub fn resolve(cli: &Cli) -> CommonResult<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env()?;
        config.apply_cli(cli);
        config.dimensions()?;
        Ok(config)
    }

    /// Validated framebuffer size.
    pub fn dimensions(&self) -> CommonResult<Dimensions> {
        Dimensions::new(self.width, self.height)
    }

    /// Framebuffer options derived from this config.
    pub fn framebuffer_options(&self) -> FramebufferOptions {
        FramebufferOptions {
            clear_color: Some(self.clear_color),
            title: Some(self.title.clone()),
            vsync: self.vsync,
        }
    }
}
