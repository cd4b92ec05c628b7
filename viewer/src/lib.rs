//! cpf viewer
//!
//! Opens a window and paints one of the demo test patterns into a
//! [`cpf::Framebuffer`] every frame.

#![warn(missing_docs)]

/// winit application driving the framebuffer
pub mod app;

/// CLI interface
pub mod cli;

/// Layered viewer configuration
pub mod config;

/// Logging initialisation
pub mod logging;

/// Demo painters
pub mod painters;

pub use app::run;
pub use config::ViewerConfig;
