//! cpf common library
//!
//! Geometry, colour, error and configuration helpers shared by the
//! framebuffer library and the viewer.

#![warn(missing_docs)]

/// Framebuffer geometry and colour types
pub mod types;

/// Configuration helpers (environment variables)
pub mod config;

/// Error types
pub mod error;

pub use error::{
    CommonError, CommonResult, FramebufferError, FramebufferResult, ViewerError, ViewerResult,
};
pub use types::{ClearColor, Dimensions};
