//! cpf: CPU pixel framebuffer
//!
//! Paint pixels on the CPU, present them through OpenGL. Each frame the
//! framebuffer maps a pixel buffer object into client memory, hands the
//! slice to a [`Painter`], uploads the result into a texture and draws it on
//! a full-screen quad.

#![warn(missing_docs)]

#[macro_use]
mod gl_check;

/// GL config selection
pub mod config_picker;

/// Windowed framebuffer
pub mod framebuffer;

/// Mapped pixel buffer guard
mod mapping;

/// Painter trait and adapters
pub mod painter;

/// Pixel formats
pub mod pixel;

/// Quad shaders
mod shader;

/// Frame timing statistics
pub mod stats;

pub use cpf_common::{ClearColor, Dimensions, FramebufferError, FramebufferResult};
pub use framebuffer::{Framebuffer, FramebufferOptions};
pub use gl_check::error_name;
pub use painter::{FnPainter, Painter};
pub use pixel::{PixelFormat, Rgba8, RgbaF32};
pub use stats::{FrameReport, FrameStats};
