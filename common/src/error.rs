//! Error types
//!
//! Unified error types (thiserror)

use thiserror::Error;

/// Common layer error type
#[derive(Debug, Error)]
pub enum CommonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Framebuffer (window + OpenGL) error type
#[derive(Debug, Error)]
pub enum FramebufferError {
    /// Common layer error
    #[error(transparent)]
    Common(#[from] CommonError),

    /// Window or GL display creation failed
    #[error("Failed to create display: {0}")]
    Display(String),

    /// Window surface creation, resize or swap failed
    #[error("Surface error: {0}")]
    Surface(String),

    /// GL context creation or activation failed
    #[error("Context error: {0}")]
    Context(String),

    /// Shader stage failed to compile
    #[error("Failed to compile {stage} shader: {log}")]
    ShaderCompile {
        /// Shader stage name ("vertex" / "fragment")
        stage: &'static str,
        /// Driver info log
        log: String,
    },

    /// Shader program failed to link
    #[error("Failed to link shader program: {0}")]
    ProgramLink(String),

    /// A GL object could not be created
    #[error("Failed to create GL {0}")]
    Resource(String),

    /// The pixel buffer could not be mapped into client memory
    #[error("Failed to map pixel buffer to client memory")]
    BufferMap,

    /// The mapped pointer is not aligned for the pixel type
    #[error("Mapped pixel buffer is not aligned to {align} bytes")]
    MisalignedMapping {
        /// Required alignment
        align: usize,
    },
}

/// Viewer application error type
#[derive(Debug, Error)]
pub enum ViewerError {
    /// Common layer error
    #[error(transparent)]
    Common(#[from] CommonError),

    /// Framebuffer error
    #[error(transparent)]
    Framebuffer(#[from] FramebufferError),

    /// Event loop error
    #[error("Event loop error: {0}")]
    EventLoop(String),

    /// Image decoding error
    #[error("Image error: {0}")]
    Image(String),

    /// Logging initialisation error
    #[error("Logging error: {0}")]
    Logging(String),

    /// The image painter was selected without an image path
    #[error("The image painter requires an image path (--image or CPF_IMAGE)")]
    MissingImagePath,
}

/// Result type alias (Common)
pub type CommonResult<T> = Result<T, CommonError>;

/// Result type alias (Framebuffer)
pub type FramebufferResult<T> = Result<T, FramebufferError>;

/// Result type alias (Viewer)
pub type ViewerResult<T> = Result<T, ViewerError>;
