//! OpenGL error reporting
//!
//! GL errors are sticky flags queried after the fact. `check_gl!` drains them
//! after a call and logs each one with the call site; it never aborts the
//! frame.

use glow::HasContext;

/// Upper bound on errors drained per check; a lost context can report forever.
const MAX_DRAINED_ERRORS: usize = 16;

/// Drain pending GL errors after the call at `file:line`.
macro_rules! check_gl {
    ($gl:expr) => {
        $crate::gl_check::report_errors(&$gl, file!(), line!())
    };
}

/// Human readable name of a GL error code.
pub fn error_name(code: u32) -> &'static str {
    match code {
        glow::INVALID_ENUM => "GL_INVALID_ENUM",
        glow::INVALID_VALUE => "GL_INVALID_VALUE",
        glow::INVALID_OPERATION => "GL_INVALID_OPERATION",
        glow::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        glow::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        glow::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        glow::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        _ => "Unknown Error",
    }
}

/// Log every pending error; returns how many were found.
pub(crate) fn report_errors(gl: &glow::Context, file: &'static str, line: u32) -> usize {
    drain_errors(
        // SAFETY: glGetError has no preconditions beyond a current context,
        // which every caller holds.
        || unsafe { gl.get_error() },
        |code| {
            tracing::error!(code, name = error_name(code), file, line, "OpenGL error");
        },
    )
}

fn drain_errors(mut next: impl FnMut() -> u32, mut on_error: impl FnMut(u32)) -> usize {
    let mut count = 0;
    while count < MAX_DRAINED_ERRORS {
        let code = next();
        if code == glow::NO_ERROR {
            break;
        }
        on_error(code);
        count += 1;
    }
    count
}
