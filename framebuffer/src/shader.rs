//! Full-screen quad program
//!
//! The vertex shader emits a four-vertex triangle strip from `gl_VertexID`,
//! so no vertex buffers are bound. Texture rows are flipped: pixel row 0
//! lands at the top of the window.

use cpf_common::{FramebufferError, FramebufferResult};
use glow::HasContext;

pub(crate) const VERTEX_SHADER_SRC: &str = r#"
#version 330 core
out vec2 TexCoord;

void main()
{
    vec3 vertices[4] = vec3[4](
        vec3(-1.0, -1.0, 0.0),
        vec3( 1.0, -1.0, 0.0),
        vec3(-1.0,  1.0, 0.0),
        vec3( 1.0,  1.0, 0.0)
    );

    vec2 texCoords[4] = vec2[4](
        vec2(0.0, 1.0),
        vec2(1.0, 1.0),
        vec2(0.0, 0.0),
        vec2(1.0, 0.0)
    );

    gl_Position = vec4(vertices[gl_VertexID], 1.0);
    TexCoord = texCoords[gl_VertexID];
}
"#;

pub(crate) const FRAGMENT_SHADER_SRC: &str = r#"
#version 330 core
out vec4 FragColor;
in vec2 TexCoord;
uniform sampler2D texture1;

void main()
{
    FragColor = texture(texture1, TexCoord);
}
"#;

/// Vertices drawn per frame (`TRIANGLE_STRIP`).
pub(crate) const QUAD_VERTEX_COUNT: i32 = 4;

fn stage_name(shader_type: u32) -> &'static str {
    match shader_type {
        glow::VERTEX_SHADER => "vertex",
        glow::FRAGMENT_SHADER => "fragment",
        _ => "unknown",
    }
}

fn compile_shader(
    gl: &glow::Context,
    source: &str,
    shader_type: u32,
) -> FramebufferResult<glow::Shader> {
    let stage = stage_name(shader_type);

    // SAFETY: the context is current; the shader handle is owned here and
    // deleted on failure.
    unsafe {
        let shader = gl
            .create_shader(shader_type)
            .map_err(|err| FramebufferError::Resource(format!("{stage} shader: {err}")))?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(FramebufferError::ShaderCompile { stage, log });
        }

        tracing::debug!(stage, "Compiled shader");
        Ok(shader)
    }
}

fn link_program(
    gl: &glow::Context,
    vertex_shader: glow::Shader,
    fragment_shader: glow::Shader,
) -> FramebufferResult<glow::Program> {
    // SAFETY: the context is current; both shaders compiled successfully and
    // are released once the link has been attempted.
    unsafe {
        let program = gl
            .create_program()
            .map_err(|err| FramebufferError::Resource(format!("program: {err}")))?;
        gl.attach_shader(program, vertex_shader);
        gl.attach_shader(program, fragment_shader);
        gl.link_program(program);

        let linked = gl.get_program_link_status(program);
        gl.detach_shader(program, vertex_shader);
        gl.detach_shader(program, fragment_shader);
        gl.delete_shader(vertex_shader);
        gl.delete_shader(fragment_shader);

        if !linked {
            let log = gl.get_program_info_log(program);
            gl.delete_program(program);
            return Err(FramebufferError::ProgramLink(log));
        }
        Ok(program)
    }
}

/// Compile and link the quad program.
pub(crate) fn build_quad_program(gl: &glow::Context) -> FramebufferResult<glow::Program> {
    let vertex_shader = compile_shader(gl, VERTEX_SHADER_SRC, glow::VERTEX_SHADER)?;
    let fragment_shader = match compile_shader(gl, FRAGMENT_SHADER_SRC, glow::FRAGMENT_SHADER) {
        Ok(shader) => shader,
        Err(err) => {
            // SAFETY: the vertex shader was created above and is not attached.
            unsafe { gl.delete_shader(vertex_shader) };
            return Err(err);
        }
    };
    link_program(gl, vertex_shader, fragment_shader)
}
