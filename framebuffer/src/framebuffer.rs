//! Windowed framebuffer
//!
//! [`Framebuffer`] owns a window surface, a current OpenGL 3.3 core context
//! and the GL objects needed to present a CPU-painted pixel grid: a pixel
//! buffer object the painter writes into, a texture the buffer is uploaded
//! to, and a program that draws the texture across the whole window.

use std::num::NonZeroU32;

use cpf_common::{ClearColor, Dimensions, FramebufferError, FramebufferResult};
use glow::HasContext;
use glutin::{
    config::ConfigTemplateBuilder,
    context::{
        ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext as _,
        PossiblyCurrentContext, Version,
    },
    display::{GetGlDisplay as _, GlDisplay as _},
    surface::{GlSurface as _, Surface, SwapInterval, WindowSurface},
};
use glutin_winit::{DisplayBuilder, GlWindow as _};
use raw_window_handle::HasWindowHandle as _;
use winit::{dpi::PhysicalSize, event_loop::ActiveEventLoop, window::Window};

use crate::{
    config_picker,
    mapping::{MappedPixels, PixelBuffer},
    painter::Painter,
    pixel::PixelFormat,
    shader,
};

/// Optional framebuffer settings.
#[derive(Debug, Clone)]
pub struct FramebufferOptions {
    /// Colour the window is cleared to before the quad is drawn.
    /// Transparent black when unset.
    pub clear_color: Option<ClearColor>,
    /// Window title.
    pub title: Option<String>,
    /// Synchronise buffer swaps with the display refresh.
    pub vsync: bool,
}

impl Default for FramebufferOptions {
    fn default() -> Self {
        Self {
            clear_color: None,
            title: None,
            vsync: true,
        }
    }
}

/// A window whose contents are a CPU-painted pixel grid of `P`.
pub struct Framebuffer<P: PixelFormat> {
    // window surface handles
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,

    // opengl state
    dimensions: Dimensions,
    gl: glow::Context,
    pixel_buffer: PixelBuffer<P>,
    texture: glow::Texture,
    vao: glow::VertexArray,
    program: glow::Program,
}

impl<P: PixelFormat> Framebuffer<P> {
    /// Create a window of `dimensions` with default options.
    pub fn init(
        event_loop: &ActiveEventLoop,
        dimensions: Dimensions,
    ) -> FramebufferResult<(Window, Self)> {
        Self::init_with_options(event_loop, dimensions, FramebufferOptions::default())
    }

    /// Create a window of `dimensions` and the GL state to present into it.
    pub fn init_with_options(
        event_loop: &ActiveEventLoop,
        dimensions: Dimensions,
        options: FramebufferOptions,
    ) -> FramebufferResult<(Window, Self)> {
        let (window, surface, context, gl) = create_window(event_loop, dimensions, &options)?;
        tracing::debug!(%dimensions, "Created window and GL context");

        if options.vsync {
            if let Err(err) =
                surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::MIN))
            {
                tracing::warn!(error = %err, "Failed to enable vsync");
            }
        }

        let program = shader::build_quad_program(&gl)?;

        // SAFETY: the context created above is current on this thread.
        let vao = unsafe {
            let vao = gl
                .create_vertex_array()
                .map_err(|err| FramebufferError::Resource(format!("vertex array: {err}")))?;
            gl.bind_vertex_array(Some(vao));
            check_gl!(gl);
            vao
        };

        let pixel_buffer = PixelBuffer::<P>::create(&gl, dimensions.pixel_count())?;
        let texture = create_texture::<P>(&gl, dimensions)?;

        let [r, g, b, a] = options.clear_color.unwrap_or_default().rgba();
        // SAFETY: the context is current.
        unsafe {
            gl.clear_color(r, g, b, a);
            check_gl!(gl);
        }

        tracing::info!(%dimensions, pixels = pixel_buffer.len(), "Framebuffer initialized");

        Ok((
            window,
            Self {
                surface,
                context,
                dimensions,
                gl,
                pixel_buffer,
                texture,
                vao,
                program,
            },
        ))
    }

    /// Size of the pixel grid.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Paint one frame with `painter` and present it.
    pub fn draw<T>(&mut self, painter: &mut T) -> FramebufferResult<()>
    where
        T: Painter<Pixel = P> + ?Sized,
    {
        let gl = &self.gl;

        // SAFETY: the context is current.
        unsafe {
            gl.clear(glow::COLOR_BUFFER_BIT);
            check_gl!(gl);
        }

        // the mapping must be dropped (unmapped) before the upload below
        {
            let mut mapped = MappedPixels::map(gl, &self.pixel_buffer)?;
            painter.paint(mapped.as_mut());
        }

        let width = gl_size(self.dimensions.width())?;
        let height = gl_size(self.dimensions.height())?;

        // SAFETY: the context is current, the pixel buffer is unmapped and
        // holds exactly width * height pixels of P, matching the texture.
        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, Some(self.texture));
            check_gl!(gl);
            gl.bind_buffer(glow::PIXEL_UNPACK_BUFFER, Some(self.pixel_buffer.raw()));
            check_gl!(gl);

            gl.tex_sub_image_2d(
                glow::TEXTURE_2D,
                0,
                0,
                0,
                width,
                height,
                P::GL_FORMAT,
                P::GL_TYPE,
                glow::PixelUnpackData::BufferOffset(0),
            );
            check_gl!(gl);
            gl.bind_buffer(glow::PIXEL_UNPACK_BUFFER, None);

            gl.use_program(Some(self.program));
            check_gl!(gl);
            gl.bind_vertex_array(Some(self.vao));
            check_gl!(gl);
            gl.draw_arrays(glow::TRIANGLE_STRIP, 0, shader::QUAD_VERTEX_COUNT);
            check_gl!(gl);
        }

        self.surface
            .swap_buffers(&self.context)
            .map_err(|err| FramebufferError::Surface(format!("swap buffers: {err}")))
    }

    /// Follow a window resize. The pixel grid keeps its dimensions and is
    /// stretched over the new window size; zero-sized (minimised) windows
    /// are ignored.
    pub fn resize(&self, size: PhysicalSize<u32>) -> FramebufferResult<()> {
        let Some(viewport) = viewport_size(size)? else {
            tracing::debug!(?size, "Ignoring zero-sized resize");
            return Ok(());
        };

        self.surface
            .resize(&self.context, viewport.width, viewport.height);
        // SAFETY: the context is current.
        unsafe {
            self.gl.viewport(0, 0, viewport.gl_width, viewport.gl_height);
            check_gl!(self.gl);
        }
        tracing::debug!(
            width = viewport.gl_width,
            height = viewport.gl_height,
            "Resized surface"
        );
        Ok(())
    }
}

/// Window size in the forms the surface and the GL viewport take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Viewport {
    width: NonZeroU32,
    height: NonZeroU32,
    gl_width: i32,
    gl_height: i32,
}

/// `None` for a zero-sized (minimised) window.
fn viewport_size(size: PhysicalSize<u32>) -> FramebufferResult<Option<Viewport>> {
    let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
    else {
        return Ok(None);
    };

    let gl_width = i32::try_from(width.get())
        .map_err(|_| FramebufferError::Surface(format!("window width {width} too large")))?;
    let gl_height = i32::try_from(height.get())
        .map_err(|_| FramebufferError::Surface(format!("window height {height} too large")))?;

    Ok(Some(Viewport {
        width,
        height,
        gl_width,
        gl_height,
    }))
}

impl<P: PixelFormat> Drop for Framebuffer<P> {
    fn drop(&mut self) {
        // SAFETY: the context is still current (it is dropped after this
        // runs) and none of these objects is used afterwards.
        unsafe {
            self.gl.delete_program(self.program);
            self.gl.delete_texture(self.texture);
            self.gl.delete_buffer(self.pixel_buffer.raw());
            self.gl.delete_vertex_array(self.vao);
        }
        tracing::debug!("Framebuffer released");
    }
}

fn gl_size(value: usize) -> FramebufferResult<i32> {
    i32::try_from(value).map_err(|_| {
        FramebufferError::Resource(format!("texture side {value} exceeds the OpenGL limit"))
    })
}

type WindowAndContext = (
    Window,
    Surface<WindowSurface>,
    PossiblyCurrentContext,
    glow::Context,
);

fn create_window(
    event_loop: &ActiveEventLoop,
    dimensions: Dimensions,
    options: &FramebufferOptions,
) -> FramebufferResult<WindowAndContext> {
    let width = u32::try_from(dimensions.width())
        .map_err(|_| FramebufferError::Display(format!("window width {dimensions} too large")))?;
    let height = u32::try_from(dimensions.height())
        .map_err(|_| FramebufferError::Display(format!("window height {dimensions} too large")))?;

    let mut window_attributes =
        Window::default_attributes().with_inner_size(PhysicalSize { width, height });
    if let Some(title) = &options.title {
        window_attributes = window_attributes.with_title(title.clone());
    }

    let template = ConfigTemplateBuilder::new().with_alpha_size(8);
    let display_builder = DisplayBuilder::new().with_window_attributes(Some(window_attributes));

    let (window, gl_config) = display_builder
        .build(event_loop, template, config_picker::pick_config)
        .map_err(|err| FramebufferError::Display(err.to_string()))?;
    let window =
        window.ok_or_else(|| FramebufferError::Display("no window was created".to_string()))?;
    let display = gl_config.display();

    let surface_attributes = window
        .build_surface_attributes(Default::default())
        .map_err(|err| FramebufferError::Surface(format!("surface attributes: {err}")))?;
    // SAFETY: the window outlives the surface; both are owned by the caller
    // and the framebuffer drops the surface first.
    let surface = unsafe { display.create_window_surface(&gl_config, &surface_attributes) }
        .map_err(|err| FramebufferError::Surface(err.to_string()))?;

    let raw_window_handle = window
        .window_handle()
        .map_err(|err| FramebufferError::Context(format!("window handle: {err}")))?
        .as_raw();
    let context_attributes = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
        .with_profile(GlProfile::Core)
        .build(Some(raw_window_handle));
    // SAFETY: the raw window handle is valid for the lifetime of `window`.
    let not_current = unsafe { display.create_context(&gl_config, &context_attributes) }
        .map_err(|err| FramebufferError::Context(err.to_string()))?;
    let context = not_current
        .make_current(&surface)
        .map_err(|err| FramebufferError::Context(format!("make current: {err}")))?;

    // SAFETY: the context is current; symbols are resolved from its display.
    let gl = unsafe { glow::Context::from_loader_function_cstr(|s| display.get_proc_address(s)) };

    Ok((window, surface, context, gl))
}

fn create_texture<P: PixelFormat>(
    gl: &glow::Context,
    dimensions: Dimensions,
) -> FramebufferResult<glow::Texture> {
    let width = gl_size(dimensions.width())?;
    let height = gl_size(dimensions.height())?;

    // SAFETY: the context is current; immutable storage is allocated without
    // client data.
    unsafe {
        let texture = gl
            .create_texture()
            .map_err(|err| FramebufferError::Resource(format!("texture: {err}")))?;
        gl.bind_texture(glow::TEXTURE_2D, Some(texture));
        check_gl!(gl);
        gl.tex_storage_2d(glow::TEXTURE_2D, 1, P::INTERNAL_FORMAT, width, height);
        check_gl!(gl);
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_MIN_FILTER,
            glow::NEAREST as i32,
        );
        check_gl!(gl);
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_MAG_FILTER,
            glow::LINEAR as i32,
        );
        check_gl!(gl);
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_WRAP_S,
            glow::CLAMP_TO_EDGE as i32,
        );
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_WRAP_T,
            glow::CLAMP_TO_EDGE as i32,
        );
        check_gl!(gl);

        tracing::debug!(
            width,
            height,
            internal_format = P::INTERNAL_FORMAT,
            "Created texture"
        );
        Ok(texture)
    }
}
