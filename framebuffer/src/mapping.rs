//! Pixel buffer object and its client-memory mapping
//!
//! [`MappedPixels`] borrows both the GL context and the [`PixelBuffer`], so the
//! mapping cannot outlive either and must be dropped (unmapped) before the
//! buffer is used as an upload source.

use std::marker::PhantomData;

use cpf_common::{FramebufferError, FramebufferResult};
use glow::HasContext;

use crate::pixel::PixelFormat;

/// A `PIXEL_UNPACK_BUFFER` holding exactly `len` pixels of `P`.
pub(crate) struct PixelBuffer<P> {
    raw: glow::Buffer,
    len: usize,
    byte_len: i32,
    format: PhantomData<P>,
}

impl<P: PixelFormat> PixelBuffer<P> {
    /// Allocate a stream-draw buffer for `len` pixels.
    pub(crate) fn create(gl: &glow::Context, len: usize) -> FramebufferResult<Self> {
        let byte_len = P::byte_len(len)
            .and_then(|bytes| i32::try_from(bytes).ok())
            .ok_or_else(|| {
                FramebufferError::Resource(format!("pixel buffer: {len} pixels is too large"))
            })?;

        // SAFETY: the context is current on this thread; the buffer is bound
        // before its storage is allocated.
        let raw = unsafe {
            let raw = gl.create_buffer().map_err(FramebufferError::Resource)?;
            gl.bind_buffer(glow::PIXEL_UNPACK_BUFFER, Some(raw));
            check_gl!(gl);
            gl.buffer_data_size(glow::PIXEL_UNPACK_BUFFER, byte_len, glow::STREAM_DRAW);
            check_gl!(gl);
            gl.bind_buffer(glow::PIXEL_UNPACK_BUFFER, None);
            raw
        };

        tracing::debug!(pixels = len, bytes = byte_len, "Created pixel buffer");
        Ok(Self {
            raw,
            len,
            byte_len,
            format: PhantomData,
        })
    }
}

impl<P> PixelBuffer<P> {
    pub(crate) fn raw(&self) -> glow::Buffer {
        self.raw
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }
}

/// The pixel buffer mapped into client memory. Unmapped on drop.
pub(crate) struct MappedPixels<'gl, 'buf, P> {
    gl: &'gl glow::Context,
    buffer: &'buf PixelBuffer<P>,
    ptr: *mut P,
}

impl<'gl, 'buf, P: PixelFormat> MappedPixels<'gl, 'buf, P> {
    /// Map the whole buffer for reading and writing.
    pub(crate) fn map(
        gl: &'gl glow::Context,
        buffer: &'buf PixelBuffer<P>,
    ) -> FramebufferResult<Self> {
        // SAFETY: the context is current; the range is exactly the storage
        // allocated in `PixelBuffer::create`.
        let raw = unsafe {
            gl.bind_buffer(glow::PIXEL_UNPACK_BUFFER, Some(buffer.raw));
            check_gl!(gl);
            let raw = gl.map_buffer_range(
                glow::PIXEL_UNPACK_BUFFER,
                0,
                buffer.byte_len,
                glow::MAP_READ_BIT | glow::MAP_WRITE_BIT,
            );
            check_gl!(gl);
            raw
        };

        if raw.is_null() {
            return Err(FramebufferError::BufferMap);
        }

        // Construct the guard before checking alignment so a misaligned
        // mapping is still unmapped.
        let mapped = Self {
            gl,
            buffer,
            ptr: raw.cast::<P>(),
        };
        if mapped.ptr.align_offset(std::mem::align_of::<P>()) != 0 {
            return Err(FramebufferError::MisalignedMapping {
                align: std::mem::align_of::<P>(),
            });
        }
        Ok(mapped)
    }
}

impl<P> AsMut<[P]> for MappedPixels<'_, '_, P> {
    fn as_mut(&mut self) -> &mut [P] {
        // SAFETY: `ptr` is non-null, aligned for `P` (checked in `map`) and
        // covers `len * size_of::<P>()` mapped bytes. `P` is a sealed
        // plain-old-data pixel type valid for any bit pattern. The mapping is
        // exclusively borrowed for the lifetime of the returned slice.
        unsafe { std::slice::from_raw_parts_mut(self.ptr, self.buffer.len) }
    }
}

impl<P> Drop for MappedPixels<'_, '_, P> {
    fn drop(&mut self) {
        // SAFETY: the buffer is currently mapped by this guard; unmapping
        // hands the written pixels back to the GL.
        unsafe {
            self.gl
                .bind_buffer(glow::PIXEL_UNPACK_BUFFER, Some(self.buffer.raw));
            self.gl.unmap_buffer(glow::PIXEL_UNPACK_BUFFER);
            check_gl!(self.gl);
        }
    }
}
