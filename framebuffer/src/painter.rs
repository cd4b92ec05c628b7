//! Painter trait and adapters

use std::marker::PhantomData;

/// Fills the framebuffer's pixels once per frame.
///
/// `pixels` always holds exactly `width * height` elements in row-major
/// order, row 0 at the top of the window. Its contents are whatever the
/// previous frame left behind; painters that do not overwrite every pixel
/// keep the rest.
pub trait Painter {
    /// Pixel type this painter writes.
    type Pixel;

    /// Paint one frame.
    fn paint(&mut self, pixels: &mut [Self::Pixel]);
}

impl<T: Painter + ?Sized> Painter for &mut T {
    type Pixel = T::Pixel;

    fn paint(&mut self, pixels: &mut [Self::Pixel]) {
        (**self).paint(pixels);
    }
}

impl<T: Painter + ?Sized> Painter for Box<T> {
    type Pixel = T::Pixel;

    fn paint(&mut self, pixels: &mut [Self::Pixel]) {
        (**self).paint(pixels);
    }
}

/// Closure adapter.
///
/// ```
/// use cpf::{FnPainter, Painter, Rgba8};
///
/// let mut fill = FnPainter::new(|pixels: &mut [Rgba8]| pixels.fill([0, 0, 0, 255]));
/// let mut pixels = vec![[1u8; 4]; 4];
/// fill.paint(&mut pixels);
/// assert!(pixels.iter().all(|p| *p == [0, 0, 0, 255]));
/// ```
pub struct FnPainter<P, F> {
    paint: F,
    pixel: PhantomData<fn(&mut [P])>,
}

impl<P, F> FnPainter<P, F>
where
    F: FnMut(&mut [P]),
{
    /// Wrap `paint` as a [`Painter`].
    pub fn new(paint: F) -> Self {
        Self {
            paint,
            pixel: PhantomData,
        }
    }
}

impl<P, F> Painter for FnPainter<P, F>
where
    F: FnMut(&mut [P]),
{
    type Pixel = P;

    fn paint(&mut self, pixels: &mut [P]) {
        (self.paint)(pixels);
    }
}
