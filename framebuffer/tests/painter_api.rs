//! Painter API tests
//!
//! Exercise the public painter surface against plain CPU buffers sized the
//! way the framebuffer sizes its mapped pixel buffer.

use cpf::{Dimensions, FnPainter, Painter, PixelFormat, Rgba8, RgbaF32};

fn mapped_buffer<P: PixelFormat>(dimensions: Dimensions) -> Vec<P> {
    vec![P::default(); dimensions.pixel_count()]
}

struct Checkerboard {
    dimensions: Dimensions,
    cell: usize,
}

impl Painter for Checkerboard {
    type Pixel = Rgba8;

    fn paint(&mut self, pixels: &mut [Rgba8]) {
        for (index, pixel) in pixels.iter_mut().enumerate() {
            let Some((x, y)) = self.dimensions.position_of(index) else {
                continue;
            };
            let dark = (x / self.cell + y / self.cell) % 2 == 0;
            *pixel = if dark {
                [0, 0, 0, 255]
            } else {
                [255, 255, 255, 255]
            };
        }
    }
}

#[test]
fn test_row_major_layout() {
    let dimensions = Dimensions::new(4, 2).unwrap();
    let mut pixels = mapped_buffer::<Rgba8>(dimensions);
    let mut painter = Checkerboard {
        dimensions,
        cell: 1,
    };
    painter.paint(&mut pixels);

    let top_left = dimensions.index_of(0, 0).unwrap();
    let below = dimensions.index_of(0, 1).unwrap();
    assert_eq!(pixels[top_left], [0, 0, 0, 255]);
    assert_eq!(pixels[top_left + 1], [255, 255, 255, 255]);
    assert_eq!(pixels[below], [255, 255, 255, 255]);
}

#[test]
fn test_trait_object_painters_share_a_buffer() {
    let dimensions = Dimensions::new(8, 8).unwrap();
    let mut pixels = mapped_buffer::<Rgba8>(dimensions);
    let mut painters: Vec<Box<dyn Painter<Pixel = Rgba8>>> = vec![
        Box::new(Checkerboard {
            dimensions,
            cell: 2,
        }),
        Box::new(FnPainter::new(|pixels: &mut [Rgba8]| {
            for pixel in pixels.iter_mut() {
                pixel[3] = 128;
            }
        })),
    ];

    for painter in painters.iter_mut() {
        painter.paint(&mut pixels);
    }

    assert!(pixels.iter().all(|pixel| pixel[3] == 128));
    assert_eq!(pixels[0][0], 0);
    assert_eq!(pixels[2][0], 255);
}

#[test]
fn test_float_pixels() {
    let dimensions = Dimensions::new(3, 3).unwrap();
    let mut pixels = mapped_buffer::<RgbaF32>(dimensions);
    let mut gradient = FnPainter::new(|pixels: &mut [RgbaF32]| {
        let last = (pixels.len() - 1) as f32;
        for (index, pixel) in pixels.iter_mut().enumerate() {
            let t = index as f32 / last;
            *pixel = [t, t, t, 1.0];
        }
    });
    gradient.paint(&mut pixels);

    assert_eq!(pixels[0], [0.0, 0.0, 0.0, 1.0]);
    assert_eq!(pixels[8], [1.0, 1.0, 1.0, 1.0]);
    assert_eq!(
        RgbaF32::byte_len(dimensions.pixel_count()),
        Some(9 * std::mem::size_of::<RgbaF32>())
    );
}
