//! Demo painters
//!
//! Test patterns for checking that the framebuffer presents pixels where the
//! painter put them: colour order, row order, edges and scaling.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use cpf::{Dimensions, Painter, Rgba8};
use cpf_common::{ViewerError, ViewerResult};
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

const RED: Rgba8 = [255, 0, 0, 0];
const GREEN: Rgba8 = [0, 255, 0, 0];
const BLUE: Rgba8 = [0, 0, 255, 0];
const YELLOW: Rgba8 = [255, 255, 0, 0];
const CYAN: Rgba8 = [0, 255, 255, 0];
const CLEAR: Rgba8 = [0, 0, 0, 0];
const WHITE: Rgba8 = [255, 255, 255, 255];

/// Pixels marked at each corner by [`AlignmentPainter`].
pub const ALIGNMENT_MARK_LEN: usize = 8;

/// Half-thickness of the [`LinePainter`] diagonal.
pub const LINE_HALF_THICKNESS: usize = 8;

/// Selectable demo pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PainterKind {
    /// Repeating byte gradient.
    Gradient,
    /// Red, green, blue and clear bands.
    Bands,
    /// Corner alignment marks.
    Alignment,
    /// Thick main diagonal.
    #[default]
    Line,
    /// An image file scaled to the framebuffer.
    Image,
}

impl std::str::FromStr for PainterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true)
    }
}

/// Build the painter for `kind`. `image` is required for [`PainterKind::Image`].
pub fn build_painter(
    kind: PainterKind,
    dimensions: Dimensions,
    image: Option<&Path>,
) -> ViewerResult<Box<dyn Painter<Pixel = Rgba8>>> {
    let painter: Box<dyn Painter<Pixel = Rgba8>> = match kind {
        PainterKind::Gradient => Box::new(GradientPainter),
        PainterKind::Bands => Box::new(BandsPainter::new(dimensions)),
        PainterKind::Alignment => Box::new(AlignmentPainter::new(dimensions)),
        PainterKind::Line => Box::new(LinePainter::new(dimensions)),
        PainterKind::Image => {
            let path = image.ok_or(ViewerError::MissingImagePath)?;
            Box::new(ImagePainter::open(path, dimensions)?)
        }
    };
    tracing::info!(painter = ?kind, %dimensions, "Painter ready");
    Ok(painter)
}

/// Pixel `i` gets `[c + 1, c + 2, c + 3, 255]` where `c` advances by 4 per
/// pixel and wraps at 256.
#[derive(Debug, Default, Clone, Copy)]
pub struct GradientPainter;

impl Painter for GradientPainter {
    type Pixel = Rgba8;

    fn paint(&mut self, pixels: &mut [Rgba8]) {
        let mut c: u8 = 0;
        for pixel in pixels {
            *pixel = [c.wrapping_add(1), c.wrapping_add(2), c.wrapping_add(3), 255];
            c = c.wrapping_add(4);
        }
    }
}

/// Four bands of `width / 4 * height` pixels each, cycling red, green, blue
/// and clear.
#[derive(Debug, Clone, Copy)]
pub struct BandsPainter {
    band_len: usize,
}

impl BandsPainter {
    /// Bands sized for `dimensions`.
    pub fn new(dimensions: Dimensions) -> Self {
        let band_len = (dimensions.width() / 4 * dimensions.height()).max(1);
        Self { band_len }
    }
}

impl Painter for BandsPainter {
    type Pixel = Rgba8;

    fn paint(&mut self, pixels: &mut [Rgba8]) {
        for (index, pixel) in pixels.iter_mut().enumerate() {
            *pixel = match (index / self.band_len) % 4 {
                0 => RED,
                1 => GREEN,
                2 => BLUE,
                _ => CLEAR,
            };
        }
    }
}

/// Marks the pixels at the ends of the first and last rows and leaves the
/// rest untouched: red at the start of the buffer, yellow just before the
/// end of row 0, green just after the start of the last row, cyan just
/// before the end of the buffer.
#[derive(Debug, Clone, Copy)]
pub struct AlignmentPainter {
    dimensions: Dimensions,
}

impl AlignmentPainter {
    /// Marks for `dimensions`.
    pub fn new(dimensions: Dimensions) -> Self {
        Self { dimensions }
    }

    fn mark(&self, index: usize) -> Option<Rgba8> {
        let width = self.dimensions.width();
        let total = self.dimensions.pixel_count();
        let last_row = total - width;
        let within = |low: usize, high: usize| low < index && index < high;

        // later marks win where they overlap on tiny grids
        let mut color = None;
        if index < ALIGNMENT_MARK_LEN {
            color = Some(RED);
        }
        if within(width.saturating_sub(ALIGNMENT_MARK_LEN), width) {
            color = Some(YELLOW);
        }
        if within(last_row, last_row + ALIGNMENT_MARK_LEN) {
            color = Some(GREEN);
        }
        if within(total.saturating_sub(ALIGNMENT_MARK_LEN), total) {
            color = Some(CYAN);
        }
        color
    }
}

impl Painter for AlignmentPainter {
    type Pixel = Rgba8;

    fn paint(&mut self, pixels: &mut [Rgba8]) {
        for (index, pixel) in pixels.iter_mut().enumerate() {
            if let Some(color) = self.mark(index) {
                *pixel = color;
            }
        }
    }
}

/// Opaque white where `|y - x| <= 8`; other pixels are left untouched.
#[derive(Debug, Clone, Copy)]
pub struct LinePainter {
    dimensions: Dimensions,
}

impl LinePainter {
    /// Diagonal across `dimensions`.
    pub fn new(dimensions: Dimensions) -> Self {
        Self { dimensions }
    }
}

impl Painter for LinePainter {
    type Pixel = Rgba8;

    fn paint(&mut self, pixels: &mut [Rgba8]) {
        let width = self.dimensions.width();
        for (y, row) in pixels.chunks_exact_mut(width).enumerate() {
            let first = y.saturating_sub(LINE_HALF_THICKNESS);
            let last = (y + LINE_HALF_THICKNESS).min(width - 1);
            if first > last {
                continue;
            }
            row[first..=last].fill(WHITE);
        }
    }
}

/// Copies a decoded image, scaled once to the framebuffer size.
#[derive(Clone)]
pub struct ImagePainter {
    source: PathBuf,
    pixels: Vec<Rgba8>,
}

impl std::fmt::Debug for ImagePainter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImagePainter")
            .field("source", &self.source)
            .field("pixels", &self.pixels.len())
            .finish()
    }
}

impl ImagePainter {
    /// Decode `path` and scale it to `dimensions`.
    pub fn open(path: &Path, dimensions: Dimensions) -> ViewerResult<Self> {
        let image = image::open(path)
            .map_err(|err| ViewerError::Image(format!("{}: {err}", path.display())))?
            .to_rgba8();
        tracing::debug!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "Decoded image"
        );
        Self::from_rgba(path.to_path_buf(), image, dimensions)
    }

    /// Scale an already decoded image to `dimensions`.
    pub fn from_rgba(
        source: PathBuf,
        image: image::RgbaImage,
        dimensions: Dimensions,
    ) -> ViewerResult<Self> {
        let width = u32::try_from(dimensions.width())
            .map_err(|_| ViewerError::Image(format!("width {dimensions} too large")))?;
        let height = u32::try_from(dimensions.height())
            .map_err(|_| ViewerError::Image(format!("height {dimensions} too large")))?;

        let scaled = if image.dimensions() == (width, height) {
            image
        } else {
            image::imageops::resize(&image, width, height, FilterType::Triangle)
        };
        let pixels = scaled.pixels().map(|pixel| pixel.0).collect();
        Ok(Self { source, pixels })
    }
}

impl Painter for ImagePainter {
    type Pixel = Rgba8;

    fn paint(&mut self, pixels: &mut [Rgba8]) {
        let len = pixels.len().min(self.pixels.len());
        pixels[..len].copy_from_slice(&self.pixels[..len]);
    }
}
