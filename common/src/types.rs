//! Framebuffer geometry and colour types

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::CommonError;

/// Size of a pixel grid, in pixels.
///
/// A valid `Dimensions` always has non-zero sides, a pixel count that fits in
/// `usize`, and sides that fit in a GL `i32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Dimensions {
    width: usize,
    height: usize,
}

impl Dimensions {
    /// Validate and build a grid size.
    pub fn new(width: usize, height: usize) -> Result<Self, CommonError> {
        if width == 0 || height == 0 {
            return Err(CommonError::Validation(format!(
                "framebuffer dimensions must be non-zero: {width}x{height}"
            )));
        }
        let gl_max = i32::MAX as usize;
        if width > gl_max || height > gl_max {
            return Err(CommonError::Validation(format!(
                "framebuffer dimensions exceed the OpenGL limit: {width}x{height}"
            )));
        }
        if width.checked_mul(height).is_none() {
            return Err(CommonError::Validation(format!(
                "framebuffer pixel count overflows: {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of pixels (`width * height`).
    pub fn pixel_count(&self) -> usize {
        // checked in `new`
        self.width * self.height
    }

    /// Row-major index of `(x, y)`, or `None` outside the grid.
    pub fn index_of(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Inverse of [`Dimensions::index_of`].
    pub fn position_of(&self, index: usize) -> Option<(usize, usize)> {
        (index < self.pixel_count()).then(|| (index % self.width, index / self.width))
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl<'de> Deserialize<'de> for Dimensions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            width: usize,
            height: usize,
        }

        let raw = Raw::deserialize(deserializer)?;
        Dimensions::new(raw.width, raw.height).map_err(serde::de::Error::custom)
    }
}

/// RGBA colour used to clear the window before the framebuffer quad is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "[f32; 4]", into = "[f32; 4]")]
pub struct ClearColor([f32; 4]);

impl ClearColor {
    /// Build a colour, rejecting channels outside `0.0..=1.0`.
    pub fn new(rgba: [f32; 4]) -> Result<Self, CommonError> {
        for (channel, value) in ["r", "g", "b", "a"].iter().zip(rgba) {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(CommonError::Validation(format!(
                    "clear colour channel {channel} must be within 0.0..=1.0, got {value}"
                )));
            }
        }
        Ok(Self(rgba))
    }

    /// Channels as `[r, g, b, a]`.
    pub fn rgba(&self) -> [f32; 4] {
        self.0
    }
}

impl TryFrom<[f32; 4]> for ClearColor {
    type Error = CommonError;

    fn try_from(rgba: [f32; 4]) -> Result<Self, Self::Error> {
        Self::new(rgba)
    }
}

impl From<ClearColor> for [f32; 4] {
    fn from(color: ClearColor) -> Self {
        color.0
    }
}

impl FromStr for ClearColor {
    type Err = CommonError;

    /// Parse `"r,g,b"` or `"r,g,b,a"`; alpha defaults to 1.0.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let channels = s
            .split(',')
            .map(|part| {
                part.trim().parse::<f32>().map_err(|err| {
                    CommonError::Validation(format!("invalid colour channel '{part}': {err}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        match channels.as_slice() {
            [r, g, b] => Self::new([*r, *g, *b, 1.0]),
            [r, g, b, a] => Self::new([*r, *g, *b, *a]),
            _ => Err(CommonError::Validation(format!(
                "clear colour needs 3 or 4 comma separated channels, got '{s}'"
            ))),
        }
    }
}

impl fmt::Display for ClearColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.0;
        write!(f, "{r},{g},{b},{a}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_rejects_zero() {
        assert!(Dimensions::new(0, 10).is_err());
        assert!(Dimensions::new(10, 0).is_err());
    }

    #[test]
    fn test_dimensions_rejects_gl_overflow() {
        let too_wide = i32::MAX as usize + 1;
        assert!(Dimensions::new(too_wide, 1).is_err());
    }

    #[test]
    fn test_dimensions_rejects_pixel_count_overflow() {
        let side = i32::MAX as usize;
        if usize::BITS <= 32 {
            assert!(Dimensions::new(side, side).is_err());
        } else {
            assert!(Dimensions::new(side, side).is_ok());
        }
    }

    #[test]
    fn test_dimensions_index_roundtrip() {
        let dims = Dimensions::new(640, 480).unwrap();
        assert_eq!(dims.pixel_count(), 307_200);
        assert_eq!(dims.index_of(0, 0), Some(0));
        assert_eq!(dims.index_of(639, 0), Some(639));
        assert_eq!(dims.index_of(0, 1), Some(640));
        assert_eq!(dims.index_of(640, 0), None);
        assert_eq!(dims.index_of(0, 480), None);
        assert_eq!(dims.position_of(641), Some((1, 1)));
        assert_eq!(dims.position_of(307_200), None);
    }

    #[test]
    fn test_dimensions_display() {
        let dims = Dimensions::new(3, 2).unwrap();
        assert_eq!(dims.to_string(), "3x2");
    }

    #[test]
    fn test_dimensions_deserialize_validates() {
        let ok: Dimensions = serde_json::from_str(r#"{"width":4,"height":2}"#).unwrap();
        assert_eq!(ok.pixel_count(), 8);

        let err = serde_json::from_str::<Dimensions>(r#"{"width":0,"height":2}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_clear_color_default_is_transparent_black() {
        assert_eq!(ClearColor::default().rgba(), [0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_clear_color_parse() {
        let color: ClearColor = "0.3, 0.4, 0.7, 1.0".parse().unwrap();
        assert_eq!(color.rgba(), [0.3, 0.4, 0.7, 1.0]);

        let opaque: ClearColor = "1,0,0".parse().unwrap();
        assert_eq!(opaque.rgba(), [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_clear_color_parse_errors() {
        assert!("1,0".parse::<ClearColor>().is_err());
        assert!("1,0,0,0,0".parse::<ClearColor>().is_err());
        assert!("red,0,0".parse::<ClearColor>().is_err());
        assert!("1.5,0,0".parse::<ClearColor>().is_err());
        assert!("NaN,0,0".parse::<ClearColor>().is_err());
    }

    #[test]
    fn test_clear_color_serde_array() {
        let color = ClearColor::new([0.25, 0.5, 0.75, 1.0]).unwrap();
        let json = serde_json::to_string(&color).unwrap();
        assert_eq!(json, "[0.25,0.5,0.75,1.0]");

        let back: ClearColor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, color);

        assert!(serde_json::from_str::<ClearColor>("[2.0,0.0,0.0,1.0]").is_err());
    }
}
