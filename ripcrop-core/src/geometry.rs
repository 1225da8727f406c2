//! Frame geometry: crop rectangles, frame sizes and crop margins.
//!
//! A [`Rectangle`] describes the visible picture inside a frame as
//! `width:height:x:y`, the same order ffmpeg's `cropdetect` reports.
//! Encoders downstream want the complementary view, four margins trimmed
//! from each edge, which is [`CropMargins`].

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Immutable dimensions of the full video frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for FrameSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A region of a frame; `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rectangle {
    pub width: u32,
    pub height: u32,
    pub x: u32,
    pub y: u32,
}

impl Rectangle {
    #[must_use]
    pub const fn new(width: u32, height: u32, x: u32, y: u32) -> Self {
        Self {
            width,
            height,
            x,
            y,
        }
    }

    /// The whole frame, meaning "nothing to crop".
    #[must_use]
    pub const fn full_frame(size: FrameSize) -> Self {
        Self::new(size.width, size.height, 0, 0)
    }

    /// The most aggressive crop possible: zero size anchored at the far corner.
    ///
    /// Used as the identity for [`Rectangle::union`], since any real detection
    /// is at least as wide and tall and starts no further right or down.
    #[must_use]
    pub const fn inverse_extremum(size: FrameSize) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    #[must_use]
    pub fn is_full_frame(&self, size: FrameSize) -> bool {
        *self == Self::full_frame(size)
    }

    /// Loosest rectangle covering both inputs componentwise.
    ///
    /// Widths and heights take the maximum, offsets take the minimum. This is
    /// not a geometric bounding box (an offset shift does not grow the size);
    /// it mirrors how cropdetect reports are aggregated.
    #[must_use]
    pub fn union(&self, other: &Rectangle) -> Rectangle {
        Rectangle {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
            x: self.x.min(other.x),
            y: self.y.min(other.y),
        }
    }

    /// Converts to edge margins relative to `size`.
    #[must_use]
    pub fn to_margins(&self, size: FrameSize) -> CropMargins {
        CropMargins {
            top: self.y,
            bottom: size.height.saturating_sub(self.y).saturating_sub(self.height),
            left: self.x,
            right: size.width.saturating_sub(self.x).saturating_sub(self.width),
        }
    }

    /// Rebuilds the rectangle that leaves `margins` around it in a frame of `size`.
    #[must_use]
    pub fn from_margins(margins: CropMargins, size: FrameSize) -> Rectangle {
        Rectangle {
            width: size
                .width
                .saturating_sub(margins.left)
                .saturating_sub(margins.right),
            height: size
                .height
                .saturating_sub(margins.top)
                .saturating_sub(margins.bottom),
            x: margins.left,
            y: margins.top,
        }
    }

    /// Whether the rectangle lies inside a frame of `size`.
    #[must_use]
    pub fn fits_within(&self, size: FrameSize) -> bool {
        u64::from(self.x) + u64::from(self.width) <= u64::from(size.width)
            && u64::from(self.y) + u64::from(self.height) <= u64::from(size.height)
    }

    /// ffmpeg crop filter, `crop=w:h:x:y`.
    #[must_use]
    pub fn to_ffmpeg_filter(&self) -> String {
        format!("crop={}:{}:{}:{}", self.width, self.height, self.x, self.y)
    }

    /// Arguments for mpv's `drawbox` preview, `x:y:w:h`.
    #[must_use]
    pub fn to_mpv_drawbox(&self) -> String {
        format!("{}:{}:{}:{}", self.x, self.y, self.width, self.height)
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}:{}", self.width, self.height, self.x, self.y)
    }
}

/// Pixels to trim from each edge of the frame.
///
/// Renders as `top:bottom:left:right`, the crop argument format of the
/// downstream encoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CropMargins {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl CropMargins {
    /// True when nothing is cropped on any side.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for CropMargins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}:{}", self.top, self.bottom, self.left, self.right)
    }
}

impl FromStr for CropMargins {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values: Vec<u32> = s
            .trim()
            .split(':')
            .map(|part| part.parse::<u32>())
            .collect::<Result<_, _>>()
            .map_err(|e| CoreError::InvalidInput(format!("Invalid crop margins '{s}': {e}")))?;

        match values.as_slice() {
            [top, bottom, left, right] => Ok(CropMargins {
                top: *top,
                bottom: *bottom,
                left: *left,
                right: *right,
            }),
            _ => Err(CoreError::InvalidInput(format!(
                "Invalid crop margins '{s}': expected top:bottom:left:right"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HD: FrameSize = FrameSize::new(1920, 1080);

    #[test]
    fn test_margins_from_centered_rectangle() {
        let rect = Rectangle::new(1840, 1036, 40, 22);
        let margins = rect.to_margins(HD);
        assert_eq!(
            margins,
            CropMargins {
                top: 22,
                bottom: 22,
                left: 40,
                right: 40
            }
        );
        assert_eq!(margins.to_string(), "22:22:40:40");
        assert_eq!(Rectangle::from_margins(margins, HD), rect);
    }

    #[test]
    fn test_margins_from_letterbox() {
        let rect = Rectangle::new(1920, 800, 0, 140);
        assert_eq!(rect.to_margins(HD).to_string(), "140:140:0:0");
    }

    #[test]
    fn test_full_frame_has_no_margins() {
        let margins = Rectangle::full_frame(HD).to_margins(HD);
        assert!(margins.is_empty());
        assert_eq!(margins.to_string(), "0:0:0:0");
    }

    #[test]
    fn test_union_takes_loosest_components() {
        let a = Rectangle::new(1900, 800, 10, 140);
        let b = Rectangle::new(1880, 820, 20, 130);
        assert_eq!(a.union(&b), Rectangle::new(1900, 820, 10, 130));
    }

    #[test]
    fn test_inverse_extremum_is_union_identity() {
        let rect = Rectangle::new(100, 50, 10, 10);
        let identity = Rectangle::inverse_extremum(FrameSize::new(200, 100));
        assert_eq!(identity.union(&rect), rect);
        assert_eq!(rect.union(&identity), rect);
    }

    #[test]
    fn test_fits_within() {
        assert!(Rectangle::new(1920, 800, 0, 140).fits_within(HD));
        assert!(!Rectangle::new(1920, 800, 10, 140).fits_within(HD));
        // The fold's starting state lies outside the frame until a sample lands.
        assert!(!Rectangle::inverse_extremum(HD).fits_within(FrameSize::new(1, 1)));
    }

    #[test]
    fn test_tool_formats() {
        let rect = Rectangle::new(1920, 800, 0, 140);
        assert_eq!(rect.to_ffmpeg_filter(), "crop=1920:800:0:140");
        assert_eq!(rect.to_mpv_drawbox(), "0:140:1920:800");
        assert_eq!(rect.to_string(), "1920:800:0:140");
    }

    #[test]
    fn test_parse_margins() {
        let margins: CropMargins = "10:40:10:90".parse().unwrap();
        assert_eq!(
            margins,
            CropMargins {
                top: 10,
                bottom: 40,
                left: 10,
                right: 90
            }
        );

        assert!("10:40:10".parse::<CropMargins>().is_err());
        assert!("10:40:10:90:1".parse::<CropMargins>().is_err());
        assert!("a:b:c:d".parse::<CropMargins>().is_err());
        assert!("".parse::<CropMargins>().is_err());
    }
}
