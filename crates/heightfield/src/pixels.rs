//! Decoded image samples and the channel used as elevation.

use crate::error::{HeightfieldError, Result};
use std::fmt;
use std::str::FromStr;

/// Number of samples stored per pixel (RGBA).
pub const SAMPLES_PER_PIXEL: usize = 4;

/// Color channel selected as the height source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Channel {
    #[default]
    Red = 0,
    Green = 1,
    Blue = 2,
    /// Not offered by the viewer, but a valid sample offset.
    Alpha = 3,
}

impl Channel {
    /// The channels a user can pick as elevation.
    pub const SELECTABLE: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Maps a sample offset (0..=3) to a channel.
    pub fn from_index(index: u8) -> Result<Self> {
        match index {
            0 => Ok(Self::Red),
            1 => Ok(Self::Green),
            2 => Ok(Self::Blue),
            3 => Ok(Self::Alpha),
            other => Err(HeightfieldError::InvalidChannelSelector(other.to_string())),
        }
    }

    /// Offset of this channel inside an RGBA sample.
    #[inline]
    pub fn offset(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Alpha => "alpha",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = HeightfieldError;

    /// Accepts the user-facing selectors only; alpha is reachable through
    /// [`Channel::from_index`].
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" | "r" => Ok(Self::Red),
            "green" | "g" => Ok(Self::Green),
            "blue" | "b" => Ok(Self::Blue),
            _ => Err(HeightfieldError::InvalidChannelSelector(s.to_owned())),
        }
    }
}

/// Immutable RGBA samples of one decoded image, normalized to `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelField {
    width: u32,
    height: u32,
    samples: Vec<f32>,
}

impl PixelField {
    /// Builds a field from 8-bit RGBA bytes, dividing every byte by 255.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let expected = expected_samples(width, height)?;
        if bytes.len() as u64 != expected {
            return Err(HeightfieldError::SampleCountMismatch {
                expected,
                actual: bytes.len() as u64,
            });
        }

        let samples = bytes.iter().map(|&b| f32::from(b) / 255.0).collect();

        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Wraps samples that are already normalized.
    pub fn from_samples(width: u32, height: u32, samples: Vec<f32>) -> Result<Self> {
        let expected = expected_samples(width, height)?;
        if samples.len() as u64 != expected {
            return Err(HeightfieldError::SampleCountMismatch {
                expected,
                actual: samples.len() as u64,
            });
        }

        Ok(Self {
            width,
            height,
            samples,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of grid cells (one vertex each).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// RGBA sample of the pixel at `(x, y)`.
    pub fn rgba(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = (y as usize * self.width as usize + x as usize) * SAMPLES_PER_PIXEL;
        let px = &self.samples[start..start + SAMPLES_PER_PIXEL];
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// `width * height * 4`, rejecting empty grids.
pub(crate) fn expected_samples(width: u32, height: u32) -> Result<u64> {
    if width == 0 || height == 0 {
        return Err(HeightfieldError::dims(width, height, "width and height must be positive"));
    }
    Ok(u64::from(width) * u64::from(height) * SAMPLES_PER_PIXEL as u64)
}
